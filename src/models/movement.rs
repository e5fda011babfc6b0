// src/models/movement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::trimmed_opt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Entry,
    Exit,
    Adjustment,
    Transfer,
}

// Movimentação de estoque. O número é gerado no banco (next_movement_number).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = 42)]
    pub number: i64,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub establishment_id: Option<Uuid>,
    pub comment: Option<String>,
    pub created_by: Option<Uuid>,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementPayload {
    #[serde(rename = "type")]
    pub movement_type: MovementType,

    pub establishment_id: Option<Uuid>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 500, message = "Le commentaire ne peut pas dépasser 500 caractères."))]
    pub comment: Option<String>,
}
