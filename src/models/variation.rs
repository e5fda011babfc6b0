// src/models/variation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::trimmed;

// --- Grupo (Ex: "Taille", "Couleur") ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariationGroup {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "Taille")]
    pub name: String,
    pub sort_order: i32,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Variação (Ex: "S", "M", "L") ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    pub group_id: Uuid,
    #[schema(example = "M")]
    pub name: String,
    pub sort_order: i32,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariationGroupPayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire (100 caractères maximum)."))]
    #[schema(example = "Taille")]
    pub name: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 10000, message = "L'ordre doit être compris entre 0 et 10000."))]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariationPayload {
    #[validate(required(message = "Le groupe est obligatoire."))]
    pub group_id: Option<Uuid>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire (100 caractères maximum)."))]
    #[schema(example = "M")]
    pub name: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 10000, message = "L'ordre doit être compris entre 0 et 10000."))]
    pub sort_order: i32,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VariationQuery {
    pub group_id: Option<Uuid>,
    #[serde(default)]
    pub include_archived: bool,
}
