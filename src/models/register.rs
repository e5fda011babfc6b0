// src/models/register.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::trimmed;

// Caixa registradora. Nunca é apagada, apenas desativada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    pub establishment_id: Uuid,
    #[schema(example = "Caisse 1")]
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(required(message = "L'établissement est obligatoire."))]
    pub establishment_id: Option<Uuid>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire (100 caractères maximum)."))]
    #[schema(example = "Caisse 1")]
    pub name: String,

    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RegisterQuery {
    pub establishment_id: Option<Uuid>,
}
