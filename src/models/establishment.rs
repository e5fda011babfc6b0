// src/models/establishment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{trimmed, trimmed_opt};

// O estabelecimento é a unidade física: agrupa caixas e vendedores
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Establishment {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "Boutique Lyon Centre")]
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentPayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire (100 caractères maximum)."))]
    #[schema(example = "Boutique Lyon Centre")]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 500, message = "L'adresse ne peut pas dépasser 500 caractères."))]
    pub address: Option<String>,

    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
}
