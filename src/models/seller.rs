// src/models/seller.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{trimmed, validate_code};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "Julien Martin")]
    pub name: String,
    #[schema(example = "JM01")]
    pub code: String,
    pub is_active: bool,

    // Associação N:N com estabelecimentos (array_agg no SELECT)
    pub establishment_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerPayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire (100 caractères maximum)."))]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        length(min = 1, max = 20, message = "Le code est obligatoire (20 caractères maximum)."),
        custom(function = "validate_code")
    )]
    #[schema(example = "JM01")]
    pub code: String,

    #[serde(default)]
    pub establishment_ids: Vec<Uuid>,

    #[serde(default = "crate::models::default_true")]
    pub is_active: bool,
}
