// src/models/tax_rate.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{trimmed, validate_code, validate_percentage};

// Taxas nunca são apagadas fisicamente (auditoria fiscal): são arquivadas.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "TVA normale")]
    pub name: String,
    #[schema(example = "20.00")]
    pub rate: Decimal,
    #[schema(example = "TVA20")]
    pub code: String,
    pub is_default: bool,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxRatePayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire (100 caractères maximum)."))]
    #[schema(example = "TVA normale")]
    pub name: String,

    #[validate(custom(function = "validate_percentage"))]
    #[schema(example = "20.00")]
    pub rate: Decimal,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        length(min = 1, max = 10, message = "Le code est obligatoire (10 caractères maximum)."),
        custom(function = "validate_code")
    )]
    #[schema(example = "TVA20")]
    pub code: String,

    #[serde(default)]
    pub is_default: bool,
}
