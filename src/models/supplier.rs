// src/models/supplier.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{trimmed, trimmed_opt};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "Textiles du Nord")]
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire (100 caractères maximum)."))]
    #[schema(example = "Textiles du Nord")]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 100, message = "Le nom du contact ne peut pas dépasser 100 caractères."))]
    pub contact_name: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 30, message = "Le téléphone ne peut pas dépasser 30 caractères."))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 500, message = "L'adresse ne peut pas dépasser 500 caractères."))]
    pub address: Option<String>,
}
