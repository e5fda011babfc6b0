// src/models/client.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{trimmed, trimmed_opt, validate_percentage};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    #[schema(ignore)] // O tenant vem da sessão
    pub tenant_id: Uuid,
    #[schema(example = "Marie Dupont")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,

    // Fidelidade
    pub is_loyal: bool,
    #[schema(example = "5.00")]
    pub discount_rate: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Usado tanto no create quanto no update (PUT substitui o registro)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 150, message = "Le nom est obligatoire (150 caractères maximum)."))]
    #[schema(example = "Marie Dupont")]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 30, message = "Le téléphone ne peut pas dépasser 30 caractères."))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 500, message = "L'adresse ne peut pas dépasser 500 caractères."))]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 100, message = "La ville ne peut pas dépasser 100 caractères."))]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 20, message = "Le code postal ne peut pas dépasser 20 caractères."))]
    pub postal_code: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(max = 500, message = "Les notes ne peuvent pas dépasser 500 caractères."))]
    pub notes: Option<String>,

    #[serde(default)]
    pub is_loyal: bool,

    #[serde(default)]
    #[validate(custom(function = "validate_percentage"))]
    #[schema(example = "5.00")]
    pub discount_rate: Decimal,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ClientQuery {
    /// Busca por nome, e-mail ou telefone
    pub search: Option<String>,
}
