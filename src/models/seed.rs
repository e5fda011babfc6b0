// src/models/seed.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::trimmed;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedPayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom de l'organisation est obligatoire."))]
    #[schema(example = "Boutique Démo")]
    pub tenant_name: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    #[schema(example = "admin@demo.fr")]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Le nom est obligatoire (100 caractères maximum)."))]
    #[schema(example = "Camille Admin")]
    pub full_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub establishment_id: Uuid,
    pub register_id: Uuid,
    pub tax_rate_ids: Vec<Uuid>,
}
