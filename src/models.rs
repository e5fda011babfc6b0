pub mod auth;
pub mod brand;
pub mod client;
pub mod closure;
pub mod establishment;
pub mod movement;
pub mod register;
pub mod seed;
pub mod seller;
pub mod supplier;
pub mod tax_rate;
pub mod tenancy;
pub mod variation;

use serde::Deserialize;
use utoipa::IntoParams;

// Filtro comum das listagens de entidades arquiváveis
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ArchiveFilter {
    #[serde(default)]
    pub include_archived: bool,
}

pub(crate) fn default_true() -> bool {
    true
}
