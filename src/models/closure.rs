// src/models/closure.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Fechamento: o dia de um caixa está finalizado e imutável
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Closure {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    pub register_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2025-06-30")]
    pub closure_date: NaiveDate,
    pub closed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosurePayload {
    #[validate(required(message = "La caisse est obligatoire."))]
    pub register_id: Option<Uuid>,

    // Se ausente, fecha o dia de hoje (UTC)
    #[schema(value_type = Option<String>, format = Date, example = "2025-06-30")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CheckClosureQuery {
    #[validate(required(message = "La caisse est obligatoire."))]
    pub register_id: Option<Uuid>,
    #[param(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ClosureListQuery {
    pub register_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosureStatus {
    pub closed: bool,
    pub closure: Option<Closure>,
}
