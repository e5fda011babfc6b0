// src/handlers/database.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    response::IntoResponse,
};

use crate::{
    common::{
        error::{ApiError, AppError, Localized},
        i18n::Resource,
        response,
    },
    config::AppState,
    middleware::{i18n::Locale, json::ValidatedJson},
    models::seed::{SeedPayload, SeedReport},
};

// Com o seed desabilitado a rota se comporta como inexistente. Roda antes
// do corpo ser lido, então nem a validação denuncia a rota.
pub struct SeedEnabled;

impl FromRequestParts<AppState> for SeedEnabled {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if state.settings.seed_enabled {
            Ok(SeedEnabled)
        } else {
            let locale = Locale::from_headers(&parts.headers);
            Err(AppError::NotFound(Resource::Route).to_api_error(&locale))
        }
    }
}

// POST /api/database/seed
#[utoipa::path(
    post,
    path = "/api/database/seed",
    tag = "Database",
    request_body = SeedPayload,
    responses(
        (status = 201, description = "Loja de demonstração criada", body = SeedReport),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Seed desabilitado"),
        (status = 500, description = "E-mail já utilizado")
    )
)]
pub async fn seed(
    State(app_state): State<AppState>,
    locale: Locale,
    _enabled: SeedEnabled,
    ValidatedJson(payload): ValidatedJson<SeedPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state.seed_service.seed(&payload).await.localized(&locale)?;
    Ok(response::created(report))
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Database",
    responses((status = 200, description = "Serviço no ar"))
)]
pub async fn health() -> impl IntoResponse {
    response::ok("OK")
}
