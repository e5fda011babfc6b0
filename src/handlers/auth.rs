// src/handlers/auth.rs

use axum::{extract::State, response::IntoResponse, Extension};

use crate::{
    common::{
        error::{ApiError, Localized},
        response,
    },
    config::AppState,
    middleware::{i18n::Locale, json::ValidatedJson},
    models::auth::{AuthContext, AuthResponse, LoginPayload, SessionInfo},
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token JWT e usuário", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    ValidatedJson(payload): ValidatedJson<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let auth = app_state
        .auth_service
        .login(&app_state.db_pool, &payload.email, &payload.password)
        .await
        .localized(&locale)?;

    Ok(response::ok(auth))
}

// Sessão atual. Pública: sem token (ou com token inválido) responde anonymous.
#[utoipa::path(
    get,
    path = "/api/auth",
    tag = "Auth",
    responses((status = 200, description = "Sessão atual", body = SessionInfo))
)]
pub async fn session(session: Option<Extension<AuthContext>>) -> impl IntoResponse {
    let info = match session {
        Some(Extension(ctx)) => SessionInfo::from(&ctx),
        None => SessionInfo::anonymous(),
    };
    response::ok(info)
}
