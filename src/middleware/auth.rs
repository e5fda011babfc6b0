// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::error::{ApiError, AppError, Localized},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::AuthContext,
};

// Rotas da API acessíveis sem sessão
pub const PUBLIC_PATHS: &[&str] = &[
    "/api/login",
    "/api/auth",
    "/api/database/seed",
    "/api/health",
];

/// Só `/api/*` é protegido; docs e afins passam direto.
pub fn is_public_path(path: &str) -> bool {
    if !path.starts_with("/api/") {
        return true;
    }
    let normalized = path.trim_end_matches('/');
    PUBLIC_PATHS.contains(&normalized)
}

// O middleware em si: resolve o Bearer em AuthContext e o insere nas extensions.
// Em rotas públicas o token é opcional (mas, se válido, é anexado mesmo assim).
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());
    let public = is_public_path(request.uri().path());
    let bearer = request.headers().typed_get::<Authorization<Bearer>>();

    match bearer {
        Some(Authorization(bearer)) => match app_state.auth_service.validate_token(bearer.token()) {
            Ok(ctx) => {
                request.extensions_mut().insert(ctx);
            }
            Err(err) if !public => return Err(err.to_api_error(&locale)),
            Err(_) => {}
        },
        None if !public => return Err(AppError::InvalidToken.to_api_error(&locale)),
        None => {}
    }

    Ok(next.run(request).await)
}

// Extrator para obter a sessão autenticada diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
            .localized(&locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_is_exact() {
        assert!(is_public_path("/api/login"));
        assert!(is_public_path("/api/auth"));
        assert!(is_public_path("/api/auth/"));
        assert!(is_public_path("/api/database/seed"));
        assert!(!is_public_path("/api/authorize"));
        assert!(!is_public_path("/api/login/extra"));
        assert!(!is_public_path("/api/clients"));
        assert!(!is_public_path("/api/tax-rates/123"));
    }

    #[test]
    fn paths_outside_api_are_not_guarded() {
        assert!(is_public_path("/swagger-ui/"));
        assert!(is_public_path("/api-docs/openapi.json"));
    }
}
