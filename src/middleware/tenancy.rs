// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError, Localized},
    middleware::i18n::Locale,
    models::auth::AuthContext,
};

// O tenant da requisição. Só nasce a partir da sessão autenticada (ou de
// código confiável, como o seed), e todo repositório exige um.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    id: Uuid,
}

impl TenantContext {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Para fluxos internos que já conhecem o tenant (seed, testes).
    pub(crate) fn trusted(id: Uuid) -> Self {
        Self { id }
    }

    pub fn from_auth(ctx: &AuthContext) -> Result<Self, AppError> {
        ctx.tenant_id
            .map(|id| Self { id })
            .ok_or(AppError::MissingTenant)
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);

        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .ok_or(AppError::InvalidToken)
            .localized(&locale)?;

        TenantContext::from_auth(ctx).localized(&locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;

    #[test]
    fn session_without_tenant_is_rejected() {
        let ctx = AuthContext { user_id: Uuid::new_v4(), tenant_id: None, role: UserRole::Admin };
        assert!(matches!(TenantContext::from_auth(&ctx), Err(AppError::MissingTenant)));
    }

    #[test]
    fn session_tenant_is_used() {
        let tenant_id = Uuid::new_v4();
        let ctx = AuthContext { user_id: Uuid::new_v4(), tenant_id: Some(tenant_id), role: UserRole::Cashier };
        assert_eq!(TenantContext::from_auth(&ctx).unwrap().id(), tenant_id);
    }
}
