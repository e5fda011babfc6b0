// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::{ApiError, AppError, Localized},
    middleware::i18n::Locale,
    models::auth::{AuthContext, UserRole},
};

/// 1. O Trait que define o papel mínimo exigido
pub trait RoleRequirement: Send + Sync + 'static {
    fn minimum() -> UserRole;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<R>(pub PhantomData<R>);

pub fn check_role(ctx: &AuthContext, minimum: UserRole) -> Result<(), AppError> {
    if ctx.role >= minimum {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

// 3. Implementação do FromRequestParts
impl<R, S> FromRequestParts<S> for RequireRole<R>
where
    R: RoleRequirement,
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

        check_role(ctx, R::minimum()).localized(&locale)?;

        Ok(RequireRole(PhantomData))
    }
}

// ---
// PAPÉIS EXIGIDOS (TIPOS)
// ---

/// Alterações de configuração da loja (taxas, caixas, vendedores...)
pub struct Manager;
impl RoleRequirement for Manager {
    fn minimum() -> UserRole {
        UserRole::Manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ctx(role: UserRole) -> AuthContext {
        AuthContext { user_id: Uuid::new_v4(), tenant_id: Some(Uuid::new_v4()), role }
    }

    #[test]
    fn role_hierarchy() {
        assert!(check_role(&ctx(UserRole::Admin), UserRole::Manager).is_ok());
        assert!(check_role(&ctx(UserRole::Manager), UserRole::Manager).is_ok());
        assert!(matches!(
            check_role(&ctx(UserRole::Cashier), UserRole::Manager),
            Err(AppError::Forbidden)
        ));
    }
}
