// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AuthContext, AuthResponse, Claims, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: &str, token_ttl_hours: i64) -> Self {
        Self {
            user_repo,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    pub async fn login<'e, E>(&self, executor: E, email: &str, password: &str) -> Result<AuthResponse, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Usuário inexistente, inativo ou senha errada: mesma resposta
        let user = self
            .user_repo
            .find_by_email(executor, email)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        tracing::info!(user_id = %user.id, tenant_id = ?user.tenant_id, "🔑 Login efetuado");

        Ok(AuthResponse { token, user })
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    /// Sem ida ao banco: o token carrega tudo o que a requisição precisa.
    pub fn validate_token(&self, token: &str) -> Result<AuthContext, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims.into())
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user.id,
            tenant_id: user.tenant_id,
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use uuid::Uuid;

    const SECRET: &str = "segredo-de-teste-com-32-bytes!!!";

    fn user(tenant_id: Option<Uuid>, role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            tenant_id,
            email: "gerant@boutique.fr".into(),
            password_hash: String::new(),
            full_name: "Gérant".into(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_roundtrip_keeps_identity() {
        let service = AuthService::new(UserRepository::new(), SECRET, 12);
        let tenant_id = Uuid::new_v4();
        let user = user(Some(tenant_id), UserRole::Manager);

        let token = service.create_token(&user).unwrap();
        let ctx = service.validate_token(&token).unwrap();

        assert_eq!(ctx.user_id, user.id);
        assert_eq!(ctx.tenant_id, Some(tenant_id));
        assert_eq!(ctx.role, UserRole::Manager);
    }

    #[test]
    fn tenantless_token_is_still_valid() {
        let service = AuthService::new(UserRepository::new(), SECRET, 12);
        let token = service.create_token(&user(None, UserRole::Admin)).unwrap();
        assert_eq!(service.validate_token(&token).unwrap().tenant_id, None);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = AuthService::new(UserRepository::new(), SECRET, 12);
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            tenant_id: Some(Uuid::new_v4()),
            role: UserRole::Cashier,
            exp: (now - Duration::hours(2)).timestamp() as usize,
            iat: (now - Duration::hours(14)).timestamp() as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &service.encoding_key).unwrap();

        assert!(matches!(service.validate_token(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = AuthService::new(UserRepository::new(), "outro-segredo-qualquer-32-bytes!", 12);
        let verifier = AuthService::new(UserRepository::new(), SECRET, 12);
        let token = issuer.create_token(&user(Some(Uuid::new_v4()), UserRole::Admin)).unwrap();

        assert!(matches!(verifier.validate_token(&token), Err(AppError::InvalidToken)));
        assert!(matches!(verifier.validate_token("lixo"), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn hashed_password_verifies() {
        let service = AuthService::new(UserRepository::new(), SECRET, 12);
        let hashed = service.hash_password("motdepasse").await.unwrap();
        assert!(verify("motdepasse", &hashed).unwrap());
        assert!(!verify("autre", &hashed).unwrap());
    }
}
