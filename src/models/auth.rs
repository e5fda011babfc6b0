// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::trimmed;

// Mapeia o CREATE TYPE user_role do banco.
// A ordem das variantes define a hierarquia: Cashier < Manager < Admin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Cashier,
    Manager,
    Admin,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email(message = "L'adresse e-mail est invalide."))]
    #[schema(example = "gerant@boutique.fr")]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid, // Subject (ID do usuário)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    pub role: UserRole,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

// A identidade resolvida pelo auth_guard e guardada nas extensions da requisição
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub role: UserRole,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            tenant_id: claims.tenant_id,
            role: claims.role,
        }
    }
}

// GET /api/auth
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub authenticated: bool,
    pub user_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    pub role: Option<UserRole>,
}

impl SessionInfo {
    pub fn anonymous() -> Self {
        Self { authenticated: false, user_id: None, tenant_id: None, role: None }
    }
}

impl From<&AuthContext> for SessionInfo {
    fn from(ctx: &AuthContext) -> Self {
        Self {
            authenticated: true,
            user_id: Some(ctx.user_id),
            tenant_id: ctx.tenant_id,
            role: Some(ctx.role),
        }
    }
}
