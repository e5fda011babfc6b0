// src/db/client_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantContext,
    models::client::{Client, ClientPayload},
};

#[derive(Clone, Default)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
    }

    /// Lista os clientes do tenant, com busca opcional por nome, e-mail ou telefone
    pub async fn list<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        search: Option<&str>,
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE tenant_id = $1
            AND (
                $2::text IS NULL
                OR name ILIKE $2 ESCAPE '\'
                OR email ILIKE $2 ESCAPE '\'
                OR phone ILIKE $2 ESCAPE '\'
            )
            ORDER BY name ASC
            "#,
        )
        .bind(tenant.id())
        .bind(pattern)
        .fetch_all(executor)
        .await?;

        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE tenant_id = $1 AND id = $2")
            .bind(tenant.id())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(client)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &ClientPayload,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (
                tenant_id, name, email, phone, address, city, postal_code, notes,
                is_loyal, discount_rate
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.postal_code)
        .bind(&input.notes)
        .bind(input.is_loyal)
        .bind(input.discount_rate)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &ClientPayload,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET
                name = $3, email = $4, phone = $5, address = $6, city = $7,
                postal_code = $8, notes = $9, is_loyal = $10, discount_rate = $11,
                updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.postal_code)
        .bind(&input.notes)
        .bind(input.is_loyal)
        .bind(input.discount_rate)
        .fetch_optional(executor)
        .await?;

        Ok(client)
    }

    /// Clientes são os únicos removidos de fato. Retorna se a linha existia.
    pub async fn delete<'e, E>(&self, executor: E, tenant: &TenantContext, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE tenant_id = $1 AND id = $2")
            .bind(tenant.id())
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// `%` e `_` digitados na busca são literais, não curingas do ILIKE
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn search_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), r"50\%\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert_eq!(escape_like("Dupont"), "Dupont");
    }
}
