// src/db/establishment_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantContext,
    models::establishment::{Establishment, EstablishmentPayload},
};

#[derive(Clone, Default)]
pub struct EstablishmentRepository;

impl EstablishmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, tenant: &TenantContext) -> Result<Vec<Establishment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let establishments = sqlx::query_as::<_, Establishment>(
            "SELECT * FROM establishments WHERE tenant_id = $1 ORDER BY name ASC",
        )
        .bind(tenant.id())
        .fetch_all(executor)
        .await?;
        Ok(establishments)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Establishment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let establishment = sqlx::query_as::<_, Establishment>(
            "SELECT * FROM establishments WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant.id())
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(establishment)
    }

    /// Verificação de referência usada por caixas, vendedores e movimentações
    pub async fn exists<'e, E>(&self, executor: E, tenant: &TenantContext, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM establishments WHERE tenant_id = $1 AND id = $2)",
        )
        .bind(tenant.id())
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &EstablishmentPayload,
    ) -> Result<Establishment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let establishment = sqlx::query_as::<_, Establishment>(
            r#"
            INSERT INTO establishments (tenant_id, name, address, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.is_active)
        .fetch_one(executor)
        .await?;
        Ok(establishment)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &EstablishmentPayload,
    ) -> Result<Option<Establishment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let establishment = sqlx::query_as::<_, Establishment>(
            r#"
            UPDATE establishments SET
                name = $3, address = $4, is_active = $5, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.is_active)
        .fetch_optional(executor)
        .await?;
        Ok(establishment)
    }

    pub async fn deactivate<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Establishment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let establishment = sqlx::query_as::<_, Establishment>(
            r#"
            UPDATE establishments SET is_active = FALSE, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(establishment)
    }
}
