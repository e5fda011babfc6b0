// src/db/register_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantContext,
    models::register::Register,
};

// Caixas: sem DELETE aqui de propósito, apenas desativação
#[derive(Clone, Default)]
pub struct RegisterRepository;

impl RegisterRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        establishment_id: Option<Uuid>,
    ) -> Result<Vec<Register>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registers = sqlx::query_as::<_, Register>(
            r#"
            SELECT * FROM registers
            WHERE tenant_id = $1
            AND ($2::uuid IS NULL OR establishment_id = $2)
            ORDER BY name ASC
            "#,
        )
        .bind(tenant.id())
        .bind(establishment_id)
        .fetch_all(executor)
        .await?;
        Ok(registers)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Register>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let register = sqlx::query_as::<_, Register>("SELECT * FROM registers WHERE tenant_id = $1 AND id = $2")
            .bind(tenant.id())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(register)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        establishment_id: Uuid,
        name: &str,
        is_active: bool,
    ) -> Result<Register, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let register = sqlx::query_as::<_, Register>(
            r#"
            INSERT INTO registers (tenant_id, establishment_id, name, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(establishment_id)
        .bind(name)
        .bind(is_active)
        .fetch_one(executor)
        .await?;
        Ok(register)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        establishment_id: Uuid,
        name: &str,
        is_active: bool,
    ) -> Result<Option<Register>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let register = sqlx::query_as::<_, Register>(
            r#"
            UPDATE registers SET
                establishment_id = $3, name = $4, is_active = $5, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(establishment_id)
        .bind(name)
        .bind(is_active)
        .fetch_optional(executor)
        .await?;
        Ok(register)
    }

    pub async fn deactivate<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Register>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let register = sqlx::query_as::<_, Register>(
            r#"
            UPDATE registers SET is_active = FALSE, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(register)
    }
}
