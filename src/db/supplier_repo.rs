// src/db/supplier_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantContext,
    models::supplier::{Supplier, SupplierPayload},
};

#[derive(Clone, Default)]
pub struct SupplierRepository;

impl SupplierRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        include_archived: bool,
    ) -> Result<Vec<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT * FROM suppliers
            WHERE tenant_id = $1 AND ($2 OR NOT is_archived)
            ORDER BY name ASC
            "#,
        )
        .bind(tenant.id())
        .bind(include_archived)
        .fetch_all(executor)
        .await?;
        Ok(suppliers)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE tenant_id = $1 AND id = $2")
            .bind(tenant.id())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(supplier)
    }

    pub async fn exists<'e, E>(&self, executor: E, tenant: &TenantContext, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM suppliers WHERE tenant_id = $1 AND id = $2)")
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
        input: &SupplierPayload,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (tenant_id, name, contact_name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(&input.name)
        .bind(&input.contact_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &SupplierPayload,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers SET
                name = $3, contact_name = $4, email = $5, phone = $6, address = $7,
                updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(&input.name)
        .bind(&input.contact_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_optional(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn archive<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers SET
                is_archived = TRUE,
                archived_at = COALESCE(archived_at, NOW()),
                updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(supplier)
    }
}
