// src/db/brand_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantContext,
    models::brand::{Brand, BrandPayload},
};

#[derive(Clone, Default)]
pub struct BrandRepository;

impl BrandRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        include_archived: bool,
    ) -> Result<Vec<Brand>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brands = sqlx::query_as::<_, Brand>(
            r#"
            SELECT * FROM brands
            WHERE tenant_id = $1 AND ($2 OR NOT is_archived)
            ORDER BY name ASC
            "#,
        )
        .bind(tenant.id())
        .bind(include_archived)
        .fetch_all(executor)
        .await?;
        Ok(brands)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Brand>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brand = sqlx::query_as::<_, Brand>("SELECT * FROM brands WHERE tenant_id = $1 AND id = $2")
            .bind(tenant.id())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(brand)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &BrandPayload,
    ) -> Result<Brand, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            INSERT INTO brands (tenant_id, supplier_id, name, contact_name, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(input.supplier_id)
        .bind(&input.name)
        .bind(&input.contact_name)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_one(executor)
        .await?;
        Ok(brand)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &BrandPayload,
    ) -> Result<Option<Brand>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            UPDATE brands SET
                supplier_id = $3, name = $4, contact_name = $5, email = $6, phone = $7,
                updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(input.supplier_id)
        .bind(&input.name)
        .bind(&input.contact_name)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_optional(executor)
        .await?;
        Ok(brand)
    }

    pub async fn archive<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Brand>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            UPDATE brands SET
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
        Ok(brand)
    }
}
