// src/db/variation_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantContext,
    models::variation::{Variation, VariationGroup, VariationGroupPayload},
};

#[derive(Clone, Default)]
pub struct VariationRepository;

impl VariationRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  GRUPOS
    // =========================================================================

    pub async fn list_groups<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        include_archived: bool,
    ) -> Result<Vec<VariationGroup>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let groups = sqlx::query_as::<_, VariationGroup>(
            r#"
            SELECT * FROM variation_groups
            WHERE tenant_id = $1 AND ($2 OR NOT is_archived)
            ORDER BY sort_order ASC, name ASC
            "#,
        )
        .bind(tenant.id())
        .bind(include_archived)
        .fetch_all(executor)
        .await?;
        Ok(groups)
    }

    /// Grupo do tenant que ainda aceita variações (arquivado conta como ausente).
    pub async fn group_exists<'e, E>(&self, executor: E, tenant: &TenantContext, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM variation_groups WHERE tenant_id = $1 AND id = $2 AND NOT is_archived)",
        )
        .bind(tenant.id())
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    pub async fn create_group<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &VariationGroupPayload,
    ) -> Result<VariationGroup, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let group = sqlx::query_as::<_, VariationGroup>(
            r#"
            INSERT INTO variation_groups (tenant_id, name, sort_order)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(&input.name)
        .bind(input.sort_order)
        .fetch_one(executor)
        .await?;
        Ok(group)
    }

    pub async fn update_group<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &VariationGroupPayload,
    ) -> Result<Option<VariationGroup>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let group = sqlx::query_as::<_, VariationGroup>(
            r#"
            UPDATE variation_groups SET name = $3, sort_order = $4, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(&input.name)
        .bind(input.sort_order)
        .fetch_optional(executor)
        .await?;
        Ok(group)
    }

    pub async fn archive_group<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<VariationGroup>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let group = sqlx::query_as::<_, VariationGroup>(
            r#"
            UPDATE variation_groups SET
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
        Ok(group)
    }

    // =========================================================================
    //  VARIAÇÕES
    // =========================================================================

    pub async fn list<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        group_id: Option<Uuid>,
        include_archived: bool,
    ) -> Result<Vec<Variation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let variations = sqlx::query_as::<_, Variation>(
            r#"
            SELECT * FROM variations
            WHERE tenant_id = $1
            AND ($2::uuid IS NULL OR group_id = $2)
            AND ($3 OR NOT is_archived)
            ORDER BY sort_order ASC, name ASC
            "#,
        )
        .bind(tenant.id())
        .bind(group_id)
        .bind(include_archived)
        .fetch_all(executor)
        .await?;
        Ok(variations)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Variation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let variation = sqlx::query_as::<_, Variation>("SELECT * FROM variations WHERE tenant_id = $1 AND id = $2")
            .bind(tenant.id())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(variation)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        group_id: Uuid,
        name: &str,
        sort_order: i32,
    ) -> Result<Variation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let variation = sqlx::query_as::<_, Variation>(
            r#"
            INSERT INTO variations (tenant_id, group_id, name, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(group_id)
        .bind(name)
        .bind(sort_order)
        .fetch_one(executor)
        .await?;
        Ok(variation)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        group_id: Uuid,
        name: &str,
        sort_order: i32,
    ) -> Result<Option<Variation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let variation = sqlx::query_as::<_, Variation>(
            r#"
            UPDATE variations SET group_id = $3, name = $4, sort_order = $5, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(group_id)
        .bind(name)
        .bind(sort_order)
        .fetch_optional(executor)
        .await?;
        Ok(variation)
    }

    pub async fn archive<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Variation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let variation = sqlx::query_as::<_, Variation>(
            r#"
            UPDATE variations SET
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
        Ok(variation)
    }
}
