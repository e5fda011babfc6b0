// src/db/closure_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::unique_violation_or, error::AppError},
    middleware::tenancy::TenantContext,
    models::closure::Closure,
};

#[derive(Clone, Default)]
pub struct ClosureRepository;

impl ClosureRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_for_day<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        register_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<Closure>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let closure = sqlx::query_as::<_, Closure>(
            r#"
            SELECT * FROM closures
            WHERE tenant_id = $1 AND register_id = $2 AND closure_date = $3
            "#,
        )
        .bind(tenant.id())
        .bind(register_id)
        .bind(date)
        .fetch_optional(executor)
        .await?;
        Ok(closure)
    }

    // Mais recentes primeiro
    pub async fn list<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        register_id: Option<Uuid>,
    ) -> Result<Vec<Closure>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let closures = sqlx::query_as::<_, Closure>(
            r#"
            SELECT * FROM closures
            WHERE tenant_id = $1 AND ($2::uuid IS NULL OR register_id = $2)
            ORDER BY closure_date DESC, created_at DESC
            "#,
        )
        .bind(tenant.id())
        .bind(register_id)
        .fetch_all(executor)
        .await?;
        Ok(closures)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        register_id: Uuid,
        date: NaiveDate,
        closed_by: Uuid,
    ) -> Result<Closure, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Closure>(
            r#"
            INSERT INTO closures (tenant_id, register_id, closure_date, closed_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(register_id)
        .bind(date)
        .bind(closed_by)
        .fetch_one(executor)
        .await
        .map_err(|e| unique_violation_or(e, |_| AppError::DayAlreadyClosed))
    }
}
