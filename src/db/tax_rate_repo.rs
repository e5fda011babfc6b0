// src/db/tax_rate_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::unique_violation_or, error::AppError},
    middleware::tenancy::TenantContext,
    models::tax_rate::{TaxRate, TaxRatePayload},
};

// Taxas: nenhum DELETE aqui, só arquivamento.
#[derive(Clone, Default)]
pub struct TaxRateRepository;

impl TaxRateRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        include_archived: bool,
    ) -> Result<Vec<TaxRate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rates = sqlx::query_as::<_, TaxRate>(
            r#"
            SELECT * FROM tax_rates
            WHERE tenant_id = $1 AND ($2 OR NOT is_archived)
            ORDER BY name ASC
            "#,
        )
        .bind(tenant.id())
        .bind(include_archived)
        .fetch_all(executor)
        .await?;
        Ok(rates)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<TaxRate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rate = sqlx::query_as::<_, TaxRate>("SELECT * FROM tax_rates WHERE tenant_id = $1 AND id = $2")
            .bind(tenant.id())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(rate)
    }

    /// Tira o flag de padrão de todas as taxas do tenant, exceto `keep`.
    pub async fn clear_default<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        keep: Option<Uuid>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE tax_rates SET is_default = FALSE, updated_at = NOW()
            WHERE tenant_id = $1 AND is_default AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(tenant.id())
        .bind(keep)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        name: &str,
        rate: Decimal,
        code: &str,
        is_default: bool,
    ) -> Result<TaxRate, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, TaxRate>(
            r#"
            INSERT INTO tax_rates (tenant_id, name, rate, code, is_default)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(name)
        .bind(rate)
        .bind(code)
        .bind(is_default)
        .fetch_one(executor)
        .await
        .map_err(|e| code_conflict(e, code))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &TaxRatePayload,
    ) -> Result<Option<TaxRate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, TaxRate>(
            r#"
            UPDATE tax_rates SET
                name = $3, rate = $4, code = $5, is_default = $6, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(&input.name)
        .bind(input.rate)
        .bind(&input.code)
        .bind(input.is_default)
        .fetch_optional(executor)
        .await
        .map_err(|e| code_conflict(e, &input.code))
    }

    /// Arquiva (idempotente) e remove o flag de padrão.
    pub async fn archive<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<TaxRate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rate = sqlx::query_as::<_, TaxRate>(
            r#"
            UPDATE tax_rates SET
                is_archived = TRUE,
                archived_at = COALESCE(archived_at, NOW()),
                is_default = FALSE,
                updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(rate)
    }
}

// Duas constraints únicas na tabela: o código por tenant e o índice parcial do padrão.
// Este só dispara numa corrida entre duas escritas concorrentes.
fn code_conflict(err: sqlx::Error, code: &str) -> AppError {
    unique_violation_or(err, |constraint| match constraint {
        "tax_rates_tenant_code_key" => AppError::TaxCodeAlreadyExists(code.to_string()),
        other => AppError::InternalServerError(anyhow::anyhow!("violação de unicidade em tax_rates: {other}")),
    })
}
