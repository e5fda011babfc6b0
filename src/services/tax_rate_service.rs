// src/services/tax_rate_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, i18n::Resource},
    db::TaxRateRepository,
    middleware::tenancy::TenantContext,
    models::tax_rate::{TaxRate, TaxRatePayload},
};

// Regra de negócio das taxas: no máximo uma padrão por tenant.
// A troca acontece na mesma transação da escrita; o índice parcial
// tax_rates_single_default_idx segura qualquer corrida.
#[derive(Clone)]
pub struct TaxRateService {
    repo: TaxRateRepository,
}

impl TaxRateService {
    pub fn new(repo: TaxRateRepository) -> Self {
        Self { repo }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &TaxRatePayload,
    ) -> Result<TaxRate, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if input.is_default {
            let cleared = self.repo.clear_default(&mut *tx, tenant, None).await?;
            tracing::info!(tenant_id = %tenant.id(), cleared, "Nova taxa padrão: {}", input.code);
        }

        let rate = self
            .repo
            .insert(&mut *tx, tenant, &input.name, input.rate, &input.code, input.is_default)
            .await?;

        tx.commit().await?;
        Ok(rate)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &TaxRatePayload,
    ) -> Result<TaxRate, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self
            .repo
            .find_by_id(&mut *tx, tenant, id)
            .await?
            .ok_or(AppError::NotFound(Resource::TaxRate))?;

        if input.is_default {
            if current.is_archived {
                return Err(AppError::ArchivedTaxRateCannotBeDefault);
            }
            if !current.is_default {
                self.repo.clear_default(&mut *tx, tenant, Some(id)).await?;
                tracing::info!(tenant_id = %tenant.id(), tax_rate_id = %id, "Taxa padrão trocada");
            }
        }

        let rate = self
            .repo
            .update(&mut *tx, tenant, id, input)
            .await?
            .ok_or(AppError::NotFound(Resource::TaxRate))?;

        tx.commit().await?;
        Ok(rate)
    }
}
