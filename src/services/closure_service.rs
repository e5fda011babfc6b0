// src/services/closure_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, i18n::Resource},
    db::{ClosureRepository, RegisterRepository},
    middleware::tenancy::TenantContext,
    models::closure::{Closure, ClosureStatus},
};

#[derive(Clone)]
pub struct ClosureService {
    repo: ClosureRepository,
    register_repo: RegisterRepository,
}

impl ClosureService {
    pub fn new(repo: ClosureRepository, register_repo: RegisterRepository) -> Self {
        Self { repo, register_repo }
    }

    /// O dia `date` do caixa já foi fechado?
    pub async fn check<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        register_id: Uuid,
        date: NaiveDate,
    ) -> Result<ClosureStatus, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        if self.register_repo.find_by_id(&mut *conn, tenant, register_id).await?.is_none() {
            return Err(AppError::NotFound(Resource::Register));
        }

        let closure = self.repo.find_for_day(&mut *conn, tenant, register_id, date).await?;
        Ok(ClosureStatus { closed: closure.is_some(), closure })
    }

    pub async fn close_day<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        register_id: Uuid,
        date: NaiveDate,
        closed_by: Uuid,
    ) -> Result<Closure, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let register = self
            .register_repo
            .find_by_id(&mut *tx, tenant, register_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Register))?;

        if !register.is_active {
            return Err(AppError::RegisterInactive);
        }

        let closure = self.repo.insert(&mut *tx, tenant, register_id, date, closed_by).await?;
        tx.commit().await?;

        tracing::info!(tenant_id = %tenant.id(), register_id = %register_id, %date, "🔒 Dia fechado");
        Ok(closure)
    }
}
