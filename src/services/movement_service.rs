// src/services/movement_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, i18n::Resource},
    db::{EstablishmentRepository, MovementRepository},
    middleware::tenancy::TenantContext,
    models::movement::{Movement, MovementPayload},
};

#[derive(Clone)]
pub struct MovementService {
    repo: MovementRepository,
    establishment_repo: EstablishmentRepository,
}

impl MovementService {
    pub fn new(repo: MovementRepository, establishment_repo: EstablishmentRepository) -> Self {
        Self { repo, establishment_repo }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &MovementPayload,
        created_by: Uuid,
    ) -> Result<Movement, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if let Some(establishment_id) = input.establishment_id {
            if !self.establishment_repo.exists(&mut *tx, tenant, establishment_id).await? {
                return Err(AppError::NotFound(Resource::Establishment));
            }
        }

        let movement = self.repo.create(&mut *tx, tenant, input, created_by).await?;
        tx.commit().await?;

        tracing::info!(
            tenant_id = %tenant.id(),
            number = movement.number,
            "📦 Movimentação registrada ({:?})",
            movement.movement_type
        );
        Ok(movement)
    }
}
