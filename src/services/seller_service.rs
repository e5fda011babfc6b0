// src/services/seller_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, i18n::Resource},
    db::SellerRepository,
    middleware::tenancy::TenantContext,
    models::seller::{Seller, SellerPayload},
};

// Vendedor + associações com estabelecimentos, gravados juntos
#[derive(Clone)]
pub struct SellerService {
    repo: SellerRepository,
}

impl SellerService {
    pub fn new(repo: SellerRepository) -> Self {
        Self { repo }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &SellerPayload,
    ) -> Result<Seller, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let seller_id = self.repo.insert(&mut *tx, tenant, input).await?;
        self.repo
            .replace_establishments(&mut tx, tenant, seller_id, &input.establishment_ids)
            .await?;

        let seller = self
            .repo
            .find_by_id(&mut *tx, tenant, seller_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Seller))?;

        tx.commit().await?;
        Ok(seller)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &SellerPayload,
    ) -> Result<Seller, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if !self.repo.update(&mut *tx, tenant, id, input).await? {
            return Err(AppError::NotFound(Resource::Seller));
        }
        self.repo
            .replace_establishments(&mut tx, tenant, id, &input.establishment_ids)
            .await?;

        let seller = self
            .repo
            .find_by_id(&mut *tx, tenant, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Seller))?;

        tx.commit().await?;
        Ok(seller)
    }

    pub async fn deactivate<'e, E>(&self, executor: E, tenant: &TenantContext, id: Uuid) -> Result<Seller, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if !self.repo.deactivate(&mut *tx, tenant, id).await? {
            return Err(AppError::NotFound(Resource::Seller));
        }
        let seller = self
            .repo
            .find_by_id(&mut *tx, tenant, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Seller))?;

        tx.commit().await?;
        Ok(seller)
    }
}
