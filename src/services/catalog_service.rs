// src/services/catalog_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, i18n::Resource},
    db::{BrandRepository, EstablishmentRepository, RegisterRepository, SupplierRepository, VariationRepository},
    middleware::tenancy::TenantContext,
    models::{
        brand::{Brand, BrandPayload},
        register::{Register, RegisterPayload},
        variation::{Variation, VariationPayload},
    },
};

// Escritas que apontam para outra entidade do tenant (caixa -> estabelecimento,
// marca -> fornecedor, variação -> grupo). A referência é conferida antes,
// e uma referência de outro tenant responde como inexistente.
#[derive(Clone)]
pub struct CatalogService {
    establishment_repo: EstablishmentRepository,
    register_repo: RegisterRepository,
    supplier_repo: SupplierRepository,
    brand_repo: BrandRepository,
    variation_repo: VariationRepository,
}

impl CatalogService {
    pub fn new(
        establishment_repo: EstablishmentRepository,
        register_repo: RegisterRepository,
        supplier_repo: SupplierRepository,
        brand_repo: BrandRepository,
        variation_repo: VariationRepository,
    ) -> Self {
        Self { establishment_repo, register_repo, supplier_repo, brand_repo, variation_repo }
    }

    // =========================================================================
    //  CAIXAS
    // =========================================================================

    pub async fn save_register<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Option<Uuid>,
        input: &RegisterPayload,
    ) -> Result<Register, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let establishment_id = input
            .establishment_id
            .ok_or_else(|| AppError::InvalidBody("establishmentId".into()))?;

        let mut tx = executor.begin().await?;

        if !self.establishment_repo.exists(&mut *tx, tenant, establishment_id).await? {
            return Err(AppError::NotFound(Resource::Establishment));
        }

        let register = match id {
            None => {
                self.register_repo
                    .create(&mut *tx, tenant, establishment_id, &input.name, input.is_active)
                    .await?
            }
            Some(id) => self
                .register_repo
                .update(&mut *tx, tenant, id, establishment_id, &input.name, input.is_active)
                .await?
                .ok_or(AppError::NotFound(Resource::Register))?,
        };

        tx.commit().await?;
        Ok(register)
    }

    // =========================================================================
    //  MARCAS
    // =========================================================================

    pub async fn save_brand<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Option<Uuid>,
        input: &BrandPayload,
    ) -> Result<Brand, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if let Some(supplier_id) = input.supplier_id {
            if !self.supplier_repo.exists(&mut *tx, tenant, supplier_id).await? {
                return Err(AppError::NotFound(Resource::Supplier));
            }
        }

        let brand = match id {
            None => self.brand_repo.create(&mut *tx, tenant, input).await?,
            Some(id) => self
                .brand_repo
                .update(&mut *tx, tenant, id, input)
                .await?
                .ok_or(AppError::NotFound(Resource::Brand))?,
        };

        tx.commit().await?;
        Ok(brand)
    }

    // =========================================================================
    //  VARIAÇÕES
    // =========================================================================

    pub async fn save_variation<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Option<Uuid>,
        input: &VariationPayload,
    ) -> Result<Variation, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let group_id = input.group_id.ok_or_else(|| AppError::InvalidBody("groupId".into()))?;

        let mut tx = executor.begin().await?;

        if !self.variation_repo.group_exists(&mut *tx, tenant, group_id).await? {
            return Err(AppError::NotFound(Resource::VariationGroup));
        }

        let variation = match id {
            None => {
                self.variation_repo
                    .create(&mut *tx, tenant, group_id, &input.name, input.sort_order)
                    .await?
            }
            Some(id) => self
                .variation_repo
                .update(&mut *tx, tenant, id, group_id, &input.name, input.sort_order)
                .await?
                .ok_or(AppError::NotFound(Resource::Variation))?,
        };

        tx.commit().await?;
        Ok(variation)
    }
}
