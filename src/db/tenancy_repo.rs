// src/db/tenancy_repo.rs

use sqlx::{Executor, Postgres};

use crate::{common::error::AppError, models::tenancy::Tenant};

#[derive(Clone, Default)]
pub struct TenantRepository;

impl TenantRepository {
    pub fn new() -> Self {
        Self
    }

    /// Cria um novo tenant (organização) na base de dados.
    pub async fn create_tenant<'e, E>(&self, executor: E, name: &str) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name)
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(tenant)
    }
}
