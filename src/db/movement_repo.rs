// src/db/movement_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantContext,
    models::movement::{Movement, MovementPayload},
};

// Movimentações nunca são apagadas; o número vem de next_movement_number().
#[derive(Clone, Default)]
pub struct MovementRepository;

impl MovementRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        include_archived: bool,
    ) -> Result<Vec<Movement>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movements = sqlx::query_as::<_, Movement>(
            r#"
            SELECT * FROM movements
            WHERE tenant_id = $1 AND ($2 OR NOT is_archived)
            ORDER BY number DESC
            "#,
        )
        .bind(tenant.id())
        .bind(include_archived)
        .fetch_all(executor)
        .await?;
        Ok(movements)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Movement>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, Movement>("SELECT * FROM movements WHERE tenant_id = $1 AND id = $2")
            .bind(tenant.id())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(movement)
    }

    /// O número é alocado na mesma instrução do INSERT (linha travada em movement_sequences).
    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &MovementPayload,
        created_by: Uuid,
    ) -> Result<Movement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (tenant_id, number, movement_type, establishment_id, comment, created_by)
            VALUES ($1, next_movement_number($1), $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(input.movement_type)
        .bind(input.establishment_id)
        .bind(&input.comment)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    pub async fn archive<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Movement>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, Movement>(
            r#"
            UPDATE movements SET
                is_archived = TRUE,
                archived_at = COALESCE(archived_at, NOW())
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(movement)
    }
}
