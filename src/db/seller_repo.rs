// src/db/seller_repo.rs

use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::unique_violation_or, error::AppError, i18n::Resource},
    middleware::tenancy::TenantContext,
    models::seller::{Seller, SellerPayload},
};

// Os estabelecimentos vêm agregados da tabela de junção
const SELECT_SELLER: &str = r#"
    SELECT
        s.*,
        COALESCE(
            array_agg(se.establishment_id ORDER BY se.establishment_id)
                FILTER (WHERE se.establishment_id IS NOT NULL),
            '{}'::uuid[]
        ) AS establishment_ids
    FROM sellers s
    LEFT JOIN seller_establishments se
        ON se.seller_id = s.id AND se.tenant_id = s.tenant_id
"#;

#[derive(Clone, Default)]
pub struct SellerRepository;

impl SellerRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, tenant: &TenantContext) -> Result<Vec<Seller>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{SELECT_SELLER} WHERE s.tenant_id = $1 GROUP BY s.id ORDER BY s.name ASC");
        let sellers = sqlx::query_as::<_, Seller>(&sql)
            .bind(tenant.id())
            .fetch_all(executor)
            .await?;
        Ok(sellers)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<Option<Seller>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{SELECT_SELLER} WHERE s.tenant_id = $1 AND s.id = $2 GROUP BY s.id");
        let seller = sqlx::query_as::<_, Seller>(&sql)
            .bind(tenant.id())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(seller)
    }

    /// Insere só a linha principal; as associações vão em `replace_establishments`.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        input: &SellerPayload,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO sellers (tenant_id, name, code, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(tenant.id())
        .bind(&input.name)
        .bind(&input.code)
        .bind(input.is_active)
        .fetch_one(executor)
        .await
        .map_err(|e| code_conflict(e, &input.code))
    }

    /// Retorna false quando o vendedor não existe no tenant.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
        input: &SellerPayload,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE sellers SET
                name = $3, code = $4, is_active = $5, updated_at = NOW()
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant.id())
        .bind(id)
        .bind(&input.name)
        .bind(&input.code)
        .bind(input.is_active)
        .execute(executor)
        .await
        .map_err(|e| code_conflict(e, &input.code))?;
        Ok(result.rows_affected() > 0)
    }

    /// Substitui as associações N:N. Um id que não pertence ao tenant vira 404.
    pub async fn replace_establishments(
        &self,
        conn: &mut PgConnection,
        tenant: &TenantContext,
        seller_id: Uuid,
        establishment_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM seller_establishments WHERE tenant_id = $1 AND seller_id = $2")
            .bind(tenant.id())
            .bind(seller_id)
            .execute(&mut *conn)
            .await?;

        let mut distinct = establishment_ids.to_vec();
        distinct.sort();
        distinct.dedup();
        if distinct.is_empty() {
            return Ok(());
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO seller_establishments (tenant_id, seller_id, establishment_id)
            SELECT $1, $2, e.id
            FROM establishments e
            WHERE e.tenant_id = $1 AND e.id = ANY($3)
            "#,
        )
        .bind(tenant.id())
        .bind(seller_id)
        .bind(&distinct)
        .execute(&mut *conn)
        .await?;

        if inserted.rows_affected() != distinct.len() as u64 {
            return Err(AppError::NotFound(Resource::Establishment));
        }
        Ok(())
    }

    pub async fn deactivate<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE sellers SET is_active = FALSE, updated_at = NOW() WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant.id())
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn code_conflict(err: sqlx::Error, code: &str) -> AppError {
    unique_violation_or(err, |constraint| match constraint {
        "sellers_tenant_code_key" => AppError::SellerCodeAlreadyExists(code.to_string()),
        other => AppError::InternalServerError(anyhow::anyhow!("violação de unicidade inesperada: {other}")),
    })
}
