use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::common::error::AppError;
use crate::middleware::tenancy::TenantContext;

// ---
// Helper RLS: A "Chave" para o Banco de Dados
// ---
/// Abre uma transação e define `app.tenant_id` (local à transação) para as
/// policies de RLS. Toda rota de dados roda dentro dela.
pub(crate) async fn begin_tenant_tx(
    pool: &PgPool,
    tenant: &TenantContext,
) -> Result<Transaction<'static, Postgres>, AppError> {
    let mut tx = pool.begin().await?;
    set_tenant(&mut tx, tenant).await?;
    Ok(tx)
}

/// Define a "chave" numa transação já aberta (usado pelo seed, que cria o tenant antes).
pub(crate) async fn set_tenant(conn: &mut PgConnection, tenant: &TenantContext) -> Result<(), AppError> {
    sqlx::query("SELECT set_config('app.tenant_id', $1, true)")
        .bind(tenant.id().to_string())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Traduz violação de UNIQUE num erro de domínio; o resto vira DatabaseError.
/// O closure recebe o nome da constraint violada.
pub(crate) fn unique_violation_or<F>(err: sqlx::Error, on_conflict: F) -> AppError
where
    F: FnOnce(&str) -> AppError,
{
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return on_conflict(db_err.constraint().unwrap_or_default());
        }
    }
    err.into()
}
