// src/handlers/tax_rates.rs

use axum::{
    extract::State,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::begin_tenant_tx,
        error::{ApiError, AppError, Localized},
        i18n::Resource,
        response,
    },
    config::AppState,
    middleware::{
        extract::{Path, Query},
        i18n::Locale,
        json::ValidatedJson,
        rbac::{Manager, RequireRole},
        tenancy::TenantContext,
    },
    models::{
        tax_rate::{TaxRate, TaxRatePayload},
        ArchiveFilter,
    },
};

// GET /api/tax-rates
#[utoipa::path(
    get,
    path = "/api/tax-rates",
    tag = "Tax rates",
    params(ArchiveFilter),
    responses((status = 200, description = "Taxas do tenant", body = [TaxRate])),
    security(("api_jwt" = []))
)]
pub async fn list_tax_rates(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(filter): Query<ArchiveFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let rates = app_state
        .repos
        .tax_rates
        .list(&mut *tx, &tenant, filter.include_archived)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(rates))
}

// POST /api/tax-rates
#[utoipa::path(
    post,
    path = "/api/tax-rates",
    tag = "Tax rates",
    request_body = TaxRatePayload,
    responses(
        (status = 201, description = "Taxa criada", body = TaxRate),
        (status = 400, description = "Dados inválidos"),
        (status = 500, description = "Código já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tax_rate(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    ValidatedJson(payload): ValidatedJson<TaxRatePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let rate = app_state
        .tax_rate_service
        .create(&mut *tx, &tenant, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(rate))
}

// GET /api/tax-rates/{id}
#[utoipa::path(
    get,
    path = "/api/tax-rates/{id}",
    tag = "Tax rates",
    params(("id" = Uuid, Path, description = "ID da taxa")),
    responses(
        (status = 200, description = "Taxa (mesmo arquivada)", body = TaxRate),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_tax_rate(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let rate = app_state
        .repos
        .tax_rates
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::TaxRate))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(rate))
}

// PUT /api/tax-rates/{id}
#[utoipa::path(
    put,
    path = "/api/tax-rates/{id}",
    tag = "Tax rates",
    params(("id" = Uuid, Path, description = "ID da taxa")),
    request_body = TaxRatePayload,
    responses(
        (status = 200, description = "Taxa atualizada", body = TaxRate),
        (status = 400, description = "Dados inválidos ou taxa arquivada como padrão"),
        (status = 404, description = "Não encontrada"),
        (status = 500, description = "Código já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tax_rate(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TaxRatePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let rate = app_state
        .tax_rate_service
        .update(&mut *tx, &tenant, id, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(rate))
}

// DELETE /api/tax-rates/{id} (arquiva; taxas nunca são apagadas)
#[utoipa::path(
    delete,
    path = "/api/tax-rates/{id}",
    tag = "Tax rates",
    params(("id" = Uuid, Path, description = "ID da taxa")),
    responses(
        (status = 200, description = "Taxa arquivada", body = TaxRate),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_tax_rate(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let rate = app_state
        .repos
        .tax_rates
        .archive(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::TaxRate))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(rate))
}
