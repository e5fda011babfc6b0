// src/handlers/suppliers.rs

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
        supplier::{Supplier, SupplierPayload},
        ArchiveFilter,
    },
};

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Suppliers",
    params(ArchiveFilter),
    responses((status = 200, description = "Fornecedores do tenant", body = [Supplier])),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(filter): Query<ArchiveFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let suppliers = app_state
        .repos
        .suppliers
        .list(&mut *tx, &tenant, filter.include_archived)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(suppliers))
}

// POST /api/suppliers/create
#[utoipa::path(
    post,
    path = "/api/suppliers/create",
    tag = "Suppliers",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    ValidatedJson(payload): ValidatedJson<SupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let supplier = app_state
        .repos
        .suppliers
        .create(&mut *tx, &tenant, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(supplier))
}

// GET /api/suppliers/{id}
#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor (mesmo arquivado)", body = Supplier),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let supplier = app_state
        .repos
        .suppliers
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Supplier))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(supplier))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let supplier = app_state
        .repos
        .suppliers
        .update(&mut *tx, &tenant, id, &payload)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Supplier))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(supplier))
}

// DELETE /api/suppliers/{id}/delete (arquiva)
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}/delete",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor arquivado", body = Supplier),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let supplier = app_state
        .repos
        .suppliers
        .archive(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Supplier))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(supplier))
}
