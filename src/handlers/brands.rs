// src/handlers/brands.rs

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
        brand::{Brand, BrandPayload},
        ArchiveFilter,
    },
};

// GET /api/brands
#[utoipa::path(
    get,
    path = "/api/brands",
    tag = "Brands",
    params(ArchiveFilter),
    responses((status = 200, description = "Marcas do tenant", body = [Brand])),
    security(("api_jwt" = []))
)]
pub async fn list_brands(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(filter): Query<ArchiveFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let brands = app_state
        .repos
        .brands
        .list(&mut *tx, &tenant, filter.include_archived)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(brands))
}

// POST /api/brands/create
#[utoipa::path(
    post,
    path = "/api/brands/create",
    tag = "Brands",
    request_body = BrandPayload,
    responses(
        (status = 201, description = "Marca criada", body = Brand),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_brand(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    ValidatedJson(payload): ValidatedJson<BrandPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let brand = app_state
        .catalog_service
        .save_brand(&mut *tx, &tenant, None, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(brand))
}

// GET /api/brands/{id}
#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    tag = "Brands",
    params(("id" = Uuid, Path, description = "ID da marca")),
    responses(
        (status = 200, description = "Marca", body = Brand),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_brand(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let brand = app_state
        .repos
        .brands
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Brand))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(brand))
}

// PUT /api/brands/{id}
#[utoipa::path(
    put,
    path = "/api/brands/{id}",
    tag = "Brands",
    params(("id" = Uuid, Path, description = "ID da marca")),
    request_body = BrandPayload,
    responses(
        (status = 200, description = "Marca atualizada", body = Brand),
        (status = 404, description = "Marca ou fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_brand(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<BrandPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let brand = app_state
        .catalog_service
        .save_brand(&mut *tx, &tenant, Some(id), &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(brand))
}

// DELETE /api/brands/{id}/delete (arquiva)
#[utoipa::path(
    delete,
    path = "/api/brands/{id}/delete",
    tag = "Brands",
    params(("id" = Uuid, Path, description = "ID da marca")),
    responses(
        (status = 200, description = "Marca arquivada", body = Brand),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_brand(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let brand = app_state
        .repos
        .brands
        .archive(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Brand))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(brand))
}
