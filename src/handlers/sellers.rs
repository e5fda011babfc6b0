// src/handlers/sellers.rs

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
        extract::Path,
        i18n::Locale,
        json::ValidatedJson,
        rbac::{Manager, RequireRole},
        tenancy::TenantContext,
    },
    models::seller::{Seller, SellerPayload},
};

// GET /api/sellers
#[utoipa::path(
    get,
    path = "/api/sellers",
    tag = "Sellers",
    responses((status = 200, description = "Vendedores do tenant", body = [Seller])),
    security(("api_jwt" = []))
)]
pub async fn list_sellers(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let sellers = app_state.repos.sellers.list(&mut *tx, &tenant).await.localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(sellers))
}

// POST /api/sellers/create
#[utoipa::path(
    post,
    path = "/api/sellers/create",
    tag = "Sellers",
    request_body = SellerPayload,
    responses(
        (status = 201, description = "Vendedor criado", body = Seller),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Estabelecimento não encontrado"),
        (status = 500, description = "Código já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_seller(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    ValidatedJson(payload): ValidatedJson<SellerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let seller = app_state
        .seller_service
        .create(&mut *tx, &tenant, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(seller))
}

// GET /api/sellers/{id}
#[utoipa::path(
    get,
    path = "/api/sellers/{id}",
    tag = "Sellers",
    params(("id" = Uuid, Path, description = "ID do vendedor")),
    responses(
        (status = 200, description = "Vendedor", body = Seller),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_seller(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let seller = app_state
        .repos
        .sellers
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Seller))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(seller))
}

// PUT /api/sellers/{id}
#[utoipa::path(
    put,
    path = "/api/sellers/{id}",
    tag = "Sellers",
    params(("id" = Uuid, Path, description = "ID do vendedor")),
    request_body = SellerPayload,
    responses(
        (status = 200, description = "Vendedor atualizado", body = Seller),
        (status = 404, description = "Não encontrado"),
        (status = 500, description = "Código já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_seller(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SellerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let seller = app_state
        .seller_service
        .update(&mut *tx, &tenant, id, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(seller))
}

// DELETE /api/sellers/{id}/delete (desativa)
#[utoipa::path(
    delete,
    path = "/api/sellers/{id}/delete",
    tag = "Sellers",
    params(("id" = Uuid, Path, description = "ID do vendedor")),
    responses(
        (status = 200, description = "Vendedor desativado", body = Seller),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_seller(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let seller = app_state
        .seller_service
        .deactivate(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(seller))
}
