// src/handlers/establishments.rs

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
    models::establishment::{Establishment, EstablishmentPayload},
};

// GET /api/establishments
#[utoipa::path(
    get,
    path = "/api/establishments",
    tag = "Establishments",
    responses((status = 200, description = "Estabelecimentos do tenant", body = [Establishment])),
    security(("api_jwt" = []))
)]
pub async fn list_establishments(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let establishments = app_state
        .repos
        .establishments
        .list(&mut *tx, &tenant)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(establishments))
}

// POST /api/establishments/create
#[utoipa::path(
    post,
    path = "/api/establishments/create",
    tag = "Establishments",
    request_body = EstablishmentPayload,
    responses(
        (status = 201, description = "Estabelecimento criado", body = Establishment),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Requer MANAGER")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_establishment(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    ValidatedJson(payload): ValidatedJson<EstablishmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let establishment = app_state
        .repos
        .establishments
        .create(&mut *tx, &tenant, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(establishment))
}

// GET /api/establishments/{id}
#[utoipa::path(
    get,
    path = "/api/establishments/{id}",
    tag = "Establishments",
    params(("id" = Uuid, Path, description = "ID do estabelecimento")),
    responses(
        (status = 200, description = "Estabelecimento", body = Establishment),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_establishment(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let establishment = app_state
        .repos
        .establishments
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Establishment))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(establishment))
}

// PUT /api/establishments/{id}
#[utoipa::path(
    put,
    path = "/api/establishments/{id}",
    tag = "Establishments",
    params(("id" = Uuid, Path, description = "ID do estabelecimento")),
    request_body = EstablishmentPayload,
    responses(
        (status = 200, description = "Estabelecimento atualizado", body = Establishment),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_establishment(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<EstablishmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let establishment = app_state
        .repos
        .establishments
        .update(&mut *tx, &tenant, id, &payload)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Establishment))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(establishment))
}

// DELETE /api/establishments/{id}/delete (desativa)
#[utoipa::path(
    delete,
    path = "/api/establishments/{id}/delete",
    tag = "Establishments",
    params(("id" = Uuid, Path, description = "ID do estabelecimento")),
    responses(
        (status = 200, description = "Estabelecimento desativado", body = Establishment),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_establishment(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let establishment = app_state
        .repos
        .establishments
        .deactivate(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Establishment))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(establishment))
}
