// src/handlers/movements.rs

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
    middleware::{auth::AuthenticatedUser, extract::{Path, Query}, i18n::Locale, json::ValidatedJson, tenancy::TenantContext},
    models::{
        movement::{Movement, MovementPayload},
        ArchiveFilter,
    },
};

// GET /api/movements
#[utoipa::path(
    get,
    path = "/api/movements",
    tag = "Movements",
    params(ArchiveFilter),
    responses((status = 200, description = "Movimentações, número decrescente", body = [Movement])),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(filter): Query<ArchiveFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let movements = app_state
        .repos
        .movements
        .list(&mut *tx, &tenant, filter.include_archived)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(movements))
}

// POST /api/movements/create
#[utoipa::path(
    post,
    path = "/api/movements/create",
    tag = "Movements",
    request_body = MovementPayload,
    responses(
        (status = 201, description = "Movimentação criada com número sequencial", body = Movement),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Estabelecimento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    AuthenticatedUser(session): AuthenticatedUser,
    ValidatedJson(payload): ValidatedJson<MovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let movement = app_state
        .movement_service
        .create(&mut *tx, &tenant, &payload, session.user_id)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(movement))
}

// GET /api/movements/{id}
#[utoipa::path(
    get,
    path = "/api/movements/{id}",
    tag = "Movements",
    params(("id" = Uuid, Path, description = "ID da movimentação")),
    responses(
        (status = 200, description = "Movimentação", body = Movement),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let movement = app_state
        .repos
        .movements
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Movement))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(movement))
}

// DELETE /api/movements/{id}/delete (arquiva; movimentações nunca são apagadas)
#[utoipa::path(
    delete,
    path = "/api/movements/{id}/delete",
    tag = "Movements",
    params(("id" = Uuid, Path, description = "ID da movimentação")),
    responses(
        (status = 200, description = "Movimentação arquivada", body = Movement),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let movement = app_state
        .repos
        .movements
        .archive(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Movement))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(movement))
}
