// src/handlers/registers.rs

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
    models::register::{Register, RegisterPayload, RegisterQuery},
};

// GET /api/registers
#[utoipa::path(
    get,
    path = "/api/registers",
    tag = "Registers",
    params(RegisterQuery),
    responses((status = 200, description = "Caixas do tenant", body = [Register])),
    security(("api_jwt" = []))
)]
pub async fn list_registers(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<RegisterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let registers = app_state
        .repos
        .registers
        .list(&mut *tx, &tenant, query.establishment_id)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(registers))
}

// POST /api/registers/create
#[utoipa::path(
    post,
    path = "/api/registers/create",
    tag = "Registers",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Caixa criado", body = Register),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Estabelecimento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_register(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    ValidatedJson(payload): ValidatedJson<RegisterPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let register = app_state
        .catalog_service
        .save_register(&mut *tx, &tenant, None, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(register))
}

// GET /api/registers/{id}
#[utoipa::path(
    get,
    path = "/api/registers/{id}",
    tag = "Registers",
    params(("id" = Uuid, Path, description = "ID do caixa")),
    responses(
        (status = 200, description = "Caixa", body = Register),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_register(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let register = app_state
        .repos
        .registers
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Register))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(register))
}

// PUT /api/registers/{id}
#[utoipa::path(
    put,
    path = "/api/registers/{id}",
    tag = "Registers",
    params(("id" = Uuid, Path, description = "ID do caixa")),
    request_body = RegisterPayload,
    responses(
        (status = 200, description = "Caixa atualizado", body = Register),
        (status = 404, description = "Caixa ou estabelecimento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_register(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RegisterPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let register = app_state
        .catalog_service
        .save_register(&mut *tx, &tenant, Some(id), &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(register))
}

// DELETE /api/registers/{id}/delete (desativa, nunca apaga)
#[utoipa::path(
    delete,
    path = "/api/registers/{id}/delete",
    tag = "Registers",
    params(("id" = Uuid, Path, description = "ID do caixa")),
    responses(
        (status = 200, description = "Caixa desativado", body = Register),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_register(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let register = app_state
        .repos
        .registers
        .deactivate(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Register))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(register))
}
