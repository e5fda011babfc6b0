// src/handlers/variations.rs

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
        variation::{Variation, VariationGroup, VariationGroupPayload, VariationPayload, VariationQuery},
        ArchiveFilter,
    },
};

// =============================================================================
//  ÁREA 1: GRUPOS
// =============================================================================

// GET /api/variations/groups
#[utoipa::path(
    get,
    path = "/api/variations/groups",
    tag = "Variations",
    params(ArchiveFilter),
    responses((status = 200, description = "Grupos de variação", body = [VariationGroup])),
    security(("api_jwt" = []))
)]
pub async fn list_groups(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(filter): Query<ArchiveFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let groups = app_state
        .repos
        .variations
        .list_groups(&mut *tx, &tenant, filter.include_archived)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(groups))
}

// POST /api/variations/groups/create
#[utoipa::path(
    post,
    path = "/api/variations/groups/create",
    tag = "Variations",
    request_body = VariationGroupPayload,
    responses(
        (status = 201, description = "Grupo criado", body = VariationGroup),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_group(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    ValidatedJson(payload): ValidatedJson<VariationGroupPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let group = app_state
        .repos
        .variations
        .create_group(&mut *tx, &tenant, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(group))
}

// PUT /api/variations/groups/{id}
#[utoipa::path(
    put,
    path = "/api/variations/groups/{id}",
    tag = "Variations",
    params(("id" = Uuid, Path, description = "ID do grupo")),
    request_body = VariationGroupPayload,
    responses(
        (status = 200, description = "Grupo atualizado", body = VariationGroup),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_group(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<VariationGroupPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let group = app_state
        .repos
        .variations
        .update_group(&mut *tx, &tenant, id, &payload)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::VariationGroup))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(group))
}

// DELETE /api/variations/groups/{id}/delete (arquiva)
#[utoipa::path(
    delete,
    path = "/api/variations/groups/{id}/delete",
    tag = "Variations",
    params(("id" = Uuid, Path, description = "ID do grupo")),
    responses(
        (status = 200, description = "Grupo arquivado", body = VariationGroup),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_group(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let group = app_state
        .repos
        .variations
        .archive_group(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::VariationGroup))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(group))
}

// =============================================================================
//  ÁREA 2: VARIAÇÕES
// =============================================================================

// GET /api/variations
#[utoipa::path(
    get,
    path = "/api/variations",
    tag = "Variations",
    params(VariationQuery),
    responses((status = 200, description = "Variações", body = [Variation])),
    security(("api_jwt" = []))
)]
pub async fn list_variations(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<VariationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let variations = app_state
        .repos
        .variations
        .list(&mut *tx, &tenant, query.group_id, query.include_archived)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(variations))
}

// POST /api/variations/create
#[utoipa::path(
    post,
    path = "/api/variations/create",
    tag = "Variations",
    request_body = VariationPayload,
    responses(
        (status = 201, description = "Variação criada", body = Variation),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Grupo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_variation(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    ValidatedJson(payload): ValidatedJson<VariationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let variation = app_state
        .catalog_service
        .save_variation(&mut *tx, &tenant, None, &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(variation))
}

// GET /api/variations/{id}
#[utoipa::path(
    get,
    path = "/api/variations/{id}",
    tag = "Variations",
    params(("id" = Uuid, Path, description = "ID da variação")),
    responses(
        (status = 200, description = "Variação", body = Variation),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_variation(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let variation = app_state
        .repos
        .variations
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Variation))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(variation))
}

// PUT /api/variations/{id}
#[utoipa::path(
    put,
    path = "/api/variations/{id}",
    tag = "Variations",
    params(("id" = Uuid, Path, description = "ID da variação")),
    request_body = VariationPayload,
    responses(
        (status = 200, description = "Variação atualizada", body = Variation),
        (status = 404, description = "Variação ou grupo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_variation(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<VariationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let variation = app_state
        .catalog_service
        .save_variation(&mut *tx, &tenant, Some(id), &payload)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(variation))
}

// DELETE /api/variations/{id}/delete (arquiva)
#[utoipa::path(
    delete,
    path = "/api/variations/{id}/delete",
    tag = "Variations",
    params(("id" = Uuid, Path, description = "ID da variação")),
    responses(
        (status = 200, description = "Variação arquivada", body = Variation),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_variation(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let variation = app_state
        .repos
        .variations
        .archive(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Variation))
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(variation))
}
