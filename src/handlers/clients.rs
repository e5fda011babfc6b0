// src/handlers/clients.rs

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
    middleware::{extract::{Path, Query}, i18n::Locale, json::ValidatedJson, tenancy::TenantContext},
    models::client::{Client, ClientPayload, ClientQuery},
};

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    params(ClientQuery),
    responses(
        (status = 200, description = "Clientes do tenant", body = [Client]),
        (status = 401, description = "Sem sessão ou sem tenant")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<ClientQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;

    let clients = app_state
        .repos
        .clients
        .list(&mut *tx, &tenant, query.search.as_deref())
        .await
        .localized(&locale)?;

    tx.commit().await.localized(&locale)?;
    Ok(response::ok(clients))
}

// POST /api/clients/create
#[utoipa::path(
    post,
    path = "/api/clients/create",
    tag = "Clients",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    ValidatedJson(payload): ValidatedJson<ClientPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;

    let client = app_state
        .repos
        .clients
        .create(&mut *tx, &tenant, &payload)
        .await
        .localized(&locale)?;

    tx.commit().await.localized(&locale)?;
    Ok(response::created(client))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Client),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;

    let client = app_state
        .repos
        .clients
        .find_by_id(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Client))
        .localized(&locale)?;

    tx.commit().await.localized(&locale)?;
    Ok(response::ok(client))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = ClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ClientPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;

    let client = app_state
        .repos
        .clients
        .update(&mut *tx, &tenant, id, &payload)
        .await
        .localized(&locale)?
        .ok_or(AppError::NotFound(Resource::Client))
        .localized(&locale)?;

    tx.commit().await.localized(&locale)?;
    Ok(response::ok(client))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;

    let deleted = app_state
        .repos
        .clients
        .delete(&mut *tx, &tenant, id)
        .await
        .localized(&locale)?;
    if !deleted {
        return Err(AppError::NotFound(Resource::Client).to_api_error(&locale));
    }

    tx.commit().await.localized(&locale)?;
    Ok(response::ok(serde_json::json!({ "id": id })))
}
