// src/handlers/sales.rs

use axum::{
    extract::State,
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    common::{
        db_utils::begin_tenant_tx,
        error::{ApiError, AppError, Localized},
        response,
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        extract::Query,
        i18n::Locale,
        json::ValidatedJson,
        rbac::{Manager, RequireRole},
        tenancy::TenantContext,
    },
    models::closure::{CheckClosureQuery, Closure, ClosureListQuery, ClosurePayload, ClosureStatus},
};

// GET /api/sales/check-closure?registerId=&date=
#[utoipa::path(
    get,
    path = "/api/sales/check-closure",
    tag = "Sales",
    params(CheckClosureQuery),
    responses(
        (status = 200, description = "Estado do fechamento do dia", body = ClosureStatus),
        (status = 400, description = "registerId ausente"),
        (status = 404, description = "Caixa não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_closure(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<CheckClosureQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate().map_err(AppError::ValidationError).localized(&locale)?;
    let register_id = query
        .register_id
        .ok_or_else(|| AppError::InvalidBody("registerId".into()))
        .localized(&locale)?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let status = app_state
        .closure_service
        .check(&mut *tx, &tenant, register_id, date)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(status))
}

// GET /api/sales/closures
#[utoipa::path(
    get,
    path = "/api/sales/closures",
    tag = "Sales",
    params(ClosureListQuery),
    responses((status = 200, description = "Fechamentos, mais recentes primeiro", body = [Closure])),
    security(("api_jwt" = []))
)]
pub async fn list_closures(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<ClosureListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let closures = app_state
        .repos
        .closures
        .list(&mut *tx, &tenant, query.register_id)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::ok(closures))
}

// POST /api/sales/closures
#[utoipa::path(
    post,
    path = "/api/sales/closures",
    tag = "Sales",
    request_body = ClosurePayload,
    responses(
        (status = 201, description = "Dia fechado", body = Closure),
        (status = 400, description = "Dados inválidos ou caixa desativado"),
        (status = 404, description = "Caixa não encontrado"),
        (status = 500, description = "Dia já fechado")
    ),
    security(("api_jwt" = []))
)]
pub async fn close_day(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    _role: RequireRole<Manager>,
    AuthenticatedUser(session): AuthenticatedUser,
    ValidatedJson(payload): ValidatedJson<ClosurePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let register_id = payload
        .register_id
        .ok_or_else(|| AppError::InvalidBody("registerId".into()))
        .localized(&locale)?;
    let date = payload.date.unwrap_or_else(|| Utc::now().date_naive());

    let mut tx = begin_tenant_tx(&app_state.db_pool, &tenant).await.localized(&locale)?;
    let closure = app_state
        .closure_service
        .close_day(&mut *tx, &tenant, register_id, date, session.user_id)
        .await
        .localized(&locale)?;
    tx.commit().await.localized(&locale)?;
    Ok(response::created(closure))
}
