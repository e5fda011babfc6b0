// src/routes.rs

use anyhow::Context;
use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> anyhow::Result<Router> {
    // Rotas públicas (allow-list em middleware::auth::PUBLIC_PATHS)
    let public_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/auth", get(handlers::auth::session))
        .route("/database/seed", post(handlers::database::seed))
        .route("/health", get(handlers::database::health));

    let client_routes = Router::new()
        .route("/", get(handlers::clients::list_clients))
        .route("/create", post(handlers::clients::create_client))
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        );

    let establishment_routes = Router::new()
        .route("/", get(handlers::establishments::list_establishments))
        .route("/create", post(handlers::establishments::create_establishment))
        .route(
            "/{id}",
            get(handlers::establishments::get_establishment).put(handlers::establishments::update_establishment),
        )
        .route("/{id}/delete", delete(handlers::establishments::deactivate_establishment));

    let register_routes = Router::new()
        .route("/", get(handlers::registers::list_registers))
        .route("/create", post(handlers::registers::create_register))
        .route(
            "/{id}",
            get(handlers::registers::get_register).put(handlers::registers::update_register),
        )
        .route("/{id}/delete", delete(handlers::registers::deactivate_register));

    let seller_routes = Router::new()
        .route("/", get(handlers::sellers::list_sellers))
        .route("/create", post(handlers::sellers::create_seller))
        .route("/{id}", get(handlers::sellers::get_seller).put(handlers::sellers::update_seller))
        .route("/{id}/delete", delete(handlers::sellers::deactivate_seller));

    let supplier_routes = Router::new()
        .route("/", get(handlers::suppliers::list_suppliers))
        .route("/create", post(handlers::suppliers::create_supplier))
        .route(
            "/{id}",
            get(handlers::suppliers::get_supplier).put(handlers::suppliers::update_supplier),
        )
        .route("/{id}/delete", delete(handlers::suppliers::archive_supplier));

    let brand_routes = Router::new()
        .route("/", get(handlers::brands::list_brands))
        .route("/create", post(handlers::brands::create_brand))
        .route("/{id}", get(handlers::brands::get_brand).put(handlers::brands::update_brand))
        .route("/{id}/delete", delete(handlers::brands::archive_brand));

    let tax_rate_routes = Router::new()
        .route(
            "/",
            get(handlers::tax_rates::list_tax_rates).post(handlers::tax_rates::create_tax_rate),
        )
        .route(
            "/{id}",
            get(handlers::tax_rates::get_tax_rate)
                .put(handlers::tax_rates::update_tax_rate)
                .delete(handlers::tax_rates::archive_tax_rate),
        );

    let variation_routes = Router::new()
        .route("/groups", get(handlers::variations::list_groups))
        .route("/groups/create", post(handlers::variations::create_group))
        .route("/groups/{id}", put(handlers::variations::update_group))
        .route("/groups/{id}/delete", delete(handlers::variations::archive_group))
        .route("/", get(handlers::variations::list_variations))
        .route("/create", post(handlers::variations::create_variation))
        .route(
            "/{id}",
            get(handlers::variations::get_variation).put(handlers::variations::update_variation),
        )
        .route("/{id}/delete", delete(handlers::variations::archive_variation));

    let sales_routes = Router::new()
        .route("/check-closure", get(handlers::sales::check_closure))
        .route(
            "/closures",
            get(handlers::sales::list_closures).post(handlers::sales::close_day),
        );

    let movement_routes = Router::new()
        .route("/", get(handlers::movements::list_movements))
        .route("/create", post(handlers::movements::create_movement))
        .route("/{id}", get(handlers::movements::get_movement))
        .route("/{id}/delete", delete(handlers::movements::archive_movement));

    let api = Router::new()
        .merge(public_routes)
        .nest("/clients", client_routes)
        .nest("/establishments", establishment_routes)
        .nest("/registers", register_routes)
        .nest("/sellers", seller_routes)
        .nest("/suppliers", supplier_routes)
        .nest("/brands", brand_routes)
        .nest("/tax-rates", tax_rate_routes)
        .nest("/variations", variation_routes)
        .nest("/sales", sales_routes)
        .nest("/movements", movement_routes);

    let cors = cors_layer(app_state.settings.cors_origin.as_deref())?;

    // Um único guardião para tudo; as rotas públicas passam pela allow-list
    let app = Router::new()
        .nest("/api", api)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard))
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn cors_layer(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(match origin {
        Some(origin) => layer.allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("CORS_ORIGIN inválido: {origin}"))?,
        ),
        None => layer.allow_origin(Any),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Settings,
        models::auth::{User, UserRole},
    };
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use uuid::Uuid;

    // O pool nunca conecta: qualquer rota que chegue ao banco falharia com 500
    fn state(seed_enabled: bool) -> AppState {
        let settings = Settings {
            database_url: "postgres://ninguem@127.0.0.1:1/nada".into(),
            jwt_secret: "segredo-de-teste-com-32-bytes!!!".into(),
            bind_addr: "127.0.0.1:0".into(),
            db_max_connections: 1,
            token_ttl_hours: 1,
            seed_enabled,
            cors_origin: None,
        };
        let pool = PgPoolOptions::new().connect_lazy(&settings.database_url).unwrap();
        AppState::with_pool(pool, settings)
    }

    fn token(state: &AppState, tenant_id: Option<Uuid>, role: UserRole) -> String {
        let user = User {
            id: Uuid::new_v4(),
            tenant_id,
            email: "x@boutique.fr".into(),
            password_hash: String::new(),
            full_name: "X".into(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        state.auth_service.create_token(&user).unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).unwrap().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, bearer: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn data_routes_require_a_token() {
        let (status, body) = send(state(false), get("/api/clients", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Jeton d'authentification invalide ou absent."));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let (status, _) = send(state(false), get("/api/tax-rates", Some("nao.e.jwt"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_without_tenant_is_rejected() {
        let state = state(false);
        let token = token(&state, None, UserRole::Admin);
        let (status, body) = send(state, get("/api/establishments", Some(&token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!("Aucune organisation n'est associée à cette session."));
    }

    #[tokio::test]
    async fn cashier_cannot_change_tax_rates() {
        let state = state(false);
        let token = token(&state, Some(Uuid::new_v4()), UserRole::Cashier);
        let body = r#"{"name":"TVA","rate":20,"code":"TVA20"}"#;
        let (status, body) = send(state, post_json("/api/tax-rates", Some(&token), body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let state = state(false);
        let token = token(&state, Some(Uuid::new_v4()), UserRole::Manager);
        let (status, body) = send(state, post_json("/api/establishments/create", Some(&token), "{nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["body"].is_array());
    }

    #[tokio::test]
    async fn invalid_fields_never_reach_the_database() {
        let state = state(false);
        let token = token(&state, Some(Uuid::new_v4()), UserRole::Manager);
        let body = r#"{"name":"   ","rate":120,"code":"tva 20"}"#;
        let (status, body) = send(state, post_json("/api/tax-rates", Some(&token), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["name"].is_array());
        assert!(body["details"]["rate"].is_array());
        assert!(body["details"]["code"].is_array());
    }

    #[tokio::test]
    async fn validation_message_follows_accept_language() {
        let state = state(false);
        let token = token(&state, Some(Uuid::new_v4()), UserRole::Cashier);
        let request = Request::builder()
            .method("POST")
            .uri("/api/clients/create")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT_LANGUAGE, "en-GB,en;q=0.9")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(r#"{"name":""}"#))
            .unwrap();
        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("One or more fields are invalid."));
        assert_eq!(body["details"]["name"][0], json!("Must be between 1 and 150 characters."));
    }

    #[tokio::test]
    async fn session_endpoint_is_public() {
        let (status, body) = send(state(false), get("/api/auth", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["authenticated"], json!(false));

        let (status, body) = send(state(false), get("/api/auth", Some("expirado"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["authenticated"], json!(false));

        let state = state(false);
        let tenant_id = Uuid::new_v4();
        let token = token(&state, Some(tenant_id), UserRole::Manager);
        let (status, body) = send(state, get("/api/auth", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["authenticated"], json!(true));
        assert_eq!(body["data"]["tenantId"], json!(tenant_id));
        assert_eq!(body["data"]["role"], json!("MANAGER"));
    }

    #[tokio::test]
    async fn seed_is_hidden_when_disabled() {
        let body = r#"{"tenantName":"Démo","email":"a@b.fr","password":"secret1","fullName":"Admin"}"#;
        let (status, body) = send(state(false), post_json("/api/database/seed", None, body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));

        // Nem um corpo inválido revela a rota
        let (status, body) = send(state(false), post_json("/api/database/seed", None, r#"{"email":"x"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn malformed_path_id_uses_the_error_envelope() {
        let state = state(false);
        let token = token(&state, Some(Uuid::new_v4()), UserRole::Cashier);
        let (status, body) = send(state, get("/api/clients/nao-e-uuid", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Le corps de la requête est invalide."));
        assert!(body["details"]["body"].is_array());
    }

    #[tokio::test]
    async fn malformed_query_uses_the_error_envelope() {
        let state = state(false);
        let token = token(&state, Some(Uuid::new_v4()), UserRole::Manager);

        let (status, body) =
            send(state.clone(), get("/api/sales/check-closure?registerId=abc", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert!(body["details"]["body"].is_array());

        let (status, body) = send(state, get("/api/tax-rates?includeArchived=talvez", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn health_is_public() {
        let (status, body) = send(state(false), get("/api/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
    }
}
