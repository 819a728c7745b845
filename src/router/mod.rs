//! Routing module for the shopping API

use crate::state::SharedState;
use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, Uri},
    middleware::Next,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let environment = state.environment.clone();
    let log_layer = axum::middleware::from_fn(move |req: Request<Body>, next: Next| {
        let environment = environment.clone();
        async move {
            let method = req.method().clone();
            let path = req.uri().path().to_owned();
            let started = Instant::now();

            let res = next.run(req).await;

            tracing::info!(
                %environment,
                %method,
                %path,
                status = res.status().as_u16(),
                duration_ms = started.elapsed().as_millis() as u64,
                "handler response"
            );
            res
        }
    });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let v1 = Router::new()
        .merge(crate::auth::routes())
        .merge(crate::catalog::routes())
        .merge(crate::promotion::routes())
        .merge(crate::cart::routes(state.clone()));

    // Routes
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .nest("/v1/shopping", v1)
        .fallback(not_found)
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}

/// Endpoint: GET /healthcheck
async fn healthcheck() -> impl IntoResponse {
    Json(json!({}))
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::warn!(%uri, "route not found");
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{} not found", uri) })),
    )
}

