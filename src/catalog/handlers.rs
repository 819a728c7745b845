//! REST API handlers for the product catalog

use crate::error::ShopError;
use crate::state::SharedState;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

/// Creates routes for catalog-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/products", get(list_products))
}

/// Endpoint: GET /products
/// Lists every product with its current stock, keyed by id.
async fn list_products(State(state): State<SharedState>) -> Result<impl IntoResponse, ShopError> {
    let products = state.store.products()?;

    Ok(Json(json!({ "products": products })))
}
