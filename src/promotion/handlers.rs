//! REST API handlers for promotions

use crate::error::ShopError;
use crate::state::SharedState;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

/// Creates routes for promotion-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/promotions", get(list_promotions))
}

/// Endpoint: GET /promotions
/// Lists the active rules keyed by trigger type.
async fn list_promotions(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, ShopError> {
    let promotions = state.store.promotions()?;

    Ok(Json(json!({ "promotions": promotions })))
}
