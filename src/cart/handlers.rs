//! REST API handlers for shopping cart operations
//!
//! Every route here runs behind the bearer token middleware, which puts
//! the caller's `User` into the request extensions.

use super::models::{AddItemInput, CartResponse, RemoveItemInput};
use crate::auth::{models::User, require_token};
use crate::error::ShopError;
use crate::state::SharedState;
use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;

/// Creates routes for cart-related operations
pub fn routes(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/add", post(add_item))
        .route("/cart/remove", post(remove_item))
        .route("/cart/clear", post(clear_cart))
        .route("/cart/checkout", get(checkout))
        .route("/cart/buy", post(buy))
        .route_layer(middleware::from_fn_with_state(state, require_token))
}

/// Endpoint: GET /cart
async fn get_cart(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, ShopError> {
    let cart = state.cart(user.id)?;
    Ok(Json(CartResponse { cart }))
}

/// Endpoint: POST /cart/add
async fn add_item(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
    Json(payload): Json<AddItemInput>,
) -> Result<impl IntoResponse, ShopError> {
    let cart = state.add_item(user.id, payload.product_id, payload.quantity)?;
    Ok(Json(CartResponse { cart }))
}

/// Endpoint: POST /cart/remove
/// Removes the oldest units of a type and resets all promotions.
async fn remove_item(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
    Json(payload): Json<RemoveItemInput>,
) -> Result<impl IntoResponse, ShopError> {
    let cart = state.remove_item(user.id, payload.product_type, payload.quantity)?;
    Ok(Json(CartResponse { cart }))
}

/// Endpoint: POST /cart/clear
async fn clear_cart(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, ShopError> {
    let cart = state.clear_cart(user.id)?;
    Ok(Json(CartResponse { cart }))
}

/// Endpoint: GET /cart/checkout
/// Prices the cart with the current promotions.
async fn checkout(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, ShopError> {
    let cart = state.checkout(user.id)?;
    Ok(Json(CartResponse { cart }))
}

/// Endpoint: POST /cart/buy
/// Takes the cart contents out of stock and returns the updated catalog.
async fn buy(
    State(state): State<SharedState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, ShopError> {
    let products = state.buy(user.id)?;
    Ok(Json(json!({ "products": products })))
}
