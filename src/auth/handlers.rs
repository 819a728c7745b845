//! Login handler

use super::models::LoginResponse;
use crate::error::ShopError;
use crate::state::SharedState;
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};

/// Creates routes for authentication
pub fn routes() -> Router<SharedState> {
    Router::new().route("/login", post(login))
}

/// Endpoint: POST /login
/// Checks HTTP basic credentials and issues a fresh access token.
async fn login(
    State(state): State<SharedState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
) -> Result<impl IntoResponse, ShopError> {
    let TypedHeader(Authorization(basic)) = credentials.ok_or(ShopError::InvalidCredentials)?;

    let token = state.login(basic.username(), basic.password())?;

    Ok(Json(LoginResponse { token }))
}
