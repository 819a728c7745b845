//! Bearer token middleware for cart routes

use super::helpers::parse_bearer;
use crate::error::ShopError;
use crate::state::SharedState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Resolves the bearer token to a user and injects it into the request
/// extensions.
pub async fn require_token(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ShopError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ShopError::MissingToken)?;

    let token = parse_bearer(header).ok_or(ShopError::MissingToken)?;
    let user = state.authenticate(token)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
