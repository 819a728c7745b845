//! Error types shared by the shop domain and its HTTP surface

use crate::catalog::models::{ProductId, ProductType};
use crate::auth::models::UserId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Every failure the shop can report to a caller.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    #[error("Not enough stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Empty input: no {0} given")]
    EmptyInput(&'static str),

    #[error("Invalid promotion for product type {trigger_type}: {reason}")]
    InvalidPromotion {
        trigger_type: ProductType,
        reason: String,
    },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing access token")]
    MissingToken,

    #[error("Invalid access token")]
    InvalidToken,

    #[error("Cart not found for user {0}")]
    CartNotFound(UserId),
}

impl ShopError {
    pub fn status(&self) -> StatusCode {
        match self {
            ShopError::UnknownProduct(_) | ShopError::CartNotFound(_) => StatusCode::NOT_FOUND,
            ShopError::InsufficientStock { .. }
            | ShopError::EmptyInput(_)
            | ShopError::InvalidPromotion { .. } => StatusCode::BAD_REQUEST,
            ShopError::InvalidCredentials | ShopError::MissingToken | ShopError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request failed");

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
