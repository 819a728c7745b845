//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartLineItem, Cart, inputs, responses)
//! - Cart mutations (add, remove, clear) and formatting helpers
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Cart, CartLineItem};
