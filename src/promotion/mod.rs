//! Promotion Module
//!
//! Promotion rules keyed by trigger type and the engine that prices carts
//! against them at checkout.

pub mod engine;
pub mod handlers;
pub mod models;

pub use engine::{PricedCart, PromotionEngine};
pub use handlers::routes;
pub use models::{PromotionRule, Ruleset, ZeroThreshold};
