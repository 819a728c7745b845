//! Inventory Catalog Module
//!
//! Product records, stock lookups and purchase-time stock adjustment,
//! plus the read-only product listing endpoint.

pub mod handlers;
pub mod models;

pub use handlers::routes;
pub use models::{Catalog, Product, ProductId, ProductType};
