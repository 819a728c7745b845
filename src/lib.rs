//! Shopping API Library
//!
//! A small shop backend: product catalog, promotion rules, per-user carts
//! priced by the promotion engine at checkout, and the HTTP surface over
//! them.

// Domain modules
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod promotion;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod store;
