//! Authentication Module
//!
//! Users, basic-auth login issuing access tokens, and the bearer token
//! middleware guarding cart routes.

pub mod handlers;
pub mod helpers;
pub mod middleware;
pub mod models;

pub use handlers::routes;
pub use middleware::require_token;
pub use models::{User, UserId};
