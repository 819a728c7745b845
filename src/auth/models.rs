//! Authentication Models

use serde::{Deserialize, Serialize};

/// Identifier of a registered user
pub type UserId = u32;

/// A registered shop user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,

    /// Access token issued at the last login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Response for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}
