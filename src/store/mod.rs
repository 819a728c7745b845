//! Storage Module
//!
//! The `Store` trait is the only way the service reads or writes shop data,
//! so a durable backend can replace the in-memory one without touching the
//! pricing code.

pub mod memory;

use crate::auth::models::{User, UserId};
use crate::cart::models::Cart;
use crate::catalog::models::{Catalog, Product};
use crate::error::ShopError;
use crate::promotion::models::{PromotionRule, Ruleset};

pub use memory::MemoryStore;

/// Get/set access to products, promotions, users and carts
pub trait Store: Send + Sync {
    /// Upserts products by id. Fails on an empty list.
    fn set_products(&self, products: Vec<Product>) -> Result<(), ShopError>;

    /// Snapshot of the catalog
    fn products(&self) -> Result<Catalog, ShopError>;

    /// Replaces the whole catalog. Fails on an empty catalog.
    fn update_products(&self, catalog: Catalog) -> Result<(), ShopError>;

    /// Stores rules by trigger type, later rules overwriting earlier ones.
    fn set_promotions(&self, rules: Vec<PromotionRule>) -> Result<(), ShopError>;

    /// Snapshot of the ruleset, possibly empty
    fn promotions(&self) -> Result<Ruleset, ShopError>;

    fn set_users(&self, users: Vec<User>) -> Result<(), ShopError>;

    /// Upserts a user, creating an empty cart for them if they have none.
    fn set_user(&self, user: User) -> Result<(), ShopError>;

    fn user_by_name(&self, username: &str) -> Result<Option<User>, ShopError>;

    fn user_by_token(&self, token: &str) -> Result<Option<User>, ShopError>;

    fn cart_by_user(&self, user_id: UserId) -> Result<Option<Cart>, ShopError>;

    /// Stores the cart, last write wins.
    fn set_cart(&self, cart: Cart) -> Result<(), ShopError>;
}
