//! Shop Application State
//!
//! `AppState` runs every shop operation as a read-modify-write against the
//! store. Cart operations hold the owning user's lock for their whole
//! duration; purchases also hold the global stock lock.

use crate::auth::helpers::generate_token;
use crate::auth::models::{User, UserId};
use crate::cart::helpers::{add_item, clear_cart, format_item_summary, remove_item};
use crate::cart::models::Cart;
use crate::catalog::models::{Catalog, ProductId, ProductType};
use crate::config::AppConfig;
use crate::error::ShopError;
use crate::promotion::engine::PromotionEngine;
use crate::store::{MemoryStore, Store};
use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state: storage, pricing and the locks serializing writes
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub engine: PromotionEngine,

    /// Deployment name reported in request logs
    pub environment: String,

    cart_locks: DashMap<UserId, Arc<Mutex<()>>>,
    stock_lock: Mutex<()>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, engine: PromotionEngine, environment: impl Into<String>) -> Self {
        Self {
            store,
            engine,
            environment: environment.into(),
            cart_locks: DashMap::new(),
            stock_lock: Mutex::new(()),
        }
    }

    /// Builds an in-memory shop seeded from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, ShopError> {
        let store = MemoryStore::new();
        store.set_products(config.products.clone())?;
        store.set_promotions(config.promotions.clone())?;
        store.set_users(config.users.clone())?;

        Ok(Self::new(
            Arc::new(store),
            PromotionEngine::new(config.pricing.zero_quantity_for_discount),
            config.environment.clone(),
        ))
    }

    /// Runs `f` on the user's cart while holding that user's lock, storing
    /// the cart afterwards if `f` succeeds.
    fn with_cart<T>(
        &self,
        user_id: UserId,
        f: impl FnOnce(&mut Cart) -> Result<T, ShopError>,
    ) -> Result<T, ShopError> {
        let lock = self.cart_locks.entry(user_id).or_default().clone();
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut cart = self
            .store
            .cart_by_user(user_id)?
            .ok_or(ShopError::CartNotFound(user_id))?;

        let out = f(&mut cart)?;
        self.store.set_cart(cart)?;
        Ok(out)
    }

    /// Checks credentials and issues a new access token for the user.
    pub fn login(&self, username: &str, password: &str) -> Result<String, ShopError> {
        let mut user = self
            .store
            .user_by_name(username)?
            .ok_or(ShopError::InvalidCredentials)?;

        if user.password != password {
            tracing::debug!(username, "incorrect password");
            return Err(ShopError::InvalidCredentials);
        }

        let token = generate_token();
        user.token = Some(token.clone());
        self.store.set_user(user)?;

        tracing::info!(username, "user logged in");
        Ok(token)
    }

    pub fn authenticate(&self, token: &str) -> Result<User, ShopError> {
        self.store
            .user_by_token(token)?
            .ok_or(ShopError::InvalidToken)
    }

    pub fn cart(&self, user_id: UserId) -> Result<Cart, ShopError> {
        self.store
            .cart_by_user(user_id)?
            .ok_or(ShopError::CartNotFound(user_id))
    }

    pub fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, ShopError> {
        let catalog = self.store.products()?;
        self.with_cart(user_id, |cart| {
            add_item(cart, &catalog, product_id, quantity)?;
            Ok(cart.clone())
        })
    }

    pub fn remove_item(
        &self,
        user_id: UserId,
        product_type: ProductType,
        quantity: u32,
    ) -> Result<Cart, ShopError> {
        self.with_cart(user_id, |cart| {
            remove_item(cart, product_type, quantity);
            Ok(cart.clone())
        })
    }

    pub fn clear_cart(&self, user_id: UserId) -> Result<Cart, ShopError> {
        self.with_cart(user_id, |cart| {
            clear_cart(cart);
            Ok(cart.clone())
        })
    }

    /// Prices the cart with the current promotions and stores the snapshot.
    pub fn checkout(&self, user_id: UserId) -> Result<Cart, ShopError> {
        let ruleset = self.store.promotions()?;
        self.with_cart(user_id, |cart| {
            let priced = self.engine.price_cart(cart, &ruleset);
            cart.apply_checkout(priced);
            Ok(cart.clone())
        })
    }

    /// Takes the units held in the cart out of stock.
    ///
    /// The cart itself is left as it is.
    pub fn buy(&self, user_id: UserId) -> Result<Catalog, ShopError> {
        self.with_cart(user_id, |cart| {
            let _stock = self.stock_lock.lock().unwrap_or_else(PoisonError::into_inner);

            let mut catalog = self.store.products()?;
            catalog.adjust_stock(&cart.purchase_counts());
            self.store.update_products(catalog.clone())?;

            tracing::info!(user_id, items = %format_item_summary(cart), "cart bought");
            Ok(catalog)
        })
    }
}
