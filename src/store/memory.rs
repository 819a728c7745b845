//! In-memory `Store` backed by `DashMap` and `RwLock`

use super::Store;
use crate::auth::models::{User, UserId};
use crate::cart::models::{Cart, CartId};
use crate::catalog::models::{Catalog, Product};
use crate::error::ShopError;
use crate::promotion::models::{PromotionRule, Ruleset};
use dashmap::DashMap;
use std::sync::{
    atomic::{AtomicU32, Ordering},
    PoisonError, RwLock,
};

/// Process-local storage for all shop data.
///
/// Carts are keyed by the owning user. DashMap allows concurrent access
/// without external Mutexes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Catalog>,
    promotions: RwLock<Ruleset>,
    users: DashMap<UserId, User>,
    carts: DashMap<UserId, Cart>,
    last_cart_id: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_cart_id(&self) -> CartId {
        self.last_cart_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Store for MemoryStore {
    fn set_products(&self, products: Vec<Product>) -> Result<(), ShopError> {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .bulk_replace(products)
    }

    fn products(&self) -> Result<Catalog, ShopError> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn update_products(&self, catalog: Catalog) -> Result<(), ShopError> {
        if catalog.is_empty() {
            return Err(ShopError::EmptyInput("products"));
        }
        *self.products.write().unwrap_or_else(PoisonError::into_inner) = catalog;
        Ok(())
    }

    fn set_promotions(&self, rules: Vec<PromotionRule>) -> Result<(), ShopError> {
        if rules.is_empty() {
            return Err(ShopError::EmptyInput("promotions"));
        }
        for rule in &rules {
            rule.validate()?;
        }

        let mut ruleset = self.promotions.write().unwrap_or_else(PoisonError::into_inner);
        for rule in rules {
            ruleset.insert(rule);
        }
        Ok(())
    }

    fn promotions(&self) -> Result<Ruleset, ShopError> {
        Ok(self
            .promotions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set_users(&self, users: Vec<User>) -> Result<(), ShopError> {
        if users.is_empty() {
            return Err(ShopError::EmptyInput("users"));
        }
        users.into_iter().try_for_each(|user| self.set_user(user))
    }

    fn set_user(&self, user: User) -> Result<(), ShopError> {
        self.carts
            .entry(user.id)
            .or_insert_with(|| Cart::new(self.next_cart_id(), user.id));
        self.users.insert(user.id, user);
        Ok(())
    }

    fn user_by_name(&self, username: &str) -> Result<Option<User>, ShopError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.value().clone()))
    }

    fn user_by_token(&self, token: &str) -> Result<Option<User>, ShopError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.token.as_deref() == Some(token))
            .map(|u| u.value().clone()))
    }

    fn cart_by_user(&self, user_id: UserId) -> Result<Option<Cart>, ShopError> {
        Ok(self.carts.get(&user_id).map(|c| c.value().clone()))
    }

    fn set_cart(&self, cart: Cart) -> Result<(), ShopError> {
        self.carts.insert(cart.user_id, cart);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn user(id: UserId, username: &str) -> User {
        User {
            id,
            username: username.into(),
            password: "secret".into(),
            token: None,
        }
    }

    #[test]
    fn test_set_user_creates_cart_once() {
        let store = MemoryStore::new();
        store.set_users(vec![user(1, "ann"), user(2, "bob")]).unwrap();

        let cart = store.cart_by_user(2).unwrap().unwrap();
        assert_eq!(cart.user_id, 2);
        assert_eq!(cart.id, 2);

        let mut relogged = user(2, "bob");
        relogged.token = Some("abc".into());
        store.set_user(relogged).unwrap();

        assert_eq!(store.cart_by_user(2).unwrap().unwrap().id, 2);
        assert_eq!(store.user_by_token("abc").unwrap().unwrap().username, "bob");
        assert!(store.user_by_token("nope").unwrap().is_none());
    }

    #[test]
    fn test_empty_loads_are_rejected() {
        let store = MemoryStore::new();

        assert!(matches!(store.set_products(vec![]), Err(ShopError::EmptyInput("products"))));
        assert!(matches!(store.set_promotions(vec![]), Err(ShopError::EmptyInput("promotions"))));
        assert!(matches!(store.set_users(vec![]), Err(ShopError::EmptyInput("users"))));
        assert!(matches!(
            store.update_products(Catalog::new()),
            Err(ShopError::EmptyInput("products"))
        ));
    }

    #[test]
    fn test_promotions_overwrite_by_trigger_type() {
        let store = MemoryStore::new();
        let rule = |percent| PromotionRule {
            trigger_type: 4,
            quantity_for_discount: 2,
            discounted_types: BTreeSet::from([1]),
            discount_percent: percent,
            quantity_for_special_price: 0,
            special_price: dec!(0),
        };

        store.set_promotions(vec![rule(dec!(10)), rule(dec!(20))]).unwrap();

        let ruleset = store.promotions().unwrap();
        assert_eq!(ruleset.len(), 1);
        assert_eq!(ruleset.get(4).unwrap().discount_percent, dec!(20));
    }
}
