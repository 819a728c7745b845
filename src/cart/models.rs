//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use crate::auth::models::UserId;
use crate::catalog::models::{Product, ProductId, ProductType};
use crate::promotion::engine::PricedCart;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a cart
pub type CartId = u32;

/// Decimal places kept on percentage-discounted prices
pub const PRICE_SCALE: u32 = 2;

/// Rounding applied when a discounted price is cut to `PRICE_SCALE`
pub const PRICE_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// One unit of a product held in a cart, with its promotion pricing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub product_type: ProductType,
    pub product_name: String,
    pub unit_price: Decimal,
    pub is_discounted: bool,
    pub is_special_price: bool,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub discounted_price: Decimal,
}

impl CartLineItem {
    /// An undiscounted unit of `product`
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_type: product.product_type,
            product_name: product.name.clone(),
            unit_price: product.unit_price,
            is_discounted: false,
            is_special_price: false,
            discount_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            discounted_price: product.unit_price,
        }
    }

    pub fn reset_pricing(&mut self) {
        self.is_discounted = false;
        self.is_special_price = false;
        self.discount_percent = Decimal::ZERO;
        self.discount_amount = Decimal::ZERO;
        self.discounted_price = self.unit_price;
    }

    /// Prices this unit at `price`, replacing any earlier discount.
    pub fn apply_special_price(&mut self, price: Decimal) {
        self.is_discounted = false;
        self.is_special_price = true;
        self.discount_percent = Decimal::ZERO;
        self.discounted_price = price;
        self.discount_amount = self.unit_price - self.discounted_price;
    }

    /// Takes `percent` off the unit price, replacing any earlier special price.
    ///
    /// The discounted price is `unit_price * (100 - percent) / 100` rounded to
    /// `PRICE_SCALE` places with `PRICE_ROUNDING`, so 15% off 9.99 is 8.49.
    pub fn apply_discount(&mut self, percent: Decimal) {
        self.is_discounted = true;
        self.is_special_price = false;
        self.discount_percent = percent;
        self.discounted_price = (self.unit_price * (Decimal::ONE_HUNDRED - percent)
            / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(PRICE_SCALE, PRICE_ROUNDING);
        self.discount_amount = self.unit_price - self.discounted_price;
    }
}

/// A user's cart: per-unit items grouped by type plus the last checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,

    /// Units in insertion order per type
    pub items: BTreeMap<ProductType, Vec<CartLineItem>>,

    /// Priced line items from the last checkout
    #[serde(default)]
    pub checkout: Vec<CartLineItem>,

    #[serde(default)]
    pub total_price: Decimal,

    #[serde(default)]
    pub total_discount: Decimal,
}

impl Cart {
    pub fn new(id: CartId, user_id: UserId) -> Self {
        Self {
            id,
            user_id,
            items: BTreeMap::new(),
            checkout: Vec::new(),
            total_price: Decimal::ZERO,
            total_discount: Decimal::ZERO,
        }
    }

    /// Units of `product_type` currently held
    pub fn units_of(&self, product_type: ProductType) -> usize {
        self.items.get(&product_type).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(Vec::is_empty)
    }

    /// Clears promotion state on every unit in the cart
    pub fn reset_promotions(&mut self) {
        self.items
            .values_mut()
            .flatten()
            .for_each(CartLineItem::reset_pricing);
    }

    /// Units held per product type, as bought on purchase
    pub fn purchase_counts(&self) -> BTreeMap<ProductType, u32> {
        self.items
            .iter()
            .filter(|(_, units)| !units.is_empty())
            .map(|(product_type, units)| (*product_type, units.len() as u32))
            .collect()
    }

    /// Stores the outcome of a pricing pass as the checkout snapshot
    pub fn apply_checkout(&mut self, priced: PricedCart) {
        self.checkout = priced.line_items;
        self.total_price = priced.total_price;
        self.total_discount = priced.total_discount;
    }
}

// =============================================================================
// Request / Response Models
// =============================================================================

/// Input for adding units of a product
#[derive(Debug, Deserialize)]
pub struct AddItemInput {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Input for removing units of a product type
#[derive(Debug, Deserialize)]
pub struct RemoveItemInput {
    pub product_type: ProductType,
    pub quantity: u32,
}

/// Response wrapping the caller's cart
#[derive(Serialize)]
pub struct CartResponse {
    pub cart: Cart,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn shoe() -> Product {
        Product {
            id: 5,
            product_type: 5,
            name: "Shoe".into(),
            stock: 1,
            unit_price: dec!(120),
        }
    }

    #[test]
    fn test_new_unit_is_undiscounted() {
        let item = CartLineItem::from_product(&shoe());

        assert!(!item.is_discounted && !item.is_special_price);
        assert_eq!(item.discounted_price, item.unit_price);
        assert_eq!(item.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn test_discount_then_special_price_last_wins() {
        let mut item = CartLineItem::from_product(&shoe());

        item.apply_discount(dec!(15));
        assert_eq!(item.discounted_price, dec!(102.00));
        assert_eq!(item.discount_amount, dec!(18.00));

        item.apply_special_price(dec!(100));
        assert!(item.is_special_price && !item.is_discounted);
        assert_eq!(item.discount_percent, Decimal::ZERO);
        assert_eq!(item.discount_amount, dec!(20));
    }

    #[test]
    fn test_discount_rounds_to_cents() {
        let mut item = CartLineItem::from_product(&Product {
            unit_price: dec!(9.99),
            ..shoe()
        });

        item.apply_discount(dec!(15));
        assert_eq!(item.discounted_price, dec!(8.49));
        assert_eq!(item.discount_amount, dec!(1.50));
        assert_eq!(item.discounted_price.scale(), PRICE_SCALE);
    }

    #[test]
    fn test_discount_rounds_midpoint_away_from_zero() {
        // 0.25 * 0.5 = 0.125 lands exactly on a midpoint
        let mut item = CartLineItem::from_product(&Product {
            unit_price: dec!(0.25),
            ..shoe()
        });

        item.apply_discount(dec!(50));
        assert_eq!(item.discounted_price, dec!(0.13));
        assert_eq!(item.discount_amount, dec!(0.12));
    }

    #[test]
    fn test_purchase_counts_skip_empty_types() {
        let mut cart = Cart::new(1, 1);
        cart.items.insert(5, vec![CartLineItem::from_product(&shoe())]);
        cart.items.insert(4, Vec::new());

        assert_eq!(cart.purchase_counts(), BTreeMap::from([(5, 1)]));
    }
}
