//! Promotion Engine
//!
//! Prices a cart against a ruleset. Every call recomputes all promotions
//! from the undiscounted state, so pricing the same cart twice yields the
//! same result.

use super::models::{PromotionRule, Ruleset, ZeroThreshold};
use crate::cart::models::{Cart, CartLineItem};
use rust_decimal::Decimal;
use serde::Serialize;

/// Priced line items and their totals
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PricedCart {
    pub line_items: Vec<CartLineItem>,
    /// Sum of unit prices minus the total discount
    pub total_price: Decimal,
    pub total_discount: Decimal,
}

/// Applies bulk-discount and special-price promotions to carts
#[derive(Debug, Clone, Copy, Default)]
pub struct PromotionEngine {
    zero_threshold: ZeroThreshold,
}

impl PromotionEngine {
    pub fn new(zero_threshold: ZeroThreshold) -> Self {
        Self { zero_threshold }
    }

    /// Prices every unit in `cart`, updating the pricing fields of its items.
    ///
    /// Types are visited in ascending order. For each type with a rule, the
    /// special-price pass runs on that type's units and then the bulk pass
    /// on the rule's discounted types. A unit touched by several passes
    /// keeps the last pricing applied to it.
    pub fn price_cart(&self, cart: &mut Cart, ruleset: &Ruleset) -> PricedCart {
        cart.reset_promotions();

        let held: Vec<_> = cart.items.iter().map(|(t, units)| (*t, units.len())).collect();

        for (product_type, count) in held {
            let Some(rule) = ruleset.get(product_type) else {
                continue;
            };

            if rule.has_special_price() && count >= rule.quantity_for_special_price as usize {
                if let Some(units) = cart.items.get_mut(&product_type) {
                    units
                        .iter_mut()
                        .skip(rule.quantity_for_special_price as usize)
                        .for_each(|unit| unit.apply_special_price(rule.special_price));
                }
            }

            if self.bulk_discount_applies(rule, count) {
                for target in &rule.discounted_types {
                    if let Some(units) = cart.items.get_mut(target) {
                        units
                            .iter_mut()
                            .for_each(|unit| unit.apply_discount(rule.discount_percent));
                    }
                }
            }
        }

        let line_items: Vec<CartLineItem> = cart.items.values().flatten().cloned().collect();
        let (total_price, total_discount) = totals(&line_items);

        PricedCart {
            line_items,
            total_price,
            total_discount,
        }
    }

    fn bulk_discount_applies(&self, rule: &PromotionRule, count: usize) -> bool {
        if rule.quantity_for_discount == 0 {
            return count > 0 && self.zero_threshold == ZeroThreshold::AlwaysTriggers;
        }
        count >= rule.quantity_for_discount as usize
    }
}

/// Returns `(total_price, total_discount)` over `items`
pub fn totals(items: &[CartLineItem]) -> (Decimal, Decimal) {
    let (gross, discount) = items
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(gross, discount), item| {
            (gross + item.unit_price, discount + item.discount_amount)
        });

    (gross - discount, discount)
}
