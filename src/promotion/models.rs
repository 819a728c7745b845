//! Promotion Ruleset Models
//!
//! Discount rules keyed by the product type that triggers them.

use crate::catalog::models::ProductType;
use crate::error::ShopError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};

// =============================================================================
// Promotion Domain Models
// =============================================================================

/// A promotion triggered by holding units of `trigger_type`.
///
/// Two mechanisms may be present on one rule, each enabled by non-zero fields:
/// * bulk discount: holding `quantity_for_discount` units discounts every unit
///   of `discounted_types` by `discount_percent`.
/// * special price: every unit past the first `quantity_for_special_price`
///   costs `special_price`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromotionRule {
    pub trigger_type: ProductType,

    #[serde(default)]
    pub quantity_for_discount: u32,

    #[serde(default)]
    pub discounted_types: BTreeSet<ProductType>,

    /// From 0 to 100
    #[serde(default)]
    pub discount_percent: Decimal,

    #[serde(default)]
    pub quantity_for_special_price: u32,

    #[serde(default)]
    pub special_price: Decimal,
}

impl PromotionRule {
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED {
            return Err(ShopError::InvalidPromotion {
                trigger_type: self.trigger_type,
                reason: format!("discount {} is outside 0..=100", self.discount_percent),
            });
        }
        if self.special_price < Decimal::ZERO {
            return Err(ShopError::InvalidPromotion {
                trigger_type: self.trigger_type,
                reason: format!("special price {} is negative", self.special_price),
            });
        }
        Ok(())
    }

    pub fn has_special_price(&self) -> bool {
        !self.special_price.is_zero()
    }
}

/// How a bulk discount with `quantity_for_discount == 0` behaves
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ZeroThreshold {
    /// A zero threshold switches the bulk discount off
    #[default]
    Disabled,
    /// A zero threshold discounts whenever the trigger type is in the cart
    AlwaysTriggers,
}

/// One rule per trigger type
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Ruleset {
    rules: BTreeMap<ProductType, PromotionRule>,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `rule` under its trigger type, returning the rule it replaced.
    pub fn insert(&mut self, rule: PromotionRule) -> Option<PromotionRule> {
        self.rules.insert(rule.trigger_type, rule)
    }

    pub fn get(&self, trigger_type: ProductType) -> Option<&PromotionRule> {
        self.rules.get(&trigger_type)
    }

    pub fn iter(&self) -> btree_map::Values<'_, ProductType, PromotionRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<PromotionRule> for Ruleset {
    fn from_iter<I: IntoIterator<Item = PromotionRule>>(iter: I) -> Self {
        let mut ruleset = Ruleset::new();
        for rule in iter {
            ruleset.insert(rule);
        }
        ruleset
    }
}
