//! Inventory Catalog Models
//!
//! Product records and the catalog that answers lookups and stock
//! adjustments for them.

use crate::error::ShopError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a single product record
pub type ProductId = u32;
/// Product type shared by many products; promotions key off it
pub type ProductType = u32;

// =============================================================================
// Catalog Domain Models
// =============================================================================

/// A product available in the shop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,

    #[serde(rename = "type")]
    pub product_type: ProductType,

    pub name: String,

    /// Units left in stock
    pub stock: u32,

    #[serde(rename = "price")]
    pub unit_price: Decimal,
}

/// All products keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, product_id: ProductId) -> Result<&Product, ShopError> {
        self.products
            .get(&product_id)
            .ok_or(ShopError::UnknownProduct(product_id))
    }

    /// Upserts `products` by id. Products not named in the list are kept.
    pub fn bulk_replace(&mut self, products: Vec<Product>) -> Result<(), ShopError> {
        if products.is_empty() {
            return Err(ShopError::EmptyInput("products"));
        }

        for product in products {
            self.products.insert(product.id, product);
        }

        Ok(())
    }

    /// Decrements the stock of every product whose type was bought.
    ///
    /// Over-purchase is not an error: stock floors at zero.
    pub fn adjust_stock(&mut self, purchases: &BTreeMap<ProductType, u32>) {
        for product in self.products.values_mut() {
            if let Some(bought) = purchases.get(&product.product_type) {
                product.stock = product.stock.saturating_sub(*bought);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}
