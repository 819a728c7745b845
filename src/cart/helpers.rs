//! Shopping Cart Business Logic Helpers
//!
//! This module contains the cart mutations and formatting helpers. All of
//! them work on a cart already loaded by the caller and mutate it in place.

use super::models::{Cart, CartLineItem};
use crate::catalog::models::{Catalog, ProductId, ProductType};
use crate::error::ShopError;

/// Appends `quantity` undiscounted units of `product_id` to the cart.
///
/// Fails without touching the cart when the product is unknown or when the
/// units already held of its type plus `quantity` exceed its stock. A zero
/// quantity only checks that the product exists.
pub fn add_item(
    cart: &mut Cart,
    catalog: &Catalog,
    product_id: ProductId,
    quantity: u32,
) -> Result<(), ShopError> {
    let product = catalog.lookup(product_id)?;
    let held = cart.units_of(product.product_type) as u64;

    if held + u64::from(quantity) > u64::from(product.stock) {
        return Err(ShopError::InsufficientStock {
            product_id,
            requested: quantity,
            available: product.stock.saturating_sub(held as u32),
        });
    }

    if quantity == 0 {
        return Ok(());
    }

    let unit = CartLineItem::from_product(product);
    cart.items
        .entry(product.product_type)
        .or_default()
        .extend(std::iter::repeat(unit).take(quantity as usize));

    Ok(())
}

/// Removes up to `quantity` of the oldest units of `product_type`, then
/// resets promotion state across the whole cart.
pub fn remove_item(cart: &mut Cart, product_type: ProductType, quantity: u32) {
    if let Some(units) = cart.items.get_mut(&product_type) {
        let evicted = units.len().min(quantity as usize);
        units.drain(..evicted);
        if units.is_empty() {
            cart.items.remove(&product_type);
        }
    }

    cart.reset_promotions();
}

/// Empties the cart and its checkout snapshot. Totals stay until the next
/// checkout.
pub fn clear_cart(cart: &mut Cart) {
    cart.items.clear();
    cart.checkout.clear();
}

/// Produces a human-readable one-line summary of the cart contents.
///
/// Example output: `"2x Trouser, 1x Belt"`.
pub fn format_item_summary(cart: &Cart) -> String {
    cart.items
        .values()
        .filter_map(|units| units.first().map(|unit| (units.len(), &unit.product_name)))
        .map(|(count, name)| format!("{}x {}", count, name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Product;
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        vec![
            Product {
                id: 1,
                product_type: 1,
                name: "Belt".into(),
                stock: 10,
                unit_price: dec!(20),
            },
            Product {
                id: 4,
                product_type: 4,
                name: "Trouser".into(),
                stock: 4,
                unit_price: dec!(70),
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_add_item_appends_per_unit_items() {
        let mut cart = Cart::new(1, 1);

        add_item(&mut cart, &catalog(), 1, 3).unwrap();

        let belts = &cart.items[&1];
        assert_eq!(belts.len(), 3);
        assert!(belts.iter().all(|b| b.unit_price == dec!(20) && !b.is_discounted));
    }

    #[test]
    fn test_add_unknown_product() {
        let mut cart = Cart::new(1, 1);

        let err = add_item(&mut cart, &catalog(), 99, 1).unwrap_err();

        assert!(matches!(err, ShopError::UnknownProduct(99)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_past_stock_leaves_cart_unchanged() {
        let mut cart = Cart::new(1, 1);
        add_item(&mut cart, &catalog(), 4, 3).unwrap();
        let before = cart.clone();

        let err = add_item(&mut cart, &catalog(), 4, 2).unwrap_err();

        assert!(matches!(
            err,
            ShopError::InsufficientStock {
                product_id: 4,
                requested: 2,
                available: 1
            }
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_zero_quantity_leaves_no_empty_type() {
        let mut cart = Cart::new(1, 1);

        add_item(&mut cart, &catalog(), 4, 0).unwrap();

        assert!(cart.items.is_empty());
        assert!(matches!(
            add_item(&mut cart, &catalog(), 99, 0),
            Err(ShopError::UnknownProduct(99))
        ));
    }

    #[test]
    fn test_stock_check_counts_units_of_shared_type() {
        let belts: Catalog = vec![
            Product {
                id: 10,
                product_type: 1,
                name: "Black Belt".into(),
                stock: 2,
                unit_price: dec!(20),
            },
            Product {
                id: 11,
                product_type: 1,
                name: "Brown Belt".into(),
                stock: 5,
                unit_price: dec!(25),
            },
        ]
        .into_iter()
        .collect();
        let mut cart = Cart::new(1, 1);

        add_item(&mut cart, &belts, 11, 2).unwrap();
        let before = cart.clone();

        let err = add_item(&mut cart, &belts, 10, 1).unwrap_err();
        assert!(matches!(
            err,
            ShopError::InsufficientStock {
                product_id: 10,
                requested: 1,
                available: 0
            }
        ));
        assert_eq!(cart, before);

        add_item(&mut cart, &belts, 11, 3).unwrap();
        assert_eq!(cart.units_of(1), 5);
        assert!(matches!(
            add_item(&mut cart, &belts, 11, 1),
            Err(ShopError::InsufficientStock { available: 0, .. })
        ));
    }

    #[test]
    fn test_remove_evicts_oldest_and_tolerates_overshoot() {
        let mut cart = Cart::new(1, 1);
        add_item(&mut cart, &catalog(), 1, 3).unwrap();

        remove_item(&mut cart, 1, 2);
        assert_eq!(cart.units_of(1), 1);

        remove_item(&mut cart, 1, 5);
        assert_eq!(cart.units_of(1), 0);
        assert!(cart.is_empty());

        remove_item(&mut cart, 7, 1);
    }

    #[test]
    fn test_clear_keeps_totals() {
        let mut cart = Cart::new(1, 1);
        add_item(&mut cart, &catalog(), 1, 1).unwrap();
        cart.total_price = dec!(20);

        clear_cart(&mut cart);

        assert!(cart.items.is_empty());
        assert!(cart.checkout.is_empty());
        assert_eq!(cart.total_price, dec!(20));
    }

    #[test]
    fn test_format_item_summary() {
        let mut cart = Cart::new(1, 1);
        add_item(&mut cart, &catalog(), 4, 2).unwrap();
        add_item(&mut cart, &catalog(), 1, 1).unwrap();

        assert_eq!(format_item_summary(&cart), "1x Belt, 2x Trouser");
    }
}
