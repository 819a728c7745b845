//! Service configuration
//!
//! The built-in default seeds a small clothing shop. A JSON file replaces any
//! of its top-level sections, and `SHOPPING__*` environment variables
//! override single keys (e.g. `SHOPPING__HTTP__LISTEN_PORT=9000`). `PORT`
//! sets the listen port.

use crate::auth::models::User;
use crate::catalog::models::Product;
use crate::promotion::models::{PromotionRule, ZeroThreshold};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: String,
    pub http: HttpConfig,
    pub pricing: PricingConfig,
    pub products: Vec<Product>,
    pub promotions: Vec<PromotionRule>,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub listen_port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Meaning of a bulk discount rule with a zero trigger quantity
    #[serde(default)]
    pub zero_quantity_for_discount: ZeroThreshold,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { listen_port: 8080 }
    }
}

fn product(id: u32, name: &str, stock: u32, price: i64) -> Product {
    Product {
        id,
        product_type: id,
        name: name.to_string(),
        stock,
        unit_price: Decimal::from(price),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            http: HttpConfig::default(),
            pricing: PricingConfig::default(),
            products: vec![
                product(1, "Belt", 10, 20),
                product(2, "Shirt", 5, 60),
                product(3, "Suit", 2, 200),
                product(4, "Trouser", 4, 70),
                product(5, "Shoe", 1, 120),
                product(6, "Tie", 8, 20),
            ],
            promotions: vec![
                // Two trousers take 15% off belts and shoes
                PromotionRule {
                    trigger_type: 4,
                    quantity_for_discount: 2,
                    discounted_types: BTreeSet::from([1, 5]),
                    discount_percent: Decimal::from(15),
                    quantity_for_special_price: 0,
                    special_price: Decimal::ZERO,
                },
                // Shirts after the second cost 45; three shirts halve ties
                PromotionRule {
                    trigger_type: 2,
                    quantity_for_discount: 3,
                    discounted_types: BTreeSet::from([6]),
                    discount_percent: Decimal::from(50),
                    quantity_for_special_price: 2,
                    special_price: Decimal::from(45),
                },
            ],
            users: vec![User {
                id: 1,
                username: "test".to_string(),
                password: "test".to_string(),
                token: None,
            }],
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `path` (or the built-in default) plus
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let base = match path {
            Some(path) => config::Config::builder()
                .add_source(config::File::from(path).format(config::FileFormat::Json))
                .build()?,
            None => config::Config::try_from(&Self::default())?,
        };

        let s = config::Config::builder()
            .add_source(base)
            .add_source(
                config::Environment::with_prefix("SHOPPING")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("http.listen_port", std::env::var("PORT").ok())?
            .build()?;

        s.try_deserialize()
    }

    /// Writes the built-in default configuration to `path` as pretty JSON.
    pub fn write_default(path: &Path) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_a_valid_shop() {
        let config = AppConfig::default();

        assert_eq!(config.products.len(), 6);
        assert!(config.promotions.iter().all(|p| p.validate().is_ok()));
        assert_eq!(config.pricing.zero_quantity_for_discount, ZeroThreshold::Disabled);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "environment": "staging",
                "products": [{"id": 9, "type": 9, "name": "Hat", "stock": 3, "price": "12.50"}]
            }"#,
        )
        .unwrap();

        assert_eq!(config.environment, "staging");
        assert_eq!(config.products.len(), 1);
        assert_eq!(config.products[0].unit_price, Decimal::new(1250, 2));
        assert_eq!(config.promotions.len(), 2);
        assert_eq!(config.users[0].username, "test");
    }

    #[test]
    fn test_default_config_survives_json_round_trip() {
        let json = serde_json::to_string(&AppConfig::default()).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.products, AppConfig::default().products);
        assert_eq!(back.promotions, AppConfig::default().promotions);
    }

    // Environment variables are process-wide, so every `load` case lives in
    // this one test.
    #[test]
    fn test_load_layers_default_file_and_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("SHOPPING__HTTP__LISTEN_PORT");

        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.environment, "local");
        assert_eq!(config.products, AppConfig::default().products);
        assert_eq!(config.promotions.len(), 2);
        assert_eq!(config.http.listen_port, 8080);

        let path = std::env::temp_dir().join(format!("shopping-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{
                "environment": "staging",
                "products": [{"id": 9, "type": 9, "name": "Hat", "stock": 3, "price": "12.50"}]
            }"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.environment, "staging");
        assert_eq!(config.products.len(), 1);
        assert_eq!(config.products[0].unit_price, Decimal::new(1250, 2));
        assert_eq!(config.promotions.len(), 2);
        assert_eq!(config.users.len(), 1);
        assert_eq!(config.http.listen_port, 8080);

        std::env::set_var("SHOPPING__HTTP__LISTEN_PORT", "9001");
        assert_eq!(AppConfig::load(Some(&path)).unwrap().http.listen_port, 9001);

        std::env::set_var("PORT", "9002");
        assert_eq!(AppConfig::load(None).unwrap().http.listen_port, 9002);

        std::env::remove_var("PORT");
        std::env::remove_var("SHOPPING__HTTP__LISTEN_PORT");
        std::fs::remove_file(&path).unwrap();
    }
}
