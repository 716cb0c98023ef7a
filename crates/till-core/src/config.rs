//! # Pricing Configuration
//!
//! Serializable description of a catalog and its discount rules, so a
//! register can be configured from a JSON file instead of code.
//!
//! ## File Format
//! ```json
//! {
//!   "products": [
//!     { "sku": "ipd", "name": "Super iPad", "unit_price": "549.99",
//!       "rule": { "kind": "bulk", "threshold": 4, "discounted_price": "499.99" } },
//!     { "sku": "mbp", "name": "MacBook Pro", "unit_price": "1399.99" },
//!     { "sku": "atv", "name": "Apple TV", "unit_price": "109.50",
//!       "rule": { "kind": "multi_buy", "group_size": 3, "pay_for": 2 } },
//!     { "sku": "vga", "name": "VGA adapter", "unit_price": "30.00",
//!       "rule": { "kind": "bundled_with", "sku": "mbp" } }
//!   ]
//! }
//! ```
//!
//! Prices are strings so they stay exact. A missing `rule` means
//! `standard` (no discount).
//!
//! This module never touches the file system; the app reads the file and
//! hands the text to [`PricingConfig::from_json`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, CatalogEntry};
use crate::engine::PricingEngine;
use crate::error::{CoreResult, ValidationError};
use crate::rules::{BulkDiscount, BundledWith, MultiBuy, RuleSet, StandardPrice};
use crate::validation::{validate_multi_buy, validate_price, validate_sku};

// =============================================================================
// Configuration Types
// =============================================================================

/// Whole pricing setup for one register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub products: Vec<ProductConfig>,
}

/// One catalog line and its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductConfig {
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub rule: RuleConfig,
}

/// Which built-in discount strategy a product uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    #[default]
    Standard,
    Bulk(BulkDiscount),
    MultiBuy(MultiBuy),
    BundledWith(BundledWith),
}

// =============================================================================
// Loading
// =============================================================================

impl PricingConfig {
    /// Parses a JSON configuration. Does not validate; see
    /// [`build_engine`](Self::build_engine).
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The reference store: tablets, laptops, media boxes, adapters.
    ///
    /// | SKU | Name        | Price   | Rule                          |
    /// |-----|-------------|---------|-------------------------------|
    /// | ipd | Super iPad  | 549.99  | 499.99 each when more than 4  |
    /// | mbp | MacBook Pro | 1399.99 | none                          |
    /// | atv | Apple TV    | 109.50  | 3 for 2                       |
    /// | vga | VGA adapter | 30.00   | one free per MacBook Pro      |
    pub fn reference() -> Self {
        PricingConfig {
            products: vec![
                ProductConfig {
                    sku: "ipd".to_string(),
                    name: "Super iPad".to_string(),
                    unit_price: dec!(549.99),
                    rule: RuleConfig::Bulk(BulkDiscount::new(4, dec!(499.99))),
                },
                ProductConfig {
                    sku: "mbp".to_string(),
                    name: "MacBook Pro".to_string(),
                    unit_price: dec!(1399.99),
                    rule: RuleConfig::Standard,
                },
                ProductConfig {
                    sku: "atv".to_string(),
                    name: "Apple TV".to_string(),
                    unit_price: dec!(109.50),
                    rule: RuleConfig::MultiBuy(MultiBuy::new(3, 2)),
                },
                ProductConfig {
                    sku: "vga".to_string(),
                    name: "VGA adapter".to_string(),
                    unit_price: dec!(30.00),
                    rule: RuleConfig::BundledWith(BundledWith::new("mbp")),
                },
            ],
        }
    }

    /// Validates the configuration and builds an engine from it.
    ///
    /// ## Checks
    /// - Catalog: SKU format, names, non-negative prices, unique SKUs
    /// - `bulk`: non-negative discounted price
    /// - `multi_buy`: `group_size >= 1`, `pay_for <= group_size`
    /// - `bundled_with`: partner SKU exists in the catalog
    pub fn build_engine(&self) -> CoreResult<PricingEngine> {
        let catalog = Catalog::new(
            self.products
                .iter()
                .map(|p| CatalogEntry::new(&p.sku, &p.name, p.unit_price)),
        )?;

        let mut rules = RuleSet::new();
        for product in &self.products {
            match &product.rule {
                RuleConfig::Standard => rules.insert(&product.sku, StandardPrice),
                RuleConfig::Bulk(bulk) => {
                    let field = format!("{}.rule.discounted_price", product.sku);
                    validate_price(&field, bulk.discounted_price)?;
                    rules.insert(&product.sku, *bulk);
                }
                RuleConfig::MultiBuy(multi) => {
                    validate_multi_buy(multi.group_size, multi.pay_for)?;
                    rules.insert(&product.sku, *multi);
                }
                RuleConfig::BundledWith(bundle) => {
                    validate_sku(&bundle.sku)?;
                    if bundle.sku == product.sku {
                        return Err(ValidationError::InvalidFormat {
                            field: format!("{}.rule.sku", product.sku),
                            reason: "cannot bundle a product with itself".to_string(),
                        }
                        .into());
                    }
                    if !catalog.contains(&bundle.sku) {
                        return Err(ValidationError::UnknownReference {
                            field: format!("{}.rule.sku", product.sku),
                            sku: bundle.sku.clone(),
                        }
                        .into());
                    }
                    rules.insert(&product.sku, bundle.clone());
                }
            }
        }

        debug!(products = catalog.len(), "Pricing configuration validated");
        PricingEngine::new(catalog, rules)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
