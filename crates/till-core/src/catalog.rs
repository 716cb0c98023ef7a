//! # Product Catalog
//!
//! Static table of SKU → display name and unit price, fixed for the
//! lifetime of a [`PricingEngine`](crate::engine::PricingEngine).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_price, validate_product_name, validate_sku, ValidationResult};

// =============================================================================
// Catalog Entry
// =============================================================================

/// A product the register can price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stock Keeping Unit - the key scanned at the till.
    pub sku: String,

    /// Display name (never used in pricing math).
    pub display_name: String,

    /// Undiscounted price of one unit.
    pub unit_price: Decimal,
}

impl CatalogEntry {
    pub fn new(
        sku: impl Into<String>,
        display_name: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        CatalogEntry {
            sku: sku.into(),
            display_name: display_name.into(),
            unit_price,
        }
    }

    /// Checks SKU format, name and price sign.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_sku(&self.sku)?;
        validate_product_name(&self.display_name)?;
        validate_price(&format!("{}.unit_price", self.sku), self.unit_price)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable SKU → entry map.
///
/// ## Invariants
/// - SKUs are unique
/// - Every entry passed [`CatalogEntry::validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid entries and duplicate SKUs.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use till_core::catalog::{Catalog, CatalogEntry};
    ///
    /// let catalog = Catalog::new(vec![
    ///     CatalogEntry::new("mbp", "MacBook Pro", dec!(1399.99)),
    /// ]).unwrap();
    /// assert_eq!(catalog.unit_price("mbp"), Some(dec!(1399.99)));
    /// ```
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> ValidationResult<Self> {
        let mut map = BTreeMap::new();

        for entry in entries {
            entry.validate()?;
            if map.contains_key(&entry.sku) {
                return Err(ValidationError::Duplicate {
                    field: "sku".to_string(),
                    value: entry.sku,
                });
            }
            map.insert(entry.sku.clone(), entry);
        }

        Ok(Catalog { entries: map })
    }

    pub fn get(&self, sku: &str) -> Option<&CatalogEntry> {
        self.entries.get(sku)
    }

    pub fn unit_price(&self, sku: &str) -> Option<Decimal> {
        self.entries.get(sku).map(|e| e.unit_price)
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.entries.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in SKU order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}
