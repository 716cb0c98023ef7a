//! # Pricing Engine
//!
//! Turns a cart tally into a rounded total using a static catalog and
//! per-SKU discount rules.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    compute_total(tally)                                 │
//! │                                                                         │
//! │  for (sku, qty) in tally:                                              │
//! │      unit_price = catalog[sku]        ── missing? → UnknownSku(sku)    │
//! │      rule       = rules[sku]          ── missing? → StandardPrice      │
//! │      total     += rule.subtotal(qty, unit_price, tally)   (exact)      │
//! │                                                                         │
//! │  Money::round_half_up(total)          ← the only rounding step         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds no per-cart state, so one instance can price any
//! number of sessions, from any number of threads.

use rust_decimal::Decimal;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rules::{DiscountRule, RuleSet, StandardPrice};
use crate::tally::{Quantity, Tally};

/// Catalog plus rule set, fixed at construction.
#[derive(Debug)]
pub struct PricingEngine {
    catalog: Catalog,
    rules: RuleSet,
}

impl PricingEngine {
    /// Creates an engine.
    ///
    /// ## Errors
    /// `RuleWithoutProduct` if a rule names a SKU the catalog lacks.
    /// Catalog entries without a rule are fine and sell at full price.
    pub fn new(catalog: Catalog, rules: RuleSet) -> CoreResult<Self> {
        if let Some(orphan) = rules.skus().find(|sku| !catalog.contains(sku)) {
            return Err(CoreError::RuleWithoutProduct(orphan.to_string()));
        }

        Ok(PricingEngine { catalog, rules })
    }

    /// Prices a tally.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::config::PricingConfig;
    /// use till_core::tally::Tally;
    ///
    /// let engine = PricingConfig::reference().build_engine().unwrap();
    /// let tally: Tally = ["atv", "atv", "atv", "vga"].into_iter().collect();
    /// assert_eq!(engine.compute_total(&tally).unwrap().to_string(), "249.00");
    /// ```
    ///
    /// ## Errors
    /// `UnknownSku` for the first tallied SKU with no catalog entry. No
    /// partial total is returned.
    pub fn compute_total(&self, tally: &Tally) -> CoreResult<Money> {
        let mut total = Decimal::ZERO;

        for (sku, quantity) in tally.iter() {
            total += self.subtotal(sku, quantity, tally)?;
        }

        let total = Money::round_half_up(total);
        debug!(skus = tally.len(), units = tally.total_units(), %total, "Priced cart");
        Ok(total)
    }

    /// Unrounded subtotal of one tallied SKU.
    ///
    /// Exposed for receipt-style breakdowns; summing these and rounding
    /// once gives exactly [`compute_total`](Self::compute_total).
    pub fn subtotal(&self, sku: &str, quantity: Quantity, tally: &Tally) -> CoreResult<Decimal> {
        let unit_price = self
            .catalog
            .unit_price(sku)
            .ok_or_else(|| CoreError::UnknownSku(sku.to_string()))?;

        let rule: &dyn DiscountRule = self.rules.get(sku).unwrap_or(&StandardPrice);
        let subtotal = rule.subtotal(quantity, unit_price, tally);

        debug!(sku, quantity, %unit_price, %subtotal, "Priced line");
        Ok(subtotal)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
