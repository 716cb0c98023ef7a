//! # Discount Rules
//!
//! Per-SKU pricing strategies. A rule turns (quantity of its SKU, unit
//! price, whole cart tally) into that SKU's subtotal.
//!
//! ## Built-in Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Strategy        Example              Subtotal                         │
//! │  ────────        ───────              ────────                         │
//! │  StandardPrice   laptops              price × qty                      │
//! │  BulkDiscount    > 4 tablets          qty > threshold ? disc × qty     │
//! │                                                      : price × qty     │
//! │  MultiBuy        3 for 2 media boxes  price × (pay × (qty / n)         │
//! │                                                 + qty % n)             │
//! │  BundledWith     free adapter per     price × max(0, qty − qty[other]) │
//! │                  laptop                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Subtotals are exact decimals and are never rounded here; the engine
//! rounds the grand total once.
//!
//! ## Custom Rules
//! Any closure with the rule signature is a rule:
//! ```rust
//! use rust_decimal::Decimal;
//! use rust_decimal_macros::dec;
//! use till_core::rules::RuleSet;
//! use till_core::tally::{Quantity, Tally};
//!
//! // Half price on Tuesdays, say.
//! let half = |qty: Quantity, price: Decimal, _: &Tally| price * Decimal::from(qty) / dec!(2);
//! let rules = RuleSet::new().with_rule("atv", half);
//! assert!(rules.get("atv").is_some());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tally::{Quantity, Tally};

// =============================================================================
// Rule Trait
// =============================================================================

/// Computes one SKU's subtotal.
///
/// Implementations must be pure: read `tally`, never mutate anything.
/// `tally` is the whole cart so a rule can depend on other SKUs.
pub trait DiscountRule: Send + Sync {
    fn subtotal(&self, quantity: Quantity, unit_price: Decimal, tally: &Tally) -> Decimal;
}

impl<F> DiscountRule for F
where
    F: Fn(Quantity, Decimal, &Tally) -> Decimal + Send + Sync,
{
    fn subtotal(&self, quantity: Quantity, unit_price: Decimal, tally: &Tally) -> Decimal {
        self(quantity, unit_price, tally)
    }
}

// =============================================================================
// Built-in Strategies
// =============================================================================

/// No discount: `unit_price × quantity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardPrice;

impl DiscountRule for StandardPrice {
    fn subtotal(&self, quantity: Quantity, unit_price: Decimal, _tally: &Tally) -> Decimal {
        unit_price * Decimal::from(quantity)
    }
}

/// Every unit drops to `discounted_price` once more than `threshold` are
/// bought.
///
/// The threshold is exclusive: with a threshold of 4, four units pay full
/// price and five units all pay the discounted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDiscount {
    pub threshold: Quantity,
    pub discounted_price: Decimal,
}

impl BulkDiscount {
    pub fn new(threshold: Quantity, discounted_price: Decimal) -> Self {
        BulkDiscount {
            threshold,
            discounted_price,
        }
    }
}

impl DiscountRule for BulkDiscount {
    fn subtotal(&self, quantity: Quantity, unit_price: Decimal, _tally: &Tally) -> Decimal {
        let price = if quantity > self.threshold {
            self.discounted_price
        } else {
            unit_price
        };
        price * Decimal::from(quantity)
    }
}

/// "Buy `group_size`, pay for `pay_for`": each complete group charges
/// `pay_for` units, leftovers charge full price.
///
/// `MultiBuy::new(3, 2)` is the 3-for-2 deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiBuy {
    pub group_size: Quantity,
    pub pay_for: Quantity,
}

impl MultiBuy {
    /// `group_size` must be non-zero; see
    /// [`validate_multi_buy`](crate::validation::validate_multi_buy).
    pub fn new(group_size: Quantity, pay_for: Quantity) -> Self {
        MultiBuy {
            group_size,
            pay_for,
        }
    }

    /// Units actually charged for `quantity` scanned.
    pub fn chargeable_units(&self, quantity: Quantity) -> u64 {
        if self.group_size == 0 {
            return u64::from(quantity);
        }
        let groups = u64::from(quantity / self.group_size);
        let leftover = u64::from(quantity % self.group_size);
        u64::from(self.pay_for) * groups + leftover
    }
}

impl DiscountRule for MultiBuy {
    fn subtotal(&self, quantity: Quantity, unit_price: Decimal, _tally: &Tally) -> Decimal {
        unit_price * Decimal::from(self.chargeable_units(quantity))
    }
}

/// One free unit per unit of another SKU in the cart.
///
/// With `sku = "mbp"`, each MacBook Pro brings one free adapter; adapters
/// beyond the number of laptops pay full price. Scan order does not
/// matter since the rule reads the final tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundledWith {
    pub sku: String,
}

impl BundledWith {
    pub fn new(sku: impl Into<String>) -> Self {
        BundledWith { sku: sku.into() }
    }
}

impl DiscountRule for BundledWith {
    fn subtotal(&self, quantity: Quantity, unit_price: Decimal, tally: &Tally) -> Decimal {
        let free = tally.quantity_of(&self.sku);
        if free >= quantity {
            return Decimal::ZERO;
        }
        unit_price * Decimal::from(quantity - free)
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// SKU → discount rule.
#[derive(Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Box<dyn DiscountRule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_rule(mut self, sku: impl Into<String>, rule: impl DiscountRule + 'static) -> Self {
        self.insert(sku, rule);
        self
    }

    /// Sets the rule for `sku`, replacing any previous one.
    pub fn insert(&mut self, sku: impl Into<String>, rule: impl DiscountRule + 'static) {
        self.rules.insert(sku.into(), Box::new(rule));
    }

    pub fn get(&self, sku: &str) -> Option<&dyn DiscountRule> {
        self.rules.get(sku).map(|rule| &**rule)
    }

    /// SKUs that have a rule.
    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.rules.keys()).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
