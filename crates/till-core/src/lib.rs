//! # till-core: Pure Pricing Logic for Till
//!
//! This crate prices a checkout cart. It holds no I/O: every function is a
//! computation over a catalog, a rule set and a tally.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 till-register (binary)                          │   │
//! │  │    env config ──► read scans ──► print total                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ledger   │  │  engine   │  │   rules   │  │  config   │  │   │
//! │  │   │ CartLedger│─►│ Pricing   │─►│ Discount  │  │ Pricing   │  │   │
//! │  │   │  (tally)  │  │ Engine    │  │ Rule      │  │ Config    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Finished amounts and the single round-half-up step
//! - [`catalog`] - SKU → name and unit price
//! - [`tally`] - SKU → quantity scanned
//! - [`ledger`] - Scan recording, single-threaded and shared
//! - [`rules`] - Discount strategies and the rule set
//! - [`engine`] - Tally → total
//! - [`checkout`] - A session tying a ledger to an engine
//! - [`config`] - JSON-describable catalogs and rules
//! - [`validation`] - Configuration checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Exact Decimals**: prices and subtotals are `rust_decimal::Decimal`
//! 2. **One Rounding Point**: only the grand total is rounded, half-up
//! 3. **Rules Are Data**: new SKUs and strategies need no engine changes
//! 4. **Explicit Errors**: unknown SKUs are typed errors, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use till_core::{Checkout, PricingConfig};
//!
//! let engine = Arc::new(PricingConfig::reference().build_engine().unwrap());
//!
//! let mut checkout = Checkout::open(engine);
//! for sku in ["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"] {
//!     checkout.scan(sku);
//! }
//!
//! assert_eq!(checkout.total().unwrap().to_string(), "2718.95");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod money;
pub mod rules;
pub mod tally;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogEntry};
pub use checkout::Checkout;
pub use config::{PricingConfig, ProductConfig, RuleConfig};
pub use engine::PricingEngine;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{CartLedger, SharedLedger};
pub use money::Money;
pub use rules::{BulkDiscount, BundledWith, DiscountRule, MultiBuy, RuleSet, StandardPrice};
pub use tally::{Quantity, Tally};
