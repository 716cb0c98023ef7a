//! # Validation Module
//!
//! Input validation for catalog and rule configuration.
//!
//! ## When Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog::new / PricingConfig::build_engine                            │
//! │  ├── THIS MODULE: SKU format, names, prices, rule parameters           │
//! │  └── Fails before any register goes live                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  CartLedger::scan                                                       │
//! │  └── NO validation (a scan never fails)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  PricingEngine::compute_total                                           │
//! │  └── Unknown SKUs rejected here                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_sku, validate_multi_buy};
//!
//! validate_sku("ipd").unwrap();
//! validate_multi_buy(3, 2).unwrap();
//! assert!(validate_multi_buy(0, 0).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest SKU accepted in a catalog.
pub const MAX_SKU_LEN: usize = 50;

/// Longest display name accepted in a catalog.
pub const MAX_NAME_LEN: usize = 200;

/// Largest unit or discounted price accepted.
///
/// Keeps `price × u32::MAX` summed over any realistic catalog far below
/// `Decimal::MAX`, so pricing a validated catalog cannot overflow.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_sku;
///
/// assert!(validate_sku("ipd").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    // Untrimmed on purpose: " ipd" would never match a scanned "ipd".
    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed [`MAX_PRICE`]
/// - Any scale is allowed; rounding happens on the grand total only
pub fn validate_price(field: &str, price: Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates "buy `group_size`, pay for `pay_for`" parameters.
///
/// ## Rules
/// - `group_size` must be at least 1
/// - `pay_for` must be between 0 and `group_size`
pub fn validate_multi_buy(group_size: u32, pay_for: u32) -> ValidationResult<()> {
    if group_size == 0 {
        return Err(ValidationError::OutOfRange {
            field: "group_size".to_string(),
            min: 1,
            max: u32::MAX,
        });
    }

    if pay_for > group_size {
        return Err(ValidationError::OutOfRange {
            field: "pay_for".to_string(),
            min: 0,
            max: group_size,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
