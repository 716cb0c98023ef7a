//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Pricing and configuration failures             │
//! │  └── ValidationError  - Catalog / rule input failures                  │
//! │                                                                         │
//! │  till-register errors (app)                                            │
//! │  └── anyhow::Error    - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow::Error → stderr            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, field, etc.)
//! 3. Errors are enum variants, never String

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
///
/// None of these leave the engine or a ledger in a bad state: a failed
/// `compute_total` can be retried once the configuration is corrected.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A tallied SKU has no catalog entry.
    ///
    /// ## When This Occurs
    /// - A barcode was scanned for a product the register was not configured
    ///   with. Scanning never validates, so this surfaces at pricing time.
    ///
    /// ## User Workflow
    /// ```text
    /// scan("xyz") ──► compute_total()
    ///                      │
    ///                      ▼
    ///            UnknownSku("xyz")  (no partial total is returned)
    /// ```
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),

    /// A discount rule was registered for a SKU missing from the catalog.
    #[error("Discount rule for {0} has no catalog entry")]
    RuleWithoutProduct(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Pricing configuration could not be parsed.
    #[error("Invalid pricing configuration: {0}")]
    Config(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog and rule configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., SKU with whitespace).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Monetary value below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Monetary value above the largest price the engine accepts.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: Decimal },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u32, max: u32 },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A rule points at a SKU that is not in the catalog.
    #[error("{field} references unknown SKU '{sku}'")]
    UnknownReference { field: String, sku: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownSku("xyz".to_string());
        assert_eq!(err.to_string(), "Unknown SKU: xyz");

        let err = CoreError::RuleWithoutProduct("vga".to_string());
        assert_eq!(err.to_string(), "Discount rule for vga has no catalog entry");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::UnknownReference {
            field: "vga.rule.sku".to_string(),
            sku: "mbp".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "vga.rule.sku references unknown SKU 'mbp'"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "unit_price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
