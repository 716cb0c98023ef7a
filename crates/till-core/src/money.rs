//! # Money Module
//!
//! Provides the `Money` type for finished monetary values.
//!
//! ## Two Kinds of Amount
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UNROUNDED vs FINISHED                                                  │
//! │                                                                         │
//! │  Decimal (rust_decimal)    unit prices, per-SKU subtotals, running sum │
//! │       │                    exact, any scale, never rounded             │
//! │       │                                                                 │
//! │       ▼  Money::round_half_up   ← the ONE rounding point               │
//! │                                                                         │
//! │  Money                     grand total, always exactly 2 digits        │
//! │                                                                         │
//! │  Rounding subtotals first would change results whenever a rule         │
//! │  produces fractional cents (e.g. 3 × 0.335 = 1.005 → 1.01, but         │
//! │  3 × round(0.335) = 1.02).                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use till_core::money::Money;
//!
//! let total = Money::round_half_up(dec!(2718.945));
//! assert_eq!(total.to_string(), "2718.95");
//! assert_eq!(total.cents(), 271895);
//!
//! // NEVER do this:
//! // let bad = Money::from_f64(10.99); // NO SUCH METHOD EXISTS!
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Number of fractional digits every `Money` carries.
pub const MONEY_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A finished monetary value with exactly two fractional digits.
///
/// ## Design Decisions
/// - **Decimal-backed**: exact arithmetic, no floating point anywhere
/// - **Fixed scale**: every constructor rescales to 2 digits, so
///   `Display` always prints `249.00`, never `249`
/// - **No currency**: localization is the caller's concern
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Rounds an exact amount to cents, ties away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::round_half_up(dec!(0.005)).cents(), 1);
    /// assert_eq!(Money::round_half_up(dec!(2.675)).cents(), 268);
    /// assert_eq!(Money::round_half_up(dec!(-0.005)).cents(), -1);
    /// ```
    ///
    /// ## Why Not Bankers Rounding?
    /// Checkout totals are quoted to customers; a tie always goes to the
    /// next whole cent (0.005 → 0.01, 0.015 → 0.02), matching what a
    /// receipt calculator does by hand.
    pub fn round_half_up(amount: Decimal) -> Self {
        let rounded =
            amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Money::with_scale(rounded)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(24900);
    /// assert_eq!(price.to_string(), "249.00");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_SCALE))
    }

    /// Returns zero money value.
    #[inline]
    pub fn zero() -> Self {
        Money::from_cents(0)
    }

    /// Returns the value as an exact decimal with scale 2.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the value in cents.
    #[inline]
    pub fn cents(&self) -> i128 {
        self.0.mantissa()
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    // Only called with values that already have at most 2 fractional digits.
    fn with_scale(mut amount: Decimal) -> Self {
        amount.rescale(MONEY_SCALE);
        Money(amount)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two digits, e.g. `1949.98`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money::with_scale(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(194998);
        assert_eq!(money.cents(), 194998);
        assert_eq!(money.amount(), dec!(1949.98));
    }

    #[test]
    fn test_display_always_two_digits() {
        assert_eq!(Money::from_cents(24900).to_string(), "249.00");
        assert_eq!(Money::round_half_up(dec!(249)).to_string(), "249.00");
        assert_eq!(Money::round_half_up(dec!(30.5)).to_string(), "30.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_round_half_up_ties() {
        assert_eq!(Money::round_half_up(dec!(0.005)).cents(), 1);
        assert_eq!(Money::round_half_up(dec!(0.015)).cents(), 2);
        assert_eq!(Money::round_half_up(dec!(0.025)).cents(), 3);
        assert_eq!(Money::round_half_up(dec!(2718.945)).cents(), 271895);
    }

    #[test]
    fn test_round_half_up_non_ties() {
        assert_eq!(Money::round_half_up(dec!(0.0049999)).cents(), 0);
        assert_eq!(Money::round_half_up(dec!(1.23456)).cents(), 123);
        assert_eq!(Money::round_half_up(dec!(1.2351)).cents(), 124);
    }

    #[test]
    fn test_negative_ties_round_away_from_zero() {
        assert_eq!(Money::round_half_up(dec!(-0.005)).cents(), -1);
        assert_eq!(Money::round_half_up(dec!(-1.125)).to_string(), "-1.13");
    }

    #[test]
    fn test_arithmetic_keeps_scale() {
        let a = Money::from_cents(100);
        let b = Money::from_cents(250);
        assert_eq!((a + b).to_string(), "3.50");

        let total: Money = vec![a, b, Money::zero()].into_iter().sum();
        assert_eq!(total.cents(), 350);
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(24900)).unwrap();
        assert_eq!(json, "\"249.00\"");
    }

    proptest! {
        /// Rounding never moves a value by more than half a cent.
        #[test]
        fn rounding_error_is_at_most_half_a_cent(mantissa in -10_000_000i64..10_000_000, scale in 0u32..6) {
            let exact = Decimal::new(mantissa, scale);
            let rounded = Money::round_half_up(exact);
            prop_assert!((rounded.amount() - exact).abs() <= dec!(0.005));
            prop_assert_eq!(rounded.amount().scale(), MONEY_SCALE);
        }
    }
}
