//! # Money Module
//!
//! Provides the `Money` type used for product costs.
//!
//! ## Cents In, Whole Units Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product.cost_cents = 125_99   ($125.99)                                │
//! │           │                                                             │
//! │           ▼  whole_units() - truncate, never round                      │
//! │          125                                                            │
//! │           │                                                             │
//! │           ▼  CostCodeCodec::encode_money                                │
//! │         "NBF"   ← printed on the shelf label                            │
//! │                                                                         │
//! │  Decoding gives back 125 whole units → Money::from_units(125)          │
//! │  The cents are never part of a cost code.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use costcode_core::money::Money;
//!
//! let cost = Money::from_cents(12599);
//! assert_eq!(cost.whole_units(), 125);
//! assert_eq!(cost.to_string(), "$125.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Minor units per whole currency unit.
pub const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Costs coming from adjustments can go negative; the
///   codec clamps those to zero rather than rejecting them
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Saturates at `i64::MAX` cents.
    #[inline]
    pub const fn from_units(units: u64) -> Self {
        let cents = (units as i128) * (CENTS_PER_UNIT as i128);
        if cents > i64::MAX as i128 {
            Money(i64::MAX)
        } else {
            Money(cents as i64)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit part, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use costcode_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).whole_units(), 10);
    /// assert_eq!(Money::from_cents(-550).whole_units(), -5);
    /// ```
    #[inline]
    pub const fn whole_units(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and the back-office tool. The mobile client formats
/// with the store's own currency settings.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.whole_units().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.whole_units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_units() {
        assert_eq!(Money::from_units(125).cents(), 12500);
        assert_eq!(Money::from_units(0), Money::zero());
        assert_eq!(Money::from_units(u64::MAX).cents(), i64::MAX);
    }

    #[test]
    fn test_whole_units_truncates() {
        assert_eq!(Money::from_cents(199).whole_units(), 1);
        assert_eq!(Money::from_cents(99).whole_units(), 0);
        assert_eq!(Money::from_cents(-199).whole_units(), -1);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }
}
