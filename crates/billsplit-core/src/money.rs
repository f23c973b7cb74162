//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE SPLITTING PROBLEM                                                  │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In integer cents:                                                      │
//! │    1000 paise / 3 = 333 paise (×3 = 999)  → Lost ₹0.01 per item!       │
//! │    With 20 shared items that is 20 paise of drift per person.          │
//! │                                                                         │
//! │  OUR SOLUTION: 96-bit Decimal, round only for display                   │
//! │    100 / 3 = 33.333333333333333333333333333                             │
//! │    Totals accumulate at full precision; the formatter rounds once.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billsplit_core::money::Money;
//!
//! let pizza: Money = "450".parse().unwrap();
//! let share = pizza.split(3);
//! assert_eq!(share, "150".parse().unwrap());
//! assert_eq!(share.to_fixed(2), "150.00");
//! ```
//!
//! ## Lenient Input
//! Bills arrive from loosely-typed front ends: prices may be JSON numbers,
//! numeric strings, `null`, or garbage. Deserialization never fails; anything
//! that is not a finite number becomes zero.
//!
//! ## Overflow
//! Operators saturate at `Decimal::MAX` instead of panicking. The
//! calculator uses the `checked_*` methods and drops an item whose share
//! would not fit.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::types::Percentage;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major currency units (rupees, dollars) at full
/// decimal precision.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative values appear only as differences,
///   e.g. a payee's "collects" amount when they consumed more than others
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Serialized as a string**: `"33.333333333333333333333333333"` survives
///   a JSON round-trip where an `f64` would not
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a raw decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a whole-unit amount (₹450 → `from_major(450)`).
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Clamps negative amounts to zero.
    ///
    /// Prices are never negative; a negative value in a bill file is treated
    /// the same as a missing one.
    #[inline]
    pub fn non_negative(self) -> Self {
        if self.is_negative() {
            Money::zero()
        } else {
            self
        }
    }

    /// Divides the amount evenly between `ways` consumers.
    ///
    /// No rounding happens here. Splitting between zero consumers yields
    /// zero rather than panicking.
    ///
    /// ## Example
    /// ```rust
    /// use billsplit_core::money::Money;
    ///
    /// let bread = Money::from_major(150);
    /// assert_eq!(bread.split(2), Money::from_major(75));
    /// assert_eq!(bread.split(0), Money::zero());
    /// ```
    pub fn split(&self, ways: usize) -> Money {
        if ways == 0 {
            return Money::zero();
        }
        Money(self.0 / Decimal::from(ways))
    }

    /// Applies a percentage (tax, tip) to this amount.
    ///
    /// ## Example
    /// ```rust
    /// use billsplit_core::money::Money;
    /// use billsplit_core::types::Percentage;
    ///
    /// let base = Money::from_major(150);
    /// let tax = base.percent(Percentage::from_whole(5));
    /// assert_eq!(tax, "7.5".parse().unwrap());
    /// ```
    pub fn percent(&self, rate: Percentage) -> Money {
        Money(self.0.saturating_mul(rate.fraction()))
    }

    /// Like [`Money::percent`], but `None` when the result does not fit.
    pub fn checked_percent(&self, rate: Percentage) -> Option<Money> {
        self.0.checked_mul(rate.fraction()).map(Money)
    }

    /// Adds two amounts, or `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies by a head count, or `None` on overflow.
    pub fn checked_times(self, count: usize) -> Option<Money> {
        self.0.checked_mul(Decimal::from(count)).map(Money)
    }

    /// Rounds to `dp` decimal places, halves away from zero.
    ///
    /// This matches what people expect on a receipt (2.345 → 2.35), and is
    /// the only place precision is ever dropped.
    pub fn round_dp(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Rounds and renders with exactly `dp` fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use billsplit_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(78).to_fixed(2), "78.00");
    /// assert_eq!("78.755".parse::<Money>().unwrap().to_fixed(2), "78.76");
    /// ```
    pub fn to_fixed(&self, dp: u32) -> String {
        let mut rounded = self.round_dp(dp).0;
        rounded.rescale(dp);
        rounded.to_string()
    }

    /// Coerces an arbitrary JSON value into money.
    ///
    /// Numbers and numeric strings parse; everything else is zero.
    pub fn coerce(value: &Value) -> Money {
        Money(coerce_decimal(value))
    }
}

// =============================================================================
// Lenient Decimal Parsing
// =============================================================================

/// Best-effort conversion of a loosely-typed JSON value to a decimal.
///
/// | Input            | Result |
/// |------------------|--------|
/// | `450`, `"450"`   | 450    |
/// | `"12.5 "`        | 12.5   |
/// | `"1e3"`          | 1000   |
/// | `null`, `"abc"`  | 0      |
/// | `true`, `[]`     | 0      |
pub(crate) fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
    .unwrap_or(Decimal::ZERO)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Money::coerce(&value))
    }
}

/// Parses strictly; use [`Money::coerce`] for lenient input.
impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

/// Two-decimal rendering for logs and debugging.
///
/// Use [`crate::currency::CurrencyFormat`] for anything a person reads.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed(2))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0.saturating_mul(factor))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
