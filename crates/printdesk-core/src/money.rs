//! # Money Module
//!
//! The `Money` type used for every unit price and price modifier.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PER-UNIT PRICING WITH FLOATS                                           │
//! │                                                                         │
//! │  Colour surcharge 0.10 + front/back 0.20 as f64:                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │    × 500 pages drifts away from 150.00                                  │
//! │                                                                         │
//! │  Integer minor units:                                                   │
//! │    10 + 20 = 30 cents, × 500 = 15000 cents = 150.00  ✅                 │
//! │    Sums are associative: selection order never changes a total          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use printdesk_core::money::Money;
//!
//! let short_bond = Money::from_cents(200);  // $2.00 per page
//! let colour = Money::from_cents(25);       // +$0.25 per page
//!
//! let per_page = short_bond + colour;
//! assert_eq!(per_page.multiply_quantity(10).cents(), 2250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: price modifiers may be negative (a cheaper variant)
/// - **Tuple struct**: zero-cost wrapper over the raw cents
///
/// ## Where Money Flows
/// ```text
/// BaseConfiguration.unit_price_cents ──┐
/// PricingOption.price_modifier_cents ──┼──► PreviewReport (formatted)
/// CustomSpecification.price_modifier ──┘        │
///                                               └──► Quote.unit_price × qty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use printdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(350); // $3.50
    /// assert_eq!(price.cents(), 350);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-1, 50)` is -$1.50.
    ///
    /// ```rust
    /// use printdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(3, 50).cents(), 350);
    /// assert_eq!(Money::from_major_minor(-1, 50).cents(), -150);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a per-unit amount by a unit count (pages, sheets, copies).
    ///
    /// ```rust
    /// use printdesk_core::money::Money;
    ///
    /// let per_page = Money::from_cents(235);
    /// assert_eq!(per_page.multiply_quantity(4).cents(), 940);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// [`multiply_quantity`](Self::multiply_quantity), `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering (`$10.99`, `-$5.50`).
///
/// Operator-facing text goes through [`CurrencyFormat`] so the symbol can be
/// configured.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing modifiers: `options.iter().map(|o| o.price_modifier()).sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// Display settings for operator-facing amounts.
///
/// Amounts are always stored in minor units; `decimals` says how many of
/// those digits sit after the separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CurrencyFormat {
    /// Symbol placed before the amount (`$`, `₱`, ...).
    pub symbol: String,

    /// Number of minor-unit digits.
    pub decimals: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            decimals: 2,
        }
    }
}

impl CurrencyFormat {
    /// Creates a format with the given symbol and decimal places.
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Formats an amount, with a leading `-` when negative.
    ///
    /// ```rust
    /// use printdesk_core::money::{CurrencyFormat, Money};
    ///
    /// let fmt = CurrencyFormat::default();
    /// assert_eq!(fmt.format(Money::from_cents(1234)), "$12.34");
    /// assert_eq!(fmt.format(Money::from_cents(-5)), "-$0.05");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.symbol, self.magnitude(amount))
    }

    /// Formats a price delta: `+$0.25`, `-$0.10`, or the plain zero amount.
    ///
    /// ```rust
    /// use printdesk_core::money::{CurrencyFormat, Money};
    ///
    /// let fmt = CurrencyFormat::default();
    /// assert_eq!(fmt.format_delta(Money::from_cents(25)), "+$0.25");
    /// assert_eq!(fmt.format_delta(Money::zero()), "$0.00");
    /// ```
    pub fn format_delta(&self, delta: Money) -> String {
        if delta.is_positive() {
            format!("+{}{}", self.symbol, self.magnitude(delta))
        } else {
            self.format(delta)
        }
    }

    fn magnitude(&self, amount: Money) -> String {
        let cents = amount.cents().unsigned_abs();
        if self.decimals == 0 {
            return cents.to_string();
        }
        let divisor = 10_u64.pow(u32::from(self.decimals));
        format!(
            "{}.{:0width$}",
            cents / divisor,
            cents % divisor,
            width = usize::from(self.decimals)
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
