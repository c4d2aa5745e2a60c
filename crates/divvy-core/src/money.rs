//! # Money Module
//!
//! Provides the `Money` type for handling shared-expense amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    2000.00 / 3 = 666.666...  → which share gets the extra cent?         │
//! │    666.67 + 666.67 + 666.66 may not equal 2000.00 exactly               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    200000 cents split 3 ways = 66667 + 66667 + 66666                    │
//! │    Every cent is accounted for, balances always net to zero            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use divvy_core::money::Money;
//!
//! // Create from cents (preferred)
//! let dinner = Money::from_cents(200000); // 2000.00
//!
//! // Or parse a 2-decimal string
//! let taxi: Money = "14.50".parse().unwrap();
//! assert_eq!(taxi.cents(), 1450);
//!
//! assert_eq!((dinner + taxi).to_string(), "2014.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::Percentage;
use crate::{FULL_PERCENT_BPS, MINOR_UNITS_PER_MAJOR};

// =============================================================================
// Money Type
// =============================================================================

/// A signed amount in minor currency units (cents).
///
/// ## Sign Convention
/// On a participant's balance sheet a positive value means "owes the group"
/// and a negative value means "is owed by the group". `Money` itself is just
/// a signed number; the ledger gives the sign its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::money::Money;
    ///
    /// let share = Money::from_cents(66667); // Represents 666.67
    /// assert_eq!(share.cents(), 66667);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(1500, 0).cents(), 150000);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_UNITS_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_UNITS_PER_MAJOR + minor)
        }
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_UNITS_PER_MAJOR)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_UNITS_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_UNITS_PER_MAJOR).abs()
    }

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

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// `None` if the sum leaves the `i64` cent range.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `percentage` of this amount, rounded half-up to the cent.
    ///
    /// ## Rounding
    /// Computed as `floor(cents * bps / 10000 + 0.5)` in integer math, which
    /// is `floor(amount * 100 + 0.5) / 100` on the 2-decimal value.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::money::Money;
    /// use divvy_core::types::Percentage;
    ///
    /// let total = Money::from_major(1200);
    /// assert_eq!(total.percent_of(Percentage::from_whole(40)).cents(), 48000);
    ///
    /// // 33.33% of 10.00 = 3.333 → 3.33
    /// let third = Money::from_major(10).percent_of(Percentage::from_bps(3333));
    /// assert_eq!(third.cents(), 333);
    ///
    /// // 12.5% of 0.20 = 0.025 → 0.03 (half rounds up)
    /// let half = Money::from_cents(20).percent_of(Percentage::from_bps(1250));
    /// assert_eq!(half.cents(), 3);
    /// ```
    pub fn percent_of(&self, percentage: Percentage) -> Money {
        // i128 keeps cents * bps from overflowing on large totals
        let full = FULL_PERCENT_BPS as i128;
        let scaled = self.0 as i128 * percentage.bps() as i128;
        let rounded = (scaled + full / 2).div_euclid(full);
        Money::from_cents(rounded as i64)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal string with at most two fractional digits into an
/// integer scaled by 100. `"12.5"` → `1250`, `"-3"` → `-300`.
pub(crate) fn parse_scaled_by_100(input: &str) -> Option<i64> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2 || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    let value = whole.checked_mul(100)?.checked_add(fraction)?;
    Some(if negative { -value } else { value })
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_scaled_by_100(s)
            .map(Money::from_cents)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: format!("'{}' is not a decimal with at most 2 fractional digits", s),
            })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency symbol: `-1500.00`.
/// Currency symbols are a display concern of the caller.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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
    fn mul(self, factor: i64) -> Self {
        Money(self.0 * factor)
    }
}

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
// Unit Tests
// =============================================================================
