//! # Domain Types
//!
//! Identifiers and small value types shared by every divvy crate.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ParticipantId   │   │   ExpenseId     │   │   Percentage    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  u64, per-      │   │  u64, per-      │   │  bps (u32)      │       │
//! │  │  ledger counter │   │  ledger counter │   │  4000 = 40%     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │   SplitKind     │  Equal | Exact | Percent                          │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are plain sequential numbers handed out by the ledger that owns them.
//! Two independent ledgers in one process each start counting at 1.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::parse_scaled_by_100;
use crate::FULL_PERCENT_BPS;

// =============================================================================
// Identifiers
// =============================================================================

/// Stable identity of a participant within one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(u64);

impl ParticipantId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        ParticipantId(raw)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Sequential identity of an expense within one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        ExpenseId(raw)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so `33.33%` is exactly `3333` and a
/// distribution "sums to 100" exactly when its bps sum to `10000`. No float
/// comparison is ever needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u32);

impl Percentage {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a whole number: `from_whole(40)` is 40%.
    #[inline]
    pub const fn from_whole(percent: u32) -> Self {
        Percentage(percent * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// 100%.
    #[inline]
    pub const fn full() -> Self {
        Percentage(FULL_PERCENT_BPS)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            write!(f, "{}%", whole)
        } else {
            write!(f, "{}.{:02}%", whole, fraction)
        }
    }
}

/// Parses `"40"`, `"33.33"` or `"12.5%"`.
impl FromStr for Percentage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);

        let bps = parse_scaled_by_100(trimmed).ok_or_else(|| ValidationError::InvalidFormat {
            field: "percentage".to_string(),
            reason: format!("'{}' is not a decimal with at most 2 fractional digits", s),
        })?;

        u32::try_from(bps)
            .map(Percentage)
            .map_err(|_| ValidationError::OutOfRange {
                field: "percentage".to_string(),
                min: 0,
                max: u32::MAX as i64,
            })
    }
}

// =============================================================================
// Split Kind
// =============================================================================

/// Which splitting policy an expense uses, without its distribution data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    Equal,
    Exact,
    Percent,
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitKind::Equal => write!(f, "equal"),
            SplitKind::Exact => write!(f, "exact"),
            SplitKind::Percent => write!(f, "percent"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_from_whole() {
        assert_eq!(Percentage::from_whole(40).bps(), 4000);
        assert_eq!(Percentage::full().bps(), 10000);
    }

    #[test]
    fn test_percentage_parse() {
        assert_eq!("40".parse::<Percentage>().unwrap().bps(), 4000);
        assert_eq!("33.33".parse::<Percentage>().unwrap().bps(), 3333);
        assert_eq!("12.5%".parse::<Percentage>().unwrap().bps(), 1250);

        assert!("-5".parse::<Percentage>().is_err());
        assert!("1.005".parse::<Percentage>().is_err());
        assert!("half".parse::<Percentage>().is_err());
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::from_whole(20).to_string(), "20%");
        assert_eq!(Percentage::from_bps(3333).to_string(), "33.33%");
        assert_eq!(Percentage::from_bps(1250).to_string(), "12.50%");
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ParticipantId::new(3).to_string(), "P3");
        assert_eq!(ExpenseId::new(12).to_string(), "E12");
    }
}
