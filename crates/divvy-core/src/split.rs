//! # Split Calculators
//!
//! Pure functions turning an expense total into one share per participant,
//! order-aligned with the participant list.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POLICY     INPUT                     OUTPUT (shares)                   │
//! │  ───────    ──────────────────────    ─────────────────────────────     │
//! │  Equal      2000.00, 3 heads          666.67, 666.67, 666.66            │
//! │  Exact      1400.00, {500, 900}       500.00, 900.00                    │
//! │  Percent    1200.00, {40,20,20,20}    480.00, 240.00, 240.00, 240.00    │
//! │                                                                         │
//! │  Equal and Exact always sum to the total.                               │
//! │  Percent rounds each share on its own and may leave a residual.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Percentage, SplitKind};
use crate::FULL_PERCENT_BPS;

// =============================================================================
// Split Policy
// =============================================================================

/// How an expense total is divided, with its distribution data.
///
/// `Exact` and `Percent` carry one value per participant, in participant
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "values")]
pub enum SplitPolicy {
    Equal,
    Exact(Vec<Money>),
    Percent(Vec<Percentage>),
}

impl SplitPolicy {
    pub fn kind(&self) -> SplitKind {
        match self {
            SplitPolicy::Equal => SplitKind::Equal,
            SplitPolicy::Exact(_) => SplitKind::Exact,
            SplitPolicy::Percent(_) => SplitKind::Percent,
        }
    }
}

/// Dispatches to the calculator matching `policy`.
pub fn compute_shares(
    total: Money,
    participant_count: usize,
    policy: &SplitPolicy,
) -> CoreResult<Vec<Money>> {
    match policy {
        SplitPolicy::Equal => Ok(equal_split(total, participant_count)),
        SplitPolicy::Exact(amounts) => exact_split(total, participant_count, amounts),
        SplitPolicy::Percent(percentages) => percent_split(total, participant_count, percentages),
    }
}

// =============================================================================
// Equal
// =============================================================================

/// Divides `total` into `count` shares that sum exactly to `total`.
///
/// Shares are assigned left to right: each participant takes the remaining
/// amount divided by the remaining heads, rounded up to the cent. Leftover
/// cents therefore land on the earliest participants and no two shares
/// differ by more than one cent.
///
/// Truncating each step instead of rounding up sends the leftover cents to
/// the last participants (2000.00 / 3 → 666.66, 666.67, 666.67). Rounding up
/// keeps them on the first.
///
/// ## Example
/// ```rust
/// use divvy_core::money::Money;
/// use divvy_core::split::equal_split;
///
/// let shares = equal_split(Money::from_major(2000), 3);
/// let cents: Vec<i64> = shares.iter().map(|m| m.cents()).collect();
/// assert_eq!(cents, vec![66667, 66667, 66666]);
/// ```
pub fn equal_split(total: Money, count: usize) -> Vec<Money> {
    let mut shares = Vec::with_capacity(count);
    let mut remaining = total.cents();

    for i in 0..count {
        let heads = (count - i) as i64;
        let share = ceil_div(remaining, heads);
        shares.push(Money::from_cents(share));
        remaining -= share;
    }

    shares
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    -(-numerator).div_euclid(denominator)
}

// =============================================================================
// Exact
// =============================================================================

/// Validates caller-supplied shares and returns them unchanged.
///
/// Checked in order: count, no negative share, sum. A zero share is allowed.
pub fn exact_split(total: Money, count: usize, amounts: &[Money]) -> CoreResult<Vec<Money>> {
    if amounts.len() != count {
        return Err(CoreError::DistributionCountMismatch {
            policy: SplitKind::Exact,
            expected: count,
            actual: amounts.len(),
        });
    }

    if amounts.iter().any(|amount| amount.is_negative()) {
        return Err(ValidationError::MustNotBeNegative {
            field: "exact share".to_string(),
        }
        .into());
    }

    let sum: i128 = amounts.iter().map(|m| m.cents() as i128).sum();
    if sum != total.cents() as i128 {
        return Err(CoreError::DistributionSumMismatch {
            policy: SplitKind::Exact,
            expected: total.to_string(),
            actual: display_cents(sum),
        });
    }

    Ok(amounts.to_vec())
}

fn display_cents(cents: i128) -> String {
    match i64::try_from(cents) {
        Ok(cents) => Money::from_cents(cents).to_string(),
        Err(_) => format!("{} cents", cents),
    }
}

// =============================================================================
// Percent
// =============================================================================

/// Computes `round_half_up(pct * total / 100)` for every participant.
///
/// Percentages must sum to exactly 100%. Each share is rounded on its own,
/// so the shares may not add back up to `total`; see [`rounding_residual`].
///
/// ## Example
/// ```rust
/// use divvy_core::money::Money;
/// use divvy_core::split::percent_split;
/// use divvy_core::types::Percentage;
///
/// let pcts: Vec<Percentage> = [40, 20, 20, 20].into_iter().map(Percentage::from_whole).collect();
/// let shares = percent_split(Money::from_major(1200), 4, &pcts).unwrap();
/// assert_eq!(shares[0], Money::from_major(480));
/// assert_eq!(shares[3], Money::from_major(240));
/// ```
pub fn percent_split(
    total: Money,
    count: usize,
    percentages: &[Percentage],
) -> CoreResult<Vec<Money>> {
    if percentages.len() != count {
        return Err(CoreError::DistributionCountMismatch {
            policy: SplitKind::Percent,
            expected: count,
            actual: percentages.len(),
        });
    }

    let sum_bps: u64 = percentages.iter().map(|p| p.bps() as u64).sum();
    if sum_bps != FULL_PERCENT_BPS as u64 {
        let actual = u32::try_from(sum_bps)
            .map(|bps| Percentage::from_bps(bps).to_string())
            .unwrap_or_else(|_| format!("{} bps", sum_bps));
        return Err(CoreError::DistributionSumMismatch {
            policy: SplitKind::Percent,
            expected: Percentage::full().to_string(),
            actual,
        });
    }

    Ok(percentages.iter().map(|p| total.percent_of(*p)).collect())
}

/// Returns `total - sum(shares)`: what independent rounding left unassigned
/// (positive) or over-assigned (negative).
///
/// Summed in i128: per-share rounding can push the sum of shares past
/// `i64::MAX` when the total sits near it, while the residual itself stays
/// within a cent per share.
pub fn rounding_residual(total: Money, shares: &[Money]) -> Money {
    let assigned: i128 = shares.iter().map(|share| share.cents() as i128).sum();
    Money::from_cents((total.cents() as i128 - assigned) as i64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cents(shares: &[Money]) -> Vec<i64> {
        shares.iter().map(|m| m.cents()).collect()
    }

    fn pcts(whole: &[u32]) -> Vec<Percentage> {
        whole.iter().copied().map(Percentage::from_whole).collect()
    }

    #[test]
    fn equal_split_front_loads_leftover_cents() {
        assert_eq!(
            cents(&equal_split(Money::from_major(2000), 3)),
            vec![66667, 66667, 66666]
        );
        assert_eq!(cents(&equal_split(Money::from_cents(100), 3)), vec![34, 33, 33]);
        assert_eq!(cents(&equal_split(Money::from_cents(2), 3)), vec![1, 1, 0]);
    }

    #[test]
    fn equal_split_four_ways() {
        let shares = equal_split(Money::from_major(2000), 4);
        assert!(shares.iter().all(|s| *s == Money::from_major(500)));
    }

    #[test]
    fn equal_split_of_zero_heads_is_empty() {
        assert!(equal_split(Money::from_major(10), 0).is_empty());
    }

    #[test]
    fn exact_split_accepts_matching_sum() {
        let amounts = vec![Money::from_major(500), Money::from_major(900)];
        let shares = exact_split(Money::from_major(1400), 2, &amounts).unwrap();
        assert_eq!(shares, amounts);
    }

    #[test]
    fn exact_split_rejects_sum_mismatch() {
        let amounts = vec![Money::from_major(500), Money::from_major(800)];
        let err = exact_split(Money::from_major(1400), 2, &amounts).unwrap_err();
        assert_eq!(
            err,
            CoreError::DistributionSumMismatch {
                policy: SplitKind::Exact,
                expected: "1400.00".to_string(),
                actual: "1300.00".to_string(),
            }
        );
    }

    #[test]
    fn exact_split_checks_count_before_sum() {
        let amounts = vec![Money::from_major(1400)];
        let err = exact_split(Money::from_major(1400), 2, &amounts).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DistributionCountMismatch { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn exact_split_reports_count_when_sum_is_also_wrong() {
        let amounts = vec![Money::from_major(100)];
        let err = exact_split(Money::from_major(1400), 2, &amounts).unwrap_err();
        assert!(matches!(err, CoreError::DistributionCountMismatch { .. }));

        let err = percent_split(Money::from_major(1400), 2, &pcts(&[50])).unwrap_err();
        assert!(matches!(err, CoreError::DistributionCountMismatch { .. }));
    }

    #[test]
    fn exact_split_rejects_negative_shares() {
        let amounts = vec![Money::from_major(-100), Money::from_major(1500)];
        let err = exact_split(Money::from_major(1400), 2, &amounts).unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::MustNotBeNegative {
                field: "exact share".to_string()
            })
        );
    }

    #[test]
    fn exact_split_allows_zero_shares() {
        let amounts = vec![Money::zero(), Money::from_major(1400)];
        assert_eq!(exact_split(Money::from_major(1400), 2, &amounts).unwrap(), amounts);
    }

    #[test]
    fn residual_near_the_cent_limit() {
        let total = Money::from_cents(i64::MAX);
        let shares = percent_split(total, 2, &pcts(&[50, 50])).unwrap();
        assert_eq!(rounding_residual(total, &shares), Money::from_cents(-1));
    }

    #[test]
    fn percent_split_scenario() {
        let shares = percent_split(Money::from_major(1200), 4, &pcts(&[40, 20, 20, 20])).unwrap();
        assert_eq!(cents(&shares), vec![48000, 24000, 24000, 24000]);
        assert!(rounding_residual(Money::from_major(1200), &shares).is_zero());
    }

    #[test]
    fn percent_split_rejects_99_percent() {
        let err = percent_split(Money::from_major(1200), 4, &pcts(&[39, 20, 20, 20])).unwrap_err();
        assert_eq!(
            err,
            CoreError::DistributionSumMismatch {
                policy: SplitKind::Percent,
                expected: "100%".to_string(),
                actual: "99%".to_string(),
            }
        );
    }

    #[test]
    fn percent_split_rejects_count_mismatch() {
        let err = percent_split(Money::from_major(1200), 3, &pcts(&[50, 50])).unwrap_err();
        assert!(matches!(err, CoreError::DistributionCountMismatch { .. }));
    }

    #[test]
    fn percent_split_can_leave_a_residual() {
        // 3 × 33.33% + 0.01% of 1.00: 0.33 + 0.33 + 0.33 + 0.00 = 0.99
        let percentages = vec![
            Percentage::from_bps(3333),
            Percentage::from_bps(3333),
            Percentage::from_bps(3333),
            Percentage::from_bps(1),
        ];
        let total = Money::from_major(1);
        let shares = percent_split(total, 4, &percentages).unwrap();
        assert_eq!(cents(&shares), vec![33, 33, 33, 0]);
        assert_eq!(rounding_residual(total, &shares), Money::from_cents(1));
    }

    #[test]
    fn percent_split_residual_can_be_negative() {
        // 50% of 0.01 twice: each 0.005 rounds up to 0.01
        let total = Money::from_cents(1);
        let shares = percent_split(total, 2, &pcts(&[50, 50])).unwrap();
        assert_eq!(cents(&shares), vec![1, 1]);
        assert_eq!(rounding_residual(total, &shares), Money::from_cents(-1));
    }

    #[test]
    fn compute_shares_dispatches_on_policy() {
        let total = Money::from_major(90);
        assert_eq!(
            compute_shares(total, 3, &SplitPolicy::Equal).unwrap(),
            vec![Money::from_major(30); 3]
        );
        assert!(compute_shares(total, 3, &SplitPolicy::Exact(vec![total])).is_err());
        assert!(compute_shares(total, 1, &SplitPolicy::Percent(pcts(&[100]))).is_ok());
    }

    #[test]
    fn split_policy_serializes_with_kind_tag() {
        let json = serde_json::to_string(&SplitPolicy::Percent(pcts(&[60, 40]))).unwrap();
        assert_eq!(json, r#"{"kind":"percent","values":[6000,4000]}"#);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: equal shares always sum to the total and never differ
        /// by more than one cent.
        #[test]
        fn equal_split_is_cent_exact(total in 1i64..100_000_000i64, count in 1usize..50) {
            let shares = equal_split(Money::from_cents(total), count);
            prop_assert_eq!(shares.len(), count);
            prop_assert_eq!(shares.iter().sum::<Money>(), Money::from_cents(total));

            let max = shares.iter().max().copied().unwrap_or_default();
            let min = shares.iter().min().copied().unwrap_or_default();
            prop_assert!((max - min).cents() <= 1);
            prop_assert!(shares.windows(2).all(|w| w[0] >= w[1]));
        }

        /// Property: percent shares stay within one cent per participant
        /// of the exact total.
        #[test]
        fn percent_residual_is_bounded(
            total in 1i64..10_000_000i64,
            first in 0u32..=10_000u32,
        ) {
            let percentages = vec![
                Percentage::from_bps(first),
                Percentage::from_bps(10_000 - first),
            ];
            let shares = percent_split(Money::from_cents(total), 2, &percentages).unwrap();
            let residual = rounding_residual(Money::from_cents(total), &shares);
            prop_assert!(residual.cents().abs() <= 1);
        }
    }
}
