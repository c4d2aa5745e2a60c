//! # Settlement Engine
//!
//! Turns a set of final balances into an ordered list of point-to-point
//! payments that drives every balance to zero.
//!
//! ## Greedy Pairing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  balances (cents):  P1 -1500   P2 +500   P3 +500   P4 +500              │
//! │                                                                         │
//! │  step 1: creditor = P1 (most negative), debtor = P2 (most positive)     │
//! │          pay min(1500, 500) = 500      P2 → P1                          │
//! │  step 2: creditor = P1 (-1000), debtor = P3   P3 → P1  500              │
//! │  step 3: creditor = P1 (-500),  debtor = P4   P4 → P1  500              │
//! │  all zero → stop                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step fully absorbs at least one side, so `n` participants settle
//! in at most `n - 1` payments. Ties go to the first occurrence in input
//! order, which makes the output reproducible. The result is not guaranteed
//! to use the fewest possible payments.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::money::Money;
use crate::types::ParticipantId;

/// One payment instruction: `from` pays `amount` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

/// Computes the greedy settlement for `balances`.
///
/// Positive balance = owes the group, negative = is owed. Balances that
/// already net to zero yield an empty list.
///
/// ## Example
/// ```rust
/// use divvy_core::money::Money;
/// use divvy_core::settlement::settle;
/// use divvy_core::types::ParticipantId;
///
/// let balances = vec![
///     (ParticipantId::new(1), Money::from_major(-30)),
///     (ParticipantId::new(2), Money::from_major(30)),
/// ];
/// let transfers = settle(&balances);
/// assert_eq!(transfers.len(), 1);
/// assert_eq!(transfers[0].from, ParticipantId::new(2));
/// assert_eq!(transfers[0].amount, Money::from_major(30));
/// ```
pub fn settle(balances: &[(ParticipantId, Money)]) -> Vec<Transfer> {
    // i128 so that negating i64::MIN or summing extreme balances cannot overflow
    let mut working: Vec<i128> = balances
        .iter()
        .map(|(_, balance)| balance.cents() as i128)
        .collect();
    let mut transfers = Vec::new();

    if working.is_empty() {
        return transfers;
    }

    loop {
        let (min_idx, max_idx) = min_max_index(&working);
        let (most_owed, most_owing) = (working[min_idx], working[max_idx]);

        if most_owed == 0 && most_owing == 0 {
            break;
        }

        // Only reachable when the input does not net to zero.
        if most_owed >= 0 || most_owing <= 0 {
            let unsettled_cents: i128 = working.iter().sum();
            warn!(unsettled_cents, "Balances do not net to zero, settlement stopped early");
            break;
        }

        // Bounded by the debtor's original positive i64 balance.
        let amount = (-most_owed).min(most_owing);
        working[min_idx] += amount;
        working[max_idx] -= amount;

        let transfer = Transfer {
            from: balances[max_idx].0,
            to: balances[min_idx].0,
            amount: Money::from_cents(amount as i64),
        };
        debug!(from = %transfer.from, to = %transfer.to, amount = %transfer.amount, "Settlement step");
        transfers.push(transfer);
    }

    transfers
}

/// Applies `transfers` to `balances` in place: the payer's balance drops by
/// the amount, the receiver's rises by it. Transfers naming an id absent
/// from `balances` are ignored.
pub fn apply_transfers(balances: &mut [(ParticipantId, Money)], transfers: &[Transfer]) {
    for transfer in transfers {
        for (id, balance) in balances.iter_mut() {
            if *id == transfer.from {
                *balance -= transfer.amount;
            } else if *id == transfer.to {
                *balance += transfer.amount;
            }
        }
    }
}

/// Index of the smallest and of the largest value, first occurrence wins.
fn min_max_index(values: &[i128]) -> (usize, usize) {
    let mut min_idx = 0;
    let mut max_idx = 0;
    for (i, value) in values.iter().enumerate() {
        if *value < values[min_idx] {
            min_idx = i;
        }
        if *value > values[max_idx] {
            max_idx = i;
        }
    }
    (min_idx, max_idx)
}

// =============================================================================
// Unit Tests
// =============================================================================
