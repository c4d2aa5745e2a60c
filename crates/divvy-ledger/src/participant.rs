//! # Participant Ledger Entries
//!
//! Each registered participant owns an [`ExpenseSheet`] behind its own
//! `Mutex`.
//!
//! ## Sign Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total           > 0   participant owes the group                       │
//! │  total           < 0   the group owes the participant                   │
//! │  counterparty[B] > 0   this participant owes B                          │
//! │                                                                         │
//! │  For any A, B:  A.counterparty[B] == -B.counterparty[A]                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! Sheets are only touched while the ledger's registry lock is held (write
//! lock to mutate, read lock to snapshot), and a sheet lock is never held
//! while acquiring the registry lock.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use divvy_core::{Money, ParticipantId};
use serde::{Deserialize, Serialize};

use crate::id::LedgerToken;

// =============================================================================
// Expense Sheet
// =============================================================================

/// Running balances for one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseSheet {
    pub total: Money,
    pub counterparties: BTreeMap<ParticipantId, Money>,
}

// =============================================================================
// Participant
// =============================================================================

#[derive(Debug)]
pub struct Participant {
    owner: LedgerToken,
    id: ParticipantId,
    name: String,
    sheet: Mutex<ExpenseSheet>,
}

impl Participant {
    /// Creates a participant with an empty sheet for the ledger identified
    /// by `owner`. The name is expected to be validated already.
    pub fn new(owner: LedgerToken, id: ParticipantId, name: impl Into<String>) -> Self {
        Participant {
            owner,
            id,
            name: name.into(),
            sheet: Mutex::new(ExpenseSheet::default()),
        }
    }

    pub fn owner(&self) -> LedgerToken {
        self.owner
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> ParticipantHandle {
        ParticipantHandle {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// Records that this participant now owes `counterparty` an extra
    /// `amount` (negative: is owed). Entries against oneself are dropped.
    pub fn add_to_expense_sheet(&self, counterparty: ParticipantId, amount: Money) {
        if counterparty == self.id {
            return;
        }
        let mut sheet = self.lock_sheet();
        sheet.total += amount;
        *sheet.counterparties.entry(counterparty).or_default() += amount;
    }

    /// True if every entry in `entries` can be added to this sheet, in
    /// order, without leaving the `i64` cent range. Checks only; nothing is
    /// written.
    pub fn can_absorb(&self, entries: &[(ParticipantId, Money)]) -> bool {
        let sheet = self.lock_sheet();
        let mut total = sheet.total;
        let mut touched: BTreeMap<ParticipantId, Money> = BTreeMap::new();

        for &(counterparty, amount) in entries {
            if counterparty == self.id {
                continue;
            }
            let current = touched
                .get(&counterparty)
                .or_else(|| sheet.counterparties.get(&counterparty))
                .copied()
                .unwrap_or_default();

            match (total.checked_add(amount), current.checked_add(amount)) {
                (Some(next_total), Some(next_entry)) => {
                    total = next_total;
                    touched.insert(counterparty, next_entry);
                }
                _ => return false,
            }
        }
        true
    }

    pub fn total_balance(&self) -> Money {
        self.lock_sheet().total
    }

    /// Net amount this participant owes `other`; zero if they never shared
    /// an expense.
    pub fn balance_with(&self, other: ParticipantId) -> Money {
        self.lock_sheet()
            .counterparties
            .get(&other)
            .copied()
            .unwrap_or_default()
    }

    /// Non-zero counterparty balances, ordered by id.
    pub fn counterparty_balances(&self) -> Vec<(ParticipantId, Money)> {
        self.lock_sheet()
            .counterparties
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(id, amount)| (*id, *amount))
            .collect()
    }

    pub fn snapshot(&self) -> ExpenseSheet {
        self.lock_sheet().clone()
    }

    // A poisoned sheet still holds whole updates: the ledger runs
    // can_absorb before add_to_expense_sheet, so neither addition overflows.
    fn lock_sheet(&self) -> MutexGuard<'_, ExpenseSheet> {
        self.sheet.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Handles and Reports
// =============================================================================

/// Cheap, cloneable reference to a registered participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantHandle {
    pub id: ParticipantId,
    pub name: String,
}

impl fmt::Display for ParticipantHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One row of a balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    pub id: ParticipantId,
    pub name: String,
    pub balance: Money,
}

impl ParticipantBalance {
    /// Human-readable line, amounts prefixed with `currency_symbol`.
    ///
    /// ```text
    /// Navin owes a total of ₹500.00
    /// Jitu gets back a total of ₹1500.00
    /// Yogi is settled up
    /// ```
    pub fn describe(&self, currency_symbol: &str) -> String {
        if self.balance.is_positive() {
            format!("{} owes a total of {}{}", self.name, currency_symbol, self.balance)
        } else if self.balance.is_negative() {
            format!(
                "{} gets back a total of {}{}",
                self.name,
                currency_symbol,
                self.balance.abs()
            )
        } else {
            format!("{} is settled up", self.name)
        }
    }
}

impl fmt::Display for ParticipantBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(""))
    }
}

/// "`debtor` owes `amount` to `creditor`", taken from the counterparty maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub debtor: ParticipantHandle,
    pub creditor: ParticipantHandle,
    pub amount: Money,
}

impl Statement {
    pub fn describe(&self, currency_symbol: &str) -> String {
        format!(
            "{} owes {}{} to {}",
            self.debtor.name, currency_symbol, self.amount, self.creditor.name
        )
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(raw: u64) -> ParticipantId {
        ParticipantId::new(raw)
    }

    fn owner() -> LedgerToken {
        LedgerToken::unique()
    }

    #[test]
    fn test_sheet_accumulates_per_counterparty() {
        let navin = Participant::new(owner(), p(2), "Navin");
        navin.add_to_expense_sheet(p(1), Money::from_major(500));
        navin.add_to_expense_sheet(p(4), Money::from_major(240));
        navin.add_to_expense_sheet(p(1), Money::from_major(-100));

        assert_eq!(navin.total_balance(), Money::from_major(640));
        assert_eq!(navin.balance_with(p(1)), Money::from_major(400));
        assert_eq!(navin.balance_with(p(3)), Money::zero());
        assert_eq!(
            navin.counterparty_balances(),
            vec![(p(1), Money::from_major(400)), (p(4), Money::from_major(240))]
        );
    }

    #[test]
    fn test_can_absorb_detects_overflow_without_writing() {
        let navin = Participant::new(owner(), p(2), "Navin");
        navin.add_to_expense_sheet(p(1), Money::from_cents(i64::MAX - 10));

        assert!(navin.can_absorb(&[(p(3), Money::from_cents(10))]));
        assert!(!navin.can_absorb(&[(p(3), Money::from_cents(11))]));
        assert!(!navin.can_absorb(&[(p(3), Money::from_cents(6)), (p(4), Money::from_cents(6))]));
        assert!(navin.can_absorb(&[(p(2), Money::from_cents(1_000))]));
        assert_eq!(navin.total_balance(), Money::from_cents(i64::MAX - 10));
        assert_eq!(navin.balance_with(p(3)), Money::zero());
    }

    #[test]
    fn test_self_entries_are_ignored() {
        let jitu = Participant::new(owner(), p(1), "Jitu");
        jitu.add_to_expense_sheet(p(1), Money::from_major(500));
        assert_eq!(jitu.snapshot(), ExpenseSheet::default());
    }

    #[test]
    fn test_zero_counterparties_are_hidden() {
        let yogi = Participant::new(owner(), p(3), "Yogi");
        yogi.add_to_expense_sheet(p(1), Money::from_major(10));
        yogi.add_to_expense_sheet(p(1), Money::from_major(-10));
        assert!(yogi.counterparty_balances().is_empty());
        assert!(yogi.total_balance().is_zero());
    }

    #[test]
    fn test_balance_lines() {
        let owes = ParticipantBalance {
            id: p(2),
            name: "Navin".into(),
            balance: Money::from_major(500),
        };
        let owed = ParticipantBalance {
            id: p(1),
            name: "Jitu".into(),
            balance: Money::from_major(-1500),
        };
        let even = ParticipantBalance {
            id: p(3),
            name: "Yogi".into(),
            balance: Money::zero(),
        };

        assert_eq!(owes.to_string(), "Navin owes a total of 500.00");
        assert_eq!(owed.describe("₹"), "Jitu gets back a total of ₹1500.00");
        assert_eq!(even.to_string(), "Yogi is settled up");
    }

    #[test]
    fn test_statement_line() {
        let statement = Statement {
            debtor: ParticipantHandle { id: p(2), name: "Navin".into() },
            creditor: ParticipantHandle { id: p(1), name: "Jitu".into() },
            amount: Money::from_cents(66_667),
        };
        assert_eq!(statement.to_string(), "Navin owes 666.67 to Jitu");
    }
}
