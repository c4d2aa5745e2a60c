//! # Expense Record
//!
//! An immutable description of one shared cost: who fronted the money, who
//! owes a share, how much, and under which split policy.
//!
//! ## Lifecycle
//! ```text
//! Ledger::create_expense ──► Expense (validated, immutable)
//!      │
//!      ▼
//! Ledger::apply_expense(&expense)
//!      │
//!      ├── Ok  → balance deltas persist, the Expense itself is not retained
//!      └── Err → no side effects, caller simply drops the Expense
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CoreResult;
use crate::money::Money;
use crate::split::{compute_shares, SplitPolicy};
use crate::types::{ExpenseId, ParticipantId, SplitKind};
use crate::validation::{validate_expense_participants, validate_expense_total};

/// One shared cost.
///
/// Fields are private so a constructed expense cannot drift away from the
/// checks done in [`Expense::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    id: ExpenseId,
    payer: ParticipantId,
    participants: Vec<ParticipantId>,
    total: Money,
    policy: SplitPolicy,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl Expense {
    /// Builds an expense after checking the total and the participant list.
    ///
    /// The payer may or may not be among `participants`; a payer's own share
    /// produces no balance change when applied. Distribution data is checked
    /// against the participants only when shares are computed.
    pub fn new(
        id: ExpenseId,
        payer: ParticipantId,
        participants: Vec<ParticipantId>,
        total: Money,
        policy: SplitPolicy,
        max_participants: usize,
    ) -> CoreResult<Self> {
        validate_expense_total(total)?;
        validate_expense_participants(&participants, max_participants)?;

        Ok(Expense {
            id,
            payer,
            participants,
            total,
            policy,
            description: None,
            created_at: Utc::now(),
        })
    }

    /// Attaches a free-text description ("Dinner", "Taxi to airport").
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        let trimmed = description.trim();
        self.description = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn payer(&self) -> ParticipantId {
        self.payer
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    pub fn kind(&self) -> SplitKind {
        self.policy.kind()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Payer followed by every participant. Used for membership checks.
    pub fn involved(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        std::iter::once(self.payer).chain(self.participants.iter().copied())
    }

    /// Runs the split calculator for this expense's policy.
    ///
    /// Returns one share per participant, order-aligned with
    /// [`Expense::participants`].
    pub fn shares(&self) -> CoreResult<Vec<Money>> {
        compute_shares(self.total, self.participants.len(), &self.policy)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::types::Percentage;
    use crate::DEFAULT_MAX_PARTICIPANTS;

    fn ids(raw: &[u64]) -> Vec<ParticipantId> {
        raw.iter().copied().map(ParticipantId::new).collect()
    }

    #[test]
    fn test_new_expense_keeps_order() {
        let expense = Expense::new(
            ExpenseId::new(1),
            ParticipantId::new(1),
            ids(&[3, 1, 2]),
            Money::from_major(30),
            SplitPolicy::Equal,
            DEFAULT_MAX_PARTICIPANTS,
        )
        .unwrap();

        assert_eq!(expense.participants(), ids(&[3, 1, 2]).as_slice());
        assert_eq!(expense.kind(), SplitKind::Equal);
        assert_eq!(expense.involved().collect::<Vec<_>>(), ids(&[1, 3, 1, 2]));
    }

    #[test]
    fn test_rejects_non_positive_total() {
        let err = Expense::new(
            ExpenseId::new(1),
            ParticipantId::new(1),
            ids(&[2]),
            Money::zero(),
            SplitPolicy::Equal,
            DEFAULT_MAX_PARTICIPANTS,
        )
        .unwrap_err();

        assert_eq!(
            err,
            CoreError::Validation(ValidationError::MustBePositive {
                field: "total".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_empty_participants() {
        let result = Expense::new(
            ExpenseId::new(1),
            ParticipantId::new(1),
            Vec::new(),
            Money::from_major(10),
            SplitPolicy::Equal,
            DEFAULT_MAX_PARTICIPANTS,
        );
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_shares_follow_policy() {
        let expense = Expense::new(
            ExpenseId::new(7),
            ParticipantId::new(4),
            ids(&[1, 2, 3, 4]),
            Money::from_major(1200),
            SplitPolicy::Percent(vec![
                Percentage::from_whole(40),
                Percentage::from_whole(20),
                Percentage::from_whole(20),
                Percentage::from_whole(20),
            ]),
            DEFAULT_MAX_PARTICIPANTS,
        )
        .unwrap();

        let shares = expense.shares().unwrap();
        assert_eq!(shares[0], Money::from_major(480));
        assert_eq!(shares[1], Money::from_major(240));
    }

    #[test]
    fn test_description_is_trimmed() {
        let expense = Expense::new(
            ExpenseId::new(1),
            ParticipantId::new(1),
            ids(&[2]),
            Money::from_major(10),
            SplitPolicy::Equal,
            DEFAULT_MAX_PARTICIPANTS,
        )
        .unwrap()
        .with_description("  Dinner ");
        assert_eq!(expense.description(), Some("Dinner"));

        let blank = expense.with_description("   ");
        assert_eq!(blank.description(), None);
    }
}
