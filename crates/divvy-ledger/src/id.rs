//! Per-ledger id allocation.
//!
//! Each [`Ledger`](crate::Ledger) owns one generator, so two ledgers in the
//! same process hand out overlapping ids independently. The generator also
//! carries a [`LedgerToken`] that tells participants of different ledgers
//! apart even when their ids are equal.

use std::sync::atomic::{AtomicU64, Ordering};

use divvy_core::{ExpenseId, ParticipantId};

static NEXT_LEDGER_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of one ledger instance, stamped on every participant it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedgerToken(u64);

impl LedgerToken {
    /// A token no other call in this process has returned.
    pub fn unique() -> Self {
        LedgerToken(NEXT_LEDGER_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub struct IdGenerator {
    owner: LedgerToken,
    next_participant: AtomicU64,
    next_expense: AtomicU64,
}

impl IdGenerator {
    /// Both sequences start at 1.
    pub fn new() -> Self {
        IdGenerator {
            owner: LedgerToken::unique(),
            next_participant: AtomicU64::new(1),
            next_expense: AtomicU64::new(1),
        }
    }

    pub fn owner(&self) -> LedgerToken {
        self.owner
    }

    pub fn next_participant_id(&self) -> ParticipantId {
        ParticipantId::new(self.next_participant.fetch_add(1, Ordering::Relaxed))
    }

    pub fn next_expense_id(&self) -> ExpenseId {
        ExpenseId::new(self.next_expense.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequences_are_independent() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_participant_id(), ParticipantId::new(1));
        assert_eq!(ids.next_participant_id(), ParticipantId::new(2));
        assert_eq!(ids.next_expense_id(), ExpenseId::new(1));
    }

    #[test]
    fn test_generators_have_distinct_owners() {
        let first = IdGenerator::new();
        let second = IdGenerator::new();
        assert_ne!(first.owner(), second.owner());
        assert_eq!(first.owner(), first.owner());
    }

    #[test]
    fn test_concurrent_allocation_is_unique() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..100).map(|_| ids.next_participant_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 800);
    }
}
