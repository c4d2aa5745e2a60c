//! # Ledger Service
//!
//! Owns the participant registry, applies expenses, answers balance
//! queries and produces settlements.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Two-Tier Locking                                │
//! │                                                                         │
//! │  RwLock<Registry>  (service lock)                                       │
//! │    write: register, apply_expense                                       │
//! │    read:  balance, balances, statements, settle snapshot                │
//! │       │                                                                 │
//! │       ▼  always acquired second, never held while taking the above      │
//! │  Mutex<ExpenseSheet>  (one per participant)                             │
//! │                                                                         │
//! │  apply_expense holds the write lock from membership check to the last  │
//! │  sheet update, so a reader sees an expense either fully or not at all. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Applying an Expense
//! ```text
//! payer P pays 2000.00, Equal over [P, A, B, C]   → shares 500.00 each
//!
//!   for each (p, amt), p != P:
//!     P.total -= amt     P.counterparty[p] -= amt
//!     p.total += amt     p.counterparty[P] += amt
//!
//!   P -1500.00   A +500.00   B +500.00   C +500.00   (sum 0)
//! ```

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use divvy_core::split::rounding_residual;
use divvy_core::validation::validate_participant_name;
use divvy_core::{settlement, Expense, ExpenseId, Money, ParticipantId, SplitPolicy, Transfer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{LedgerConfig, ResidualPolicy};
use crate::error::{LedgerError, LedgerResult};
use crate::id::IdGenerator;
use crate::participant::{Participant, ParticipantBalance, ParticipantHandle, Statement};
use crate::registry::Registry;

/// Receipt for a successfully applied expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedExpense {
    pub expense_id: ExpenseId,
    pub payer: ParticipantId,
    /// One entry per participant, in expense order. The payer's own share,
    /// if listed, is included here but moved no balance.
    pub shares: Vec<(ParticipantId, Money)>,
    /// `total - sum(shares)`. Non-zero only for Percent splits.
    pub residual: Money,
}

#[derive(Debug)]
pub struct Ledger {
    config: LedgerConfig,
    ids: IdGenerator,
    registry: RwLock<Registry>,
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        Ledger {
            config,
            ids: IdGenerator::new(),
            registry: RwLock::new(Registry::new()),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Allocates an id and builds a participant without registering it.
    pub fn create_participant(&self, name: &str) -> LedgerResult<Arc<Participant>> {
        validate_participant_name(name, self.config.max_name_length())?;
        let id = self.ids.next_participant_id();
        Ok(Arc::new(Participant::new(self.ids.owner(), id, name.trim())))
    }

    /// Registers a participant built by [`Ledger::create_participant`].
    ///
    /// Returns `false` when the id is already registered (its balances are
    /// left alone) or the participant was created by another ledger.
    pub fn register(&self, participant: &Arc<Participant>) -> bool {
        if participant.owner() != self.ids.owner() {
            warn!(participant = %participant.id(), "Refusing participant not created by this ledger");
            return false;
        }

        let added = self.write_registry().register(Arc::clone(participant));
        if added {
            debug!(participant = %participant.id(), name = participant.name(), "Participant registered");
        } else {
            debug!(participant = %participant.id(), "Participant already registered");
        }
        added
    }

    /// Creates and registers a participant in one step.
    pub fn register_participant(&self, name: &str) -> LedgerResult<ParticipantHandle> {
        let participant = self.create_participant(name)?;
        self.register(&participant);
        Ok(participant.handle())
    }

    pub fn lookup(&self, id: ParticipantId) -> Option<ParticipantHandle> {
        self.read_registry().lookup(id).map(|participant| participant.handle())
    }

    /// Registered participants, in registration order.
    pub fn participants(&self) -> Vec<ParticipantHandle> {
        self.read_registry()
            .iter()
            .map(|participant| participant.handle())
            .collect()
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    /// Builds a validated expense with a fresh id from this ledger.
    ///
    /// Registration of the payer and participants is checked when the
    /// expense is applied, not here.
    pub fn create_expense(
        &self,
        payer: ParticipantId,
        participants: Vec<ParticipantId>,
        total: Money,
        policy: SplitPolicy,
    ) -> LedgerResult<Expense> {
        let id = self.ids.next_expense_id();
        let expense = Expense::new(
            id,
            payer,
            participants,
            total,
            policy,
            self.config.max_participants(),
        )?;
        Ok(expense)
    }

    /// Applies `expense` to every affected balance, all or nothing.
    ///
    /// ## Errors
    /// - `UnregisteredParticipant`: payer or a participant is unknown
    /// - `Split`: distribution count or sum does not match
    /// - `RoundingResidual`: Percent shares miss the total and the residual
    ///   policy is `reject`
    /// - `BalanceOverflow`: a resulting balance would not fit in `i64` cents
    ///
    /// Any error leaves every balance untouched.
    pub fn apply_expense(&self, expense: &Expense) -> LedgerResult<AppliedExpense> {
        let registry = self.write_registry();

        if let Some(unknown) = registry.first_unregistered(expense.involved()) {
            warn!(expense = %expense.id(), participant = %unknown, "Expense rejected: unregistered participant");
            return Err(LedgerError::UnregisteredParticipant(unknown));
        }

        let shares = expense.shares().map_err(|e| {
            warn!(expense = %expense.id(), error = %e, "Expense rejected: invalid split");
            LedgerError::from(e)
        })?;

        let residual = rounding_residual(expense.total(), &shares);
        if !residual.is_zero() {
            match self.config.residual_policy() {
                ResidualPolicy::Reject => {
                    warn!(expense = %expense.id(), residual = %residual, "Expense rejected: rounding residual");
                    return Err(LedgerError::RoundingResidual {
                        expense_id: expense.id(),
                        residual,
                    });
                }
                ResidualPolicy::Accept => {
                    warn!(expense = %expense.id(), residual = %residual, "Percent shares do not sum to total");
                }
            }
        }

        let payer = registry
            .lookup(expense.payer())
            .ok_or(LedgerError::UnregisteredParticipant(expense.payer()))?;

        // Resolve every sheet and prove every addition fits before writing.
        let mut moves = Vec::with_capacity(shares.len());
        for (&id, &amount) in expense.participants().iter().zip(&shares) {
            if id == payer.id() {
                continue;
            }
            let participant = registry
                .lookup(id)
                .ok_or(LedgerError::UnregisteredParticipant(id))?;
            moves.push((participant, amount));
        }

        let payer_entries: Vec<(ParticipantId, Money)> = moves
            .iter()
            .map(|(participant, amount)| (participant.id(), -*amount))
            .collect();
        let overflowing = if payer.can_absorb(&payer_entries) {
            moves
                .iter()
                .find(|(participant, amount)| !participant.can_absorb(&[(payer.id(), *amount)]))
                .map(|(participant, _)| participant.id())
        } else {
            Some(payer.id())
        };
        if let Some(participant) = overflowing {
            warn!(expense = %expense.id(), participant = %participant, "Expense rejected: balance overflow");
            return Err(LedgerError::BalanceOverflow {
                expense_id: expense.id(),
                participant,
            });
        }

        for (participant, amount) in &moves {
            payer.add_to_expense_sheet(participant.id(), -*amount);
            participant.add_to_expense_sheet(payer.id(), *amount);
            debug!(expense = %expense.id(), from = %participant.id(), to = %payer.id(), amount = %amount, "Share applied");
        }
        let applied: Vec<(ParticipantId, Money)> = expense
            .participants()
            .iter()
            .copied()
            .zip(shares.iter().copied())
            .collect();

        info!(
            expense = %expense.id(),
            payer = %payer.id(),
            participants = expense.participants().len(),
            total = %expense.total(),
            kind = %expense.kind(),
            description = expense.description().unwrap_or(""),
            "Expense applied"
        );

        Ok(AppliedExpense {
            expense_id: expense.id(),
            payer: payer.id(),
            shares: applied,
            residual,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn balance(&self, id: ParticipantId) -> LedgerResult<Money> {
        self.read_registry()
            .lookup(id)
            .map(|participant| participant.total_balance())
            .ok_or(LedgerError::UnregisteredParticipant(id))
    }

    /// Every participant's balance, in registration order, from one
    /// consistent snapshot.
    pub fn balances(&self) -> Vec<ParticipantBalance> {
        self.read_registry()
            .iter()
            .map(|participant| ParticipantBalance {
                id: participant.id(),
                name: participant.name().to_string(),
                balance: participant.total_balance(),
            })
            .collect()
    }

    /// Non-zero amounts `id` owes each counterparty (negative: is owed).
    pub fn counterparty_balances(&self, id: ParticipantId) -> LedgerResult<Vec<(ParticipantId, Money)>> {
        self.read_registry()
            .lookup(id)
            .map(|participant| participant.counterparty_balances())
            .ok_or(LedgerError::UnregisteredParticipant(id))
    }

    /// Net amount `debtor` owes `creditor`.
    pub fn balance_between(&self, debtor: ParticipantId, creditor: ParticipantId) -> LedgerResult<Money> {
        let registry = self.read_registry();
        if let Some(unknown) = registry.first_unregistered([debtor, creditor]) {
            return Err(LedgerError::UnregisteredParticipant(unknown));
        }
        registry
            .lookup(debtor)
            .map(|participant| participant.balance_with(creditor))
            .ok_or(LedgerError::UnregisteredParticipant(debtor))
    }

    /// One line per pair with an outstanding debt, debtors in registration
    /// order and creditors by id.
    pub fn statements(&self) -> Vec<Statement> {
        let registry = self.read_registry();
        let mut statements = Vec::new();

        for debtor in registry.iter() {
            for (creditor_id, amount) in debtor.counterparty_balances() {
                if !amount.is_positive() {
                    continue;
                }
                if let Some(creditor) = registry.lookup(creditor_id) {
                    statements.push(Statement {
                        debtor: debtor.handle(),
                        creditor: creditor.handle(),
                        amount,
                    });
                }
            }
        }

        statements
    }

    /// Greedy settlement of the current balances.
    ///
    /// The snapshot is taken under the read lock; the computation runs
    /// after it is released.
    pub fn settle(&self) -> Vec<Transfer> {
        let snapshot: Vec<(ParticipantId, Money)> = self
            .read_registry()
            .iter()
            .map(|participant| (participant.id(), participant.total_balance()))
            .collect();

        let transfers = settlement::settle(&snapshot);
        info!(
            participants = snapshot.len(),
            transfers = transfers.len(),
            "Settlement computed"
        );
        transfers
    }

    // Registry updates are single inserts and apply_expense only writes
    // after every overflow check has passed, so a poisoned lock still
    // guards a consistent registry.
    fn read_registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
