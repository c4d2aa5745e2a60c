//! # divvy-ledger: Thread-Safe Expense Ledger
//!
//! Wraps the pure calculators of `divvy-core` in a shared, lock-protected
//! service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        divvy-ledger Crate                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Ledger                                   │   │
//! │  │   register_participant · create_expense · apply_expense         │   │
//! │  │   balance · balances · statements · settle                      │   │
//! │  └───────────┬──────────────────────┬──────────────────┬───────────┘   │
//! │              │                      │                  │                │
//! │  ┌───────────▼─────────┐  ┌─────────▼────────┐  ┌──────▼───────────┐   │
//! │  │ Registry (RwLock)   │  │  IdGenerator     │  │  LedgerConfig    │   │
//! │  │  Participant        │  │  AtomicU64 x 2   │  │  limits          │   │
//! │  │   Mutex<Sheet>      │  │  per ledger      │  │  residual policy │   │
//! │  └─────────────────────┘  └──────────────────┘  └──────────────────┘   │
//! │                                                                         │
//! │                    divvy-core (split, settlement)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use divvy_core::{Money, SplitPolicy};
//! use divvy_ledger::Ledger;
//!
//! let ledger = Ledger::default();
//! let jitu = ledger.register_participant("Jitu").unwrap();
//! let navin = ledger.register_participant("Navin").unwrap();
//!
//! let expense = ledger
//!     .create_expense(jitu.id, vec![jitu.id, navin.id], Money::from_major(100), SplitPolicy::Equal)
//!     .unwrap();
//! ledger.apply_expense(&expense).unwrap();
//!
//! assert_eq!(ledger.balance(navin.id).unwrap(), Money::from_major(50));
//! assert_eq!(ledger.settle().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod ledger;
pub mod participant;
pub mod registry;

pub use config::{LedgerConfig, ResidualPolicy};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{AppliedExpense, Ledger};
pub use participant::{Participant, ParticipantBalance, ParticipantHandle, Statement};
