//! # divvy-core: Pure Business Logic for divvy
//!
//! This crate is the **heart** of divvy. It contains the money type, the
//! three split calculators and the settlement engine as pure functions with
//! zero I/O and no shared state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        divvy Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                divvy-ledger (service layer)                     │   │
//! │  │  register_participant, create_expense, apply_expense, settle    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ divvy-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   split   │  │ settlement│  │ validation│  │   │
//! │  │   │   Money   │  │ Equal     │  │  greedy   │  │   rules   │  │   │
//! │  │   │ Percentage│  │ Exact     │  │  pairing  │  │  checks   │  │   │
//! │  │   │           │  │ Percent   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ids, `Percentage`, `SplitKind`
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`expense`] - The immutable expense record
//! - [`split`] - Equal / Exact / Percent calculators
//! - [`settlement`] - Greedy settlement engine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use divvy_core::money::Money;
//! use divvy_core::split::equal_split;
//!
//! let shares = equal_split(Money::from_major(2000), 4);
//! assert!(shares.iter().all(|s| *s == Money::from_major(500)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod expense;
pub mod money;
pub mod settlement;
pub mod split;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use expense::Expense;
pub use money::Money;
pub use settlement::{settle, Transfer};
pub use split::SplitPolicy;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minor units (cents) per major unit.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// 100% expressed in basis points.
pub const FULL_PERCENT_BPS: u32 = 10_000;

/// Default cap on participants in a single expense.
pub const DEFAULT_MAX_PARTICIPANTS: usize = 100;

/// Default cap on participant name length, in characters.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;
