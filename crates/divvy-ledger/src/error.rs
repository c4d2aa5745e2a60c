//! # Ledger Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ledger Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────┐  ┌─────────────────────┐ │
//! │  │  Expense rejection  │  │  Split (core)   │  │   Configuration     │ │
//! │  │                     │  │                 │  │                     │ │
//! │  │  Unregistered       │  │  CountMismatch  │  │  InvalidConfig      │ │
//! │  │  Participant        │  │  SumMismatch    │  │  ConfigLoadFailed   │ │
//! │  │  RoundingResidual   │  │  Validation     │  │  ConfigSaveFailed   │ │
//! │  │  BalanceOverflow    │  │                 │  │                     │ │
//! │  └─────────────────────┘  └─────────────────┘  └─────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An expense-rejection or split error always means no balance changed.

use divvy_core::{CoreError, ExpenseId, Money, ParticipantId, ValidationError};
use thiserror::Error;

/// Result type alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    // =========================================================================
    // Expense Rejection
    // =========================================================================
    /// The expense names a payer or participant this ledger does not know.
    #[error("Participant {0} is not registered with this ledger")]
    UnregisteredParticipant(ParticipantId),

    /// Percent shares do not add back up to the total and the ledger is
    /// configured to reject such expenses.
    #[error("Expense {expense_id} leaves a rounding residual of {residual}")]
    RoundingResidual { expense_id: ExpenseId, residual: Money },

    /// Applying the expense would push a balance past the representable
    /// range of cents.
    #[error("Expense {expense_id} would overflow the balance of participant {participant}")]
    BalanceOverflow {
        expense_id: ExpenseId,
        participant: ParticipantId,
    },

    /// Split calculation or input validation failed.
    #[error(transparent)]
    Split(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid ledger configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::Split(CoreError::Validation(err))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for LedgerError {
    fn from(err: toml::ser::Error) -> Self {
        LedgerError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl LedgerError {
    /// Returns true if this error rejected an expense (and therefore left
    /// every balance untouched).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::UnregisteredParticipant(_)
                | LedgerError::RoundingResidual { .. }
                | LedgerError::BalanceOverflow { .. }
                | LedgerError::Split(_)
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidConfig(_)
                | LedgerError::ConfigLoadFailed(_)
                | LedgerError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divvy_core::SplitKind;

    #[test]
    fn test_categories() {
        assert!(LedgerError::UnregisteredParticipant(ParticipantId::new(9)).is_rejection());
        assert!(LedgerError::BalanceOverflow {
            expense_id: ExpenseId::new(1),
            participant: ParticipantId::new(2),
        }
        .is_rejection());
        assert!(LedgerError::InvalidConfig("bad".into()).is_config_error());
        assert!(!LedgerError::InvalidConfig("bad".into()).is_rejection());
    }

    #[test]
    fn test_split_error_is_transparent() {
        let err: LedgerError = CoreError::DistributionCountMismatch {
            policy: SplitKind::Exact,
            expected: 2,
            actual: 3,
        }
        .into();
        assert_eq!(err.to_string(), "exact split has 3 values for 2 participants");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::UnregisteredParticipant(ParticipantId::new(5));
        assert_eq!(err.to_string(), "Participant P5 is not registered with this ledger");
    }
}
