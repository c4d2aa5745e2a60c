//! # Error Types
//!
//! Domain-specific error types for divvy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  divvy-core errors (this file)                                         │
//! │  ├── CoreError        - Split distribution failures                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  divvy-ledger errors (separate crate)                                  │
//! │  └── LedgerError      - Registry, residual policy, configuration       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is raised before any balance is touched, so returning
//! one always means "nothing changed".

use thiserror::Error;

use crate::types::SplitKind;

// =============================================================================
// Core Error
// =============================================================================

/// Split calculation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The number of exact amounts or percentages does not match the
    /// number of participants.
    #[error("{policy} split has {actual} values for {expected} participants")]
    DistributionCountMismatch {
        policy: SplitKind,
        expected: usize,
        actual: usize,
    },

    /// Exact amounts do not sum to the expense total, or percentages do
    /// not sum to 100%.
    ///
    /// ## User Workflow
    /// ```text
    /// Expense: 1400.00, exact shares {500.00, 800.00}
    ///      │
    ///      ▼
    /// sum = 1300.00 ≠ 1400.00
    ///      │
    ///      ▼
    /// DistributionSumMismatch { expected: "1400.00", actual: "1300.00" }
    ///      │
    ///      ▼
    /// Expense rejected, balances untouched
    /// ```
    #[error("{policy} split values sum to {actual}, expected {expected}")]
    DistributionSumMismatch {
        policy: SplitKind,
        expected: String,
        actual: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., a participant listed twice on one expense).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DistributionSumMismatch {
            policy: SplitKind::Exact,
            expected: "1400.00".to_string(),
            actual: "1300.00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "exact split values sum to 1300.00, expected 1400.00"
        );

        let err = CoreError::DistributionCountMismatch {
            policy: SplitKind::Percent,
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "percent split has 3 values for 4 participants");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "total".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
