//! # Validation Module
//!
//! Input validation for participants and expenses.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Expense construction (THIS MODULE)                           │
//! │  ├── total > 0, participants non-empty and unique                      │
//! │  └── participant count within configured limit                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Split calculators (split.rs)                                 │
//! │  ├── distribution count matches participants                           │
//! │  └── distribution sums to total / 100%                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger service                                               │
//! │  └── every id is registered                                            │
//! │                                                                         │
//! │  All three layers run before the first balance mutation.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ParticipantId;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a participant display name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - Must be at most `max_len` characters
///
/// ## Example
/// ```rust
/// use divvy_core::validation::validate_participant_name;
///
/// assert!(validate_participant_name("Jitu", 100).is_ok());
/// assert!(validate_participant_name("  ", 100).is_err());
/// ```
pub fn validate_participant_name(name: &str, max_len: usize) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > max_len {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: max_len,
        });
    }

    Ok(())
}

// =============================================================================
// Expense Validators
// =============================================================================

/// Validates an expense total. Zero and negative totals are rejected.
pub fn validate_expense_total(total: Money) -> ValidationResult<()> {
    if !total.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "total".to_string(),
        });
    }

    Ok(())
}

/// Validates the participant list of an expense.
///
/// ## Rules
/// - At least one participant
/// - At most `max` participants
/// - No participant listed twice
pub fn validate_expense_participants(
    participants: &[ParticipantId],
    max: usize,
) -> ValidationResult<()> {
    if participants.is_empty() {
        return Err(ValidationError::Required {
            field: "participants".to_string(),
        });
    }

    if participants.len() > max {
        return Err(ValidationError::OutOfRange {
            field: "participants".to_string(),
            min: 1,
            max: max as i64,
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for id in participants {
        if !seen.insert(*id) {
            return Err(ValidationError::Duplicate {
                field: "participant".to_string(),
                value: id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ParticipantId> {
        raw.iter().copied().map(ParticipantId::new).collect()
    }

    #[test]
    fn test_validate_participant_name() {
        assert!(validate_participant_name("Navin", 100).is_ok());
        assert!(validate_participant_name("", 100).is_err());
        assert!(validate_participant_name("   ", 100).is_err());
        assert!(validate_participant_name(&"A".repeat(101), 100).is_err());
        assert!(validate_participant_name(&"A".repeat(100), 100).is_ok());
    }

    #[test]
    fn test_validate_expense_total() {
        assert!(validate_expense_total(Money::from_cents(1)).is_ok());
        assert!(validate_expense_total(Money::zero()).is_err());
        assert!(validate_expense_total(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_expense_participants() {
        assert!(validate_expense_participants(&ids(&[1, 2, 3]), 100).is_ok());
        assert!(validate_expense_participants(&[], 100).is_err());
        assert!(validate_expense_participants(&ids(&[1, 2, 3]), 2).is_err());

        let err = validate_expense_participants(&ids(&[1, 2, 1]), 100).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Duplicate {
                field: "participant".to_string(),
                value: "P1".to_string(),
            }
        );
    }
}
