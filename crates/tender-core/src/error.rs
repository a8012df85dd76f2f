//! # Error Types
//!
//! Domain-specific error types for tender-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tender-core errors (this file)                                        │
//! │  ├── AmountError        - A decimal amount could not be parsed         │
//! │  ├── DenominationError  - A denomination table is unusable             │
//! │  └── ValidationError    - Request-level input failures                 │
//! │                                                                         │
//! │  tender-db errors (separate crate)                                     │
//! │  └── DbError            - Database operation failures                  │
//! │                                                                         │
//! │  HTTP errors (in apps/api)                                             │
//! │  └── ApiError           - What clients see (serialized)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Per-line failures ("Invalid amounts", "Insufficient payment", ...) are
//! NOT errors. They are [`crate::LineOutcome`] values and always become one
//! output line each.

use thiserror::Error;

// =============================================================================
// Amount Error
// =============================================================================

/// Why a decimal string could not become a count of minor units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing left after trimming.
    #[error("amount is empty")]
    Empty,

    /// Not a plain decimal numeral.
    #[error("'{input}' is not a decimal amount")]
    Malformed { input: String },

    /// A well-formed but negative amount.
    #[error("'{input}' is negative")]
    Negative { input: String },

    /// Too large to count in minor units.
    #[error("'{input}' is too large")]
    Overflow { input: String },
}

// =============================================================================
// Denomination Error
// =============================================================================

/// Structural problems with a denomination table.
///
/// ## When This Occurs
/// - A custom table loaded from configuration is out of order
/// - The indivisible unit (value 1) is missing, so some amounts
///   could never be paid out exactly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenominationError {
    #[error("denomination table is empty")]
    Empty,

    #[error("denomination at position {index} has zero value")]
    ZeroValue { index: usize },

    #[error("denomination at position {index} is not smaller than the one before it")]
    NotDescending { index: usize },

    #[error("denomination table has no unit (value 1) entry")]
    MissingUnit,

    #[error("denomination at position {index} has a blank label")]
    BlankLabel { index: usize },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request parameters don't meet requirements.
/// Used for early validation before any line is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Payload exceeds the accepted size.
    #[error("{field} must be at most {max} bytes")]
    TooLarge { field: String, max: usize },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_error_messages() {
        let err = AmountError::Malformed {
            input: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "'bad' is not a decimal amount");
        assert_eq!(AmountError::Empty.to_string(), "amount is empty");
    }

    #[test]
    fn test_denomination_error_messages() {
        let err = DenominationError::NotDescending { index: 2 };
        assert_eq!(
            err.to_string(),
            "denomination at position 2 is not smaller than the one before it"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "random_divisor".to_string(),
            min: 0,
            max: 10,
        };
        assert_eq!(err.to_string(), "random_divisor must be between 0 and 10");
    }
}
