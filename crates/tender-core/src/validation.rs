//! # Validation Module
//!
//! Request-level checks that run before any line is processed.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: HTTP extractor (apps/api)                                    │
//! │  └── Query string / body shape                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Batch size limit                                                  │
//! │  ├── Random divisor range                                              │
//! │  └── History page size                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Line processor                                               │
//! │  └── Per-line problems become output lines, never errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest accepted random divisor.
pub const MAX_RANDOM_DIVISOR: i64 = 1_000_000;

/// Validates a random divisor. `0` disables randomization.
///
/// ## Example
/// ```rust
/// use tender_core::validation::validate_random_divisor;
///
/// assert_eq!(validate_random_divisor(3), Ok(3));
/// assert!(validate_random_divisor(-1).is_err());
/// ```
pub fn validate_random_divisor(divisor: i64) -> ValidationResult<i64> {
    if !(0..=MAX_RANDOM_DIVISOR).contains(&divisor) {
        return Err(ValidationError::OutOfRange {
            field: "random_divisor".to_string(),
            min: 0,
            max: MAX_RANDOM_DIVISOR,
        });
    }
    Ok(divisor)
}

/// Rejects batches larger than `max_bytes`.
pub fn validate_input_size(len: usize, max_bytes: usize) -> ValidationResult<()> {
    if len > max_bytes {
        return Err(ValidationError::TooLarge {
            field: "input".to_string(),
            max: max_bytes,
        });
    }
    Ok(())
}

/// Page size for history listings.
///
/// Missing means [`DEFAULT_HISTORY_LIMIT`]; anything else is clamped into
/// `1..=MAX_HISTORY_LIMIT`.
pub fn normalize_history_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_divisor_range() {
        assert_eq!(validate_random_divisor(0), Ok(0));
        assert_eq!(validate_random_divisor(MAX_RANDOM_DIVISOR), Ok(MAX_RANDOM_DIVISOR));
        assert!(matches!(
            validate_random_divisor(MAX_RANDOM_DIVISOR + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_random_divisor(-3).is_err());
    }

    #[test]
    fn test_input_size() {
        assert!(validate_input_size(10, 10).is_ok());
        assert_eq!(
            validate_input_size(11, 10),
            Err(ValidationError::TooLarge {
                field: "input".to_string(),
                max: 10
            })
        );
    }

    #[test]
    fn test_history_limit() {
        assert_eq!(normalize_history_limit(None), DEFAULT_HISTORY_LIMIT);
        assert_eq!(normalize_history_limit(Some(10)), 10);
        assert_eq!(normalize_history_limit(Some(500)), MAX_HISTORY_LIMIT);
        assert_eq!(normalize_history_limit(Some(0)), 1);
        assert_eq!(normalize_history_limit(Some(-7)), 1);
    }
}
