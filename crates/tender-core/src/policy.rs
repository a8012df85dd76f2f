//! # Change Policy
//!
//! Decides when a line gets the randomized denomination mix instead of the
//! minimal one.
//!
//! ## Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  randomize  ⇔  divisor > 0                                             │
//! │             ∧  owed > 0                                                 │
//! │             ∧  owed and paid are whole major units ($N.00)              │
//! │             ∧  owed dollars % divisor == 0                              │
//! │             ∧  paid dollars % divisor == 0                              │
//! │                                                                         │
//! │  Applied by the line processor only when change ≥ $1.00               │
//! │  (sub-dollar change always gets the minimal allocation)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both amounts are checked: "3.00,4.37" is never randomized.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::MINOR_UNITS_PER_MAJOR;

/// Divisor used when none is configured.
pub const DEFAULT_RANDOM_DIVISOR: i64 = 3;

/// Smallest change (in minor units) that may be randomized.
pub const RANDOMIZE_MIN_CHANGE: i64 = MINOR_UNITS_PER_MAJOR;

/// Whether the randomized allocator applies to this `(owed, paid)` pair.
///
/// ## Example
/// ```rust
/// use tender_core::policy::should_randomize;
///
/// assert!(should_randomize(300, 600, 3));
/// assert!(!should_randomize(300, 500, 3));  // $5 is not a multiple of 3
/// assert!(!should_randomize(301, 600, 3));  // not a whole dollar
/// assert!(!should_randomize(300, 600, 0));  // disabled
/// ```
pub fn should_randomize(owed_minor_units: i64, paid_minor_units: i64, divisor: i64) -> bool {
    if divisor <= 0 || owed_minor_units <= 0 {
        return false;
    }

    let owed = Money::from_cents(owed_minor_units);
    let paid = Money::from_cents(paid_minor_units);

    owed.is_whole_major()
        && paid.is_whole_major()
        && owed.major_units() % divisor == 0
        && paid.major_units() % divisor == 0
}

// =============================================================================
// Change Rules
// =============================================================================

/// Policy parameters for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRules {
    /// Whole-dollar amounts divisible by this get randomized change.
    /// `0` (or any non-positive value) disables randomization.
    pub random_divisor: i64,
}

impl ChangeRules {
    /// Rules with the given divisor.
    pub const fn with_divisor(random_divisor: i64) -> Self {
        ChangeRules { random_divisor }
    }

    /// Rules that never randomize.
    pub const fn disabled() -> Self {
        ChangeRules { random_divisor: 0 }
    }

    /// Whether randomization is switched on at all.
    pub const fn is_enabled(&self) -> bool {
        self.random_divisor > 0
    }

    /// Full policy for one line, including the sub-dollar suppression.
    pub fn allows_random(&self, owed: Money, paid: Money) -> bool {
        let change = paid.cents() - owed.cents();
        change >= RANDOMIZE_MIN_CHANGE
            && should_randomize(owed.cents(), paid.cents(), self.random_divisor)
    }
}

impl Default for ChangeRules {
    fn default() -> Self {
        ChangeRules::with_divisor(DEFAULT_RANDOM_DIVISOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_divisor() {
        assert!(!should_randomize(300, 600, 0));
        assert!(!should_randomize(300, 600, -3));
    }

    #[test]
    fn test_zero_owed_never_randomizes() {
        assert!(!should_randomize(0, 600, 3));
    }

    #[test]
    fn test_requires_whole_dollars() {
        assert!(!should_randomize(300, 601, 3));
        assert!(!should_randomize(350, 600, 3));
    }

    #[test]
    fn test_requires_both_divisible() {
        assert!(should_randomize(300, 900, 3));
        assert!(!should_randomize(300, 1000, 3));
        assert!(!should_randomize(500, 900, 3));
        assert!(should_randomize(500, 1000, 5));
        assert!(should_randomize(200, 300, 1));
    }

    #[test]
    fn test_rules_suppress_sub_dollar_change() {
        let rules = ChangeRules::with_divisor(1);
        assert!(rules.allows_random(Money::from_cents(100), Money::from_cents(200)));
        // Same amounts → no change at all.
        assert!(!rules.allows_random(Money::from_cents(100), Money::from_cents(100)));
        assert!(!rules.allows_random(Money::from_cents(200), Money::from_cents(100)));
    }

    #[test]
    fn test_default_rules() {
        assert_eq!(ChangeRules::default().random_divisor, DEFAULT_RANDOM_DIVISOR);
        assert!(ChangeRules::default().is_enabled());
        assert!(!ChangeRules::disabled().is_enabled());
    }
}
