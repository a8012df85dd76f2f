//! # Money Module
//!
//! Provides the `Money` type and the decimal amount parser.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    2.675 * 100 = 267.49999999999997 → rounds to 267  ❌ WRONG!          │
//! │                                                                         │
//! │  OUR SOLUTION: Parse the decimal text straight into integer cents       │
//! │    "2.675" → whole 2, fraction "675" → 267 + round-up → 268 cents       │
//! │    Every step after parsing is integer arithmetic                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tender_core::money::Money;
//!
//! let owed = Money::parse("2.12").unwrap();
//! let paid = Money::parse("3.00").unwrap();
//!
//! assert_eq!((paid - owed).cents(), 88);
//! assert!(paid.is_whole_major());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::error::AmountError;
use crate::MINOR_UNITS_PER_MAJOR;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: `paid - owed` may be negative before classification
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No float constructor**: amounts enter only through [`Money::parse`]
///   or [`Money::from_cents`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tender_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use tender_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_UNITS_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_UNITS_PER_MAJOR + minor)
        }
    }

    /// Parses a decimal amount such as `"2.12"` or `" 3 "`.
    ///
    /// See [`parse_to_minor_units`] for the accepted grammar.
    pub fn parse(text: &str) -> Result<Self, AmountError> {
        parse_to_minor_units(text).map(Money)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use tender_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major_units(), 10);
    /// assert_eq!(Money::from_cents(-550).major_units(), -5);
    /// ```
    #[inline]
    pub const fn major_units(&self) -> i64 {
        self.0 / MINOR_UNITS_PER_MAJOR
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_UNITS_PER_MAJOR).abs()
    }

    /// True when the amount has no fractional major-unit remainder
    /// (`$5.00` yes, `$5.01` no).
    #[inline]
    pub const fn is_whole_major(&self) -> bool {
        self.0 % MINOR_UNITS_PER_MAJOR == 0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtraction that reports overflow instead of wrapping.
    ///
    /// Parsed amounts are non-negative, so `paid - owed` between two of them
    /// cannot overflow; this exists for callers that build Money by hand.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Amount Parser
// =============================================================================

/// Converts a decimal string into an exact count of minor units.
///
/// ## Accepted Input
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  "3"      → 300        "3."    → 300        ".5"     → 50              │
/// │  "2.12"   → 212        "+2.12" → 212        "  2.12 " → 212            │
/// │  "2.125"  → 213 (half-up on the exact decimal digits)                  │
/// │  "2.1249" → 212                                                        │
/// │                                                                         │
/// │  "-0"  "-0.00" → 0                                                     │
/// │                                                                         │
/// │  ""  "bad"  "1.2.3"  "1e3"  "NaN"  "inf"  "."   → Malformed / Empty    │
/// │  "-1"  "-0.01"                                 → Negative              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Rounding only looks at the third fractional digit, which is exact
/// half-up for any decimal input. The same text always yields the same
/// value.
///
/// Exponent forms such as `"1e2"` are malformed: amounts come from a
/// register keypad or typed batches, where a stray `e` is a keying error
/// and not scientific notation.
pub fn parse_to_minor_units(text: &str) -> Result<i64, AmountError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    if let Some(rest) = trimmed.strip_prefix('-') {
        // Only a well-formed numeral counts as "negative"; "-abc" is malformed.
        // Negative zero is still zero.
        return match parse_unsigned(rest, trimmed)? {
            0 => Ok(0),
            _ => Err(AmountError::Negative {
                input: trimmed.to_string(),
            }),
        };
    }

    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    parse_unsigned(unsigned, trimmed)
}

fn parse_unsigned(digits: &str, original: &str) -> Result<i64, AmountError> {
    let malformed = || AmountError::Malformed {
        input: original.to_string(),
    };
    let overflow = || AmountError::Overflow {
        input: original.to_string(),
    };

    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(malformed());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let whole_value = whole
        .bytes()
        .try_fold(0i64, |acc, b| {
            acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
        })
        .ok_or_else(overflow)?;

    let mut fraction_digits = fraction.bytes().map(|b| i64::from(b - b'0'));
    let tenths = fraction_digits.next().unwrap_or(0);
    let hundredths = fraction_digits.next().unwrap_or(0);
    let round_up = i64::from(fraction_digits.next().unwrap_or(0) >= 5);

    whole_value
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .and_then(|cents| cents.checked_add(tenths * 10 + hundredths + round_up))
        .ok_or_else(overflow)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging; there is no locale-aware formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.major_units().abs(),
            self.minor_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major_units(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(b), None);
    }

    #[test]
    fn test_whole_major() {
        assert!(Money::from_cents(300).is_whole_major());
        assert!(Money::zero().is_whole_major());
        assert!(!Money::from_cents(301).is_whole_major());
    }

    #[test]
    fn test_parse_plain_amounts() {
        assert_eq!(parse_to_minor_units("2.12"), Ok(212));
        assert_eq!(parse_to_minor_units("3.00"), Ok(300));
        assert_eq!(parse_to_minor_units("3"), Ok(300));
        assert_eq!(parse_to_minor_units("3."), Ok(300));
        assert_eq!(parse_to_minor_units(".5"), Ok(50));
        assert_eq!(parse_to_minor_units("0.01"), Ok(1));
        assert_eq!(parse_to_minor_units("+4.5"), Ok(450));
        assert_eq!(parse_to_minor_units("007.10"), Ok(710));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_to_minor_units("  2.12\t"), Ok(212));
    }

    #[test]
    fn test_parse_rounds_half_up() {
        assert_eq!(parse_to_minor_units("2.125"), Ok(213));
        assert_eq!(parse_to_minor_units("2.1249"), Ok(212));
        assert_eq!(parse_to_minor_units("2.675"), Ok(268));
        assert_eq!(parse_to_minor_units("0.995"), Ok(100));
        assert_eq!(parse_to_minor_units("0.004"), Ok(0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_to_minor_units(""), Err(AmountError::Empty));
        assert_eq!(parse_to_minor_units("   "), Err(AmountError::Empty));

        for input in ["bad", "1.2.3", "1e3", "NaN", "inf", ".", "+", "1,5", "$3", "3 00"] {
            assert!(
                matches!(parse_to_minor_units(input), Err(AmountError::Malformed { .. })),
                "{input} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(
            parse_to_minor_units("-1"),
            Err(AmountError::Negative { .. })
        ));
        assert!(matches!(
            parse_to_minor_units("-0.01"),
            Err(AmountError::Negative { .. })
        ));
        // rounds to zero before the sign is applied
        assert_eq!(parse_to_minor_units("-0.004"), Ok(0));
        assert!(matches!(
            parse_to_minor_units("-abc"),
            Err(AmountError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_negative_zero_is_zero() {
        assert_eq!(parse_to_minor_units("-0"), Ok(0));
        assert_eq!(parse_to_minor_units("-0.00"), Ok(0));
        assert_eq!(parse_to_minor_units(" -.0 "), Ok(0));
        assert!(matches!(parse_to_minor_units("-"), Err(AmountError::Malformed { .. })));
    }

    #[test]
    fn test_parse_rejects_exponent_notation() {
        for input in ["1e2", "1E2", "2.5e-1", "-1e0"] {
            assert!(
                matches!(parse_to_minor_units(input), Err(AmountError::Malformed { .. })),
                "{input} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            parse_to_minor_units("99999999999999999999"),
            Err(AmountError::Overflow { .. })
        ));
        assert!(matches!(
            parse_to_minor_units("92233720368547758.08"),
            Err(AmountError::Overflow { .. })
        ));
        assert_eq!(
            parse_to_minor_units("92233720368547758.07"),
            Ok(i64::MAX)
        );
    }

    #[test]
    fn test_money_parse_wraps_parser() {
        assert_eq!(Money::parse("1.50").map(|m| m.cents()), Ok(150));
        assert!(Money::parse("x").is_err());
    }

    proptest! {
        #[test]
        fn parse_recovers_cents(cents in 0i64..1_000_000_000i64) {
            let text = format!("{}.{:02}", cents / 100, cents % 100);
            prop_assert_eq!(parse_to_minor_units(&text), Ok(cents));
        }

        #[test]
        fn parse_is_deterministic(text in "[ +-]?[0-9]{0,6}(\\.[0-9]{0,4})?[ ]?") {
            prop_assert_eq!(parse_to_minor_units(&text), parse_to_minor_units(&text));
        }
    }
}
