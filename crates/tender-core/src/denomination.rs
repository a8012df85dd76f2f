//! # Denomination Tables
//!
//! The coins and bills change is paid out in. A table is configuration
//! data, not logic: the engine only assumes the invariants checked by
//! [`DenominationTable::new`].
//!
//! ## Table Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  index │ value │ singular │ plural                                      │
//! │  ──────┼───────┼──────────┼────────                                     │
//! │    0   │  100  │ dollar   │ dollars      strictly descending values    │
//! │    1   │   25  │ quarter  │ quarters                                    │
//! │    2   │   10  │ dime     │ dimes                                       │
//! │    3   │    5  │ nickel   │ nickels      ← absorbs the randomized bulk  │
//! │    4   │    1  │ penny    │ pennies      ← unit entry, always last      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables deserialize through the same validation, so a TOML file such as
//!
//! ```toml
//! [[denominations]]
//! value_minor_units = 100
//! label_singular = "dollar"
//! label_plural = "dollars"
//! ```
//!
//! can never produce an unsorted table.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::DenominationError;

/// Value of the denomination that absorbs the randomized bulk.
pub const ABSORBER_VALUE: u32 = 5;

/// Value of the indivisible base unit.
pub const UNIT_VALUE: u32 = 1;

// =============================================================================
// Denomination
// =============================================================================

/// A single coin or bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Denomination {
    /// Face value in minor units (cents).
    pub value_minor_units: u32,

    /// Label used for a count of exactly one ("penny").
    pub label_singular: String,

    /// Label used for every other count ("pennies").
    pub label_plural: String,
}

impl Denomination {
    /// Creates a denomination descriptor.
    pub fn new(
        value_minor_units: u32,
        label_singular: impl Into<String>,
        label_plural: impl Into<String>,
    ) -> Self {
        Denomination {
            value_minor_units,
            label_singular: label_singular.into(),
            label_plural: label_plural.into(),
        }
    }

    /// Face value as `u64`, the width allocation math runs in.
    #[inline]
    pub fn value(&self) -> u64 {
        u64::from(self.value_minor_units)
    }

    /// Picks the singular label for a count of one, plural otherwise.
    #[inline]
    pub fn label(&self, count: u64) -> &str {
        if count == 1 {
            &self.label_singular
        } else {
            &self.label_plural
        }
    }
}

// =============================================================================
// Denomination Table
// =============================================================================

/// A validated, immutable, descending table of denominations.
///
/// Construct with [`DenominationTable::new`] (or deserialize). Share it
/// read-only; nothing mutates a table after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Denomination>", into = "Vec<Denomination>")]
pub struct DenominationTable {
    denominations: Vec<Denomination>,
}

impl DenominationTable {
    /// Validates and wraps a list of denominations.
    ///
    /// ## Rules
    /// - At least one entry
    /// - No zero values, no blank labels
    /// - Values strictly descending
    /// - Last entry has value 1 (any amount stays representable)
    pub fn new(denominations: Vec<Denomination>) -> Result<Self, DenominationError> {
        if denominations.is_empty() {
            return Err(DenominationError::Empty);
        }

        for (index, denomination) in denominations.iter().enumerate() {
            if denomination.value_minor_units == 0 {
                return Err(DenominationError::ZeroValue { index });
            }
            if denomination.label_singular.trim().is_empty()
                || denomination.label_plural.trim().is_empty()
            {
                return Err(DenominationError::BlankLabel { index });
            }
        }

        if let Some(index) = denominations
            .windows(2)
            .position(|pair| pair[1].value_minor_units >= pair[0].value_minor_units)
        {
            return Err(DenominationError::NotDescending { index: index + 1 });
        }

        match denominations.last() {
            Some(last) if last.value_minor_units == UNIT_VALUE => {}
            _ => return Err(DenominationError::MissingUnit),
        }

        Ok(DenominationTable { denominations })
    }

    /// The US coin set plus the one-dollar bill.
    pub fn us() -> Self {
        DenominationTable {
            denominations: vec![
                Denomination::new(100, "dollar", "dollars"),
                Denomination::new(25, "quarter", "quarters"),
                Denomination::new(10, "dime", "dimes"),
                Denomination::new(5, "nickel", "nickels"),
                Denomination::new(1, "penny", "pennies"),
            ],
        }
    }

    /// Number of denominations.
    #[inline]
    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    /// Always false for a validated table; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    /// Denomination at `index`, largest first.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Denomination> {
        self.denominations.get(index)
    }

    /// Iterates largest to smallest.
    pub fn iter(&self) -> std::slice::Iter<'_, Denomination> {
        self.denominations.iter()
    }

    /// The underlying entries, largest first.
    pub fn as_slice(&self) -> &[Denomination] {
        &self.denominations
    }

    /// Index of the entry with the given face value.
    pub fn position_of_value(&self, value_minor_units: u32) -> Option<usize> {
        self.denominations
            .iter()
            .position(|d| d.value_minor_units == value_minor_units)
    }

    /// Whether the randomized allocator can settle every amount exactly
    /// with this table.
    ///
    /// The allocator hands the last multiple-of-5 remainder to the value-5
    /// entry and at most 4 units to the unit entry. That only balances when
    /// a value-5 entry exists and every other entry above 1 is a multiple
    /// of 5.
    pub fn supports_randomized(&self) -> bool {
        self.position_of_value(ABSORBER_VALUE).is_some()
            && self.denominations.iter().all(|d| {
                d.value_minor_units == UNIT_VALUE || d.value_minor_units % ABSORBER_VALUE == 0
            })
    }
}

impl Default for DenominationTable {
    fn default() -> Self {
        DenominationTable::us()
    }
}

impl TryFrom<Vec<Denomination>> for DenominationTable {
    type Error = DenominationError;

    fn try_from(denominations: Vec<Denomination>) -> Result<Self, Self::Error> {
        DenominationTable::new(denominations)
    }
}

impl From<DenominationTable> for Vec<Denomination> {
    fn from(table: DenominationTable) -> Self {
        table.denominations
    }
}

impl<'a> IntoIterator for &'a DenominationTable {
    type Item = &'a Denomination;
    type IntoIter = std::slice::Iter<'a, Denomination>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
