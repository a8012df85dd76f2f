//! # Change Allocation
//!
//! Turns an amount of change into a count per denomination.
//!
//! ## Two Allocators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MINIMAL (greedy)                                                      │
//! │  ────────────────                                                      │
//! │  For each denomination, largest first:                                 │
//! │      count = remaining / value;  remaining -= count × value            │
//! │  $1.67 → 1 dollar, 2 quarters, 1 dime, 1 nickel, 2 pennies             │
//! │                                                                         │
//! │  RANDOMIZED (seeded)                                                   │
//! │  ───────────────────                                                   │
//! │  pennies  = change % 5            (0..=4, never more)                  │
//! │  bulk     = change - pennies      (multiple of 5)                      │
//! │  For each denomination above 1 except the nickel, largest first:       │
//! │      max   = remaining / value                                         │
//! │      count = ⌊max × f⌋,  f ∈ [0.40, 1.00] drawn from the seed          │
//! │  nickels  = whatever is left of the bulk / 5                           │
//! │                                                                         │
//! │  Same seed ⇒ same generator stream ⇒ same allocation, every time.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both allocators satisfy `Σ count[i] × value[i] == change` exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::denomination::{DenominationTable, ABSORBER_VALUE, UNIT_VALUE};

/// `owed * SEED_MULTIPLIER + paid` in 128 bits: `owed` fills the high half
/// and `paid` the low half, so no two `(owed, paid)` pairs share a seed.
pub const SEED_MULTIPLIER: u128 = 1 << 64;

/// Lower bound of the scaling fraction, in permille.
pub const MIN_SCALE_PERMILLE: u64 = 400;

/// Upper bound of the scaling fraction, in permille.
pub const MAX_SCALE_PERMILLE: u64 = 1000;

// =============================================================================
// Allocation
// =============================================================================

/// Count of each denomination, indexed like the table it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Allocation {
    counts: Vec<u64>,
}

impl Allocation {
    /// An allocation with every count at zero.
    pub fn zeroed(len: usize) -> Self {
        Allocation {
            counts: vec![0; len],
        }
    }

    /// Wraps raw counts.
    pub fn from_counts(counts: Vec<u64>) -> Self {
        Allocation { counts }
    }

    /// Counts, largest denomination first.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count at `index`, zero when out of range.
    pub fn count(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Total number of physical coins and bills.
    pub fn piece_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// True when no denomination has a positive count.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Value of the allocation in minor units, against `table`.
    pub fn total_minor_units(&self, table: &DenominationTable) -> u128 {
        self.counts
            .iter()
            .zip(table.iter())
            .map(|(&count, d)| u128::from(count) * u128::from(d.value()))
            .sum()
    }
}

// =============================================================================
// Minimal Allocator
// =============================================================================

/// Greedy largest-first allocation.
///
/// Minimal in piece count for canonical currency tables. Always exact
/// because every valid table ends with a unit entry.
///
/// ## Example
/// ```rust
/// use tender_core::{minimal_allocation, DenominationTable};
///
/// let table = DenominationTable::us();
/// let allocation = minimal_allocation(88, &table);
/// assert_eq!(allocation.counts(), &[0, 3, 1, 0, 3]);
/// ```
pub fn minimal_allocation(change_minor_units: u64, table: &DenominationTable) -> Allocation {
    let mut allocation = Allocation::zeroed(table.len());
    let mut remaining = change_minor_units;

    for (slot, denomination) in allocation.counts.iter_mut().zip(table.iter()) {
        let value = denomination.value();
        *slot = remaining / value;
        remaining -= *slot * value;
    }

    debug_assert_eq!(remaining, 0, "table without a unit entry");
    allocation
}

// =============================================================================
// Randomized Allocator
// =============================================================================

/// Seed for a transaction line: `owed * SEED_MULTIPLIER + paid`.
///
/// Never overflows, and distinct pairs always give distinct seeds.
pub fn seed_for(owed_minor_units: u64, paid_minor_units: u64) -> u128 {
    u128::from(owed_minor_units) * SEED_MULTIPLIER + u128::from(paid_minor_units)
}

/// Generator for `seed`: its 16 little-endian bytes, zero-padded to the
/// 32-byte ChaCha key.
fn rng_for(seed: u128) -> StdRng {
    let mut key = <StdRng as SeedableRng>::Seed::default();
    key[..16].copy_from_slice(&seed.to_le_bytes());
    StdRng::from_seed(key)
}

/// Varied but reproducible allocation driven by `seed`.
///
/// A fresh generator is built from `seed` on every call, so the result
/// depends on nothing but the arguments.
///
/// Tables that fail [`DenominationTable::supports_randomized`] get the
/// minimal allocation instead.
pub fn randomized_allocation(
    change_minor_units: u64,
    table: &DenominationTable,
    seed: u128,
) -> Allocation {
    let (Some(absorber), Some(unit)) = (
        table.position_of_value(ABSORBER_VALUE),
        table.position_of_value(UNIT_VALUE),
    ) else {
        return minimal_allocation(change_minor_units, table);
    };
    if !table.supports_randomized() {
        return minimal_allocation(change_minor_units, table);
    }

    let mut rng = rng_for(seed);
    let mut allocation = Allocation::zeroed(table.len());

    let unit_remainder = change_minor_units % u64::from(ABSORBER_VALUE);
    let mut remaining = change_minor_units - unit_remainder;

    for (index, denomination) in table.iter().enumerate() {
        if index == absorber || index == unit {
            continue;
        }
        let value = denomination.value();
        let max_count = remaining / value;
        if max_count == 0 {
            continue;
        }

        let permille = rng.gen_range(MIN_SCALE_PERMILLE..=MAX_SCALE_PERMILLE);
        let scaled = u128::from(max_count) * u128::from(permille) / u128::from(MAX_SCALE_PERMILLE);
        // scaled <= max_count, so it fits back into u64
        let count = u64::try_from(scaled).unwrap_or(max_count);

        allocation.counts[index] = count;
        remaining -= count * value;
    }

    let absorber_value = u64::from(ABSORBER_VALUE);
    debug_assert_eq!(remaining % absorber_value, 0);
    allocation.counts[absorber] = remaining / absorber_value;
    allocation.counts[unit] = unit_remainder;

    debug_assert_eq!(
        allocation.total_minor_units(table),
        u128::from(change_minor_units)
    );
    allocation
}

// =============================================================================
// Unit Tests
// =============================================================================
