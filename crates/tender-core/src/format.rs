//! # Change Formatting
//!
//! `"<count> <label>"` fragments in table order, joined by bare commas:
//!
//! ```text
//! counts [0, 3, 1, 0, 3]  ──►  "3 quarters,1 dime,3 pennies"
//! counts [0, 0, 0, 0, 0]  ──►  "No change"
//! ```

use crate::allocation::Allocation;
use crate::denomination::DenominationTable;

/// Rendered when nothing is handed back.
pub const NO_CHANGE: &str = "No change";

/// Renders an allocation against the table it was built from.
///
/// ## Example
/// ```rust
/// use tender_core::{format_allocation, minimal_allocation, DenominationTable};
///
/// let table = DenominationTable::us();
/// assert_eq!(format_allocation(&minimal_allocation(26, &table), &table), "1 quarter,1 penny");
/// ```
pub fn format_allocation(allocation: &Allocation, table: &DenominationTable) -> String {
    let parts: Vec<String> = table
        .iter()
        .zip(allocation.counts())
        .filter(|&(_, &count)| count > 0)
        .map(|(denomination, &count)| format!("{} {}", count, denomination.label(count)))
        .collect();

    if parts.is_empty() {
        NO_CHANGE.to_string()
    } else {
        parts.join(",")
    }
}

/// Reads a rendered change line back into counts.
///
/// Returns `None` for anything [`format_allocation`] would not produce
/// with `table` (unknown labels, a label that disagrees with its count,
/// duplicates or out-of-order fragments). `"No change"` reads back as an
/// empty allocation.
pub fn parse_formatted(text: &str, table: &DenominationTable) -> Option<Allocation> {
    let mut allocation = vec![0u64; table.len()];
    if text == NO_CHANGE {
        return Some(Allocation::from_counts(allocation));
    }

    let mut next_index = 0;
    for fragment in text.split(',') {
        let (count, label) = fragment.split_once(' ')?;
        let count: u64 = count.parse().ok().filter(|&c| c > 0)?;

        let offset = table.as_slice()[next_index..]
            .iter()
            .position(|d| d.label(count) == label)?;
        let index = next_index + offset;

        allocation[index] = count;
        next_index = index + 1;
    }

    Some(Allocation::from_counts(allocation))
}
