//! # Ledger Statistics
//!
//! Totals over logged batches, as shown on the dashboard.
//!
//! Counting is loose: every non-blank line of every batch is
//! one transaction, and a missing or unreadable amount counts as zero.
//! `change_given` is `paid - owed` summed as-is, so underpaid lines pull
//! it down.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::line::batch_lines;
use crate::money::{parse_to_minor_units, Money};

/// Aggregate figures over a set of batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionStats {
    /// Non-blank lines seen.
    pub transaction_count: i64,

    /// Sum of owed amounts, in cents.
    pub total_owed_cents: i64,

    /// Sum of `paid - owed`, in cents.
    pub change_given_cents: i64,
}

impl TransactionStats {
    /// Total owed as money.
    pub fn total_owed(&self) -> Money {
        Money::from_cents(self.total_owed_cents)
    }

    /// Total change as money.
    pub fn change_given(&self) -> Money {
        Money::from_cents(self.change_given_cents)
    }

    /// Folds one input line into the totals.
    pub fn record_line(&mut self, line: &str) {
        let mut fields = line.split(',').map(str::trim);
        let owed = lenient_amount(fields.next());
        let paid = lenient_amount(fields.next());

        self.transaction_count = self.transaction_count.saturating_add(1);
        self.total_owed_cents = self.total_owed_cents.saturating_add(owed);
        self.change_given_cents = self
            .change_given_cents
            .saturating_add(paid.saturating_sub(owed));
    }
}

fn lenient_amount(field: Option<&str>) -> i64 {
    field
        .and_then(|text| parse_to_minor_units(text).ok())
        .unwrap_or(0)
}

/// Computes totals over the input text of many batches.
///
/// ## Example
/// ```rust
/// use tender_core::compute_stats;
///
/// let stats = compute_stats(["2.12,3.00\n\n1.97,2.00", "5.00,10.00"]);
/// assert_eq!(stats.transaction_count, 3);
/// assert_eq!(stats.total_owed_cents, 909);
/// assert_eq!(stats.change_given_cents, 591);
/// ```
pub fn compute_stats<'a, I>(inputs: I) -> TransactionStats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats = TransactionStats::default();
    for input in inputs {
        for line in batch_lines(input) {
            stats.record_line(line);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(compute_stats(std::iter::empty()), TransactionStats::default());
        assert_eq!(compute_stats(["", "\n\n"]).transaction_count, 0);
    }

    #[test]
    fn test_bad_lines_count_as_zero() {
        let stats = compute_stats(["bad\n1.00\n,2.00\nx,y"]);
        assert_eq!(stats.transaction_count, 4);
        assert_eq!(stats.total_owed_cents, 100);
        // "1.00" alone: owed 100, paid 0; ",2.00": owed 0, paid 200
        assert_eq!(stats.change_given_cents, 100);
    }

    #[test]
    fn test_underpayment_reduces_change() {
        let stats = compute_stats(["5.00,3.00", "1.00,2.00"]);
        assert_eq!(stats.transaction_count, 2);
        assert_eq!(stats.total_owed_cents, 600);
        assert_eq!(stats.change_given_cents, -100);
        assert_eq!(stats.change_given().to_string(), "-$1.00");
    }

    #[test]
    fn test_money_accessors() {
        let stats = compute_stats(["2.12,3.00"]);
        assert_eq!(stats.total_owed(), Money::from_cents(212));
        assert_eq!(stats.change_given(), Money::from_cents(88));
    }
}
