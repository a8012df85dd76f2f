//! # Line Processing
//!
//! Orchestrates parsing, policy, allocation and formatting for batches of
//! `"<owed>,<paid>"` lines.
//!
//! ## Per-Line State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line                                                                   │
//! │   │                                                                     │
//! │   ├── fewer than 2 fields ───────────────► InvalidLine                  │
//! │   ├── owed or paid unparseable ──────────► InvalidAmounts               │
//! │   ├── paid < owed ───────────────────────► InsufficientPayment          │
//! │   ├── paid == owed ──────────────────────► NoChange                     │
//! │   ├── change ≥ $1 and policy says so ────► Change(randomized)           │
//! │   └── otherwise ─────────────────────────► Change(minimal)              │
//! │                                                                         │
//! │  Every line yields exactly one outcome; nothing aborts the batch.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::Arc;

use crate::allocation::{minimal_allocation, randomized_allocation, seed_for, Allocation};
use crate::denomination::DenominationTable;
use crate::format::{format_allocation, NO_CHANGE};
use crate::money::Money;
use crate::policy::ChangeRules;

// =============================================================================
// Transaction Line
// =============================================================================

/// The two raw amount fields of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionLine<'a> {
    pub owed_text: &'a str,
    pub paid_text: &'a str,
}

impl<'a> TransactionLine<'a> {
    /// Splits on commas and trims each field. Fields past the second are
    /// ignored; fewer than two gives `None`.
    pub fn split(line: &'a str) -> Option<Self> {
        let mut fields = line.split(',').map(str::trim);
        let owed_text = fields.next()?;
        let paid_text = fields.next()?;
        Some(TransactionLine {
            owed_text,
            paid_text,
        })
    }
}

// =============================================================================
// Line Outcome
// =============================================================================

/// Result of processing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Change to hand back.
    Change(Allocation),
    /// Paid exactly what was owed.
    NoChange,
    /// Paid less than what was owed.
    InsufficientPayment,
    /// The line does not have two fields.
    InvalidLine,
    /// A field is not a non-negative decimal amount.
    InvalidAmounts,
}

impl LineOutcome {
    /// Fixed text for every outcome except `Change`.
    pub const fn status_text(&self) -> Option<&'static str> {
        match self {
            LineOutcome::Change(_) => None,
            LineOutcome::NoChange => Some(NO_CHANGE),
            LineOutcome::InsufficientPayment => Some("Insufficient payment"),
            LineOutcome::InvalidLine => Some("Invalid line"),
            LineOutcome::InvalidAmounts => Some("Invalid amounts"),
        }
    }

    /// True for the malformed-input outcomes.
    pub const fn is_invalid(&self) -> bool {
        matches!(self, LineOutcome::InvalidLine | LineOutcome::InvalidAmounts)
    }

    /// Renders the outcome as its output line.
    pub fn render(&self, table: &DenominationTable) -> String {
        match self {
            LineOutcome::Change(allocation) => format_allocation(allocation, table),
            other => other.status_text().unwrap_or(NO_CHANGE).to_string(),
        }
    }
}

// =============================================================================
// Change Calculator
// =============================================================================

/// A denomination table paired with the policy for one batch.
///
/// Cloning is cheap: the table sits behind an `Arc` and is never mutated,
/// so concurrent requests share it without locking.
#[derive(Debug, Clone)]
pub struct ChangeCalculator {
    table: Arc<DenominationTable>,
    rules: ChangeRules,
}

impl ChangeCalculator {
    /// Creates a calculator owning `table`.
    pub fn new(table: DenominationTable, rules: ChangeRules) -> Self {
        ChangeCalculator {
            table: Arc::new(table),
            rules,
        }
    }

    /// Creates a calculator over an already shared table.
    pub fn shared(table: Arc<DenominationTable>, rules: ChangeRules) -> Self {
        ChangeCalculator { table, rules }
    }

    /// Same table, different policy.
    pub fn with_rules(&self, rules: ChangeRules) -> Self {
        ChangeCalculator {
            table: Arc::clone(&self.table),
            rules,
        }
    }

    /// The denomination table.
    pub fn table(&self) -> &DenominationTable {
        &self.table
    }

    /// The active policy.
    pub fn rules(&self) -> ChangeRules {
        self.rules
    }

    /// Classifies and allocates one line.
    pub fn evaluate_line(&self, line: &str) -> LineOutcome {
        let Some(fields) = TransactionLine::split(line) else {
            return LineOutcome::InvalidLine;
        };

        let (Ok(owed), Ok(paid)) = (Money::parse(fields.owed_text), Money::parse(fields.paid_text))
        else {
            return LineOutcome::InvalidAmounts;
        };

        self.evaluate_amounts(owed, paid)
    }

    /// Classifies and allocates an already parsed pair.
    pub fn evaluate_amounts(&self, owed: Money, paid: Money) -> LineOutcome {
        let change = paid - owed;
        if change.is_negative() {
            return LineOutcome::InsufficientPayment;
        }
        if change.is_zero() {
            return LineOutcome::NoChange;
        }

        let change_minor_units = change.cents().unsigned_abs();
        let allocation = if self.rules.allows_random(owed, paid) && self.table.supports_randomized()
        {
            let seed = seed_for(owed.cents().unsigned_abs(), paid.cents().unsigned_abs());
            randomized_allocation(change_minor_units, &self.table, seed)
        } else {
            minimal_allocation(change_minor_units, &self.table)
        };

        LineOutcome::Change(allocation)
    }

    /// Processes one line into its output text.
    pub fn process_line(&self, line: &str) -> String {
        self.evaluate_line(line).render(&self.table)
    }

    /// Outcomes for every non-blank line, in input order.
    pub fn evaluate_batch(&self, text: &str) -> Vec<LineOutcome> {
        batch_lines(text).map(|line| self.evaluate_line(line)).collect()
    }

    /// Output text for every non-blank line, in input order.
    pub fn process_batch(&self, text: &str) -> Vec<String> {
        batch_lines(text).map(|line| self.process_line(line)).collect()
    }
}

impl Default for ChangeCalculator {
    fn default() -> Self {
        ChangeCalculator::new(DenominationTable::us(), ChangeRules::default())
    }
}

impl fmt::Display for LineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineOutcome::Change(allocation) => {
                write!(f, "Change({} pieces)", allocation.piece_count())
            }
            other => f.write_str(other.status_text().unwrap_or(NO_CHANGE)),
        }
    }
}

/// Splits a batch on `\n` / `\r\n`, trims, and drops blank lines.
pub fn batch_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_formatted;
    use proptest::prelude::*;

    fn minimal() -> ChangeCalculator {
        ChangeCalculator::new(DenominationTable::us(), ChangeRules::disabled())
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(
            TransactionLine::split(" 2.12 , 3.00 "),
            Some(TransactionLine {
                owed_text: "2.12",
                paid_text: "3.00"
            })
        );
        assert_eq!(
            TransactionLine::split("1,2,3").map(|l| l.paid_text),
            Some("2")
        );
        assert_eq!(TransactionLine::split("3.00"), None);
        assert_eq!(
            TransactionLine::split("3.00,").map(|l| l.paid_text),
            Some("")
        );
    }

    #[test]
    fn test_concrete_scenarios() {
        let calc = minimal();
        assert_eq!(calc.process_line("2.12,3.00"), "3 quarters,1 dime,3 pennies");
        assert_eq!(calc.process_line("5.00,10.00"), "5 dollars");
        assert_eq!(calc.process_line("0.99,1.00"), "1 penny");
        assert_eq!(calc.process_line("1.50,2.00"), "2 quarters");
        assert_eq!(calc.process_line("bad,2.00"), "Invalid amounts");
        assert_eq!(calc.process_line("3.00"), "Invalid line");
        assert_eq!(calc.process_line("5.00,3.00"), "Insufficient payment");
        assert_eq!(calc.process_line("4.00,4.00"), "No change");
    }

    #[test]
    fn test_default_divisor_leaves_non_matching_lines_minimal() {
        let calc = ChangeCalculator::default();
        // 3.33 is not a whole dollar
        assert_eq!(calc.process_line("3.33,5.00"), "1 dollar,2 quarters,1 dime,1 nickel,2 pennies");
        // 10.00 is not divisible by 3
        assert_eq!(calc.process_line("5.00,10.00"), "5 dollars");
        // nothing owed
        assert_eq!(calc.process_line("0,3.00"), "3 dollars");
    }

    #[test]
    fn test_empty_paid_field_is_invalid_amounts() {
        assert_eq!(minimal().process_line("3.00,"), "Invalid amounts");
        assert_eq!(minimal().process_line(",3.00"), "Invalid amounts");
        assert_eq!(minimal().process_line("-1,3.00"), "Invalid amounts");
    }

    #[test]
    fn test_negative_zero_owed_is_zero() {
        assert_eq!(minimal().process_line("-0.00,1.00"), "1 dollar");
        assert_eq!(minimal().process_line("-0,1"), "1 dollar");
        assert_eq!(minimal().process_line("1.00,-0"), "Insufficient payment");
    }

    #[test]
    fn test_randomized_line_sums_and_repeats() {
        let calc = ChangeCalculator::new(DenominationTable::us(), ChangeRules::with_divisor(3));
        let outcome = calc.evaluate_line("3.00,99.00");

        let LineOutcome::Change(allocation) = &outcome else {
            panic!("expected change, got {outcome:?}");
        };
        assert_eq!(allocation.total_minor_units(calc.table()), 9600);
        assert_eq!(calc.evaluate_line("3.00,99.00"), outcome);
        assert_eq!(calc.process_line(" 3.00 , 99.00 "), calc.process_line("3.00,99.00"));
    }

    #[test]
    fn test_rules_switch_allocator() {
        let randomized = ChangeCalculator::new(DenominationTable::us(), ChangeRules::with_divisor(3));
        let expected = randomized_allocation(9600, randomized.table(), seed_for(300, 9900));
        assert_eq!(
            randomized.evaluate_line("3.00,99.00"),
            LineOutcome::Change(expected)
        );

        let plain = randomized.with_rules(ChangeRules::disabled());
        assert_eq!(plain.process_line("3.00,99.00"), "96 dollars");
    }

    #[test]
    fn test_batch_skips_blank_lines_and_keeps_order() {
        let calc = minimal();
        let input = "2.12,3.00\r\n\n   \n1.97,2.00\n3.00\nbad,1\n5.00,3.00\n";

        assert_eq!(
            calc.process_batch(input),
            vec![
                "3 quarters,1 dime,3 pennies",
                "3 pennies",
                "Invalid line",
                "Invalid amounts",
                "Insufficient payment",
            ]
        );
    }

    #[test]
    fn test_empty_batch() {
        assert!(minimal().process_batch("").is_empty());
        assert!(minimal().process_batch("\n \r\n").is_empty());
    }

    #[test]
    fn test_evaluate_batch_tags() {
        let outcomes = minimal().evaluate_batch("1,1\n1\nx,1\n2,1");
        assert_eq!(
            outcomes,
            vec![
                LineOutcome::NoChange,
                LineOutcome::InvalidLine,
                LineOutcome::InvalidAmounts,
                LineOutcome::InsufficientPayment,
            ]
        );
        assert!(outcomes[1].is_invalid());
        assert!(!outcomes[0].is_invalid());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(LineOutcome::InvalidLine.to_string(), "Invalid line");
        let change = LineOutcome::Change(Allocation::from_counts(vec![1, 0, 0, 0, 2]));
        assert_eq!(change.to_string(), "Change(3 pieces)");
    }

    proptest! {
        #[test]
        fn change_sums_to_difference(owed in 0i64..1_000_000i64, extra in 0i64..1_000_000i64, divisor in 0i64..6i64) {
            let calc = ChangeCalculator::new(DenominationTable::us(), ChangeRules::with_divisor(divisor));
            let paid = owed + extra;
            let line = format!("{}.{:02},{}.{:02}", owed / 100, owed % 100, paid / 100, paid % 100);

            match calc.evaluate_line(&line) {
                LineOutcome::Change(allocation) => {
                    prop_assert_eq!(allocation.total_minor_units(calc.table()), extra as u128);
                }
                LineOutcome::NoChange => prop_assert_eq!(extra, 0),
                other => prop_assert!(false, "unexpected outcome {:?}", other),
            }
        }

        #[test]
        fn underpayment_is_reported(owed in 1i64..1_000_000i64, short in 1i64..1_000_000i64) {
            let paid = (owed - short).max(0);
            prop_assume!(paid < owed);
            let line = format!("{}.{:02},{}.{:02}", owed / 100, owed % 100, paid / 100, paid % 100);
            prop_assert_eq!(ChangeCalculator::default().process_line(&line), "Insufficient payment");
        }

        #[test]
        fn exact_payment_is_no_change(cents in 0i64..1_000_000i64) {
            let amount = format!("{}.{:02}", cents / 100, cents % 100);
            let line = format!("{amount},{amount}");
            prop_assert_eq!(ChangeCalculator::default().process_line(&line), "No change");
        }

        #[test]
        fn batches_are_idempotent(pairs in prop::collection::vec((0u32..3000u32, 0u32..3000u32), 0..20)) {
            let calc = ChangeCalculator::default();
            let text: String = pairs
                .iter()
                .map(|(owed, paid)| format!("{owed},{paid}\n"))
                .collect();

            let first = calc.process_batch(&text);
            prop_assert_eq!(first.len(), pairs.len());
            prop_assert_eq!(calc.process_batch(&text), first.clone());

            for (line, (owed, paid)) in first.iter().zip(&pairs) {
                if paid > owed {
                    let allocation = parse_formatted(line, calc.table());
                    prop_assert!(allocation.is_some(), "unparseable output {}", line);
                }
            }
        }
    }
}
