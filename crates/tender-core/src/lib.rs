//! # tender-core: Pure Change-Making Logic for Tender
//!
//! This crate is the **heart** of Tender. It turns batches of
//! `"<owed>,<paid>"` lines into change descriptions such as
//! `"3 quarters,1 dime,3 pennies"`, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tender Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard / Register Keypad                     │   │
//! │  │        Input UI ──► Output UI ──► History ──► Stats             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP (POST /api/change)                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tender-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌────────────┐  ┌─────────┐  │   │
//! │  │   │   money   │  │ denomination│  │ allocation │  │  line   │  │   │
//! │  │   │  parsing  │  │    table    │  │ min / rand │  │ batches │  │   │
//! │  │   └───────────┘  └─────────────┘  └────────────┘  └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO GLOBAL RNG             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tender-db (Transaction Log)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-Line Pipeline
//! ```text
//! "2.12,3.00"
//!      │
//!      ▼
//! TransactionLine::split ──► Money::parse (×2) ──► change = paid - owed
//!      │                                               │
//!      │                      ChangeRules::allows_random + change ≥ 100?
//!      │                             │ yes                     │ no
//!      │                             ▼                         ▼
//!      │                  randomized_allocation      minimal_allocation
//!      │                             └──────────┬──────────────┘
//!      ▼                                        ▼
//! LineOutcome ─────────────────────────► format_allocation
//!                                               │
//!                                               ▼
//!                                "3 quarters,1 dime,3 pennies"
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type and exact decimal amount parsing
//! - [`denomination`] - Validated denomination tables
//! - [`policy`] - When the randomized allocator applies
//! - [`allocation`] - Minimal and seeded randomized allocators
//! - [`format`] - Rendering allocations as text
//! - [`line`] - Line and batch processing
//! - [`stats`] - Aggregates over logged transactions
//! - [`types`] - Transfer objects shared with outer layers
//! - [`validation`] - Request-level validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tender_core::{ChangeCalculator, ChangeRules, DenominationTable};
//!
//! let calculator = ChangeCalculator::new(DenominationTable::us(), ChangeRules::disabled());
//! let lines = calculator.process_batch("2.12,3.00\n\n5.00,3.00\n3.00");
//!
//! assert_eq!(
//!     lines,
//!     vec!["3 quarters,1 dime,3 pennies", "Insufficient payment", "Invalid line"]
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod denomination;
pub mod error;
pub mod format;
pub mod line;
pub mod money;
pub mod policy;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocation::{minimal_allocation, randomized_allocation, seed_for, Allocation};
pub use denomination::{Denomination, DenominationTable};
pub use error::{AmountError, DenominationError, ValidationError};
pub use format::{format_allocation, parse_formatted};
pub use line::{ChangeCalculator, LineOutcome, TransactionLine};
pub use money::{parse_to_minor_units, Money};
pub use policy::{should_randomize, ChangeRules};
pub use stats::{compute_stats, TransactionStats};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minor units in one major unit (cents per dollar).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest request body accepted for a batch of lines (1 MiB).
pub const MAX_INPUT_BYTES: usize = 1024 * 1024;

/// History page size when the caller does not ask for one.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Upper bound on a single history page.
pub const MAX_HISTORY_LIMIT: i64 = 100;
