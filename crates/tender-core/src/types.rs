//! # Transfer Types
//!
//! Shapes exchanged with the HTTP layer and the transaction log.
//!
//! ```text
//! ┌─────────────────────┐        ┌──────────────────────────────┐
//! │   ChangeResponse    │        │      TransactionRecord       │
//! │  ─────────────────  │        │  ──────────────────────────  │
//! │  lines: [String]    │        │  id (UUID)                   │
//! └─────────────────────┘        │  input_text                  │
//!                                │  output_lines: [String]      │
//!                                │  created_at                  │
//!                                └──────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::stats::{compute_stats, TransactionStats};

/// Output of one batch, one entry per non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeResponse {
    pub lines: Vec<String>,
}

impl From<Vec<String>> for ChangeResponse {
    fn from(lines: Vec<String>) -> Self {
        ChangeResponse { lines }
    }
}

/// A processed batch as stored in the transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The batch exactly as submitted.
    pub input_text: String,

    /// What the engine returned for it.
    pub output_lines: Vec<String>,

    /// When the batch was logged.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Totals over a set of logged batches.
    pub fn stats<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> TransactionStats {
        compute_stats(records.into_iter().map(|r| r.input_text.as_str()))
    }
}
