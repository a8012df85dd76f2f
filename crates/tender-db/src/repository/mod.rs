//! # Repository Module
//!
//! SQL lives here and nowhere else.
//!
//! ```text
//! Handler ──► db.transactions().list_recent(50) ──► SQLite
//! ```
//!
//! ## Available Repositories
//!
//! - [`transaction::TransactionRepository`] - The batch log

pub mod transaction;
