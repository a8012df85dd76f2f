//! # tender-db: Transaction Log for Tender
//!
//! Stores every processed batch (input text plus output lines) in SQLite
//! via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tender Data Flow                                │
//! │                                                                         │
//! │  POST /api/change                                                      │
//! │       │ lines computed by tender-core                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tender-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────────┐  ┌───────────┐  │   │
//! │  │   │   Database    │    │    Repositories     │  │Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ TransactionRepo     │  │ (embedded)│  │   │
//! │  │   └───────────────┘    └─────────────────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                  transactions (id, input_text, ...)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tender_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("tender.db")).await?;
//! db.transactions().insert("2.12,3.00", &lines).await?;
//! let recent = db.transactions().list_recent(50).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::transaction::TransactionRepository;
