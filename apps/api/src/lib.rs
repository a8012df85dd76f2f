//! # tender-api: HTTP Surface for Tender
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/change[?divisor=N]    text body ──► { "lines": [...] }      │
//! │  GET  /api/transactions[?limit]  newest batches first (≤ 100)          │
//! │  GET  /api/transactions/stats    totals over the whole log             │
//! │  GET  /api/transactions/{id}     one logged batch                      │
//! │  GET  /api/denominations         active denomination table             │
//! │  GET  /health                    "OK"                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage is optional. Without a database the change endpoint still
//! works, history is empty and stats are zero.

pub mod config;
pub mod error;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use tender_core::ChangeCalculator;
use tender_db::Database;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};

/// Shared handler state. Cloned per request; everything inside is
/// reference counted.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Engine with the configured table and default policy.
    pub calculator: ChangeCalculator,

    /// Transaction log, `None` when storage is disabled.
    pub db: Option<Database>,

    /// Largest accepted batch body.
    pub max_input_bytes: usize,
}

impl AppState {
    /// Creates the handler state.
    pub fn new(calculator: ChangeCalculator, db: Option<Database>, max_input_bytes: usize) -> Self {
        AppState {
            calculator,
            db,
            max_input_bytes,
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_input_bytes;

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/change", post(routes::calculate_change))
        .route("/api/transactions", get(routes::list_transactions))
        .route("/api/transactions/stats", get(routes::transaction_stats))
        .route("/api/transactions/{id}", get(routes::get_transaction))
        .route("/api/denominations", get(routes::list_denominations))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
