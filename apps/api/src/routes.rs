//! # Route Handlers
//!
//! Handlers stay thin: validate, call the engine or repository, map
//! errors. The change computation itself is synchronous and bounded by
//! the body limit.

use axum::extract::rejection::{QueryRejection, StringRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::{debug, warn};

use tender_core::validation::{normalize_history_limit, validate_input_size, validate_random_divisor};
use tender_core::{ChangeResponse, ChangeRules, DenominationTable, TransactionRecord, TransactionStats};

use crate::error::ApiError;
use crate::AppState;

/// Query string of `POST /api/change`.
#[derive(Debug, Default, Deserialize)]
pub struct ChangeQuery {
    /// Overrides the configured random divisor for this batch.
    pub divisor: Option<i64>,
}

/// Query string of `GET /api/transactions`.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    /// Page size; anything unparseable falls back to the default.
    pub limit: Option<String>,
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// Computes change for a batch and logs it when storage is enabled.
///
/// Logging failures are reported in the server log only; the caller
/// always gets the computed lines.
pub async fn calculate_change(
    State(state): State<AppState>,
    query: Result<Query<ChangeQuery>, QueryRejection>,
    body: Result<String, StringRejection>,
) -> Result<Json<ChangeResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let input = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::input_too_large(state.max_input_bytes)
        } else {
            ApiError::validation(e.body_text())
        }
    })?;
    validate_input_size(input.len(), state.max_input_bytes)?;

    let calculator = match query.divisor {
        Some(divisor) => state
            .calculator
            .with_rules(ChangeRules::with_divisor(validate_random_divisor(divisor)?)),
        None => state.calculator.clone(),
    };

    let lines = calculator.process_batch(&input);
    debug!(
        lines = lines.len(),
        divisor = calculator.rules().random_divisor,
        "Processed batch"
    );

    if let Some(db) = &state.db {
        if let Err(e) = db.transactions().insert(input.trim(), &lines).await {
            warn!(error = %e, "Failed to save transaction");
        }
    }

    Ok(Json(ChangeResponse::from(lines)))
}

/// Most recent logged batches, newest first.
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<TransactionRecord>>, ApiError> {
    let Some(db) = &state.db else {
        return Ok(Json(Vec::new()));
    };

    let limit = normalize_history_limit(query.limit.and_then(|raw| raw.trim().parse().ok()));
    let records = db.transactions().list_recent(limit).await?;
    Ok(Json(records))
}

/// Totals over every logged batch.
pub async fn transaction_stats(
    State(state): State<AppState>,
) -> Result<Json<TransactionStats>, ApiError> {
    let stats = match &state.db {
        Some(db) => db.transactions().stats().await?,
        None => TransactionStats::default(),
    };
    Ok(Json(stats))
}

/// One logged batch.
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionRecord>, ApiError> {
    let Some(db) = &state.db else {
        return Err(ApiError::not_found("Transaction", &id));
    };
    Ok(Json(db.transactions().get_by_id(&id).await?))
}

/// The active denomination table, largest first.
pub async fn list_denominations(State(state): State<AppState>) -> Json<DenominationTable> {
    Json(state.calculator.table().clone())
}

// =============================================================================
// Unit Tests
// =============================================================================
