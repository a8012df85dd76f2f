//! # Transaction Repository
//!
//! The append-only log of processed batches.
//!
//! ## Row Layout
//! ```text
//! ┌──────────────┬──────────────────────┬──────────────────────────────┬─────────────────────┐
//! │ id (UUID)    │ input_text           │ output_lines (JSON array)    │ created_at (RFC3339)│
//! ├──────────────┼──────────────────────┼──────────────────────────────┼─────────────────────┤
//! │ 6f1c…        │ "2.12,3.00\n5,10"    │ ["3 quarters,…","5 dollars"] │ 2026-01-02T…        │
//! └──────────────┴──────────────────────┴──────────────────────────────┴─────────────────────┘
//! ```
//!
//! Rows are never updated. Newest-first listings order by `created_at`,
//! then insertion order.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tender_core::{compute_stats, TransactionRecord, TransactionStats};

/// Raw row as stored; `output_lines` is still JSON text.
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: String,
    input_text: String,
    output_lines: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = DbError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(TransactionRecord {
            id: row.id,
            input_text: row.input_text,
            output_lines: serde_json::from_str(&row.output_lines)?,
            created_at: row.created_at,
        })
    }
}

/// Repository for the batch log.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Logs a batch stamped with the current time.
    pub async fn insert(
        &self,
        input_text: &str,
        output_lines: &[String],
    ) -> DbResult<TransactionRecord> {
        self.insert_at(input_text, output_lines, Utc::now()).await
    }

    /// Logs a batch with an explicit timestamp (seeding, imports).
    pub async fn insert_at(
        &self,
        input_text: &str,
        output_lines: &[String],
        created_at: DateTime<Utc>,
    ) -> DbResult<TransactionRecord> {
        let record = TransactionRecord {
            id: Uuid::new_v4().to_string(),
            input_text: input_text.to_string(),
            output_lines: output_lines.to_vec(),
            created_at,
        };
        let lines_json = serde_json::to_string(&record.output_lines)?;

        debug!(
            id = %record.id,
            lines = record.output_lines.len(),
            "Logging transaction batch"
        );

        sqlx::query(
            r#"
            INSERT INTO transactions (id, input_text, output_lines, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&record.id)
        .bind(&record.input_text)
        .bind(&lines_json)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Newest batches first, at most `limit` of them.
    ///
    /// Callers normalize `limit`; a negative value returns nothing.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<TransactionRecord>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, input_text, output_lines, created_at
            FROM transactions
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRecord::try_from).collect()
    }

    /// Fetches one batch by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<TransactionRecord> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, input_text, output_lines, created_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Transaction", id))?;

        TransactionRecord::try_from(row)
    }

    /// Number of logged batches.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Totals over every logged batch.
    pub async fn stats(&self) -> DbResult<TransactionStats> {
        let inputs: Vec<String> = sqlx::query_scalar("SELECT input_text FROM transactions")
            .fetch_all(&self.pool)
            .await?;

        Ok(compute_stats(inputs.iter().map(String::as_str)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::Duration;

    async fn repo() -> TransactionRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().transactions()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let output = lines(&["3 quarters,1 dime,3 pennies", "Invalid line"]);

        let inserted = repo.insert("2.12,3.00\n3.00", &output).await.unwrap();
        let fetched = repo.get_by_id(&inserted.id).await.unwrap();

        assert_eq!(fetched.input_text, "2.12,3.00\n3.00");
        assert_eq!(fetched.output_lines, output);
        assert_eq!(fetched.id, inserted.id);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let repo = repo().await;
        let err = repo.get_by_id("nope").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let repo = repo().await;
        let base = Utc::now();

        for hours in 0..5 {
            repo.insert_at(&format!("{hours},{hours}"), &lines(&["No change"]), base - Duration::hours(hours))
                .await
                .unwrap();
        }

        let recent = repo.list_recent(3).await.unwrap();
        let inputs: Vec<_> = recent.iter().map(|r| r.input_text.as_str()).collect();
        assert_eq!(inputs, vec!["0,0", "1,1", "2,2"]);

        assert_eq!(repo.list_recent(100).await.unwrap().len(), 5);
        assert!(repo.list_recent(-1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_output_round_trips() {
        let repo = repo().await;
        let record = repo.insert("", &[]).await.unwrap();
        assert!(repo.get_by_id(&record.id).await.unwrap().output_lines.is_empty());
    }

    #[tokio::test]
    async fn test_stats_over_log() {
        let repo = repo().await;
        repo.insert("2.12,3.00\n\n1.97,2.00", &[]).await.unwrap();
        repo.insert("5.00,10.00", &[]).await.unwrap();

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.transaction_count, 3);
        assert_eq!(stats.total_owed_cents, 909);
        assert_eq!(stats.change_given_cents, 591);
    }
}
