//! Claims repository implementation
//!
//! Claims are stored as JSONB documents keyed by their 24-hex identifier.
//! The repository deals in raw documents; conversion to domain types happens
//! in the adapter.

use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::error::DatabaseError;

/// Rows per INSERT; two bind parameters each, under the 65535 limit
const MAX_ROWS_PER_STATEMENT: usize = 10_000;

/// One row of the claims table
#[derive(Debug, Clone, FromRow)]
pub struct ClaimDocumentRow {
    pub id: String,
    pub document: Json<Value>,
}

/// Repository for the claims table
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every claim document, in whatever order PostgreSQL returns them
    pub async fn find_all(&self) -> Result<Vec<ClaimDocumentRow>, DatabaseError> {
        sqlx::query_as::<_, ClaimDocumentRow>("SELECT id, document FROM claims")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// The document with this identifier, if any
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ClaimDocumentRow>, DatabaseError> {
        sqlx::query_as::<_, ClaimDocumentRow>("SELECT id, document FROM claims WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Inserts all documents in one transaction
    ///
    /// Each statement is a multi-row INSERT; very large batches are split
    /// across statements in the same transaction. Any failure rolls the whole batch back.
    pub async fn insert_many(&self, documents: &[(String, Value)]) -> Result<(), DatabaseError> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        for chunk in documents.chunks(MAX_ROWS_PER_STATEMENT) {
            let mut query = insert_query(chunk);
            query
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| DatabaseError::from(&e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        debug!(count = documents.len(), "Inserted claim documents");
        Ok(())
    }

    /// Number of stored claims
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM claims")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DatabaseError::from(&e))
    }
}

/// Builds one multi-row INSERT for `documents`
fn insert_query(documents: &[(String, Value)]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new("INSERT INTO claims (id, document) ");
    builder.push_values(documents, |mut row, (id, document)| {
        row.push_bind(id).push_bind(Json(document));
    });
    builder
}
