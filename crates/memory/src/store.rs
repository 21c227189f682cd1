//! Memory store operations: upsert-by-id and similarity search

use crate::schema::EMBEDDING_DIMENSION;
use crate::{DbConnection, MemoryError, Result};
use serde::{Deserialize, Serialize};
use surrealdb::types::SurrealValue;
use tracing::instrument;

/// Store for summarized chunks, keyed by (collection, external id)
#[derive(Clone)]
pub struct MemoryStore {
    db: DbConnection,
}

/// A search hit from the memory store
#[derive(Debug, Clone, Serialize, Deserialize, SurrealValue)]
pub struct MemoryHit {
    /// The caller-supplied record id
    pub id: String,
    /// Stored text
    pub text: String,
    /// Cosine similarity to the query embedding
    pub relevance: f32,
}

/// A stored record, as read back by [`MemoryStore::get`]
#[derive(Debug, Clone, Serialize, Deserialize, SurrealValue)]
pub struct StoredRecord {
    pub external_id: String,
    pub text: String,
    pub embedding: Vec<f32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl MemoryStore {
    /// Create a new store over an initialized connection
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Save a record, overwriting any existing record with the same id
    /// in the same collection.
    #[instrument(skip(self, text, embedding))]
    pub async fn save(
        &self,
        collection: &str,
        id: &str,
        text: &str,
        embedding: Vec<f32>,
    ) -> Result<()> {
        validate_embedding_dim(embedding.len())?;

        self.db
            .query(
                r#"
                INSERT INTO memory_record (collection, external_id, text, embedding, created_at)
                VALUES ($collection, $external_id, $text, $embedding, time::now())
                ON DUPLICATE KEY UPDATE
                    text = $text,
                    embedding = $embedding,
                    updated_at = time::now()
            "#,
            )
            .bind(("collection", collection.to_string()))
            .bind(("external_id", id.to_string()))
            .bind(("text", text.to_string()))
            .bind(("embedding", embedding))
            .await?;

        Ok(())
    }

    /// Similarity search within a collection.
    ///
    /// Returns up to `limit` hits with cosine similarity >= `min_relevance`,
    /// most relevant first.
    #[instrument(skip(self, embedding))]
    pub async fn search(
        &self,
        collection: &str,
        embedding: Vec<f32>,
        limit: usize,
        min_relevance: f32,
    ) -> Result<Vec<MemoryHit>> {
        validate_embedding_dim(embedding.len())?;

        let hits: Vec<MemoryHit> = self
            .db
            .query(
                r#"
                SELECT
                    external_id AS id,
                    text,
                    vector::similarity::cosine(embedding, $embedding) AS relevance
                FROM memory_record
                WHERE
                    collection = $collection AND
                    vector::similarity::cosine(embedding, $embedding) >= $min_relevance
                ORDER BY relevance DESC
                LIMIT $limit
            "#,
            )
            .bind(("collection", collection.to_string()))
            .bind(("embedding", embedding))
            .bind(("min_relevance", min_relevance))
            .bind(("limit", limit))
            .await?
            .take(0)?;

        Ok(hits)
    }

    /// Fetch a single record by id
    #[instrument(skip(self))]
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredRecord>> {
        let record: Option<StoredRecord> = self
            .db
            .query(
                "SELECT external_id, text, embedding, created_at FROM memory_record \
                 WHERE collection = $collection AND external_id = $external_id",
            )
            .bind(("collection", collection.to_string()))
            .bind(("external_id", id.to_string()))
            .await?
            .take(0)?;

        Ok(record)
    }

    /// Number of records in a collection
    #[instrument(skip(self))]
    pub async fn count(&self, collection: &str) -> Result<usize> {
        let counts: Vec<CollectionCount> = self
            .db
            .query(
                "SELECT count() AS count FROM memory_record \
                 WHERE collection = $collection GROUP ALL",
            )
            .bind(("collection", collection.to_string()))
            .await?
            .take(0)?;

        Ok(counts.first().map(|c| c.count).unwrap_or(0))
    }

    /// Delete a record by id
    #[instrument(skip(self))]
    pub async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.db
            .query(
                "DELETE memory_record \
                 WHERE collection = $collection AND external_id = $external_id",
            )
            .bind(("collection", collection.to_string()))
            .bind(("external_id", id.to_string()))
            .await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize, SurrealValue)]
struct CollectionCount {
    count: usize,
}

fn validate_embedding_dim(actual: usize) -> Result<()> {
    if actual != EMBEDDING_DIMENSION {
        return Err(MemoryError::InvalidEmbeddingDimension {
            expected: EMBEDDING_DIMENSION,
            actual,
        });
    }
    Ok(())
}
