//! SurrealDB schema definitions

use crate::{DbConnection, Result};
use tracing::info;

/// Embedding dimension (hosted embedding deployment default: 1536)
pub const EMBEDDING_DIMENSION: usize = 1536;

/// Initialize the database schema
pub async fn initialize_schema(db: &DbConnection) -> Result<()> {
    info!("Initializing memory store schema...");

    db.query(SCHEMA_DEFINITION).await?;

    info!("Schema initialized successfully");
    Ok(())
}

const SCHEMA_DEFINITION: &str = r#"
-- ============================================
-- TABLES
-- ============================================

-- Memory records: one summarized chunk per record
DEFINE TABLE memory_record SCHEMAFULL;
DEFINE FIELD collection ON memory_record TYPE string;
DEFINE FIELD external_id ON memory_record TYPE string;
DEFINE FIELD text ON memory_record TYPE string;
DEFINE FIELD embedding ON memory_record TYPE array<float>;
DEFINE FIELD created_at ON memory_record TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON memory_record TYPE datetime DEFAULT time::now();

-- ============================================
-- INDEXES
-- ============================================

-- Upsert key: one record per (collection, id)
DEFINE INDEX idx_record_key ON memory_record FIELDS collection, external_id UNIQUE;

-- Vector index for similarity search (HNSW for performance)
DEFINE INDEX idx_record_embedding ON memory_record FIELDS embedding
    HNSW DIMENSION 1536 DIST COSINE;

-- Collection filtering
DEFINE INDEX idx_record_collection ON memory_record FIELDS collection;
"#;
