//! Vector memory store for docsum
//!
//! Provides the SurrealDB-backed store that holds chunk summaries with
//! their embeddings, supporting upsert-by-id and similarity search.

pub mod error;
pub mod schema;
pub mod store;

pub use error::{MemoryError, Result};
pub use store::{MemoryHit, MemoryStore};

#[cfg(feature = "rocksdb")]
use std::path::Path;
use surrealdb::engine::local::{Db, Mem};
#[cfg(feature = "rocksdb")]
use surrealdb::engine::local::RocksDb;
use surrealdb::Surreal;

/// Database connection type
pub type DbConnection = Surreal<Db>;

/// Initialize database with RocksDB (persistent)
#[cfg(feature = "rocksdb")]
pub async fn init_persistent(path: impl AsRef<Path>) -> Result<DbConnection> {
    let db = Surreal::new::<RocksDb>(path.as_ref()).await?;
    setup_database(&db).await?;
    Ok(db)
}

/// Initialize database in-memory (for testing)
pub async fn init_memory() -> Result<DbConnection> {
    let db = Surreal::new::<Mem>(()).await?;
    setup_database(&db).await?;
    Ok(db)
}

/// Setup database namespace, database, and schema
async fn setup_database(db: &DbConnection) -> Result<()> {
    db.use_ns("docsum").use_db("memory").await?;
    schema::initialize_schema(db).await?;
    Ok(())
}
