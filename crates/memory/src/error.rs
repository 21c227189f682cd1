//! Memory store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidEmbeddingDimension { expected: usize, actual: usize },

    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),
}

pub type Result<T> = std::result::Result<T, MemoryError>;
