//! Agent error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("No content found: {0}")]
    ContentNotFound(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Memory store error: {0}")]
    Store(#[from] docsum_memory::MemoryError),

    #[error("Missing prompt template: {0}")]
    MissingTemplate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
