//! Agents for docsum
//!
//! This crate contains everything that talks to the outside world:
//! - PageFetcher: retrieves a URL and extracts its content region
//! - LlmClient: hosted chat-completion and embedding deployments
//! - PromptRegistry: named prompt templates loaded from a directory
//! - SummarizerAgent: per-chunk summarization fan-out with storage
//! - ChatAgent: memory-grounded query answering

pub mod chat;
pub mod error;
pub mod fetcher;
pub mod llm;
pub mod prompts;
pub mod summarizer;

pub use chat::ChatAgent;
pub use error::{AgentError, Result};
pub use fetcher::PageFetcher;
pub use llm::{LlmClient, LlmConfig};
pub use prompts::{PromptRegistry, RESPONSE_TEMPLATE, SUMMARIZE_TEMPLATE};
pub use summarizer::{ChunkFailure, DocumentDigest, SummarizerAgent, MEMORY_COLLECTION};
