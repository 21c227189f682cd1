//! Summarizer fan-out: one model call per chunk, in document order.
//!
//! A stateless fold over the chunk sequence. Each chunk independently
//! goes summarize → (store) → done; a failed summarization is recorded
//! and the loop continues, and a failed store keeps the summary in the
//! response. Output order always matches chunk order.

use crate::error::Result;
use crate::fetcher::external_source_name;
use crate::llm::LlmClient;
use crate::prompts::{PromptRegistry, SUMMARIZE_TEMPLATE};
use docsum_core::{chunk, ChunkConfig, Document, Summary};
use docsum_memory::MemoryStore;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Logical namespace for stored chunk summaries
pub const MEMORY_COLLECTION: &str = "docsum-pages";

/// A chunk whose summarization failed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkFailure {
    /// Zero-based position in the chunk sequence
    pub index: usize,
    pub error: String,
}

/// The full result of ingesting one document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDigest {
    pub title: String,
    pub source_url: String,
    /// Successful summaries, in chunk order
    pub summaries: Vec<Summary>,
    /// Failed chunks, in chunk order
    pub failures: Vec<ChunkFailure>,
}

/// Orchestrates the per-chunk summarization fan-out
pub struct SummarizerAgent {
    llm: LlmClient,
    prompts: PromptRegistry,
    store: Option<MemoryStore>,
    chunk_config: ChunkConfig,
}

impl SummarizerAgent {
    /// Create the agent; pass a store to persist summaries as they are
    /// produced.
    pub fn new(llm: LlmClient, prompts: PromptRegistry, store: Option<MemoryStore>) -> Self {
        Self {
            llm,
            prompts,
            store,
            chunk_config: ChunkConfig::default(),
        }
    }

    /// Builder: override the chunking bounds
    pub fn with_chunk_config(mut self, chunk_config: ChunkConfig) -> Self {
        self.chunk_config = chunk_config;
        self
    }

    /// Chunk a document and summarize every chunk, in order.
    ///
    /// Every chunk ends up in exactly one of `summaries` or `failures`;
    /// a store failure is logged and does not remove the summary from
    /// the result.
    #[instrument(skip(self, doc), fields(url = %doc.source_url))]
    pub async fn summarize_document(&self, doc: &Document) -> Result<DocumentDigest> {
        let chunks = chunk(&doc.content_text, self.chunk_config);
        let source_name = external_source_name(&doc.source_url);

        info!("Summarizing {} chunks from {}", chunks.len(), doc.source_url);

        let mut summaries = Vec::new();
        let mut failures = Vec::new();

        for (index, chunk_text) in chunks.iter().enumerate() {
            let prompt = self
                .prompts
                .render(SUMMARIZE_TEMPLATE, &[("text", chunk_text)])?;

            match self.llm.complete(&prompt).await {
                Ok(summary_text) => {
                    let summary = Summary::from_chunk(
                        &doc.title,
                        index,
                        &doc.source_url,
                        &source_name,
                        chunk_text,
                        summary_text,
                    );

                    if let Some(store) = &self.store {
                        // Store failures are non-fatal: the summary is
                        // still returned to the caller.
                        if let Err(e) = self.persist(store, &summary).await {
                            warn!("Failed to store summary {}: {e}", summary.id);
                        }
                    }

                    summaries.push(summary);
                }
                Err(e) => {
                    warn!("Chunk {index} failed summarization: {e}");
                    failures.push(ChunkFailure {
                        index,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(DocumentDigest {
            title: doc.title.clone(),
            source_url: doc.source_url.clone(),
            summaries,
            failures,
        })
    }

    async fn persist(&self, store: &MemoryStore, summary: &Summary) -> Result<()> {
        let embedding = self.llm.embed(&summary.summary_text).await?;
        store
            .save(MEMORY_COLLECTION, &summary.id, &summary.summary_text, embedding)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_serializes_camel_case() {
        let digest = DocumentDigest {
            title: "T".into(),
            source_url: "https://x".into(),
            summaries: vec![],
            failures: vec![ChunkFailure {
                index: 1,
                error: "boom".into(),
            }],
        };

        let json = serde_json::to_value(&digest).unwrap();
        assert_eq!(json["sourceUrl"], "https://x");
        assert_eq!(json["failures"][0]["index"], 1);
    }
}
