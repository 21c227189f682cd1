//! Chat agent: answers queries grounded in stored summaries.

use crate::error::Result;
use crate::llm::LlmClient;
use crate::prompts::{PromptRegistry, RESPONSE_TEMPLATE};
use crate::summarizer::MEMORY_COLLECTION;
use docsum_memory::{MemoryHit, MemoryStore};
use tracing::{debug, instrument};

/// How many memory hits to feed into the response prompt
const SEARCH_LIMIT: usize = 5;

/// Minimum cosine similarity for a hit to count as relevant
const MIN_RELEVANCE: f32 = 0.8;

/// Answers chat queries using memory-store context
pub struct ChatAgent {
    llm: LlmClient,
    prompts: PromptRegistry,
    store: MemoryStore,
}

impl ChatAgent {
    pub fn new(llm: LlmClient, prompts: PromptRegistry, store: MemoryStore) -> Self {
        Self {
            llm,
            prompts,
            store,
        }
    }

    /// Embed the query, search the memory store, and answer with one
    /// completion over the retrieved context.
    #[instrument(skip(self))]
    pub async fn answer(&self, query: &str) -> Result<String> {
        let embedding = self.llm.embed(query).await?;
        let hits = self
            .store
            .search(MEMORY_COLLECTION, embedding, SEARCH_LIMIT, MIN_RELEVANCE)
            .await?;

        debug!("Found {} relevant records for query", hits.len());

        let info = compose_context(&hits);
        let prompt = self
            .prompts
            .render(RESPONSE_TEMPLATE, &[("query", query), ("info", &info)])?;

        self.llm.complete(&prompt).await
    }
}

/// Frame retrieved texts so the model can tell context from question
fn compose_context(hits: &[MemoryHit]) -> String {
    let mut result = String::from("[START RELEVANT INFO]");
    for hit in hits {
        result.push('\n');
        result.push_str(&hit.text);
        result.push('\n');
    }
    result.push_str("\n[END RELEVANT INFO]");
    result
}
