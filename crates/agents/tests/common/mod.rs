//! Common test utilities

use docsum_agents::{LlmClient, LlmConfig, PromptRegistry};
use docsum_memory::schema::EMBEDDING_DIMENSION;
use docsum_memory::{init_memory, MemoryStore};
use httpmock::prelude::*;
use serde_json::json;

/// Create a memory store backed by an in-memory database
pub async fn create_test_store() -> MemoryStore {
    let db = init_memory().await.expect("Failed to create test database");
    MemoryStore::new(db)
}

/// LLM client pointed at a mock server
pub fn create_test_llm(server: &MockServer) -> LlmClient {
    LlmClient::new(LlmConfig {
        endpoint: server.base_url(),
        api_key: "test-key".into(),
        chat_deployment: "chat".into(),
        embedding_deployment: "embed".into(),
    })
    .expect("Failed to build LLM client")
}

/// Registry with both required templates
pub fn create_test_prompts() -> PromptRegistry {
    PromptRegistry::from_templates([
        ("summarize", "Summarize the following text.\n{text}"),
        ("response", "Answer {query} using:\n{info}"),
    ])
}

/// Deterministic embedding with most weight on one axis
pub fn fake_embedding(axis: usize) -> Vec<f32> {
    let mut v = vec![0.01_f32; EMBEDDING_DIMENSION];
    v[axis % EMBEDDING_DIMENSION] = 1.0;
    v
}

/// Mock the embeddings deployment, always returning the same vector
pub fn mock_embeddings(server: &MockServer, axis: usize) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/openai/deployments/embed/embeddings");
        then.status(200)
            .json_body(json!({ "data": [{ "embedding": fake_embedding(axis) }] }));
    })
}

/// Mock the chat deployment for requests containing `needle`
pub fn mock_completion<'a>(
    server: &'a MockServer,
    needle: &str,
    reply: &str,
) -> httpmock::Mock<'a> {
    let needle = needle.to_string();
    let reply = reply.to_string();
    server.mock(move |when, then| {
        when.method(POST)
            .path("/openai/deployments/chat/chat/completions")
            .body_contains(&needle);
        then.status(200)
            .json_body(json!({ "choices": [{ "message": { "content": reply } }] }));
    })
}
