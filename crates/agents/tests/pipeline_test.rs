//! End-to-end pipeline tests: chunk → summarize → store → chat.
//!
//! The hosted model endpoints are mocked with httpmock; the memory
//! store runs on an in-memory database.

mod common;

use common::*;
use docsum_agents::{ChatAgent, SummarizerAgent, MEMORY_COLLECTION};
use docsum_core::{chunk, ChunkConfig, Document};
use httpmock::prelude::*;
use serde_json::json;

fn three_sentence_doc() -> Document {
    Document::new(
        "https://example.com/guide",
        "Guide",
        "<html/>",
        "alpha one two. beta one two. gamma one two.",
    )
}

/// Bounds that put each 3-word sentence in its own chunk
fn per_sentence_config() -> ChunkConfig {
    ChunkConfig::new(3, 3).unwrap()
}

#[tokio::test]
async fn test_one_summary_per_chunk_in_order() {
    let server = MockServer::start();
    let completion = mock_completion(&server, "Summarize", "a short summary");

    let doc = three_sentence_doc();
    let config = per_sentence_config();
    let expected_chunks = chunk(&doc.content_text, config);
    assert_eq!(expected_chunks.len(), 3);

    let agent = SummarizerAgent::new(create_test_llm(&server), create_test_prompts(), None)
        .with_chunk_config(config);
    let digest = agent.summarize_document(&doc).await.unwrap();

    completion.assert_hits(3);
    assert!(digest.failures.is_empty());
    assert_eq!(digest.summaries.len(), expected_chunks.len());
    for (i, summary) in digest.summaries.iter().enumerate() {
        assert_eq!(summary.id, format!("Guide-{i}"));
        assert_eq!(summary.original_text, expected_chunks[i]);
        assert_eq!(summary.summary_text, "a short summary");
        assert_eq!(summary.source_url, "https://example.com/guide");
        assert_eq!(summary.external_source_name, "example.com");
    }
}

#[tokio::test]
async fn test_one_failing_chunk_does_not_abort_batch() {
    let server = MockServer::start();
    mock_completion(&server, "alpha", "alpha summary");
    mock_completion(&server, "gamma", "gamma summary");
    server.mock(|when, then| {
        when.method(POST)
            .path("/openai/deployments/chat/chat/completions")
            .body_contains("beta");
        then.status(500);
    });

    let agent = SummarizerAgent::new(create_test_llm(&server), create_test_prompts(), None)
        .with_chunk_config(per_sentence_config());
    let digest = agent
        .summarize_document(&three_sentence_doc())
        .await
        .unwrap();

    assert_eq!(digest.summaries.len(), 2);
    assert_eq!(digest.failures.len(), 1);
    assert_eq!(digest.failures[0].index, 1);
    assert_eq!(digest.summaries[0].id, "Guide-0");
    assert_eq!(digest.summaries[1].id, "Guide-2");
}

#[tokio::test]
async fn test_empty_model_output_is_a_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/openai/deployments/chat/chat/completions");
        then.status(200)
            .json_body(json!({ "choices": [{ "message": { "content": "   " } }] }));
    });

    let agent = SummarizerAgent::new(create_test_llm(&server), create_test_prompts(), None)
        .with_chunk_config(per_sentence_config());
    let digest = agent
        .summarize_document(&three_sentence_doc())
        .await
        .unwrap();

    assert!(digest.summaries.is_empty());
    assert_eq!(digest.failures.len(), 3);
}

#[tokio::test]
async fn test_summaries_are_persisted_to_the_store() {
    let server = MockServer::start();
    mock_completion(&server, "Summarize", "stored summary");
    let embeddings = mock_embeddings(&server, 0);

    let store = create_test_store().await;
    let agent = SummarizerAgent::new(
        create_test_llm(&server),
        create_test_prompts(),
        Some(store.clone()),
    )
    .with_chunk_config(per_sentence_config());

    let digest = agent
        .summarize_document(&three_sentence_doc())
        .await
        .unwrap();

    assert_eq!(digest.summaries.len(), 3);
    embeddings.assert_hits(3);
    assert_eq!(store.count(MEMORY_COLLECTION).await.unwrap(), 3);

    let record = store
        .get(MEMORY_COLLECTION, "Guide-0")
        .await
        .unwrap()
        .expect("record missing");
    assert_eq!(record.text, "stored summary");
}

#[tokio::test]
async fn test_store_failure_keeps_the_summary() {
    let server = MockServer::start();
    mock_completion(&server, "Summarize", "unstored summary");
    // Embedding deployment down: persistence fails, summarization must not
    server.mock(|when, then| {
        when.method(POST)
            .path("/openai/deployments/embed/embeddings");
        then.status(500);
    });

    let store = create_test_store().await;
    let agent = SummarizerAgent::new(
        create_test_llm(&server),
        create_test_prompts(),
        Some(store.clone()),
    )
    .with_chunk_config(per_sentence_config());

    let digest = agent
        .summarize_document(&three_sentence_doc())
        .await
        .unwrap();

    assert_eq!(digest.summaries.len(), 3);
    assert!(digest.failures.is_empty());
    assert_eq!(store.count(MEMORY_COLLECTION).await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_document_produces_empty_digest() {
    let server = MockServer::start();
    let completion = mock_completion(&server, "Summarize", "never used");

    let doc = Document::new("https://example.com/empty", "Empty", "<html/>", "");
    let agent = SummarizerAgent::new(create_test_llm(&server), create_test_prompts(), None);
    let digest = agent.summarize_document(&doc).await.unwrap();

    assert!(digest.summaries.is_empty());
    assert!(digest.failures.is_empty());
    completion.assert_hits(0);
}

#[tokio::test]
async fn test_chat_answers_with_stored_context() {
    let server = MockServer::start();
    mock_embeddings(&server, 0);
    // The response prompt must carry the framed context from the store
    let completion = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/deployments/chat/chat/completions")
            .body_contains("START RELEVANT INFO")
            .body_contains("clusters scale by adding nodes");
        then.status(200)
            .json_body(json!({ "choices": [{ "message": { "content": "the answer" } }] }));
    });

    let store = create_test_store().await;
    store
        .save(
            MEMORY_COLLECTION,
            "Guide-0",
            "clusters scale by adding nodes",
            fake_embedding(0),
        )
        .await
        .unwrap();

    let chat = ChatAgent::new(create_test_llm(&server), create_test_prompts(), store);
    let answer = chat.answer("how do clusters scale?").await.unwrap();

    completion.assert();
    assert_eq!(answer, "the answer");
}
