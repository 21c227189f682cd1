//! HTTP client for the hosted chat-completion and embedding deployments.
//!
//! Speaks the Azure-OpenAI-style deployment API: one deployment name for
//! chat completions, one for embeddings, both behind a single endpoint
//! authenticated with an `api-key` header. Built once at startup and
//! shared across requests.

use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_KEY";
pub const ENV_CHAT_DEPLOYMENT: &str = "AZURE_OPENAI_CHAT_DEPLOYMENT";
pub const ENV_EMBEDDING_DEPLOYMENT: &str = "AZURE_OPENAI_EMBEDDING_DEPLOYMENT";

const API_VERSION: &str = "2024-02-01";

/// Deadline for each outbound model call
const LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the hosted model endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub chat_deployment: String,
    pub embedding_deployment: String,
}

impl LlmConfig {
    /// Read config from the environment. Any missing or empty variable
    /// is a fatal configuration error.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: required_env(ENV_ENDPOINT)?,
            api_key: required_env(ENV_API_KEY)?,
            chat_deployment: required_env(ENV_CHAT_DEPLOYMENT)?,
            embedding_deployment: required_env(ENV_EMBEDDING_DEPLOYMENT)?,
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AgentError::Config(format!("{key} is not set")))
}

/// Client for the hosted language model service
#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    chat_deployment: String,
    embedding_deployment: String,
}

impl LlmClient {
    /// Create a client from explicit config
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(LLM_TIMEOUT)
            .build()
            .map_err(|e| AgentError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            chat_deployment: config.chat_deployment,
            embedding_deployment: config.embedding_deployment,
        })
    }

    /// Create a client from environment variables (fatal if missing)
    pub fn from_env() -> Result<Self> {
        Self::new(LlmConfig::from_env()?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One chat completion for a rendered prompt.
    ///
    /// Empty model output is treated as a failure, not a valid summary.
    #[instrument(skip(self, prompt))]
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={API_VERSION}",
            self.endpoint, self.chat_deployment
        );

        let request = ChatRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Requesting completion ({} prompt chars)", prompt.len());

        let response: ChatResponse = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Summarization(e.to_string()))?
            .error_for_status()
            .map_err(|e| AgentError::Summarization(e.to_string()))?
            .json()
            .await
            .map_err(|e| AgentError::Summarization(format!("invalid response: {e}")))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        let content = content.trim().to_string();

        if content.is_empty() {
            return Err(AgentError::Summarization(
                "model returned empty output".into(),
            ));
        }

        Ok(content)
    }

    /// Generate an embedding for one text
    #[instrument(skip(self, text))]
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!(
            "{}/openai/deployments/{}/embeddings?api-version={API_VERSION}",
            self.endpoint, self.embedding_deployment
        );

        let request = EmbedRequest { input: text };

        let response: EmbedResponse = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Embedding(e.to_string()))?
            .error_for_status()
            .map_err(|e| AgentError::Embedding(e.to_string()))?
            .json()
            .await
            .map_err(|e| AgentError::Embedding(format!("invalid response: {e}")))?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| AgentError::Embedding("no embedding returned".into()))
    }
}

// ==========================================
// REQUEST/RESPONSE TYPES
// ==========================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}
