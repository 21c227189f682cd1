//! HTTP routes: chat-style query and page ingestion

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use docsum_agents::{AgentError, ChatAgent, DocumentDigest, PageFetcher, SummarizerAgent};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Long-lived collaborators, built once at startup and shared by every
/// request.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: PageFetcher,
    pub summarizer: Arc<SummarizerAgent>,
    pub chat: Arc<ChatAgent>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/ingest", post(ingest))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub doc_url: String,
}

/// `POST /chat` — answer a query against stored summaries (plain text)
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<String, ApiError> {
    let answer = state.chat.answer(&request.query).await?;
    Ok(answer)
}

/// `POST /ingest` — fetch, chunk, and summarize a page (JSON digest)
async fn ingest(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<DocumentDigest>, ApiError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, url = %request.doc_url, "Ingesting document");

    let doc = state.fetcher.fetch(&request.doc_url).await?;
    let digest = state.summarizer.summarize_document(&doc).await?;

    info!(
        %request_id,
        summaries = digest.summaries.len(),
        failures = digest.failures.len(),
        "Ingest complete"
    );

    Ok(Json(digest))
}

/// Wrapper turning agent errors into plain-text HTTP responses
pub struct ApiError(AgentError);

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (status_for(&self.0), self.0.to_string()).into_response()
    }
}

/// Map the error taxonomy onto status codes: user errors are 4xx,
/// upstream collaborator failures are 502, everything else is 500.
fn status_for(err: &AgentError) -> StatusCode {
    match err {
        AgentError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        AgentError::Fetch(_) | AgentError::Summarization(_) | AgentError::Embedding(_) => {
            StatusCode::BAD_GATEWAY
        }
        AgentError::ContentNotFound(_)
        | AgentError::Store(_)
        | AgentError::MissingTemplate(_)
        | AgentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
