//! docsum server
//!
//! HTTP service exposing page ingestion (fetch → chunk → summarize →
//! store) and memory-grounded chat.

mod routes;

use anyhow::{Context, Result};
use clap::Parser;
use docsum_agents::{
    ChatAgent, LlmClient, PageFetcher, PromptRegistry, SummarizerAgent, RESPONSE_TEMPLATE,
    SUMMARIZE_TEMPLATE,
};
use docsum_memory::{init_memory, init_persistent, MemoryStore};
use routes::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// docsum - summarize web pages into searchable memory
#[derive(Parser)]
#[command(name = "docsum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:7071")]
    listen: SocketAddr,

    /// Database path (defaults to ~/.docsum/data)
    #[arg(short, long)]
    db_path: Option<PathBuf>,

    /// Use in-memory database (for testing)
    #[arg(long)]
    memory: bool,

    /// Directory holding prompt templates
    #[arg(short, long, default_value = "prompts")]
    prompts_dir: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Fail fast: model credentials and prompt templates are startup
    // requirements, not per-request concerns.
    let llm = LlmClient::from_env().context("hosted model configuration")?;
    let prompts =
        PromptRegistry::load(&cli.prompts_dir).context("loading prompt templates")?;
    prompts
        .require(&[SUMMARIZE_TEMPLATE, RESPONSE_TEMPLATE])
        .context("required prompt templates")?;
    info!("Model endpoint: {}", llm.endpoint());

    // Initialize the memory store
    let db = if cli.memory {
        info!("Using in-memory database");
        init_memory().await?
    } else {
        let db_path = cli.db_path.unwrap_or_else(|| {
            let mut path = dirs::home_dir().expect("Could not find home directory");
            path.push(".docsum");
            path.push("data");
            path
        });

        // Ensure directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Using database at: {}", db_path.display());
        init_persistent(&db_path).await?
    };
    let store = MemoryStore::new(db);

    let state = AppState {
        fetcher: PageFetcher::new()?,
        summarizer: Arc::new(SummarizerAgent::new(
            llm.clone(),
            prompts.clone(),
            Some(store.clone()),
        )),
        chat: Arc::new(ChatAgent::new(llm, prompts, store)),
    };

    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    info!("Listening on {}", cli.listen);

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
