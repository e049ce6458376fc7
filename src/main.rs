//! Bee AI - grounded question answering about bees, plants and honey
//!
//! # Usage
//!
//! ```bash
//! # Serve the chat API (GEMINI_API_KEY must be set)
//! cargo run --release
//!
//! # Check retrieval against the corpus without a model
//! ./bee-ai search "when does lavender bloom"
//!
//! # Print the prompt a question would produce
//! ./bee-ai prompt "when does lavender bloom"
//! ```
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY` / `GOOGLE_API_KEY`: model credential (unless set in config)
//! - `BEE_AI_CONFIG`: path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use bee_ai::api::{create_app, ApiState};
use bee_ai::config::AppConfig;
use bee_ai::context::{KnowledgeStore, RelevanceRanker};
use bee_ai::llm::{assemble_prompt, GeminiBackend, ResponseGenerator};
use bee_ai::pipeline::PipelineCoordinator;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "bee-ai")]
#[command(about = "Bee AI question answering service")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides BEE_AI_CONFIG and ./bee_ai.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:5000")
    #[arg(short, long)]
    addr: Option<String>,

    /// Override the knowledge corpus path (JSONL)
    #[arg(short, long, value_name = "FILE")]
    knowledge: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run the HTTP server (default)
    Serve,

    /// Rank corpus entries for a query and print them with their scores
    Search {
        /// Free-text query
        query: String,
        /// Override knowledge.max_results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print the prompt that would be sent to the model for a question
    Prompt {
        /// User question
        question: String,
    },
}

// ============================================================================
// Startup
// ============================================================================

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Load config and apply CLI overrides.
fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let config = AppConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.addr.as_deref(), args.knowledge.as_deref());

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn load_store(config: &AppConfig) -> Result<KnowledgeStore> {
    let path = &config.knowledge.path;
    KnowledgeStore::load(path)
        .with_context(|| format!("Failed to load knowledge base from {}", path.display()))
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_search(config: &AppConfig, query: &str, limit: Option<usize>) -> Result<()> {
    let store = load_store(config)?;
    let ranker = RelevanceRanker::new(limit.unwrap_or(config.knowledge.max_results));

    let ranked = ranker.rank_scored(query, &store);
    if ranked.is_empty() {
        println!("No matching entries for {query:?}");
        return Ok(());
    }

    for (i, scored) in ranked.iter().enumerate() {
        println!("{:>2}. [{:.1}] Q: {}", i + 1, scored.score, scored.entry.question());
        println!("          A: {}", scored.entry.answer());
    }
    Ok(())
}

fn run_prompt(config: &AppConfig, question: &str) -> Result<()> {
    let store = load_store(config)?;
    let ranker = RelevanceRanker::new(config.knowledge.max_results);

    let ranked = ranker.rank(question, &store);
    println!("{}", assemble_prompt(question, &ranked));
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let store = Arc::new(load_store(&config)?);
    info!("✓ Knowledge base loaded ({} entries)", store.len());

    let backend = GeminiBackend::from_config(&config.model).context("Failed to initialize model backend")?;
    info!("✓ Model backend ready ({})", backend.model());

    let pipeline = PipelineCoordinator::new(
        store,
        RelevanceRanker::new(config.knowledge.max_results),
        ResponseGenerator::new(Arc::new(backend)),
    );
    let app = create_app(ApiState::new(pipeline), &config.server);

    let server_addr: SocketAddr = config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server.addr))?;
    let listener = tokio::net::TcpListener::bind(server_addr)
        .await
        .with_context(|| format!("Failed to bind to {server_addr}"))?;

    info!("✓ HTTP server listening on {}", server_addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await;

    match result {
        Ok(()) => {
            info!("Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(anyhow::anyhow!("HTTP server error: {}", e))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the key may already be in the environment.
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let config = load_config(&args)?;

    match args.command {
        Some(SubCommand::Search { ref query, limit }) => run_search(&config, query, limit),
        Some(SubCommand::Prompt { ref question }) => run_prompt(&config, question),
        Some(SubCommand::Serve) | None => run_server(config).await,
    }
}
