//! HTTP server binary for pdf2quiz.
//!
//! A thin shim over the library crate that maps CLI flags to `QuizConfig`,
//! resolves the LLM provider once, and serves the upload router.

use anyhow::{Context, Result};
use clap::Parser;
use pdf2quiz::{server, QuizConfig, QuizGenerator};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Serve on the default address with an auto-detected provider
  pdf2quiz

  # Local model through Ollama
  pdf2quiz --provider ollama --model llama3.3

  # Use OpenAI on a custom port
  pdf2quiz --provider openai --model gpt-4.1-mini --addr 127.0.0.1:8080

  # Request a quiz
  curl -F "pdf=@notes.pdf;type=application/pdf" http://localhost:3000/api/upload

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  GEMINI_API_KEY          Google Gemini API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID
  RUST_LOG                Log filter, e.g. pdf2quiz=debug,tower_http=info

A .env file in the working directory is loaded on startup.
"#;

/// Serve multiple-choice quiz generation from uploaded PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2quiz",
    version,
    about = "Generate multiple-choice quizzes from uploaded PDFs using LLMs",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "PDF2QUIZ_ADDR", default_value = "0.0.0.0:3000")]
    addr: SocketAddr,

    /// LLM model ID.
    #[arg(long, env = "EDGEQUAKE_MODEL", default_value = pdf2quiz::config::DEFAULT_MODEL)]
    model: String,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(
        long,
        env = "EDGEQUAKE_PROVIDER",
        long_help = "LLM provider. Auto-detected from API key env vars if not set."
    )]
    provider: Option<String>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "PDF2QUIZ_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Max LLM output tokens.
    #[arg(long, env = "PDF2QUIZ_MAX_TOKENS", default_value_t = 2000)]
    max_tokens: usize,

    /// Nucleus-sampling parameter (0.0–1.0).
    #[arg(long, env = "PDF2QUIZ_TOP_P", default_value_t = 1.0)]
    top_p: f32,

    /// Deadline for one completion call, in seconds.
    #[arg(long, env = "PDF2QUIZ_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Pipeline ─────────────────────────────────────────────────────────
    let mut builder = QuizConfig::builder()
        .model(cli.model)
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .top_p(cli.top_p)
        .api_timeout_secs(cli.api_timeout);
    if let Some(provider) = cli.provider {
        builder = builder.provider_name(provider);
    }
    let config = builder.build().context("Invalid configuration")?;

    let generator =
        QuizGenerator::from_config(config).context("Failed to initialise the LLM provider")?;
    let app = server::router(Arc::new(generator));

    // ── Serve ────────────────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(cli.addr)
        .await
        .with_context(|| format!("Failed to bind {}", cli.addr))?;
    info!("Listening on http://{}", cli.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed.
        std::future::pending::<()>().await;
    }
}
