//! Quejas CLI Entry Point
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.
//!
//! Usage:
//!   quejas login        - Log in and store the session token
//!   quejas complaints   - List, inspect and resolve complaints
//!   quejas ratings      - Ratings, statistics and NPS
//!   quejas upload       - Upload images to object storage

use clap::Parser;
use quejas_cli::{handler, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.verbose {
        init_logging();
    }

    if let Err(e) = handler::run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quejas_cli=debug,quejas_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
