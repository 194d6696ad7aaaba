//! Binary crate for the Singapore weather service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and dispatching commands
//! - Rendering human-readable weather reports
//! - The keep-alive endpoint for process monitors

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;
mod serve;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
