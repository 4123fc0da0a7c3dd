//! Pipecheck API server entry point.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use pipecheck_api::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    // RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .init();

    tracing::info!(
        bind = %config.bind,
        error_status = ?config.error_status,
        "Starting Pipecheck API"
    );

    if let Err(e) = pipecheck_api::serve(config).await {
        tracing::error!("Server failed: {e}");
        return Err(e.into());
    }

    Ok(())
}
