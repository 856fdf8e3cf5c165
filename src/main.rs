//! reqecho entry point.
//!
//! `LOCAL_DEV=true` serves HTTP on `PORT` (default 8080); otherwise the
//! process polls the serverless runtime for load-balancer events.

use reqecho::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AdapterConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.mode {
        RunMode::LocalServer => tracing_subscriber::fmt().with_env_filter(filter).init(),
        // Serverless log sinks want one JSON object per line, no colors.
        RunMode::Event => tracing_subscriber::fmt()
            .json()
            .with_ansi(false)
            .with_env_filter(filter)
            .init(),
    }

    match config.mode {
        RunMode::LocalServer => {
            tracing::info!("Starting local server on {}", config.bind_addr());
            HttpServer::new(config).run().await
        }
        RunMode::Event => EventRunner::new().run().await,
    }
}
