//! framegate — embedding-friendly reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  FRAMEGATE                   │
//!                    │                                              │
//!  /proxy/{id}/* ────┼─▶ resolver ─▶ header     ─▶ forwarder ───────┼──▶ target app
//!                    │   (store)     sanitizer     (one attempt)    │
//!  response ◀────────┼── header    ◀─ rewriter  ◀───────────────────┼─── response
//!                    │   sanitizer    (html/css)                    │
//!                    │                                              │
//!  /_rproxy/*  ──────┼─▶ management API ─▶ proxy store (json file)  │
//!  /*          ──────┼─▶ console assets                             │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use framegate::config;
use framegate::lifecycle::Shutdown;
use framegate::observability::metrics;
use framegate::HttpServer;

#[derive(Parser)]
#[command(name = "framegate", about = "Embedding-friendly reverse proxy", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "framegate.toml")]
    config: PathBuf,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_or_default(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "framegate={},tower_http=warn",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        store_path = %config.store.path,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(err) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %err,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
