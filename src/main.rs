//! Employee API proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                 EMPLOYEE PROXY                   │
//!                        │                                                  │
//!   Client Request       │  ┌──────────┐   ┌──────────┐   ┌─────────────┐   │
//!   ─────────────────────┼─▶│   http   │──▶│ employees│──▶│ resilience  │   │
//!                        │  │ handlers │   │ service  │   │ retry/backoff│  │
//!                        │  └──────────┘   └────┬─────┘   └──────┬──────┘   │
//!                        │                      │ query          │          │
//!                        │                      ▼                ▼          │
//!   Client Response      │  ┌──────────┐   ┌──────────┐   ┌─────────────┐   │   Upstream
//!   ◀────────────────────┼──│  error   │◀──│ envelope │◀──│  upstream   │◀──┼── Employee
//!                        │  │ mapping  │   │  unwrap  │   │   client    │   │   Store
//!                        │  └──────────┘   └──────────┘   └─────────────┘   │
//!                        │                                                  │
//!                        │  config · observability · lifecycle              │
//!                        └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use employee_proxy::config::load_or_default;
use employee_proxy::lifecycle::signals::shutdown_signal;
use employee_proxy::observability::{logging, metrics};
use employee_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "employee-proxy")]
#[command(about = "HTTP proxy for the upstream employee API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "EMPLOYEE_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("employee-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        max_attempts = config.retries.max_attempts,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
