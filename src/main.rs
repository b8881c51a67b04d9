//! Mock authentication server.
//!
//! Serves `POST /login` and fails a configurable share of logins with
//! `500 Internal Server Error` so clients can exercise their retry path.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use retry_interceptor::config::load_or_default;
use retry_interceptor::lifecycle::signals::spawn_ctrl_c_handler;
use retry_interceptor::observability::{logging, metrics};
use retry_interceptor::{AuthServer, Shutdown};

#[derive(Parser)]
#[command(name = "auth-server")]
#[command(about = "Mock authentication endpoint with random fault injection", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Fail one in N logins with a 500 (0 = never, 1 = always).
    #[arg(long)]
    fault_chance: Option<u32>,

    /// Seed for fault injection.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }
    if let Some(chance) = cli.fault_chance {
        config.faults.random_fault_chance = chance;
    }
    if cli.seed.is_some() {
        config.faults.seed = cli.seed;
    }

    logging::init_logging(&config.observability);
    tracing::info!("auth-server v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        fault_chance = config.faults.random_fault_chance,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_ctrl_c_handler(shutdown.clone());

    let server = AuthServer::from_config(&config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
