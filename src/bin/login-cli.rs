use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use retry_interceptor::auth::Credentials;
use retry_interceptor::client::{ClientError, LoginClient};
use retry_interceptor::config::{load_or_default, ConfigError};
use retry_interceptor::lifecycle::signals::spawn_ctrl_c_handler;
use retry_interceptor::observability::logging;
use retry_interceptor::Shutdown;

#[derive(Parser)]
#[command(name = "login-cli")]
#[command(about = "Log in against the auth server, retrying internal server errors", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the auth server.
    #[arg(short, long)]
    url: Option<String>,

    /// Retries allowed after the first attempt.
    #[arg(short, long)]
    retry_limit: Option<u32>,

    #[arg(short, long)]
    email: String,

    #[arg(short, long)]
    password: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => {
            println!("You are logged in");
            ExitCode::SUCCESS
        }
        Err(RunError::Client(ClientError::Rejected(failure))) => {
            eprintln!("Login failed ({}): {}", failure.status(), failure.reason());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

async fn run(cli: Cli) -> Result<(), RunError> {
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.client.base_url = url;
    }
    if let Some(limit) = cli.retry_limit {
        config.retry.retry_limit = limit;
    }

    logging::init_logging(&config.observability);

    let client = LoginClient::from_config(&config)?;
    tracing::debug!(
        url = %client.login_url(),
        retry_limit = client.policy().retry_limit(),
        "Sending login"
    );

    let shutdown = Shutdown::new();
    let abandoned = shutdown.signalled();
    spawn_ctrl_c_handler(shutdown);

    let credentials = Credentials::new(cli.email, cli.password);
    client.login_until(&credentials, abandoned).await?;
    Ok(())
}
