mod cli;
mod config;
mod export;
mod http;
mod state;
mod wiring;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Mode};
use crate::config::ConfigError;
use crate::export::{ExportError, ExportOutcome, export_comments};
use crate::http::HttpError;
use crate::state::AppState;
use crate::wiring::WiringError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid cli: {0}")]
    InvalidCli(String),
    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("http error: {0}")]
    Http(#[from] HttpError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    if let Err(err) = cli.validate() {
        err.exit();
    }
    config::load_dotenv()?;
    let config = config::AppConfig::from_env()?;
    let state = wiring::build_state(config)?;

    let result = match (cli.mode, cli.url.as_deref()) {
        (Mode::Fetch, Some(url)) => run_fetch(&state, url, &cli.output).await,
        (Mode::Fetch, None) => Err(AppError::InvalidCli("fetch mode requires --url".to_string())),
        (Mode::Serve, _) => run_serve(state).await,
    };
    if let Err(err) = &result {
        error!(error = %err, "tubedigest failed");
    }
    result
}

async fn run_fetch(state: &AppState, url: &str, output: &std::path::Path) -> Result<(), AppError> {
    match export_comments(&state.youtube, &state.config.api_key, url).await? {
        ExportOutcome::Empty => {
            warn!("no comments found for this video; no document written");
        }
        ExportOutcome::Document { bytes, total } => {
            tokio::fs::write(output, &bytes).await?;
            info!(total, output = %output.display(), bytes = bytes.len(), "document written");
        }
    }
    Ok(())
}

async fn run_serve(state: AppState) -> Result<(), AppError> {
    let addr = state.config.http_addr;
    info!(%addr, "http server starting");
    tokio::select! {
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
        res = http::serve(addr, state) => {
            res?;
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install ctrl-c handler");
    }
}
