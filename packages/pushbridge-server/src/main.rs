mod app;
mod bootstrap;
mod error;
mod relay;
mod routes;
mod state;

use crate::error::RelayResponse;
use crate::state::AppState;
use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(clap::Parser)]
#[command(name = "pushbridge-server")]
#[command(about = "Relays database change events to an FCM topic")]
struct CliArgs {
    /// Run a single invocation on this trigger payload (`-` reads stdin) and exit
    #[arg(long)]
    event_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let settings = bootstrap::config::relay_settings_from_env()?;
    let state = Arc::new(bootstrap::app::app_state(&settings)?);

    match args.event_file {
        Some(path) => {
            let response = run_once(&state, &path).await?;
            Ok(exit_code(&response))
        }
        None => {
            serve(state, settings.addr).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_once(state: &AppState, path: &Path) -> anyhow::Result<RelayResponse> {
    let raw = read_trigger(path).await?;
    let response = relay::invoke(state, &raw).await;
    println!("{}", serde_json::to_string_pretty(&response.to_json())?);
    Ok(response)
}

fn exit_code(response: &RelayResponse) -> ExitCode {
    if response.status.is_client_error() || response.status.is_server_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn read_trigger(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut raw = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut raw)
            .await
            .context("failed to read trigger payload from stdin")?;
        return Ok(raw);
    }
    tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read trigger payload from {}", path.display()))
}

async fn serve(state: Arc<AppState>, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = app::axum_app(state);
    let tcp_listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "pushbridge started");
    axum::serve(tcp_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
