//! Strictly Stakes - CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use strictly_server::ServerConfig;
use strictly_server::cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(&config, host, port).await,
        Command::Demo { config } => run_demo(&config),
    }
}

/// Run the HTTP escrow server
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_server(config: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = ServerConfig::load_or_default(Some(config))?.with_bind(host, port);
    info!("Starting Strictly Stakes server");
    strictly_server::serve(config).await
}

/// Run the scripted demo and print events as JSON lines
#[instrument(skip_all, fields(config_path = %config.display()))]
fn run_demo(config: &Path) -> Result<()> {
    let config = ServerConfig::load_or_default(Some(config))?;
    let report = strictly_server::demo::run(&config)?;

    for event in report.events() {
        println!("{}", serde_json::to_string(event)?);
    }
    println!("{}", serde_json::to_string(report.balances())?);
    info!(events = report.events().len(), "Demo complete");
    Ok(())
}
