//! HTTP server bootstrap.

use anyhow::Result;
use strictly_escrow::{Registry, SystemClock, TracingSink};
use tracing::{info, instrument};

use crate::api::{AppState, router};
use crate::config::ServerConfig;

/// Serves the escrow API until the listener fails.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server exits
/// abnormally.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> Result<()> {
    let registry = Registry::new(
        config.escrow().clone(),
        config.ledger(),
        SystemClock,
        TracingSink,
    )?;
    let app = router(AppState::new(registry));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        address = %listener.local_addr()?,
        stake = config.escrow().stake_amount(),
        escrow = %config.escrow().escrow_account(),
        "Escrow server ready"
    );

    axum::serve(listener, app).await?;
    info!("Escrow server stopped");
    Ok(())
}
