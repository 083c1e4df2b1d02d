//! Standalone relay service.
//!
//! Deploy next to the console's web build (or run locally for the desktop
//! build) so ticketing API calls have a same-origin hop.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

#[path = "../infra/relay.rs"]
mod relay;

const DEFAULT_PORT: u16 = 8787;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port = std::env::var("RELAY_PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(target: "relay", %addr, "relay listening");
    axum::serve(listener, relay::router()).await?;
    Ok(())
}
