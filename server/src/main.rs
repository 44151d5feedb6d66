//! JobCipher Session Server
//!
//! Keeps one dashboard session in memory: upload a résumé to search every
//! job source, then narrow the results with filters over a REST API.

mod config;
mod errors;
mod routes;
mod state;

use aggregator::{JobCipherClient, logging};
use anyhow::Result;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    logging::init(false, &config.client.rust_log);

    info!("🚀 Starting JobCipher Session Server v{}", env!("CARGO_PKG_VERSION"));
    info!(endpoints = ?config.client.endpoints, "Upstream services");

    let state = AppState::new(JobCipherClient::new(config.client.endpoints));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("🌐 Server running at http://{}", config.bind);
    info!("   Try: curl -F file=@resume.pdf 'http://{}/resume'", config.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
