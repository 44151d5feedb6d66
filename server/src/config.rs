use std::net::SocketAddr;

use anyhow::{Context, Result};

const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Server configuration: where to listen plus the upstream client config.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub client: aggregator::Config,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let client = aggregator::Config::from_env()?;
        let bind = std::env::var("JOBCIPHER_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("JOBCIPHER_BIND must be a socket address, got '{bind}'"))?;

        Ok(Self { bind, client })
    }
}
