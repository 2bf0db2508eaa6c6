// src/lib.rs

use std::sync::Arc;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod mcp;
pub mod utils;

pub use error::ToolError;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Network descriptors, fixed for the lifetime of the process
    pub networks: Arc<blockchain::networks::NetworkRegistry>,
    /// One RPC client per network
    pub evm_client: blockchain::client::EvmClient,
}

impl AppState {
    /// Builds the registry and connects one ethers provider per network.
    pub fn from_config(config: config::Config) -> anyhow::Result<Self> {
        let networks = blockchain::networks::NetworkRegistry::from_config(&config);
        let evm_client = blockchain::client::EvmClient::connect(&networks, config.rpc_timeout)?;
        Ok(Self {
            config,
            networks: Arc::new(networks),
            evm_client,
        })
    }
}
