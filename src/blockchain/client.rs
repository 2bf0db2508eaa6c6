//! Per-network RPC client pool.
//!
//! One [`RpcClient`] is created per Hedera network when the server starts;
//! tool handlers look them up by network and never build providers
//! themselves.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::blockchain::networks::{HederaNetwork, NetworkRegistry};
use crate::blockchain::rpc::{EthersRpcClient, RpcClient};
use crate::error::ToolError;

/// Client for interacting with the Hedera JSON-RPC relays
#[derive(Clone)]
pub struct EvmClient {
    clients: HashMap<HederaNetwork, Arc<dyn RpcClient>>,
}

impl EvmClient {
    /// Create an ethers-backed client for every network in the registry
    pub fn connect(registry: &NetworkRegistry, timeout: Duration) -> Result<Self> {
        let mut clients: HashMap<HederaNetwork, Arc<dyn RpcClient>> = HashMap::new();

        for descriptor in registry.iter() {
            let client = EthersRpcClient::connect(&descriptor.rpc_url, timeout)
                .with_context(|| format!("Failed to initialize provider for {}", descriptor.name))?;
            info!(
                "Configured {} (chain {}) at {}",
                descriptor.name, descriptor.chain_id, descriptor.rpc_url
            );
            clients.insert(descriptor.network, Arc::new(client));
        }

        Ok(Self { clients })
    }

    /// Build a client pool from pre-made clients.
    pub fn from_clients(
        clients: impl IntoIterator<Item = (HederaNetwork, Arc<dyn RpcClient>)>,
    ) -> Self {
        Self {
            clients: clients.into_iter().collect(),
        }
    }

    /// Get the client for the specified network
    pub fn for_network(&self, network: HederaNetwork) -> Result<Arc<dyn RpcClient>, ToolError> {
        self.clients.get(&network).cloned().ok_or_else(|| {
            ToolError::transport(format!("No provider available for network: {}", network))
        })
    }
}
