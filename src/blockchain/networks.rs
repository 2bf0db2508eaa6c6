//! Hedera network registry.
//!
//! The relay exposes three networks. Each maps to a fixed chain id, a
//! default hashio endpoint and a display name; the endpoint may be
//! replaced once at startup through [`Config`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::Config;
use crate::error::ToolError;

/// Supported Hedera networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HederaNetwork {
    Mainnet,
    Testnet,
    Previewnet,
}

impl HederaNetwork {
    /// All networks, in the order they are advertised to clients.
    pub const ALL: [HederaNetwork; 3] = [Self::Mainnet, Self::Testnet, Self::Previewnet];

    /// Network used when a request does not name one.
    pub const DEFAULT: HederaNetwork = Self::Testnet;

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Previewnet => "previewnet",
        }
    }

    pub const fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 295,
            Self::Testnet => 296,
            Self::Previewnet => 297,
        }
    }

    pub const fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://mainnet.hashio.io/api",
            Self::Testnet => "https://testnet.hashio.io/api",
            Self::Previewnet => "https://previewnet.hashio.io/api",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Mainnet => "Hedera Mainnet",
            Self::Testnet => "Hedera Testnet",
            Self::Previewnet => "Hedera Previewnet",
        }
    }
}

impl fmt::Display for HederaNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HederaNetwork {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| ToolError::UnknownNetwork(s.to_string()))
    }
}

/// Connection details for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub network: HederaNetwork,
    pub chain_id: u64,
    pub rpc_url: String,
    pub name: String,
}

impl NetworkDescriptor {
    fn new(network: HederaNetwork, rpc_url: &str) -> Self {
        Self {
            network,
            chain_id: network.chain_id(),
            rpc_url: rpc_url.to_string(),
            name: network.display_name().to_string(),
        }
    }
}

/// Read-only table of network descriptors, one per [`HederaNetwork`].
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    descriptors: [NetworkDescriptor; 3],
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self {
            descriptors: HederaNetwork::ALL.map(|n| NetworkDescriptor::new(n, n.default_rpc_url())),
        }
    }
}

impl NetworkRegistry {
    /// Builds the registry, applying any endpoint overrides from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            descriptors: HederaNetwork::ALL.map(|n| {
                let url = config.rpc_url_override(n).unwrap_or(n.default_rpc_url());
                NetworkDescriptor::new(n, url)
            }),
        }
    }

    pub fn get(&self, network: HederaNetwork) -> &NetworkDescriptor {
        // descriptors are laid out in `HederaNetwork::ALL` order
        let index = match network {
            HederaNetwork::Mainnet => 0,
            HederaNetwork::Testnet => 1,
            HederaNetwork::Previewnet => 2,
        };
        &self.descriptors[index]
    }

    /// Resolves a caller-supplied network key. Absent or empty keys select
    /// the default network; anything else must name a known network.
    pub fn resolve(&self, key: Option<&str>) -> Result<&NetworkDescriptor, ToolError> {
        match key {
            None | Some("") => Ok(self.get(HederaNetwork::DEFAULT)),
            Some(key) => key.parse().map(|network| self.get(network)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        self.descriptors.iter()
    }
}
