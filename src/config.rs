// src/config.rs

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

use crate::blockchain::networks::HederaNetwork;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;

// A struct to hold all configuration, loaded once at startup from the environment / .env file.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub port: u16,

    /// Per-network JSON-RPC endpoint overrides. `None` keeps the public hashio relay.
    pub mainnet_rpc_url: Option<String>,
    pub testnet_rpc_url: Option<String>,
    pub previewnet_rpc_url: Option<String>,

    /// Upper bound for a single JSON-RPC call.
    pub rpc_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            mainnet_rpc_url: None,
            testnet_rpc_url: None,
            previewnet_rpc_url: None,
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Returns the endpoint override configured for `network`, if any.
    pub fn rpc_url_override(&self, network: HederaNetwork) -> Option<&str> {
        match network {
            HederaNetwork::Mainnet => self.mainnet_rpc_url.as_deref(),
            HederaNetwork::Testnet => self.testnet_rpc_url.as_deref(),
            HederaNetwork::Previewnet => self.previewnet_rpc_url.as_deref(),
        }
    }

    /// Loads configuration from environment variables. `PORT` is only read
    /// when the HTTP transport is selected.
    pub fn from_env(http_mode: bool) -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        let port = if http_mode {
            parse_port(env::var("PORT").ok().as_deref())?
        } else {
            DEFAULT_PORT
        };

        Ok(Config {
            port,
            mainnet_rpc_url: rpc_url_from_env("HEDERA_MAINNET_RPC_URL")?,
            testnet_rpc_url: rpc_url_from_env("HEDERA_TESTNET_RPC_URL")?,
            previewnet_rpc_url: rpc_url_from_env("HEDERA_PREVIEWNET_RPC_URL")?,
            rpc_timeout: parse_rpc_timeout(env::var("RPC_TIMEOUT_SECS").ok().as_deref())?,
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw {
        Some(raw) => raw.trim().parse().context("PORT must be a valid number"),
        None => Ok(DEFAULT_PORT),
    }
}

fn parse_rpc_timeout(raw: Option<&str>) -> Result<Duration> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS));
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("RPC_TIMEOUT_SECS must be a valid number of seconds")?;
    if secs == 0 {
        bail!("RPC_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn rpc_url_from_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            let value = value.trim().to_string();
            Url::parse(&value).with_context(|| format!("{} must be a valid URL", key))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}
