// src/blockchain/mod.rs

pub mod address;
pub mod client;
pub mod models;
pub mod networks;
pub mod rpc;

pub use address::AccountId;
pub use client::EvmClient;
pub use networks::{HederaNetwork, NetworkDescriptor, NetworkRegistry};
pub use rpc::RpcClient;

// Re-export commonly used types
pub use ethers::types::{Address, H256, U256};
