// src/blockchain/models.rs
use ethers::types::{Address, Bytes, H256, U256};
use serde::Serialize;

// --- Records returned by the RPC adapter ---

/// The subset of a transaction receipt the tools report on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: H256,
    pub block_number: Option<u64>,
    pub from: Address,
    pub to: Option<Address>,
    pub gas_used: Option<U256>,
    pub status: Option<u64>,
}

/// Block header fields plus the number of transactions it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub number: Option<u64>,
    pub hash: Option<H256>,
    pub timestamp: u64,
    pub gas_limit: U256,
    pub gas_used: U256,
    pub transaction_count: usize,
}

/// Call parameters for `eth_estimateGas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasRequest {
    pub from: Address,
    pub to: Address,
    /// Amount in weibars (18 decimals).
    pub value: Option<U256>,
    pub data: Option<Bytes>,
}

/// Current fee market snapshot. Any field may be unavailable on a given relay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeData {
    pub gas_price: Option<U256>,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
}

// --- Tool output payloads ---
// Field order is the order clients see in the rendered JSON.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOutput {
    pub account_id: String,
    pub evm_address: String,
    pub balance: String,
    pub network: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptOutput {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
    pub from: String,
    pub to: Option<String>,
    pub gas_used: String,
    pub status: Option<u64>,
    pub network: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockOutput {
    pub number: Option<u64>,
    pub hash: Option<String>,
    pub timestamp: u64,
    pub gas_limit: String,
    pub gas_used: String,
    pub transactions: usize,
    pub network: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimateOutput {
    pub gas_limit: String,
    pub gas_price: String,
    pub estimated_cost: String,
    pub network: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfoOutput {
    pub network: String,
    pub chain_id: String,
    pub current_block: u64,
    pub gas_price: String,
    pub max_fee_per_gas: String,
    pub rpc_url: String,
}
