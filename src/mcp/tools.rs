//! Tool catalog returned by `tools/list`.

use serde_json::{json, Value};

use crate::blockchain::networks::HederaNetwork;

pub const GET_ACCOUNT_BALANCE: &str = "get_account_balance";
pub const GET_TRANSACTION_RECEIPT: &str = "get_transaction_receipt";
pub const GET_BLOCK_INFO: &str = "get_block_info";
pub const ESTIMATE_GAS: &str = "estimate_gas";
pub const GET_NETWORK_INFO: &str = "get_network_info";

/// Names of every tool, in catalog order.
pub const TOOL_NAMES: [&str; 5] = [
    GET_ACCOUNT_BALANCE,
    GET_TRANSACTION_RECEIPT,
    GET_BLOCK_INFO,
    ESTIMATE_GAS,
    GET_NETWORK_INFO,
];

fn network_property() -> Value {
    let keys: Vec<&str> = HederaNetwork::ALL.iter().map(|n| n.as_str()).collect();
    json!({
        "type": "string",
        "description": format!(
            "Network to query ({}). Default: {}",
            keys.join(", "),
            HederaNetwork::DEFAULT
        ),
        "enum": keys
    })
}

/// JSON definitions of all available tools.
pub fn tool_definitions() -> Value {
    let network = network_property();
    json!([
        {
            "name": GET_ACCOUNT_BALANCE,
            "description": "Get the HBAR balance of a Hedera account using JSON-RPC",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "accountId": {"type": "string", "description": "The Hedera account ID (e.g., 0.0.12345)"},
                    "network": network
                },
                "required": ["accountId"]
            }
        },
        {
            "name": GET_TRANSACTION_RECEIPT,
            "description": "Get transaction receipt by transaction hash",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "txHash": {"type": "string", "description": "The transaction hash (0x...)"},
                    "network": network
                },
                "required": ["txHash"]
            }
        },
        {
            "name": GET_BLOCK_INFO,
            "description": "Get information about a specific block",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "blockNumber": {"type": "string", "description": "Block number, block hash or a tag such as 'latest'"},
                    "network": network
                },
                "required": ["blockNumber"]
            }
        },
        {
            "name": ESTIMATE_GAS,
            "description": "Estimate gas for a transaction",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "from": {"type": "string", "description": "From address (Hedera account ID or 0x address)"},
                    "to": {"type": "string", "description": "To address (Hedera account ID or 0x address)"},
                    "value": {"type": "string", "description": "Amount in HBAR to send (optional)"},
                    "data": {"type": "string", "description": "Transaction data for contract calls (optional)"},
                    "network": network
                },
                "required": ["from", "to"]
            }
        },
        {
            "name": GET_NETWORK_INFO,
            "description": "Get current network information (chain ID, gas price, block number)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "network": network
                },
                "required": []
            }
        }
    ])
}
