//! # Tool dispatch
//!
//! Maps a `tools/call` (name, arguments) pair onto one of the five tool
//! handlers. [`call_tool`] is the only entry point and it never fails:
//! every error, and any panic raised by a handler, is turned into an
//! `Error: <message>` [`ToolResult`].

use std::panic::AssertUnwindSafe;
use std::str::FromStr;
use std::sync::Arc;

use ethers::types::{BlockId, BlockNumber, Bytes, H256, U256, U64};
use ethers::utils::{parse_ether, to_checksum};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    blockchain::{
        address::{format_address, resolve_address, AccountId},
        models::{
            BalanceOutput, BlockOutput, GasEstimateOutput, GasRequest, NetworkInfoOutput,
            ReceiptOutput,
        },
        networks::NetworkDescriptor,
        rpc::RpcClient,
    },
    error::{Result, ToolError},
    mcp::{protocol::ToolResult, tools},
    utils, AppState,
};

pub const RECEIPT_NOT_FOUND: &str = "Transaction receipt not found";
pub const BLOCK_NOT_FOUND: &str = "Block not found";
const UNKNOWN: &str = "unknown";

// --- Tool arguments ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct BalanceArgs {
    account_id: String,
    network: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ReceiptArgs {
    tx_hash: String,
    network: Option<String>,
}

/// `blockNumber` may arrive as a JSON number or as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockRef {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct BlockArgs {
    block_number: BlockRef,
    network: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct GasArgs {
    from: String,
    to: String,
    value: Option<String>,
    data: Option<String>,
    network: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct NetworkArgs {
    network: Option<String>,
}

/// Runs the named tool and renders its outcome as a single text item.
pub async fn call_tool(state: &AppState, name: &str, args: &Value) -> ToolResult {
    info!("Calling tool: {}", name);

    let outcome = AssertUnwindSafe(run_tool(state, name, args))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(text)) => ToolResult::text(text),
        Ok(Err(e)) => {
            warn!("Tool '{}' failed: {}", name, e);
            ToolResult::error(e)
        }
        Err(_) => {
            error!("Tool '{}' panicked", name);
            ToolResult::error(format!("Internal error while running {}", name))
        }
    }
}

async fn run_tool(state: &AppState, name: &str, args: &Value) -> Result<String> {
    // `arguments` is optional in tools/call
    let empty = Value::Object(Default::default());
    let args = if args.is_null() { &empty } else { args };

    match name {
        tools::GET_ACCOUNT_BALANCE => get_account_balance(state, utils::parse_args(args)?).await,
        tools::GET_TRANSACTION_RECEIPT => {
            get_transaction_receipt(state, utils::parse_args(args)?).await
        }
        tools::GET_BLOCK_INFO => get_block_info(state, utils::parse_args(args)?).await,
        tools::ESTIMATE_GAS => estimate_gas(state, utils::parse_args(args)?).await,
        tools::GET_NETWORK_INFO => get_network_info(state, utils::parse_args(args)?).await,
        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

fn connect<'a>(
    state: &'a AppState,
    network: Option<&str>,
) -> Result<(&'a NetworkDescriptor, Arc<dyn RpcClient>)> {
    let descriptor = state.networks.resolve(network)?;
    let client = state.evm_client.for_network(descriptor.network)?;
    Ok((descriptor, client))
}

fn render<T: Serialize>(payload: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(payload)?)
}

fn gwei_or_unknown(amount: Option<U256>) -> Result<String> {
    match amount {
        Some(amount) => Ok(format!("{} gwei", utils::format_gwei(amount)?)),
        None => Ok(UNKNOWN.to_string()),
    }
}

// Empty strings are treated the same as an absent optional argument.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn get_account_balance(state: &AppState, args: BalanceArgs) -> Result<String> {
    let (descriptor, client) = connect(state, args.network.as_deref())?;

    // Balance lookups only accept `shard.realm.num` identifiers.
    let account: AccountId = args.account_id.parse()?;
    let address = account.to_evm_address();
    let balance = client.get_balance(address).await?;

    render(&BalanceOutput {
        account_id: args.account_id,
        evm_address: format_address(&address),
        balance: format!("{} HBAR", utils::format_hbar(balance)?),
        network: descriptor.network.to_string(),
    })
}

async fn get_transaction_receipt(state: &AppState, args: ReceiptArgs) -> Result<String> {
    let (descriptor, client) = connect(state, args.network.as_deref())?;

    let hash = H256::from_str(&args.tx_hash).map_err(|_| {
        ToolError::invalid(format!("Invalid transaction hash: {}", args.tx_hash))
    })?;

    let Some(receipt) = client.get_transaction_receipt(hash).await? else {
        return Ok(RECEIPT_NOT_FOUND.to_string());
    };

    render(&ReceiptOutput {
        transaction_hash: format!("{:?}", receipt.transaction_hash),
        block_number: receipt.block_number,
        from: to_checksum(&receipt.from, None),
        to: receipt.to.map(|to| to_checksum(&to, None)),
        gas_used: receipt.gas_used.unwrap_or_default().to_string(),
        status: receipt.status,
        network: descriptor.network.to_string(),
    })
}

/// Parses a block reference: a tag, a decimal or `0x` number, or a 32-byte hash.
fn parse_block_id(block: &BlockRef) -> Result<BlockId> {
    let text = match block {
        BlockRef::Number(n) => return Ok(BlockId::Number(BlockNumber::Number(U64::from(*n)))),
        BlockRef::Text(text) => text.trim(),
    };

    let invalid = || ToolError::invalid(format!("Invalid block number: {}", text));

    let tag = match text {
        "latest" => Some(BlockNumber::Latest),
        "earliest" => Some(BlockNumber::Earliest),
        "pending" => Some(BlockNumber::Pending),
        "safe" => Some(BlockNumber::Safe),
        "finalized" => Some(BlockNumber::Finalized),
        _ => None,
    };
    if let Some(tag) = tag {
        return Ok(BlockId::Number(tag));
    }

    if let Some(hex_digits) = text.strip_prefix("0x") {
        if hex_digits.len() == 64 {
            let hash = H256::from_str(text).map_err(|_| invalid())?;
            return Ok(BlockId::Hash(hash));
        }
        let number = u64::from_str_radix(hex_digits, 16).map_err(|_| invalid())?;
        return Ok(BlockId::Number(BlockNumber::Number(U64::from(number))));
    }

    let number = text.parse::<u64>().map_err(|_| invalid())?;
    Ok(BlockId::Number(BlockNumber::Number(U64::from(number))))
}

async fn get_block_info(state: &AppState, args: BlockArgs) -> Result<String> {
    let (descriptor, client) = connect(state, args.network.as_deref())?;
    let block_id = parse_block_id(&args.block_number)?;

    let Some(block) = client.get_block(block_id).await? else {
        return Ok(BLOCK_NOT_FOUND.to_string());
    };

    render(&BlockOutput {
        number: block.number,
        hash: block.hash.map(|h| format!("{:?}", h)),
        timestamp: block.timestamp,
        gas_limit: block.gas_limit.to_string(),
        gas_used: block.gas_used.to_string(),
        transactions: block.transaction_count,
        network: descriptor.network.to_string(),
    })
}

async fn estimate_gas(state: &AppState, args: GasArgs) -> Result<String> {
    let (descriptor, client) = connect(state, args.network.as_deref())?;

    let value = non_empty(args.value)
        .map(|v| {
            parse_ether(&v).map_err(|e| ToolError::invalid(format!("Invalid value '{}': {}", v, e)))
        })
        .transpose()?;
    let data = non_empty(args.data)
        .map(|d| {
            Bytes::from_str(&d).map_err(|e| ToolError::invalid(format!("Invalid data '{}': {}", d, e)))
        })
        .transpose()?;

    let request = GasRequest {
        from: resolve_address(&args.from)?,
        to: resolve_address(&args.to)?,
        value,
        data,
    };

    let (gas, fees) = futures::try_join!(client.estimate_gas(&request), client.get_fee_data())?;

    let estimated_cost = match fees.gas_price {
        Some(price) => {
            let cost = gas
                .checked_mul(price)
                .ok_or_else(|| ToolError::invalid("Fee calculation overflow"))?;
            format!("{} HBAR", utils::format_hbar(cost)?)
        }
        None => UNKNOWN.to_string(),
    };

    render(&GasEstimateOutput {
        gas_limit: gas.to_string(),
        gas_price: gwei_or_unknown(fees.gas_price)?,
        estimated_cost,
        network: descriptor.network.to_string(),
    })
}

async fn get_network_info(state: &AppState, args: NetworkArgs) -> Result<String> {
    let (descriptor, client) = connect(state, args.network.as_deref())?;

    let (current_block, fees, chain_id) = futures::try_join!(
        client.get_block_number(),
        client.get_fee_data(),
        client.get_chain_id(),
    )?;

    render(&NetworkInfoOutput {
        network: descriptor.network.to_string(),
        chain_id: chain_id.to_string(),
        current_block,
        gas_price: gwei_or_unknown(fees.gas_price)?,
        max_fee_per_gas: gwei_or_unknown(fees.max_fee_per_gas)?,
        rpc_url: descriptor.rpc_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> BlockRef {
        BlockRef::Text(s.to_string())
    }

    #[test]
    fn test_parse_block_tags_and_numbers() {
        assert_eq!(
            parse_block_id(&text("latest")).unwrap(),
            BlockId::Number(BlockNumber::Latest)
        );
        assert_eq!(
            parse_block_id(&text("finalized")).unwrap(),
            BlockId::Number(BlockNumber::Finalized)
        );
        assert_eq!(
            parse_block_id(&text("1234")).unwrap(),
            BlockId::Number(BlockNumber::Number(U64::from(1234)))
        );
        assert_eq!(
            parse_block_id(&text("0x4d2")).unwrap(),
            BlockId::Number(BlockNumber::Number(U64::from(1234)))
        );
        assert_eq!(
            parse_block_id(&BlockRef::Number(7)).unwrap(),
            BlockId::Number(BlockNumber::Number(U64::from(7)))
        );
    }

    #[test]
    fn test_parse_block_hash() {
        let hash = format!("0x{}", "ab".repeat(32));
        assert_eq!(
            parse_block_id(&text(&hash)).unwrap(),
            BlockId::Hash(H256::repeat_byte(0xab))
        );
    }

    #[test]
    fn test_parse_block_rejects_garbage() {
        for input in ["", "newest", "-1", "0xzz", "12.5"] {
            assert!(
                matches!(parse_block_id(&text(input)), Err(ToolError::InvalidArguments(_))),
                "{} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_gwei_or_unknown() {
        assert_eq!(gwei_or_unknown(None).unwrap(), "unknown");
        assert_eq!(
            gwei_or_unknown(Some(U256::from(710_000_000_000u64))).unwrap(),
            "710.0 gwei"
        );
    }
}
