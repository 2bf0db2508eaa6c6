//! JSON-RPC capability used by the tool handlers.
//!
//! [`RpcClient`] is the seam between tool dispatch and the relay. The
//! production implementation, [`EthersRpcClient`], wraps an ethers
//! [`Provider`]; tests substitute their own implementations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use ethers::{
    providers::{Http, JsonRpcClient, Middleware, Provider},
    types::{
        transaction::eip2718::TypedTransaction, Address, Block, BlockId, BlockNumber,
        TransactionReceipt, TransactionRequest, H256, U256, U64,
    },
};
use tracing::debug;

use crate::blockchain::models::{BlockSummary, FeeData, GasRequest, Receipt};
use crate::error::{Result, ToolError};

/// Priority fee assumed when the relay cannot report one (1 gwei).
const FALLBACK_PRIORITY_FEE: u64 = 1_000_000_000;

#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Balance in weibars at the latest block.
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// `None` when the transaction is unknown or still pending.
    async fn get_transaction_receipt(&self, hash: H256) -> Result<Option<Receipt>>;

    async fn get_block(&self, block: BlockId) -> Result<Option<BlockSummary>>;

    async fn estimate_gas(&self, request: &GasRequest) -> Result<U256>;

    async fn get_fee_data(&self) -> Result<FeeData>;

    async fn get_block_number(&self) -> Result<u64>;

    async fn get_chain_id(&self) -> Result<u64>;
}

/// [`RpcClient`] backed by an ethers provider. Every call is bounded by
/// `timeout`; expiry is reported as a transport failure.
#[derive(Debug)]
pub struct EthersRpcClient<P = Http> {
    provider: Provider<P>,
    timeout: Duration,
}

impl EthersRpcClient<Http> {
    /// Create a client for the given RPC URL
    pub fn connect(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url).map_err(|e| {
            ToolError::transport(format!("Failed to create provider for {}: {}", rpc_url, e))
        })?;
        Ok(Self::new(provider, timeout))
    }
}

impl<P: JsonRpcClient> EthersRpcClient<P> {
    pub fn new(provider: Provider<P>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    async fn bounded<T, E, F>(&self, method: &str, call: F) -> Result<T>
    where
        E: Display,
        F: Future<Output = std::result::Result<T, E>>,
    {
        debug!("Calling {}", method);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ToolError::transport(format!("{}: {}", method, e))),
            Err(_) => Err(ToolError::transport(format!(
                "{} timed out after {}s",
                method,
                self.timeout.as_secs_f64()
            ))),
        }
    }
}

#[async_trait]
impl<P: JsonRpcClient + 'static> RpcClient for EthersRpcClient<P> {
    async fn get_balance(&self, address: Address) -> Result<U256> {
        self.bounded("eth_getBalance", self.provider.get_balance(address, None))
            .await
    }

    async fn get_transaction_receipt(&self, hash: H256) -> Result<Option<Receipt>> {
        let receipt = self
            .bounded(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(hash),
            )
            .await?;
        Ok(receipt.map(receipt_from_ethers))
    }

    async fn get_block(&self, block: BlockId) -> Result<Option<BlockSummary>> {
        let method = match block {
            BlockId::Hash(_) => "eth_getBlockByHash",
            BlockId::Number(_) => "eth_getBlockByNumber",
        };
        let block = self.bounded(method, self.provider.get_block(block)).await?;
        Ok(block.map(block_from_ethers))
    }

    async fn estimate_gas(&self, request: &GasRequest) -> Result<U256> {
        let mut tx = TransactionRequest::new().from(request.from).to(request.to);
        if let Some(value) = request.value {
            tx = tx.value(value);
        }
        if let Some(data) = request.data.clone() {
            tx = tx.data(data);
        }
        let tx: TypedTransaction = tx.into();
        self.bounded("eth_estimateGas", self.provider.estimate_gas(&tx, None))
            .await
    }

    async fn get_fee_data(&self) -> Result<FeeData> {
        let (gas_price, priority_fee, latest) = futures::join!(
            self.bounded("eth_gasPrice", self.provider.get_gas_price()),
            self.bounded(
                "eth_maxPriorityFeePerGas",
                self.provider
                    .request::<_, U256>("eth_maxPriorityFeePerGas", ()),
            ),
            self.bounded(
                "eth_getBlockByNumber",
                self.provider.get_block(BlockNumber::Latest),
            ),
        );

        // Price lookups are best-effort; the block is not.
        let latest = latest?;
        let mut fees = FeeData {
            gas_price: gas_price.ok(),
            ..FeeData::default()
        };

        if let Some(base_fee) = latest.and_then(|b| b.base_fee_per_gas) {
            let priority = priority_fee
                .ok()
                .unwrap_or_else(|| U256::from(FALLBACK_PRIORITY_FEE));
            fees.max_fee_per_gas = base_fee
                .checked_mul(U256::from(2))
                .and_then(|doubled| doubled.checked_add(priority));
            fees.max_priority_fee_per_gas = Some(priority);
        }

        Ok(fees)
    }

    async fn get_block_number(&self) -> Result<u64> {
        let number: U64 = self
            .bounded("eth_blockNumber", self.provider.get_block_number())
            .await?;
        Ok(number.as_u64())
    }

    async fn get_chain_id(&self) -> Result<u64> {
        let chain_id = self
            .bounded("eth_chainId", self.provider.get_chainid())
            .await?;
        if chain_id > U256::from(u64::MAX) {
            return Err(ToolError::transport(format!(
                "eth_chainId: value {} out of range",
                chain_id
            )));
        }
        Ok(chain_id.as_u64())
    }
}

fn receipt_from_ethers(receipt: TransactionReceipt) -> Receipt {
    Receipt {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number.map(|n| n.as_u64()),
        from: receipt.from,
        to: receipt.to,
        gas_used: receipt.gas_used,
        status: receipt.status.map(|s| s.as_u64()),
    }
}

fn block_from_ethers(block: Block<H256>) -> BlockSummary {
    BlockSummary {
        number: block.number.map(|n| n.as_u64()),
        hash: block.hash,
        timestamp: block.timestamp.low_u64(),
        gas_limit: block.gas_limit,
        gas_used: block.gas_used,
        transaction_count: block.transactions.len(),
    }
}
