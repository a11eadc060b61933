//! Chain client over HTTP JSON-RPC
//!
//! Wraps an alloy provider with the handful of operations the pipeline
//! needs: gas price, nonce and balance queries, read-only calls, raw
//! transaction submission, and receipt polling. Connectivity and
//! chain-id agreement are verified at construction.

use crate::types::{
	chain::Endpoint,
	error::{Error, Result},
};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::{Provider as AlloyProvider, ProviderBuilder};
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};
use std::sync::Arc;
use tracing::debug;

/// Connected provider handle for one chain
#[derive(Clone)]
pub struct ChainClient {
	inner: Arc<dyn AlloyProvider + Send + Sync>,
	chain_id: u64,
}

impl std::fmt::Debug for ChainClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChainClient")
			.field("chain_id", &self.chain_id)
			.field("inner", &"<dyn AlloyProvider>")
			.finish()
	}
}

impl ChainClient {
	/// Connect to the endpoint and verify the node's chain id
	///
	/// # Errors
	/// Returns Error if the URL is invalid, the node is unreachable, or
	/// the node reports a chain id other than the configured one
	pub async fn connect(endpoint: &Endpoint) -> Result<Self> {
		let url = endpoint
			.rpc_url
			.parse()
			.map_err(|e| Error::Rpc(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().connect_http(url);

		let reported = provider.get_chain_id().await.map_err(|e| {
			Error::Rpc(format!("Failed to connect to {}: {}", endpoint.rpc_url, e))
		})?;
		if reported != endpoint.chain_id {
			return Err(Error::ChainIdMismatch {
				expected: endpoint.chain_id,
				actual: reported,
			});
		}

		Ok(Self {
			inner: Arc::new(provider),
			chain_id: endpoint.chain_id,
		})
	}

	/// Chain id this client was configured for
	pub fn chain_id(&self) -> u64 {
		self.chain_id
	}

	/// Current gas price in wei
	pub async fn gas_price(&self) -> Result<u128> {
		self.inner
			.get_gas_price()
			.await
			.map_err(|e| Error::Rpc(format!("Failed to get gas price: {}", e)))
	}

	/// Transaction count for an account, i.e. its next nonce
	pub async fn nonce(&self, address: Address) -> Result<u64> {
		self.inner
			.get_transaction_count(address)
			.await
			.map_err(|e| Error::Rpc(format!("Failed to get nonce: {}", e)))
	}

	/// Native balance of an account in wei
	pub async fn balance(&self, address: Address) -> Result<U256> {
		self.inner
			.get_balance(address)
			.await
			.map_err(|e| Error::Rpc(format!("Failed to get balance: {}", e)))
	}

	/// Gas estimate for a transaction request
	pub async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64> {
		self.inner
			.estimate_gas(tx)
			.await
			.map_err(|e| Error::Rpc(format!("Failed to estimate gas: {}", e)))
	}

	/// Execute a read-only call and return the raw result
	pub async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
		self.inner
			.call(tx)
			.await
			.map_err(|e| Error::Rpc(format!("Call failed: {}", e)))
	}

	/// Broadcast raw signed transaction bytes
	pub async fn send_raw(&self, raw: &[u8]) -> Result<B256> {
		let pending = self
			.inner
			.send_raw_transaction(raw)
			.await
			.map_err(|e| Error::Rpc(format!("Failed to send transaction: {}", e)))?;
		Ok(*pending.tx_hash())
	}

	/// Poll for a transaction receipt until the transaction is mined
	///
	/// # Errors
	/// Returns Error if the receipt query fails or the transaction is not
	/// mined within the polling window
	pub async fn wait_for_receipt(&self, hash: B256) -> Result<TransactionReceipt> {
		let mut attempts = 0;
		const MAX_ATTEMPTS: u32 = 60;

		loop {
			if let Some(receipt) = self
				.inner
				.get_transaction_receipt(hash)
				.await
				.map_err(|e| Error::Rpc(format!("Failed to get receipt: {}", e)))?
			{
				debug!(hash = %hash, block = ?receipt.block_number, "Transaction mined");
				return Ok(receipt);
			}

			attempts += 1;
			if attempts >= MAX_ATTEMPTS {
				return Err(Error::TxNotMined(hash));
			}

			tokio::time::sleep(std::time::Duration::from_secs(1)).await;
		}
	}
}
