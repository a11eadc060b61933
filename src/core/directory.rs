//! Deployment and calls for the telephone directory contract
//!
//! Every send follows the same explicit cycle: fill chain id, gas price,
//! estimated gas limit, and the caller-supplied nonce into a legacy
//! transaction, sign it locally, broadcast the raw bytes, and wait for
//! the receipt. The nonce is owned by the pipeline, which increments it
//! between the deployment and the follow-up call.

use crate::{
	core::chain::ChainClient,
	types::error::{Error, Result},
};
use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_eips::eip2718::Encodable2718;
use alloy_json_abi::JsonAbi;
use alloy_network::TxSigner;
use alloy_primitives::{Address, Bytes, TxKind, U256};
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use tracing::info;

/// Fields the pipeline fills in explicitly for every send
#[derive(Debug, Clone, Copy)]
pub struct TxParams {
	pub chain_id: u64,
	pub gas_price: u128,
	pub gas_limit: u64,
	pub nonce: u64,
}

/// Build the unsigned legacy transaction carrying `data` to `to`
pub fn build_tx(params: TxParams, to: TxKind, data: Bytes) -> TxLegacy {
	TxLegacy {
		chain_id: Some(params.chain_id),
		nonce: params.nonce,
		gas_price: params.gas_price,
		gas_limit: params.gas_limit,
		to,
		value: U256::ZERO,
		input: data,
	}
}

/// Sign a transaction and return the raw bytes ready for broadcast
///
/// # Errors
/// Returns Error if the signer rejects the transaction
pub async fn sign_tx(signer: &PrivateKeySigner, mut tx: TxLegacy) -> Result<Vec<u8>> {
	let signature = signer
		.sign_transaction(&mut tx)
		.await
		.map_err(|e| Error::Signing(format!("Failed to sign transaction: {}", e)))?;
	let envelope = TxEnvelope::Legacy(tx.into_signed(signature));
	Ok(envelope.encoded_2718())
}

/// Encode a call to a named ABI function
///
/// # Errors
/// Returns Error if the function is absent from the ABI or the arguments
/// do not match its inputs
pub fn encode_call(abi: &JsonAbi, name: &str, args: &[DynSolValue]) -> Result<Bytes> {
	let function = abi
		.function(name)
		.and_then(|overloads| overloads.first())
		.ok_or_else(|| Error::ContractCall(format!("Function {} not found in ABI", name)))?;

	let data = function
		.abi_encode_input(args)
		.map_err(|e| Error::ContractCall(format!("Failed to encode {}: {}", name, e)))?;

	Ok(data.into())
}

/// Decode the return data of a named ABI function
///
/// # Errors
/// Returns Error if the function is absent from the ABI or the data does
/// not match its outputs
pub fn decode_output(abi: &JsonAbi, name: &str, data: &[u8]) -> Result<Vec<DynSolValue>> {
	let function = abi
		.function(name)
		.and_then(|overloads| overloads.first())
		.ok_or_else(|| Error::ContractCall(format!("Function {} not found in ABI", name)))?;

	function
		.abi_decode_output(data, true)
		.map_err(|e| Error::ContractCall(format!("Failed to decode {} output: {}", name, e)))
}

/// Deploy the contract and return its address along with the receipt
///
/// Checks the sender is funded before building the transaction so an
/// empty account fails as a configuration problem rather than an opaque
/// node rejection.
///
/// # Errors
/// Returns Error on an unfunded sender, signing failure, node rejection,
/// or a receipt without a contract address
pub async fn deploy(
	client: &ChainClient,
	signer: &PrivateKeySigner,
	bytecode: Bytes,
	nonce: u64,
) -> Result<(Address, TransactionReceipt)> {
	let sender = signer.address();

	let balance = client.balance(sender).await?;
	if balance.is_zero() {
		return Err(Error::Deployment(format!(
			"Account {} has no funds on chain {}",
			sender,
			client.chain_id()
		)));
	}

	let gas_price = client.gas_price().await?;
	let mut estimate = TransactionRequest::default().input(bytecode.clone().into());
	estimate.from = Some(sender);
	let gas_limit = client.estimate_gas(estimate).await?;

	let tx = build_tx(
		TxParams {
			chain_id: client.chain_id(),
			gas_price,
			gas_limit,
			nonce,
		},
		TxKind::Create,
		bytecode,
	);

	let raw = sign_tx(signer, tx).await?;
	let hash = client.send_raw(&raw).await?;
	info!(tx_hash = %hash, nonce = nonce, "Deployment transaction sent");

	let receipt = client.wait_for_receipt(hash).await?;
	let address = receipt
		.contract_address
		.ok_or_else(|| Error::Deployment("No contract address in receipt".to_string()))?;

	Ok((address, receipt))
}

/// A deployed telephone directory instance
#[derive(Debug, Clone)]
pub struct DirectoryContract {
	client: ChainClient,
	signer: PrivateKeySigner,
	abi: JsonAbi,
	address: Address,
}

impl DirectoryContract {
	pub fn new(
		client: ChainClient,
		signer: PrivateKeySigner,
		abi: JsonAbi,
		address: Address,
	) -> Self {
		Self {
			client,
			signer,
			abi,
			address,
		}
	}

	pub fn address(&self) -> Address {
		self.address
	}

	/// Number of registered entries (read-only call)
	pub async fn total_people(&self) -> Result<U256> {
		let values = self.view("get_total_people_number").await?;
		values
			.first()
			.and_then(|v| v.as_uint())
			.map(|(value, _)| value)
			.ok_or_else(|| {
				Error::ContractCall("Unexpected get_total_people_number output".to_string())
			})
	}

	/// Name and number of the most recently added entry (read-only call)
	pub async fn info(&self) -> Result<(String, U256)> {
		let values = self.view("get_info").await?;

		let name = values
			.first()
			.and_then(|v| v.as_str())
			.map(|s| s.to_string());
		let number = values.get(1).and_then(|v| v.as_uint()).map(|(value, _)| value);

		match (name, number) {
			(Some(name), Some(number)) => Ok((name, number)),
			_ => Err(Error::ContractCall("Unexpected get_info output".to_string())),
		}
	}

	/// Register an entry (state-changing call, full sign/send/wait cycle)
	///
	/// # Errors
	/// Returns Error if encoding, signing, submission, or the receipt
	/// wait fails
	pub async fn add_people(
		&self,
		name: &str,
		number: u64,
		nonce: u64,
	) -> Result<TransactionReceipt> {
		let args = [
			DynSolValue::String(name.to_string()),
			DynSolValue::Uint(U256::from(number), 256),
		];
		let data = encode_call(&self.abi, "add_people", &args)?;

		let gas_price = self.client.gas_price().await?;
		let mut estimate = TransactionRequest::default()
			.to(self.address)
			.input(data.clone().into());
		estimate.from = Some(self.signer.address());
		let gas_limit = self.client.estimate_gas(estimate).await?;

		let tx = build_tx(
			TxParams {
				chain_id: self.client.chain_id(),
				gas_price,
				gas_limit,
				nonce,
			},
			TxKind::Call(self.address),
			data,
		);

		let raw = sign_tx(&self.signer, tx).await?;
		let hash = self.client.send_raw(&raw).await?;
		info!(tx_hash = %hash, nonce = nonce, "add_people transaction sent");

		self.client.wait_for_receipt(hash).await
	}

	async fn view(&self, function: &str) -> Result<Vec<DynSolValue>> {
		let data = encode_call(&self.abi, function, &[])?;
		let call = TransactionRequest::default()
			.to(self.address)
			.input(data.into());
		let result = self.client.call(call).await?;
		decode_output(&self.abi, function, &result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// Anvil account #0 (FOR TESTING ONLY!)
	const TEST_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	const TEST_ABI: &str = r#"[
		{
			"type": "function",
			"name": "add_people",
			"inputs": [
				{"name": "_name", "type": "string"},
				{"name": "_number", "type": "uint256"}
			],
			"outputs": [],
			"stateMutability": "nonpayable"
		},
		{
			"type": "function",
			"name": "get_total_people_number",
			"inputs": [],
			"outputs": [{"name": "", "type": "uint256"}],
			"stateMutability": "view"
		},
		{
			"type": "function",
			"name": "get_info",
			"inputs": [],
			"outputs": [
				{"name": "", "type": "string"},
				{"name": "", "type": "uint256"}
			],
			"stateMutability": "view"
		}
	]"#;

	fn test_abi() -> JsonAbi {
		serde_json::from_str(TEST_ABI).unwrap()
	}

	fn test_params(nonce: u64) -> TxParams {
		TxParams {
			chain_id: 31337,
			gas_price: 1_000_000_000,
			gas_limit: 500_000,
			nonce,
		}
	}

	#[test]
	fn test_build_deployment_tx_fields() {
		let bytecode = Bytes::from(vec![0x60, 0x80, 0x60, 0x40]);
		let tx = build_tx(test_params(7), TxKind::Create, bytecode.clone());

		assert_eq!(tx.chain_id, Some(31337));
		assert_eq!(tx.nonce, 7);
		assert_eq!(tx.gas_price, 1_000_000_000);
		assert_eq!(tx.to, TxKind::Create);
		assert_eq!(tx.value, U256::ZERO);
		assert_eq!(tx.input, bytecode);
	}

	#[test]
	fn test_nonce_sequencing_across_sends() {
		// The pipeline fetches the nonce once and hands n to the deployment
		// and n+1 to the follow-up call.
		let nonce = 3;
		let deploy_tx = build_tx(test_params(nonce), TxKind::Create, Bytes::new());
		let call_tx = build_tx(
			test_params(nonce + 1),
			TxKind::Call(Address::ZERO),
			Bytes::new(),
		);

		assert_eq!(deploy_tx.nonce, 3);
		assert_eq!(call_tx.nonce, 4);
	}

	#[tokio::test]
	async fn test_sign_tx_produces_legacy_raw_bytes() {
		let signer: PrivateKeySigner = TEST_PRIVATE_KEY.parse().unwrap();
		let tx = build_tx(
			test_params(0),
			TxKind::Create,
			Bytes::from(vec![0x60, 0x80]),
		);

		let raw = sign_tx(&signer, tx).await.unwrap();
		assert!(!raw.is_empty());
		// Legacy transactions have no type byte; the raw encoding starts
		// with an RLP list prefix.
		assert!(raw[0] >= 0xc0);
	}

	#[test]
	fn test_encode_add_people_call() {
		let abi = test_abi();
		let args = [
			DynSolValue::String("alice".to_string()),
			DynSolValue::Uint(U256::from(42u64), 256),
		];
		let data = encode_call(&abi, "add_people", &args).unwrap();

		let selector = abi.function("add_people").unwrap()[0].selector();
		assert_eq!(&data[..4], selector.as_slice());
		assert!(data.len() > 4);
	}

	#[test]
	fn test_encode_unknown_function() {
		let abi = test_abi();
		let result = encode_call(&abi, "remove_people", &[]);
		assert!(matches!(result, Err(Error::ContractCall(_))));
	}

	#[test]
	fn test_decode_total_people_zero() {
		let abi = test_abi();
		let values = decode_output(&abi, "get_total_people_number", &[0u8; 32]).unwrap();
		let (total, _) = values[0].as_uint().unwrap();
		assert_eq!(total, U256::ZERO);
	}

	#[test]
	fn test_decode_get_info_roundtrip() {
		let abi = test_abi();
		let encoded = DynSolValue::Tuple(vec![
			DynSolValue::String("bob".to_string()),
			DynSolValue::Uint(U256::from(555u64), 256),
		])
		.abi_encode_sequence()
		.unwrap();

		let values = decode_output(&abi, "get_info", &encoded).unwrap();
		assert_eq!(values[0].as_str(), Some("bob"));
		assert_eq!(values[1].as_uint().unwrap().0, U256::from(555u64));
	}
}
