//! Constants shared across the pipeline
//!
//! Contains the contract identity, the local development node defaults,
//! and the environment variable names the configuration layer reads.

/// File name the contract source is keyed by in the standard-JSON input
pub const CONTRACT_FILE: &str = "TelephoneDirectory.sol";

/// Name of the contract within the compiled source
pub const CONTRACT_NAME: &str = "TelephoneDirectory";

/// solc release the contract pragma is pinned to
pub const DEFAULT_SOLC_VERSION: &str = "0.6.0";

/// Local development node defaults
///
/// The standard Anvil endpoint and chain id used when the `local` target
/// is selected.
pub mod local_node {
	pub const RPC_URL: &str = "http://127.0.0.1:8545";
	pub const CHAIN_ID: u64 = 31337;
}

/// Environment variable names
pub mod env_vars {
	/// Hex-encoded private key of the deploying account
	pub const PRIVATE_KEY: &str = "PRIVATE_KEY";

	/// Expected sender address, cross-checked against the key when set
	pub const ADDRESS: &str = "ADDRESS";

	/// RPC endpoint for the `remote` target
	pub const RPC_URL: &str = "RPC_URL";

	/// Chain id for the `remote` target
	pub const CHAIN_ID: &str = "CHAIN_ID";
}
