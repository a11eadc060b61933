//! Deployment target selection
//!
//! The node to deploy against is an explicit enumerated choice made at
//! startup: the local development node with its fixed endpoint and chain
//! id, or a remote endpoint described by the environment. Resolution
//! happens once during configuration load.

use crate::{
	constants::{env_vars, local_node},
	types::error::{Error, Result},
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node selection made on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ChainTarget {
	/// Local development node (Anvil defaults)
	Local,
	/// Remote endpoint read from RPC_URL / CHAIN_ID
	Remote,
}

/// A resolved endpoint: where to connect and which chain id to expect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
	pub rpc_url: String,
	pub chain_id: u64,
}

impl ChainTarget {
	/// Resolve the target into a concrete endpoint
	///
	/// The local target maps to the fixed development defaults; the remote
	/// target requires both `RPC_URL` and `CHAIN_ID` in the environment.
	///
	/// # Errors
	/// Returns Error if a required environment variable is missing or the
	/// chain id does not parse as an integer
	pub fn resolve(self) -> Result<Endpoint> {
		match self {
			Self::Local => Ok(Endpoint {
				rpc_url: local_node::RPC_URL.to_string(),
				chain_id: local_node::CHAIN_ID,
			}),
			Self::Remote => {
				let rpc_url = std::env::var(env_vars::RPC_URL)
					.map_err(|_| Error::MissingEnv(env_vars::RPC_URL))?;
				let raw = std::env::var(env_vars::CHAIN_ID)
					.map_err(|_| Error::MissingEnv(env_vars::CHAIN_ID))?;
				let chain_id = raw.parse().map_err(|_| Error::InvalidChainId(raw))?;
				Ok(Endpoint { rpc_url, chain_id })
			},
		}
	}
}

impl fmt::Display for ChainTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Local => write!(f, "local"),
			Self::Remote => write!(f, "remote"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_local_target_resolves_to_fixed_endpoint() {
		let endpoint = ChainTarget::Local.resolve().unwrap();
		assert_eq!(endpoint.rpc_url, "http://127.0.0.1:8545");
		assert_eq!(endpoint.chain_id, 31337);
	}

	#[test]
	fn test_remote_target_requires_environment() {
		std::env::remove_var(env_vars::RPC_URL);
		std::env::remove_var(env_vars::CHAIN_ID);
		assert!(matches!(
			ChainTarget::Remote.resolve(),
			Err(Error::MissingEnv(_))
		));

		std::env::set_var(env_vars::RPC_URL, "http://10.0.0.5:8545");
		std::env::set_var(env_vars::CHAIN_ID, "11155111");
		let endpoint = ChainTarget::Remote.resolve().unwrap();
		assert_eq!(endpoint.rpc_url, "http://10.0.0.5:8545");
		assert_eq!(endpoint.chain_id, 11155111);

		std::env::set_var(env_vars::CHAIN_ID, "sepolia");
		assert!(matches!(
			ChainTarget::Remote.resolve(),
			Err(Error::InvalidChainId(_))
		));

		std::env::remove_var(env_vars::RPC_URL);
		std::env::remove_var(env_vars::CHAIN_ID);
	}

	#[test]
	fn test_target_display() {
		assert_eq!(ChainTarget::Local.to_string(), "local");
		assert_eq!(ChainTarget::Remote.to_string(), "remote");
	}
}
