//! Error types and result handling
//!
//! A single error enum covers every failure site in the pipeline:
//! configuration, compilation, RPC transport, deployment, contract calls,
//! and console input. Every failure is fatal; variants translate the
//! failure site while preserving the underlying library's error text.

use alloy_primitives::B256;

/// Convenience Result type alias using the local Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all pipeline operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
	// Configuration errors
	#[error("Missing environment variable: {0}")]
	MissingEnv(&'static str),

	#[error("Invalid private key: {0}")]
	InvalidPrivateKey(String),

	#[error("Invalid address: {0}")]
	InvalidAddress(String),

	#[error("Configured address {configured} does not belong to the configured key (derived {derived})")]
	AddressMismatch { configured: String, derived: String },

	#[error("Invalid chain id: {0}")]
	InvalidChainId(String),

	// Compilation errors
	#[error("Compiler error: {0}")]
	Compiler(String),

	#[error("Invalid compiler artifact: {0}")]
	Artifact(String),

	// Chain errors
	#[error("RPC connection failed: {0}")]
	Rpc(String),

	#[error("Chain id mismatch: node reports {actual}, target is configured for {expected}")]
	ChainIdMismatch { expected: u64, actual: u64 },

	#[error("Transaction not mined: {0}")]
	TxNotMined(B256),

	// Transaction errors
	#[error("Signing failed: {0}")]
	Signing(String),

	#[error("Deployment failed: {0}")]
	Deployment(String),

	#[error("Contract call failed: {0}")]
	ContractCall(String),

	// Console input errors
	#[error("Not a number: {0:?}")]
	InvalidNumber(String),

	// IO errors
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	// JSON errors
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let err = Error::MissingEnv("PRIVATE_KEY");
		assert_eq!(format!("{}", err), "Missing environment variable: PRIVATE_KEY");

		let err = Error::ChainIdMismatch {
			expected: 31337,
			actual: 1,
		};
		assert_eq!(
			format!("{}", err),
			"Chain id mismatch: node reports 1, target is configured for 31337"
		);

		let err = Error::InvalidNumber("abc".to_string());
		assert_eq!(format!("{}", err), "Not a number: \"abc\"");
	}

	#[test]
	fn test_io_error_conversion() {
		let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
		let err: Error = io_err.into();
		assert!(matches!(err, Error::Io(_)));
	}
}
