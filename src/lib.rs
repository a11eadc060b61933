//! dialbook: compile, deploy, and exercise the on-chain telephone directory
//!
//! A single linear pipeline over external toolchains: solc (via the
//! svm-managed foundry-compilers toolchain) produces the bytecode and ABI,
//! an Ethereum-compatible node executes the deployment and the two
//! demonstration calls. There is no retry and no recovery; every failure
//! is terminal.

pub mod cli;
pub mod constants;
pub mod core;
pub mod types;

pub use crate::core::{ChainClient, Compiler, ContractArtifact, DirectoryContract, Settings};
pub use crate::types::{
	chain::ChainTarget,
	error::{Error, Result},
};
