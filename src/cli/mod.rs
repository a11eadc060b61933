//! Command-line interface definitions and parsing
//!
//! Defines the CLI structure using clap: the main command parser, the
//! pipeline subcommands, and the output and prompt utilities.

pub mod output;
pub mod prompt;

use crate::{constants, types::chain::ChainTarget};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI application structure
#[derive(Parser, Debug)]
#[command(name = "dialbook")]
#[command(about = "Compile, deploy, and exercise the on-chain telephone directory")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Node to run against
	#[arg(global = true, long, value_enum, default_value = "local")]
	pub target: ChainTarget,

	/// Contract source path
	#[arg(global = true, long, default_value = "contracts/TelephoneDirectory.sol")]
	pub source: PathBuf,

	/// Path the full compiler output is written to
	#[arg(global = true, long, default_value = "artifacts/compiled_code.json")]
	pub artifact: PathBuf,

	/// solc release to install and use
	#[arg(global = true, long, default_value = constants::DEFAULT_SOLC_VERSION)]
	pub solc: String,

	/// Enable debug logging
	#[arg(global = true, long, env = "DIALBOOK_DEBUG")]
	pub debug: bool,
}

/// Pipeline stages exposed as subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Compile the contract and write the artifact
	Compile,

	/// Compile and deploy, printing the deployed address
	Deploy,

	/// Full demonstration: deploy, then query and update the directory
	Run,
}
