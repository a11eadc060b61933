//! Solidity compilation through the svm-managed solc toolchain
//!
//! Wraps the standard-JSON compile cycle: load the contract source, build
//! the input with a fixed output selection, obtain the pinned compiler
//! release (downloaded and cached by svm on first use), invoke it, and
//! persist the full compiler output to disk. Solidity errors reported in
//! the output abort the run.

use crate::types::error::{Error, Result};
use foundry_compilers::{
	artifacts::{output_selection::OutputSelection, Settings, SolcInput, Source, Sources},
	solc::{Solc, SolcLanguage},
};
use semver::Version;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output selection requested for every compile
pub const OUTPUT_SELECTION: [&str; 4] =
	["abi", "metadata", "evm.bytecode", "evm.bytecode.sourceMap"];

/// Invokes a pinned solc release over standard-JSON
#[derive(Debug, Clone)]
pub struct Compiler {
	version: Version,
}

impl Compiler {
	/// Create a compiler for the given solc release
	pub fn new(version: Version) -> Self {
		Self { version }
	}

	/// Read the contract source from disk
	///
	/// # Errors
	/// Returns Error if the file cannot be read
	pub fn load_source(path: &Path) -> Result<String> {
		std::fs::read_to_string(path)
			.map_err(|e| Error::Compiler(format!("Failed to read {}: {}", path.display(), e)))
	}

	/// Build the standard-JSON input for a single source
	///
	/// The source is keyed by its file name and the output selection is
	/// fixed to ABI, metadata, bytecode, and source map.
	pub fn build_input(source_name: &str, content: &str) -> SolcInput {
		let mut sources = Sources::default();
		sources.insert(PathBuf::from(source_name), Source::new(content));

		let selection: Vec<String> = OUTPUT_SELECTION.iter().map(|s| s.to_string()).collect();
		let settings = Settings {
			output_selection: OutputSelection::common_output_selection(selection),
			..Default::default()
		};

		SolcInput {
			language: SolcLanguage::Solidity,
			sources,
			settings,
		}
	}

	/// Obtain the compiler and run the standard-JSON compile
	///
	/// svm downloads and caches the release on first use; later runs reuse
	/// the cached binary.
	///
	/// # Errors
	/// Returns Error if the release cannot be obtained, the invocation
	/// fails, or the output reports error-severity diagnostics
	pub async fn compile(&self, input: &SolcInput) -> Result<Value> {
		info!(version = %self.version, "Ensuring solc is installed");
		let solc = Solc::install(&self.version)
			.await
			.map_err(|e| Error::Compiler(format!("Failed to obtain solc {}: {}", self.version, e)))?;

		debug!(path = ?solc.solc, "Invoking solc");
		let raw = solc
			.async_compile_output(input)
			.await
			.map_err(|e| Error::Compiler(format!("solc invocation failed: {}", e)))?;

		let output: Value = serde_json::from_slice(&raw)?;
		check_errors(&output)?;
		Ok(output)
	}
}

/// Fail on error-severity diagnostics in the compiler output
fn check_errors(output: &Value) -> Result<()> {
	let Some(diagnostics) = output.get("errors").and_then(|e| e.as_array()) else {
		return Ok(());
	};

	let errors: Vec<&str> = diagnostics
		.iter()
		.filter(|d| d.get("severity").and_then(|s| s.as_str()) == Some("error"))
		.map(|d| {
			d.get("formattedMessage")
				.or_else(|| d.get("message"))
				.and_then(|m| m.as_str())
				.unwrap_or("unknown compiler error")
		})
		.collect();

	if errors.is_empty() {
		Ok(())
	} else {
		Err(Error::Compiler(errors.join("\n")))
	}
}

/// Persist the full compiler output, overwriting any previous artifact
///
/// # Errors
/// Returns Error if the directory cannot be created or the file written
pub fn write_artifact(path: &Path, output: &Value) -> Result<()> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			std::fs::create_dir_all(parent)?;
		}
	}
	std::fs::write(path, serde_json::to_vec(output)?)?;
	debug!(path = %path.display(), "Compiler output written");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	const SOURCE: &str = "pragma solidity ^0.6.0;\ncontract TelephoneDirectory {}\n";

	#[test]
	fn test_build_input_shape() {
		let input = Compiler::build_input("TelephoneDirectory.sol", SOURCE);
		let value = serde_json::to_value(&input).unwrap();

		assert_eq!(value["language"], "Solidity");
		assert!(value["sources"]["TelephoneDirectory.sol"]["content"]
			.as_str()
			.unwrap()
			.contains("pragma solidity"));

		let selection = value["settings"]["outputSelection"]["*"]["*"]
			.as_array()
			.unwrap();
		let selected: Vec<&str> = selection.iter().filter_map(|s| s.as_str()).collect();
		for expected in OUTPUT_SELECTION {
			assert!(selected.contains(&expected), "missing {}", expected);
		}
	}

	#[test]
	fn test_check_errors_passes_warnings() {
		let output: Value = serde_json::json!({
			"errors": [{"severity": "warning", "message": "unused variable"}],
			"contracts": {}
		});
		assert!(check_errors(&output).is_ok());
	}

	#[test]
	fn test_check_errors_fails_on_error_severity() {
		let output: Value = serde_json::json!({
			"errors": [
				{"severity": "warning", "message": "unused variable"},
				{"severity": "error", "formattedMessage": "ParserError: expected ';'"}
			]
		});
		let err = check_errors(&output).unwrap_err();
		assert!(format!("{}", err).contains("ParserError"));
	}

	#[test]
	fn test_write_artifact_overwrites() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("artifacts").join("compiled_code.json");

		let first: Value = serde_json::json!({"contracts": {"a": 1}});
		write_artifact(&path, &first).unwrap();
		let second: Value = serde_json::json!({"contracts": {"b": 2}});
		write_artifact(&path, &second).unwrap();

		let read: Value =
			serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
		assert_eq!(read, second);
	}
}
