//! Extraction of the deployable pieces from the compiler output
//!
//! The full standard-JSON output is kept on disk for inspection; only two
//! values are consumed downstream: the deployment bytecode and the ABI.
//! Extraction works on the raw JSON so the runtime ABI type is the one
//! the rest of the crate encodes against.

use crate::types::error::{Error, Result};
use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;
use serde_json::Value;

/// The two values the pipeline needs from a compile
#[derive(Debug, Clone)]
pub struct ContractArtifact {
	pub bytecode: Bytes,
	pub abi: JsonAbi,
}

/// Pull bytecode and ABI for one contract out of the compiler output
///
/// # Arguments
/// * `output` - Full standard-JSON compiler output
/// * `source_name` - Source file key the contract was compiled under
/// * `contract_name` - Contract name within that source
///
/// # Errors
/// Returns Error if the contract is absent from the output, the bytecode
/// is missing or empty, or the ABI does not parse
pub fn extract(output: &Value, source_name: &str, contract_name: &str) -> Result<ContractArtifact> {
	let contract = output
		.get("contracts")
		.and_then(|c| c.get(source_name))
		.and_then(|c| c.get(contract_name))
		.ok_or_else(|| {
			Error::Artifact(format!(
				"Contract {} not found under {} in compiler output",
				contract_name, source_name
			))
		})?;

	let object = contract
		.get("evm")
		.and_then(|e| e.get("bytecode"))
		.and_then(|b| b.get("object"))
		.and_then(|o| o.as_str())
		.ok_or_else(|| Error::Artifact("No bytecode in compiler output".to_string()))?;

	let hex_str = object.strip_prefix("0x").unwrap_or(object);
	if hex_str.is_empty() {
		return Err(Error::Artifact(format!(
			"Contract {} has no deployable bytecode",
			contract_name
		)));
	}
	let bytecode = hex::decode(hex_str)
		.map(Bytes::from)
		.map_err(|e| Error::Artifact(format!("Invalid bytecode hex: {}", e)))?;

	let abi_value = contract
		.get("abi")
		.cloned()
		.ok_or_else(|| Error::Artifact("No ABI in compiler output".to_string()))?;
	let abi: JsonAbi = serde_json::from_value(abi_value)
		.map_err(|e| Error::Artifact(format!("Invalid ABI: {}", e)))?;

	Ok(ContractArtifact { bytecode, abi })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fixture() -> Value {
		serde_json::json!({
			"contracts": {
				"TelephoneDirectory.sol": {
					"TelephoneDirectory": {
						"abi": [
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
						],
						"evm": {
							"bytecode": {
								"object": "6080604052348015600f57600080fd5b50603f80601d6000396000f3fe",
								"sourceMap": "0:117:0:-:0;;;;;;;;;"
							}
						}
					}
				}
			},
			"sources": {"TelephoneDirectory.sol": {"id": 0}}
		})
	}

	#[test]
	fn test_extract_bytecode_and_abi() {
		let artifact =
			extract(&fixture(), "TelephoneDirectory.sol", "TelephoneDirectory").unwrap();

		assert!(!artifact.bytecode.is_empty());
		assert_eq!(artifact.bytecode[0], 0x60);

		let names: Vec<&str> = artifact.abi.functions().map(|f| f.name.as_str()).collect();
		assert!(names.contains(&"add_people"));
		assert!(names.contains(&"get_total_people_number"));
		assert!(names.contains(&"get_info"));
	}

	#[test]
	fn test_extract_missing_contract() {
		let result = extract(&fixture(), "TelephoneDirectory.sol", "AddressBook");
		assert!(matches!(result, Err(Error::Artifact(_))));
	}

	#[test]
	fn test_extract_empty_bytecode() {
		let mut output = fixture();
		output["contracts"]["TelephoneDirectory.sol"]["TelephoneDirectory"]["evm"]["bytecode"]
			["object"] = Value::String(String::new());
		let result = extract(&output, "TelephoneDirectory.sol", "TelephoneDirectory");
		assert!(matches!(result, Err(Error::Artifact(_))));
	}
}
