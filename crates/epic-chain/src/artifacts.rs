//! Compiled contract artifacts.
//!
//! Resolves a contract name to its compiled artifact on disk and produces the
//! creation payload for a deployment: the creation bytecode followed by the
//! ABI-encoded constructor arguments. Both Hardhat
//! (`"bytecode": "0x.."`) and Foundry (`"bytecode": {"object": "0x.."}`)
//! artifact layouts are understood.

use crate::ChainError;
use alloy_json_abi::JsonAbi;
use alloy_primitives::{hex, Bytes};
use epic_types::{without_0x_prefix, DeploymentParams};
use serde_json::Value;
use std::path::PathBuf;

/// A deployable contract: its ABI (when the artifact ships one) and creation bytecode.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
	pub name: String,
	pub abi: Option<JsonAbi>,
	pub bytecode: Bytes,
}

impl ContractArtifact {
	/// Parses an artifact from its JSON representation.
	pub fn from_json(name: &str, json: &Value) -> Result<Self, ChainError> {
		let bytecode_str = json
			.get("bytecode")
			.and_then(|b| b.as_str().or_else(|| b.get("object").and_then(|o| o.as_str())))
			.ok_or_else(|| {
				ChainError::Artifact(format!("No bytecode found in artifact for {name}"))
			})?;

		let bytecode = hex::decode(without_0x_prefix(bytecode_str))
			.map_err(|e| ChainError::Artifact(format!("Invalid bytecode hex for {name}: {e}")))?;
		if bytecode.is_empty() {
			return Err(ChainError::Artifact(format!(
				"{name} has no creation bytecode (abstract contract or interface?)"
			)));
		}

		let abi = match json.get("abi") {
			Some(abi) => Some(
				serde_json::from_value::<JsonAbi>(abi.clone())
					.map_err(|e| ChainError::Artifact(format!("Invalid ABI for {name}: {e}")))?,
			),
			None => None,
		};

		Ok(Self {
			name: name.to_string(),
			abi,
			bytecode: Bytes::from(bytecode),
		})
	}

	/// Number of constructor inputs declared by the ABI, if an ABI is present.
	pub fn constructor_arity(&self) -> Option<usize> {
		self.abi.as_ref().map(|abi| {
			abi.constructor
				.as_ref()
				.map(|constructor| constructor.inputs.len())
				.unwrap_or(0)
		})
	}

	/// Builds the creation payload for the given constructor arguments.
	///
	/// Fails with [`ChainError::ConstructorMismatch`] when the ABI declares a
	/// different number of constructor inputs than `params` provides.
	pub fn deploy_data(&self, params: &DeploymentParams) -> Result<Bytes, ChainError> {
		if let Some(expected) = self.constructor_arity() {
			if expected != params.arity() {
				return Err(ChainError::ConstructorMismatch {
					contract: self.name.clone(),
					expected,
					actual: params.arity(),
				});
			}
		}

		let mut data = self.bytecode.to_vec();
		data.extend_from_slice(&params.abi_encode());
		Ok(Bytes::from(data))
	}
}

/// Looks up compiled artifacts by contract name under a directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
	dir: PathBuf,
}

impl ArtifactStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	/// Candidate artifact locations, most specific first.
	fn candidate_paths(&self, contract_name: &str) -> Vec<PathBuf> {
		let file = format!("{contract_name}.json");
		let sol_dir = format!("{contract_name}.sol");
		vec![
			self.dir.join(&sol_dir).join(&file),
			self.dir.join("contracts").join(&sol_dir).join(&file),
			self.dir.join(&file),
		]
	}

	/// Loads the artifact for `contract_name`.
	pub fn load(&self, contract_name: &str) -> Result<ContractArtifact, ChainError> {
		for path in self.candidate_paths(contract_name) {
			if !path.exists() {
				continue;
			}

			tracing::debug!(contract = contract_name, path = %path.display(), "Loading contract artifact");
			let content = std::fs::read_to_string(&path).map_err(|e| {
				ChainError::Artifact(format!("Failed to read {}: {}", path.display(), e))
			})?;
			let json: Value = serde_json::from_str(&content).map_err(|e| {
				ChainError::Artifact(format!("Invalid JSON in {}: {}", path.display(), e))
			})?;

			return ContractArtifact::from_json(contract_name, &json);
		}

		Err(ChainError::Artifact(format!(
			"Contract {} not found in {}",
			contract_name,
			self.dir.display()
		)))
	}
}
