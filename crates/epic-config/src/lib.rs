//! Configuration module for the epic game deployer.
//!
//! This module provides structures and utilities for managing deployer
//! configuration. It supports loading configuration from TOML files with
//! `${VAR}` / `${VAR:-default}` environment variable expansion, and validates
//! the result before it is handed to the deployment tool.
//!
//! Every section is optional. An empty file describes a local development
//! node at `http://127.0.0.1:8545` with the literal game constants.

use epic_types::{BossSpec, CharacterRoster, GameVariant, SecretString};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the deployer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
	/// RPC endpoint, signer and confirmation settings.
	#[serde(default)]
	pub network: NetworkConfig,
	/// Location of compiled contract artifacts.
	#[serde(default)]
	pub artifacts: ArtifactsConfig,
	/// Contract identity, variant and constructor overrides.
	#[serde(default)]
	pub deployment: DeploymentConfig,
	/// Minting sequence override for the character-mint variant.
	#[serde(default)]
	pub seed: SeedConfig,
}

/// Network connection and transaction confirmation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
	/// HTTP JSON-RPC endpoint.
	pub rpc_url: String,
	/// Expected chain id, used when signing.
	pub chain_id: u64,
	/// Deployer private key. Falls back to the development account when unset.
	pub private_key: Option<SecretString>,
	/// Confirmations required before a transaction counts as final.
	pub confirmations: u64,
	/// Upper bound on how long a single confirmation wait may take.
	pub timeout_seconds: u64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			rpc_url: "http://127.0.0.1:8545".to_string(),
			chain_id: 31337,
			private_key: None,
			confirmations: 1,
			timeout_seconds: 120,
		}
	}
}

/// Compiled contract artifact settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
	/// Directory holding `<Name>.sol/<Name>.json` artifacts.
	pub dir: String,
}

impl Default for ArtifactsConfig {
	fn default() -> Self {
		Self {
			dir: "artifacts/contracts".to_string(),
		}
	}
}

/// Which contract to deploy and with what arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
	pub contract_name: String,
	pub variant: GameVariant,
	/// Replaces the built-in character roster when set.
	pub roster: Option<CharacterRoster>,
	/// Replaces the built-in boss when set. Only read by the boss-battle variant.
	pub boss: Option<BossSpec>,
}

impl Default for DeploymentConfig {
	fn default() -> Self {
		Self {
			contract_name: "MyEpicGame".to_string(),
			variant: GameVariant::default(),
			roster: None,
			boss: None,
		}
	}
}

/// Minting sequence settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
	/// Character indices minted in order after deployment.
	pub character_indices: Option<Vec<u64>>,
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let var_name = var_name.as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{var_name}' not found"
					)));
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file.
	///
	/// Environment variables referenced in the file are resolved before
	/// parsing, and the result is validated.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		tracing::debug!(path = %path.display(), "Loading configuration file");
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	///
	/// - RPC URL, chain id and timeout must be set
	/// - The contract name cannot be empty
	/// - A roster override must have parallel arrays of equal length
	/// - A seed override only makes sense for the character-mint variant and
	///   cannot be empty
	/// - A boss override only makes sense for the boss-battle variant
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.network.rpc_url.trim().is_empty() {
			return Err(ConfigError::Validation("RPC URL cannot be empty".into()));
		}
		if self.network.chain_id == 0 {
			return Err(ConfigError::Validation("Chain ID cannot be zero".into()));
		}
		if self.network.timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"Confirmation timeout must be greater than zero".into(),
			));
		}
		if let Some(key) = &self.network.private_key {
			if key.is_empty() {
				return Err(ConfigError::Validation(
					"Private key cannot be empty when set".into(),
				));
			}
		}

		if self.deployment.contract_name.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Contract name cannot be empty".into(),
			));
		}
		if let Some(roster) = &self.deployment.roster {
			roster
				.validate()
				.map_err(|e| ConfigError::Validation(format!("Invalid roster: {e}")))?;
		}

		if self.deployment.boss.is_some() && self.deployment.variant != GameVariant::BossBattle {
			return Err(ConfigError::Validation(format!(
				"A boss override is not supported for the {} variant",
				self.deployment.variant
			)));
		}

		if let Some(indices) = &self.seed.character_indices {
			if !self.deployment.variant.mints_characters() {
				return Err(ConfigError::Validation(format!(
					"Seed indices are not supported for the {} variant",
					self.deployment.variant
				)));
			}
			if indices.is_empty() {
				return Err(ConfigError::Validation(
					"Seed character_indices cannot be empty".into(),
				));
			}
			if let Some(roster) = &self.deployment.roster {
				for index in indices {
					roster
						.check_index(*index)
						.map_err(|e| ConfigError::Validation(format!("Invalid seed: {e}")))?;
				}
			}
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved and the configuration is validated
/// after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let mut config: Config = toml::from_str(&resolved)?;
		// `${VAR:-}` with VAR unset leaves the key empty: fall back to the default signer
		if config
			.network
			.private_key
			.as_ref()
			.is_some_and(|key| key.is_empty())
		{
			config.network.private_key = None;
		}
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("EPIC_TEST_HOST", "localhost");
		std::env::set_var("EPIC_TEST_PORT", "8545");

		let input = "rpc_url = \"http://${EPIC_TEST_HOST}:${EPIC_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "rpc_url = \"http://localhost:8545\"");

		std::env::remove_var("EPIC_TEST_HOST");
		std::env::remove_var("EPIC_TEST_PORT");
	}

	#[test]
	fn test_env_var_default_and_missing() {
		let input = "key = \"${EPIC_TEST_UNSET_WITH_DEFAULT:-fallback}\"";
		assert_eq!(resolve_env_vars(input).unwrap(), "key = \"fallback\"");

		let missing = resolve_env_vars("key = \"${EPIC_TEST_DEFINITELY_UNSET}\"");
		assert!(matches!(missing, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_empty_config_uses_local_defaults() {
		let config = Config::from_str("").unwrap();
		assert_eq!(config.network.rpc_url, "http://127.0.0.1:8545");
		assert_eq!(config.network.chain_id, 31337);
		assert_eq!(config.network.confirmations, 1);
		assert!(config.network.private_key.is_none());
		assert_eq!(config.artifacts.dir, "artifacts/contracts");
		assert_eq!(config.deployment.contract_name, "MyEpicGame");
		assert_eq!(config.deployment.variant, GameVariant::CharacterMint);
		assert!(config.seed.character_indices.is_none());
	}

	#[test]
	fn test_full_config_parses() {
		let config_str = r#"
[network]
rpc_url = "https://rinkeby.example.org"
chain_id = 4
private_key = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"
confirmations = 2

[artifacts]
dir = "build/artifacts"

[deployment]
variant = "boss"

[deployment.roster]
names = ["A", "B"]
image_uris = ["ipfs://a", "ipfs://b"]
hit_points = [100, 200]
attack_damage = [10, 20]

[deployment.boss]
name = "Boss"
image_uri = "ipfs://boss"
hit_points = 5000
attack_damage = 25
"#;
		let config = Config::from_str(config_str).unwrap();
		assert_eq!(config.network.chain_id, 4);
		assert_eq!(config.network.confirmations, 2);
		assert_eq!(config.network.timeout_seconds, 120);
		assert_eq!(config.deployment.variant, GameVariant::BossBattle);
		assert_eq!(config.deployment.roster.as_ref().unwrap().len(), 2);
		assert_eq!(config.deployment.boss.as_ref().unwrap().hit_points, 5000);
		// Key must never leak through Debug
		assert!(!format!("{config:?}").contains("59c6995e"));
	}

	#[test]
	fn test_mismatched_roster_rejected() {
		let config_str = r#"
[deployment.roster]
names = ["A", "B"]
image_uris = ["ipfs://a"]
hit_points = [100, 200]
attack_damage = [10, 20]
"#;
		let err = Config::from_str(config_str).unwrap_err();
		assert!(
			err.to_string().contains("equal length"),
			"unexpected error: {err}"
		);
	}

	#[test]
	fn test_seed_override_rejected_for_boss_variant() {
		let config_str = r#"
[deployment]
variant = "boss-battle"

[seed]
character_indices = [0, 1]
"#;
		let err = Config::from_str(config_str).unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn test_seed_index_checked_against_roster_override() {
		let config_str = r#"
[deployment.roster]
names = ["A"]
image_uris = ["ipfs://a"]
hit_points = [100]
attack_damage = [10]

[seed]
character_indices = [0, 1]
"#;
		let err = Config::from_str(config_str).unwrap_err();
		assert!(
			err.to_string().contains("Character index 1 is out of range"),
			"unexpected error: {err}"
		);
	}

	#[test]
	fn test_boss_override_rejected_for_character_mint_variant() {
		let config_str = r#"
[deployment.boss]
name = "Boss"
image_uri = "ipfs://boss"
hit_points = 5000
attack_damage = 25
"#;
		let err = Config::from_str(config_str).unwrap_err();
		assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("boss override")));
	}

	#[test]
	fn test_unset_private_key_variable_falls_back_to_default() {
		let config_str = "[network]\nprivate_key = \"${EPIC_TEST_UNSET_PRIVATE_KEY:-}\"\n";
		let config = Config::from_str(config_str).unwrap();
		assert!(config.network.private_key.is_none());
	}

	#[test]
	fn test_invalid_network_values_rejected() {
		assert!(Config::from_str("[network]\nchain_id = 0").is_err());
		assert!(Config::from_str("[network]\nrpc_url = \"\"").is_err());
		assert!(Config::from_str("[network]\ntimeout_seconds = 0").is_err());
		assert!(Config::from_str("[deployment]\ncontract_name = \" \"").is_err());
	}

	#[test]
	fn test_parse_error_is_reported() {
		let err = Config::from_str("[network\nrpc_url = 1").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[tokio::test]
	async fn test_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("deploy.toml");
		std::fs::write(&path, "[seed]\ncharacter_indices = [3, 2, 1]\n").unwrap();

		let config = Config::from_file(&path).await.unwrap();
		assert_eq!(config.seed.character_indices, Some(vec![3, 2, 1]));

		let missing = Config::from_file(dir.path().join("missing.toml")).await;
		assert!(matches!(missing, Err(ConfigError::Io(_))));
	}
}
