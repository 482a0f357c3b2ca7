//! Chain client construction from configuration.

use crate::constants::dev_accounts;
use crate::types::error::{Error, Result};
use alloy_signer_local::PrivateKeySigner;
use epic_chain::{AlloyChainClient, ArtifactStore};
use epic_config::{Config, NetworkConfig};
use std::time::Duration;

/// Builds the transaction signer for the configured network.
///
/// Falls back to the well-known development account when no key is set, which
/// matches what a local node expects.
pub fn signer_from_config(network: &NetworkConfig) -> Result<PrivateKeySigner> {
	match &network.private_key {
		Some(key) => key.with_exposed(|raw| {
			raw.trim()
				.parse::<PrivateKeySigner>()
				.map_err(|e| Error::InvalidPrivateKey(e.to_string()))
		}),
		None => {
			tracing::warn!(
				address = dev_accounts::DEPLOYER_ADDRESS,
				"No private key configured, using the development account"
			);
			dev_accounts::DEPLOYER_PRIVATE_KEY
				.parse::<PrivateKeySigner>()
				.map_err(|e| Error::InvalidPrivateKey(e.to_string()))
		},
	}
}

/// Builds an EVM client for the configured network and artifact directory.
pub fn alloy_client(config: &Config) -> Result<AlloyChainClient> {
	let signer = signer_from_config(&config.network)?;
	tracing::debug!(signer = %signer.address(), rpc_url = %config.network.rpc_url, "Creating chain client");

	let client = AlloyChainClient::new(
		&config.network.rpc_url,
		config.network.chain_id,
		signer,
		ArtifactStore::new(&config.artifacts.dir),
	)?
	.with_confirmations(
		config.network.confirmations,
		Duration::from_secs(config.network.timeout_seconds),
	);
	Ok(client)
}

#[cfg(test)]
mod tests {
	use super::*;
	use epic_types::SecretString;

	#[test]
	fn test_default_signer_is_dev_account() {
		let signer = signer_from_config(&NetworkConfig::default()).unwrap();
		assert_eq!(
			signer.address().to_string().to_lowercase(),
			dev_accounts::DEPLOYER_ADDRESS.to_lowercase()
		);
	}

	#[test]
	fn test_invalid_private_key_rejected() {
		let network = NetworkConfig {
			private_key: Some(SecretString::from("0x1234")),
			..NetworkConfig::default()
		};
		assert!(matches!(
			signer_from_config(&network),
			Err(Error::InvalidPrivateKey(_))
		));
	}

	#[tokio::test]
	async fn test_alloy_client_from_default_config() {
		assert!(alloy_client(&Config::default()).is_ok());
	}
}
