//! Command-line interface definitions and parsing
//!
//! The tool has a single action, so there are no subcommands: flags select
//! the configuration file, the contract version and the network, and any flag
//! given overrides the matching value from the file.

pub mod output;

use crate::types::error::Result;
use anyhow::Context;
use clap::{error::ErrorKind, Parser};
use epic_config::Config;
use epic_types::{GameVariant, SecretString};
use std::path::PathBuf;

/// Deploys the MyEpicGame contract and mints its starter characters.
#[derive(Parser, Debug)]
#[command(name = "epic-deploy")]
#[command(about = "Deploy the MyEpicGame contract and mint its starter characters")]
#[command(version)]
pub struct Cli {
	/// Configuration file (TOML). Defaults apply when omitted
	#[arg(long, env = "EPIC_CONFIG")]
	pub config: Option<PathBuf>,

	/// Contract version to deploy: `mint` (character-mint) or `boss` (boss-battle)
	#[arg(long)]
	pub variant: Option<GameVariant>,

	/// JSON-RPC endpoint of the target network
	#[arg(long, env = "EPIC_RPC_URL")]
	pub rpc_url: Option<String>,

	/// Chain id of the target network
	#[arg(long, env = "EPIC_CHAIN_ID")]
	pub chain_id: Option<u64>,

	/// Deployer private key (hex)
	#[arg(long, env = "EPIC_PRIVATE_KEY", hide_env_values = true)]
	pub private_key: Option<SecretString>,

	/// Directory holding compiled contract artifacts
	#[arg(long, env = "EPIC_ARTIFACTS")]
	pub artifacts: Option<String>,

	/// Run against an in-memory simulated chain instead of an RPC node
	#[arg(long)]
	pub simulate: bool,

	/// Log level used when RUST_LOG is not set
	#[arg(long, default_value = "info")]
	pub log_level: String,
}

impl Cli {
	/// Loads the configuration file, if any, and applies the flag overrides.
	pub async fn load_config(&self) -> Result<Config> {
		let config = match &self.config {
			Some(path) => Config::from_file(path)
				.await
				.with_context(|| format!("Failed to load configuration from {}", path.display()))?,
			None => Config::default(),
		};
		self.apply_overrides(config)
	}

	/// Applies flag values over `config` and re-validates the result.
	pub fn apply_overrides(&self, mut config: Config) -> Result<Config> {
		if let Some(variant) = self.variant {
			config.deployment.variant = variant;
		}
		if let Some(rpc_url) = &self.rpc_url {
			config.network.rpc_url = rpc_url.clone();
		}
		if let Some(chain_id) = self.chain_id {
			config.network.chain_id = chain_id;
		}
		if let Some(private_key) = &self.private_key {
			config.network.private_key = Some(private_key.clone());
		}
		if let Some(artifacts) = &self.artifacts {
			config.artifacts.dir = artifacts.clone();
		}

		config.validate()?;
		Ok(config)
	}
}

/// Process exit status for a command-line parsing failure.
///
/// Help and version requests are successful runs. Every other parse failure,
/// including a malformed flag or environment value, is an error and exits
/// with `1` like any other failed run.
///
/// # Arguments
/// * `err` - Error returned by [`Cli::try_parse`]
pub fn parse_exit_status(err: &clap::Error) -> u8 {
	match err.kind() {
		ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
		_ => 1,
	}
}
