//! Error types and result handling for the deployment tool
//!
//! Every failure, whether from configuration, roster checks or the chain,
//! bubbles up to the single top-level handler in the binary. There is no local
//! recovery and no retry.

use epic_chain::ChainError;
use epic_config::ConfigError;
use epic_types::RosterError;

/// Convenience Result type alias using the local Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all deployment tool operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
	// Configuration errors
	#[error("Invalid configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("Invalid private key: {0}")]
	InvalidPrivateKey(String),

	// Constructor argument errors
	#[error("Invalid roster: {0}")]
	InvalidRoster(#[from] RosterError),

	#[error("Invalid mint plan: {0}")]
	InvalidMintPlan(String),

	// Chain errors
	#[error("{0}")]
	Chain(#[from] ChainError),

	#[error("Mint #{ordinal} (character {character_index}) failed: {source}")]
	MintFailed {
		ordinal: usize,
		character_index: u64,
		#[source]
		source: ChainError,
	},

	// Generic error for unexpected cases
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}
