//! Chain client module for the epic game deployer.
//!
//! This module is the seam between the deployment logic and the network. The
//! [`ChainClient`] trait exposes exactly the capabilities the deploy-and-seed
//! flow needs: resolve a contract by name and submit its deployment, wait for
//! that deployment, submit a character mint, and wait for a transaction to be
//! confirmed. Implementations are injected, so the flow runs the same way
//! against a live EVM node or the in-memory simulator.

use async_trait::async_trait;
use epic_types::{
	Address, DeployedContract, DeploymentRequest, PendingDeployment, TransactionHash,
	TransactionReceipt,
};
use thiserror::Error;

pub mod artifacts;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
	pub mod memory;
}

pub use artifacts::{ArtifactStore, ContractArtifact};
pub use implementations::evm::alloy::AlloyChainClient;
pub use implementations::memory::{MintRecord, SimulatedChain};

/// Errors that can occur while talking to the chain.
#[derive(Debug, Error)]
pub enum ChainError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The named contract could not be resolved to deployable bytecode.
	#[error("Contract factory error: {0}")]
	Artifact(String),
	/// Constructor arguments do not match the contract's constructor signature.
	#[error("Constructor of {contract} expects {expected} arguments, got {actual}")]
	ConstructorMismatch {
		contract: String,
		expected: usize,
		actual: usize,
	},
	/// The transaction was mined but reverted.
	#[error("Transaction {hash} reverted: {reason}")]
	Reverted { hash: String, reason: String },
	/// The transaction could not be submitted or produced an unusable result.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	/// Confirmation was not observed in time.
	#[error("Timed out waiting for transaction {0}")]
	Timeout(String),
}

/// Capabilities the deployer needs from a blockchain.
///
/// Every submission returns a handle that must be awaited with the matching
/// wait method. Callers decide the ordering; implementations never batch.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait ChainClient: Send + Sync {
	/// Resolves the contract named in the request and submits its deployment.
	async fn deploy(&self, request: DeploymentRequest) -> Result<PendingDeployment, ChainError>;

	/// Waits until a submitted deployment is confirmed and code exists at the
	/// new address.
	async fn wait_for_deployment(
		&self,
		pending: PendingDeployment,
	) -> Result<DeployedContract, ChainError>;

	/// Submits `mintCharacterNFT(character_index)` against a deployed game contract.
	async fn mint_character(
		&self,
		contract: Address,
		character_index: u64,
	) -> Result<TransactionHash, ChainError>;

	/// Waits until a submitted transaction is confirmed.
	///
	/// A mined-but-reverted transaction is reported as [`ChainError::Reverted`].
	async fn wait_for_confirmation(
		&self,
		hash: TransactionHash,
	) -> Result<TransactionReceipt, ChainError>;
}
