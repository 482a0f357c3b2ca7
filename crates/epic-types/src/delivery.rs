//! Transaction delivery types for the deployer.
//!
//! This module defines the handles returned by the network when a deployment
//! or a mint is submitted, and the receipts observed once they are confirmed.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Blockchain transaction hash representation.
///
/// Stores transaction hashes as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionHash(pub Vec<u8>);

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Transaction receipt containing execution details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
	/// Address of the contract created by this transaction, if any.
	pub contract_address: Option<Address>,
}

/// A submitted deployment that has not been confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeployment {
	pub contract_name: String,
	pub tx_hash: TransactionHash,
}

/// A contract instance confirmed on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
	pub name: String,
	pub address: Address,
	pub tx_hash: TransactionHash,
	pub block_number: u64,
}
