//! Character NFT seeding
//!
//! Mints a fixed sequence of character NFTs against a deployed game contract.
//! Mints are strictly sequential: each one is submitted, confirmed and
//! reported before the next is submitted, and the first failure stops the
//! sequence.

use crate::constants::SEED_CHARACTER_INDICES;
use crate::core::logging;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::types::error::{Error, Result};
use epic_chain::{ChainClient, ChainError};
use epic_types::{Address, RosterError, TransactionHash};
use std::sync::Arc;
use tracing::instrument;

/// Ordered character indices to mint, checked against a roster size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintPlan {
	indices: Vec<u64>,
}

impl MintPlan {
	/// Creates a plan, rejecting it before anything is submitted when it is
	/// empty or refers to a character outside the roster.
	pub fn new(indices: Vec<u64>, roster_len: usize) -> Result<Self> {
		if indices.is_empty() {
			return Err(Error::InvalidMintPlan("no character indices to mint".into()));
		}
		if let Some(&index) = indices.iter().find(|index| **index >= roster_len as u64) {
			return Err(RosterError::IndexOutOfRange {
				index,
				len: roster_len,
			}
			.into());
		}
		Ok(Self { indices })
	}

	/// The standard `[0, 1, 2, 3, 1]` sequence.
	pub fn default_for(roster_len: usize) -> Result<Self> {
		Self::new(SEED_CHARACTER_INDICES.to_vec(), roster_len)
	}

	pub fn indices(&self) -> &[u64] {
		&self.indices
	}

	pub fn len(&self) -> usize {
		self.indices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.indices.is_empty()
	}
}

/// A confirmed mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintOutcome {
	/// 1-based position in the plan.
	pub ordinal: usize,
	pub character_index: u64,
	pub tx_hash: TransactionHash,
	pub block_number: u64,
}

/// Mints character NFTs through an injected chain client.
pub struct Seeder {
	client: Arc<dyn ChainClient>,
}

impl Seeder {
	pub fn new(client: Arc<dyn ChainClient>) -> Self {
		Self { client }
	}

	/// Mints every index of `plan` on `contract`, in order.
	///
	/// Emits one [`ProgressEvent::Minted`] per confirmed mint. A failed
	/// submission, confirmation or receipt status aborts the remaining mints
	/// and is returned as [`Error::MintFailed`].
	#[instrument(skip_all, fields(contract = %contract, mints = plan.len()))]
	pub async fn seed(
		&self,
		contract: Address,
		plan: &MintPlan,
		sink: &dyn ProgressSink,
	) -> Result<Vec<MintOutcome>> {
		logging::operation_start(
			"seed",
			&format!("{} mints on {}", plan.len(), contract),
		);

		let total = plan.len() as u64;
		let mut outcomes = Vec::with_capacity(plan.len());

		for (position, &character_index) in plan.indices().iter().enumerate() {
			let ordinal = position + 1;
			let failed = |source: ChainError| Error::MintFailed {
				ordinal,
				character_index,
				source,
			};

			let tx_hash = self
				.client
				.mint_character(contract, character_index)
				.await
				.map_err(failed)?;
			tracing::debug!(ordinal, character_index, tx_hash = %tx_hash, "Mint submitted");

			let receipt = self
				.client
				.wait_for_confirmation(tx_hash)
				.await
				.map_err(failed)?;
			if !receipt.success {
				return Err(failed(ChainError::Reverted {
					hash: receipt.hash.to_string(),
					reason: "receipt status is failure".to_string(),
				}));
			}

			logging::operation_progress("seed", "mint confirmed", Some((ordinal as u64, total)));
			sink.emit(&ProgressEvent::Minted {
				ordinal,
				character_index,
				tx_hash: receipt.hash.clone(),
			});

			outcomes.push(MintOutcome {
				ordinal,
				character_index,
				tx_hash: receipt.hash,
				block_number: receipt.block_number,
			});
		}

		Ok(outcomes)
	}
}
