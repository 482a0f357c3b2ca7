//! In-memory simulated chain.
//!
//! Emulates just enough of the game contract to exercise the deploy-and-seed
//! flow without a node: constructor checks, character minting with token ids,
//! and confirmation of submitted transactions. Useful for tests and for
//! `--simulate` dry runs.
//!
//! Submitted transactions stay pending until `wait_for_*` is called for them,
//! and state changes are applied at that point. This makes the number of
//! simultaneously unconfirmed transactions observable through
//! [`SimulatedChain::max_in_flight`].

use crate::{ChainClient, ChainError};
use alloy_primitives::{address, keccak256};
use async_trait::async_trait;
use epic_types::{
	Address, DeployedContract, DeploymentParams, DeploymentRequest, GameVariant, PendingDeployment,
	TransactionHash, TransactionReceipt,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Account that signs every simulated transaction (development account #0).
pub const SIMULATED_DEPLOYER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// A character NFT minted on the simulated contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRecord {
	/// Token id, starting at 1.
	pub token_id: u64,
	pub character_index: u64,
	pub owner: Address,
	pub tx_hash: TransactionHash,
}

struct GameContract {
	params: DeploymentParams,
	mints: Vec<MintRecord>,
	next_token_id: u64,
}

enum PendingTx {
	Deploy {
		address: Address,
		params: DeploymentParams,
	},
	Mint {
		contract: Address,
		character_index: u64,
	},
}

#[derive(Default)]
struct ChainState {
	nonce: u64,
	block_number: u64,
	contracts: HashMap<Address, GameContract>,
	pending: HashMap<TransactionHash, PendingTx>,
	mint_calls: u64,
	max_in_flight: usize,
}

impl ChainState {
	fn next_tx_hash(&mut self, sender: Address) -> TransactionHash {
		let mut preimage = sender.to_vec();
		preimage.extend_from_slice(&self.nonce.to_be_bytes());
		self.nonce += 1;
		TransactionHash(keccak256(preimage).to_vec())
	}

	fn track_pending(&mut self, hash: TransactionHash, tx: PendingTx) {
		self.pending.insert(hash, tx);
		self.max_in_flight = self.max_in_flight.max(self.pending.len());
	}
}

/// In-memory chain hosting simulated game contracts.
#[derive(Clone)]
pub struct SimulatedChain {
	deployer: Address,
	/// Known contract names and the constructor arities they accept.
	constructors: HashMap<String, Vec<usize>>,
	fail_mint_call: Option<u64>,
	state: Arc<Mutex<ChainState>>,
}

impl SimulatedChain {
	/// Creates a chain that knows `MyEpicGame` in both its 4- and 8-argument forms.
	pub fn new() -> Self {
		let mut constructors = HashMap::new();
		constructors.insert(
			"MyEpicGame".to_string(),
			vec![
				GameVariant::CharacterMint.constructor_arity(),
				GameVariant::BossBattle.constructor_arity(),
			],
		);
		Self {
			deployer: SIMULATED_DEPLOYER,
			constructors,
			fail_mint_call: None,
			state: Arc::new(Mutex::new(ChainState::default())),
		}
	}

	/// Registers a contract that accepts exactly `arity` constructor arguments.
	pub fn with_contract(mut self, name: &str, arity: usize) -> Self {
		self.constructors.insert(name.to_string(), vec![arity]);
		self
	}

	/// Makes the `call_number`-th mint submission (1-based) fail.
	pub fn fail_mint_call(mut self, call_number: u64) -> Self {
		self.fail_mint_call = Some(call_number);
		self
	}

	pub fn deployer(&self) -> Address {
		self.deployer
	}

	/// Mints recorded on `contract`, in confirmation order.
	pub async fn mints(&self, contract: Address) -> Vec<MintRecord> {
		let state = self.state.lock().await;
		state
			.contracts
			.get(&contract)
			.map(|game| game.mints.clone())
			.unwrap_or_default()
	}

	/// Constructor arguments `contract` was deployed with.
	pub async fn deployment_params(&self, contract: Address) -> Option<DeploymentParams> {
		let state = self.state.lock().await;
		state.contracts.get(&contract).map(|game| game.params.clone())
	}

	/// Number of mint submissions attempted so far, including failed ones.
	pub async fn mint_calls(&self) -> u64 {
		self.state.lock().await.mint_calls
	}

	/// Highest number of transactions that were submitted but unconfirmed at once.
	pub async fn max_in_flight(&self) -> usize {
		self.state.lock().await.max_in_flight
	}
}

impl Default for SimulatedChain {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ChainClient for SimulatedChain {
	async fn deploy(&self, request: DeploymentRequest) -> Result<PendingDeployment, ChainError> {
		let arities = self.constructors.get(&request.contract_name).ok_or_else(|| {
			ChainError::Artifact(format!("Contract {} not found", request.contract_name))
		})?;
		if !arities.contains(&request.params.arity()) {
			return Err(ChainError::ConstructorMismatch {
				contract: request.contract_name.clone(),
				expected: arities.first().copied().unwrap_or_default(),
				actual: request.params.arity(),
			});
		}

		let mut state = self.state.lock().await;
		let address = self.deployer.create(state.nonce);
		let tx_hash = state.next_tx_hash(self.deployer);
		state.track_pending(
			tx_hash.clone(),
			PendingTx::Deploy {
				address,
				params: request.params,
			},
		);

		tracing::debug!(contract = %request.contract_name, tx_hash = %tx_hash, "Simulated deployment submitted");
		Ok(PendingDeployment {
			contract_name: request.contract_name,
			tx_hash,
		})
	}

	async fn wait_for_deployment(
		&self,
		pending: PendingDeployment,
	) -> Result<DeployedContract, ChainError> {
		let receipt = self.wait_for_confirmation(pending.tx_hash).await?;
		let address = receipt.contract_address.ok_or_else(|| {
			ChainError::TransactionFailed("No contract address in receipt".to_string())
		})?;

		Ok(DeployedContract {
			name: pending.contract_name,
			address,
			tx_hash: receipt.hash,
			block_number: receipt.block_number,
		})
	}

	async fn mint_character(
		&self,
		contract: Address,
		character_index: u64,
	) -> Result<TransactionHash, ChainError> {
		let mut state = self.state.lock().await;
		state.mint_calls += 1;

		if self.fail_mint_call == Some(state.mint_calls) {
			return Err(ChainError::TransactionFailed(format!(
				"Injected failure on mint call #{}",
				state.mint_calls
			)));
		}
		if !state.contracts.contains_key(&contract) {
			return Err(ChainError::TransactionFailed(format!(
				"No contract deployed at {}",
				contract
			)));
		}

		let tx_hash = state.next_tx_hash(self.deployer);
		state.track_pending(
			tx_hash.clone(),
			PendingTx::Mint {
				contract,
				character_index,
			},
		);
		Ok(tx_hash)
	}

	async fn wait_for_confirmation(
		&self,
		hash: TransactionHash,
	) -> Result<TransactionReceipt, ChainError> {
		let mut state = self.state.lock().await;
		let pending = state
			.pending
			.remove(&hash)
			.ok_or_else(|| ChainError::Network(format!("Transaction {} not found", hash)))?;

		state.block_number += 1;
		let block_number = state.block_number;
		let reverted = |reason: String| ChainError::Reverted {
			hash: hash.to_string(),
			reason,
		};

		match pending {
			PendingTx::Deploy { address, params } => {
				params.roster.validate().map_err(|e| reverted(e.to_string()))?;
				state.contracts.insert(
					address,
					GameContract {
						params,
						mints: Vec::new(),
						next_token_id: 1,
					},
				);

				Ok(TransactionReceipt {
					hash,
					block_number,
					success: true,
					contract_address: Some(address),
				})
			},
			PendingTx::Mint {
				contract,
				character_index,
			} => {
				let owner = self.deployer;
				let game = state
					.contracts
					.get_mut(&contract)
					.ok_or_else(|| reverted(format!("no contract at {}", contract)))?;
				game.params
					.roster
					.check_index(character_index)
					.map_err(|e| reverted(e.to_string()))?;

				game.mints.push(MintRecord {
					token_id: game.next_token_id,
					character_index,
					owner,
					tx_hash: hash.clone(),
				});
				game.next_token_id += 1;

				Ok(TransactionReceipt {
					hash,
					block_number,
					success: true,
					contract_address: None,
				})
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use epic_types::utils::tests::builders::RosterBuilder;
	use epic_types::BossSpec;

	fn game_request() -> DeploymentRequest {
		DeploymentRequest::new(
			"MyEpicGame",
			DeploymentParams::new(RosterBuilder::new().build(), None),
		)
	}

	async fn deploy(chain: &SimulatedChain, request: DeploymentRequest) -> DeployedContract {
		let pending = chain.deploy(request).await.unwrap();
		chain.wait_for_deployment(pending).await.unwrap()
	}

	#[tokio::test]
	async fn test_deploy_yields_address_and_params() {
		let chain = SimulatedChain::new();
		let deployed = deploy(&chain, game_request()).await;

		assert_eq!(deployed.name, "MyEpicGame");
		assert_eq!(deployed.address, SIMULATED_DEPLOYER.create(0));
		assert_eq!(deployed.block_number, 1);
		assert_eq!(
			chain.deployment_params(deployed.address).await,
			Some(game_request().params)
		);
	}

	#[tokio::test]
	async fn test_accepts_both_game_versions() {
		let chain = SimulatedChain::new();
		let boss = BossSpec {
			name: "Boss".to_string(),
			image_uri: "ipfs://boss".to_string(),
			hit_points: 100,
			attack_damage: 10,
		};
		let request = DeploymentRequest::new(
			"MyEpicGame",
			DeploymentParams::new(RosterBuilder::new().build(), Some(boss)),
		);

		let first = deploy(&chain, game_request()).await;
		let second = deploy(&chain, request).await;
		assert_ne!(first.address, second.address);
		assert_eq!(
			chain
				.deployment_params(second.address)
				.await
				.map(|params| params.arity()),
			Some(GameVariant::BossBattle.constructor_arity())
		);
	}

	#[tokio::test]
	async fn test_mismatched_roster_reverts() {
		let chain = SimulatedChain::new();
		let roster = RosterBuilder::new().with_attack_damage(vec![1, 2, 3]).build();
		let pending = chain
			.deploy(DeploymentRequest::new(
				"MyEpicGame",
				DeploymentParams::new(roster, None),
			))
			.await
			.unwrap();

		let err = chain.wait_for_deployment(pending).await.unwrap_err();
		assert!(matches!(err, ChainError::Reverted { .. }));
	}

	#[tokio::test]
	async fn test_unknown_contract_and_wrong_arity() {
		let chain = SimulatedChain::new().with_contract("LegacyGame", 4);

		let mut request = game_request();
		request.contract_name = "Unknown".to_string();
		assert!(matches!(
			chain.deploy(request).await,
			Err(ChainError::Artifact(_))
		));

		let boss = BossSpec {
			name: "Boss".to_string(),
			image_uri: "ipfs://boss".to_string(),
			hit_points: 100,
			attack_damage: 10,
		};
		let request = DeploymentRequest::new(
			"LegacyGame",
			DeploymentParams::new(RosterBuilder::new().build(), Some(boss)),
		);
		assert!(matches!(
			chain.deploy(request).await,
			Err(ChainError::ConstructorMismatch {
				expected: 4,
				actual: 8,
				..
			})
		));
	}

	#[tokio::test]
	async fn test_mints_recorded_in_order_with_token_ids() {
		let chain = SimulatedChain::new();
		let deployed = deploy(&chain, game_request()).await;

		for index in [2u64, 2, 0] {
			let hash = chain.mint_character(deployed.address, index).await.unwrap();
			let receipt = chain.wait_for_confirmation(hash).await.unwrap();
			assert!(receipt.success);
		}

		let mints = chain.mints(deployed.address).await;
		let summary: Vec<(u64, u64)> = mints
			.iter()
			.map(|m| (m.token_id, m.character_index))
			.collect();
		assert_eq!(summary, vec![(1, 2), (2, 2), (3, 0)]);
		assert!(mints.iter().all(|m| m.owner == chain.deployer()));
		assert_eq!(chain.max_in_flight().await, 1);
	}

	#[tokio::test]
	async fn test_out_of_range_mint_reverts() {
		let chain = SimulatedChain::new();
		let deployed = deploy(&chain, game_request()).await;

		let hash = chain.mint_character(deployed.address, 4).await.unwrap();
		let err = chain.wait_for_confirmation(hash).await.unwrap_err();
		assert!(matches!(err, ChainError::Reverted { reason, .. } if reason.contains("index 4")));
		assert!(chain.mints(deployed.address).await.is_empty());
	}

	#[tokio::test]
	async fn test_injected_mint_failure() {
		let chain = SimulatedChain::new().fail_mint_call(2);
		let deployed = deploy(&chain, game_request()).await;

		let first = chain.mint_character(deployed.address, 0).await.unwrap();
		chain.wait_for_confirmation(first).await.unwrap();

		let second = chain.mint_character(deployed.address, 1).await;
		assert!(matches!(second, Err(ChainError::TransactionFailed(_))));
		assert_eq!(chain.mint_calls().await, 2);
		assert_eq!(chain.mints(deployed.address).await.len(), 1);
	}

	#[tokio::test]
	async fn test_parallel_submission_is_observable() {
		let chain = SimulatedChain::new();
		let deployed = deploy(&chain, game_request()).await;

		let a = chain.mint_character(deployed.address, 0).await.unwrap();
		let b = chain.mint_character(deployed.address, 1).await.unwrap();
		chain.wait_for_confirmation(a).await.unwrap();
		chain.wait_for_confirmation(b.clone()).await.unwrap();

		assert_eq!(chain.max_in_flight().await, 2);
		// A confirmed transaction cannot be awaited twice
		assert!(matches!(
			chain.wait_for_confirmation(b).await,
			Err(ChainError::Network(_))
		));
	}

	#[tokio::test]
	async fn test_mint_without_contract_fails() {
		let chain = SimulatedChain::new();
		let err = chain
			.mint_character(Address::repeat_byte(0x99), 0)
			.await
			.unwrap_err();
		assert!(matches!(err, ChainError::TransactionFailed(_)));
	}
}
