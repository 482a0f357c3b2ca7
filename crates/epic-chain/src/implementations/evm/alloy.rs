//! Alloy-based EVM chain client.
//!
//! Deploys compiled contracts and sends game transactions to an EVM JSON-RPC
//! endpoint, signing locally with a private key and waiting for the configured
//! number of confirmations.

use crate::{ArtifactStore, ChainClient, ChainError};
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Bytes, FixedBytes, U256};
use alloy_provider::{
	fillers::{ChainIdFiller, GasFiller, NonceFiller, SimpleNonceManager},
	DynProvider, PendingTransactionConfig, PendingTransactionError, Provider, ProviderBuilder,
};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{sol, SolCall};
use alloy_transport::layers::RetryBackoffLayer;
use async_trait::async_trait;
use epic_types::{
	Address, DeployedContract, DeploymentRequest, PendingDeployment, TransactionHash,
	TransactionReceipt,
};
use std::time::Duration;

sol! {
	/// Minting entry point of the game contract.
	interface IMyEpicGame {
		function mintCharacterNFT(uint256 _characterIndex) external;
	}
}

/// EVM chain client backed by an Alloy provider with a local signer.
pub struct AlloyChainClient {
	provider: DynProvider,
	chain_id: u64,
	artifacts: ArtifactStore,
	confirmations: u64,
	timeout: Duration,
}

impl AlloyChainClient {
	/// Creates a client for a single network.
	///
	/// The signer is bound to `chain_id`. Nonce, gas and chain id are filled
	/// by the provider, and transport errors are retried with backoff.
	pub fn new(
		rpc_url: &str,
		chain_id: u64,
		signer: PrivateKeySigner,
		artifacts: ArtifactStore,
	) -> Result<Self, ChainError> {
		let url = rpc_url
			.parse()
			.map_err(|e| ChainError::Network(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

		let wallet = EthereumWallet::from(signer.with_chain_id(Some(chain_id)));

		let retry_layer = RetryBackoffLayer::new(
			5,    // max_retry: retry up to 5 times
			1000, // backoff: initial backoff in milliseconds
			10,   // cups: compute units per second
		);
		let client = RpcClient::builder().layer(retry_layer).http(url);

		let provider = ProviderBuilder::new()
			.filler(NonceFiller::new(SimpleNonceManager::default()))
			.filler(GasFiller)
			.filler(ChainIdFiller::default())
			.wallet(wallet)
			.connect_client(client);

		Ok(Self {
			provider: provider.erased(),
			chain_id,
			artifacts,
			confirmations: 1,
			timeout: Duration::from_secs(120),
		})
	}

	/// Sets how many confirmations to wait for and for how long.
	pub fn with_confirmations(mut self, confirmations: u64, timeout: Duration) -> Self {
		self.confirmations = confirmations;
		self.timeout = timeout;
		self
	}

	/// Checks that the endpoint answers and serves the expected chain.
	pub async fn verify_chain(&self) -> Result<(), ChainError> {
		let remote = self
			.provider
			.get_chain_id()
			.await
			.map_err(|e| ChainError::Network(format!("Failed to connect: {}", e)))?;

		if remote != self.chain_id {
			return Err(ChainError::Network(format!(
				"RPC endpoint serves chain {} but {} was configured",
				remote, self.chain_id
			)));
		}
		Ok(())
	}

	async fn send(&self, request: TransactionRequest) -> Result<TransactionHash, ChainError> {
		let pending = self.provider.send_transaction(request).await.map_err(|e| {
			tracing::error!(chain_id = self.chain_id, "Transaction submission failed: {}", e);
			ChainError::TransactionFailed(format!("Failed to send transaction: {}", e))
		})?;

		let tx_hash = *pending.tx_hash();
		Ok(TransactionHash(tx_hash.0.to_vec()))
	}
}

#[async_trait]
impl ChainClient for AlloyChainClient {
	async fn deploy(&self, request: DeploymentRequest) -> Result<PendingDeployment, ChainError> {
		let artifact = self.artifacts.load(&request.contract_name)?;
		let data = artifact.deploy_data(&request.params)?;

		tracing::debug!(
			contract = %request.contract_name,
			arity = request.params.arity(),
			data_len = data.len(),
			"Submitting deployment"
		);

		let tx = TransactionRequest::default().with_deploy_code(data);
		let tx_hash = self.send(tx).await?;

		Ok(PendingDeployment {
			contract_name: request.contract_name,
			tx_hash,
		})
	}

	async fn wait_for_deployment(
		&self,
		pending: PendingDeployment,
	) -> Result<DeployedContract, ChainError> {
		let receipt = self.wait_for_confirmation(pending.tx_hash.clone()).await?;

		let address = receipt.contract_address.ok_or_else(|| {
			ChainError::TransactionFailed("No contract address in receipt".to_string())
		})?;

		let code = self
			.provider
			.get_code_at(address)
			.await
			.map_err(|e| ChainError::Network(format!("Failed to get code at {}: {}", address, e)))?;
		if code.is_empty() {
			return Err(ChainError::TransactionFailed(format!(
				"No code at deployed address {}",
				address
			)));
		}

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
		let call = IMyEpicGame::mintCharacterNFTCall {
			_characterIndex: U256::from(character_index),
		};
		let tx = TransactionRequest::default()
			.to(contract)
			.input(Bytes::from(call.abi_encode()).into());

		self.send(tx).await
	}

	async fn wait_for_confirmation(
		&self,
		hash: TransactionHash,
	) -> Result<TransactionReceipt, ChainError> {
		if hash.0.len() != 32 {
			return Err(ChainError::TransactionFailed(format!(
				"Invalid transaction hash {}",
				hash
			)));
		}
		let tx_hash = FixedBytes::<32>::from_slice(&hash.0);

		tracing::debug!(
			tx_hash = %hash,
			confirmations = self.confirmations,
			timeout_secs = self.timeout.as_secs(),
			"Waiting for confirmation"
		);

		let config = PendingTransactionConfig::new(tx_hash)
			.with_required_confirmations(self.confirmations)
			.with_timeout(Some(self.timeout));

		let pending_tx = self
			.provider
			.watch_pending_transaction(config)
			.await
			.map_err(|e| match e {
				PendingTransactionError::FailedToRegister => {
					ChainError::Network("Failed to register transaction watcher".to_string())
				},
				other => ChainError::Network(format!("Transaction watch failed: {}", other)),
			})?;

		let confirmed = pending_tx
			.await
			.map_err(|e| ChainError::Timeout(format!("{}: {}", hash, e)))?;

		let receipt = self
			.provider
			.get_transaction_receipt(confirmed)
			.await
			.map_err(|e| ChainError::Network(format!("Failed to get receipt: {}", e)))?
			.ok_or_else(|| ChainError::Network(format!("Receipt for {} not found", hash)))?;

		if !receipt.status() {
			return Err(ChainError::Reverted {
				hash: hash.to_string(),
				reason: "execution reverted".to_string(),
			});
		}

		Ok(TransactionReceipt {
			hash: TransactionHash(receipt.transaction_hash.0.to_vec()),
			block_number: receipt.block_number.unwrap_or(0),
			success: true,
			contract_address: receipt.contract_address,
		})
	}
}
