//! Game contract deployment
//!
//! Resolves the contract through the chain client, submits the deployment
//! with its constructor arguments and blocks until it is confirmed.

use crate::core::logging;
use crate::types::error::Result;
use epic_chain::ChainClient;
use epic_types::{DeployedContract, DeploymentRequest};
use std::sync::Arc;
use tracing::instrument;

/// Deploys game contracts through an injected chain client.
pub struct Deployer {
	client: Arc<dyn ChainClient>,
}

impl Deployer {
	pub fn new(client: Arc<dyn ChainClient>) -> Self {
		Self { client }
	}

	/// Deploys `request` and waits until the contract is live.
	///
	/// The roster is checked first, so mismatched parallel arrays never reach
	/// the network. Submission and confirmation errors are returned as-is;
	/// nothing is retried.
	#[instrument(skip_all, fields(contract = %request.contract_name, arity = request.params.arity()))]
	pub async fn deploy(&self, request: &DeploymentRequest) -> Result<DeployedContract> {
		request.params.roster.validate()?;

		logging::operation_start(
			"deploy",
			&format!(
				"{} with {} characters{}",
				request.contract_name,
				request.params.roster.len(),
				if request.params.boss.is_some() {
					" and a boss"
				} else {
					""
				}
			),
		);

		let pending = self.client.deploy(request.clone()).await?;
		tracing::debug!(tx_hash = %pending.tx_hash, "Deployment submitted");

		let deployed = self.client.wait_for_deployment(pending).await?;
		tracing::debug!(
			address = %deployed.address,
			block = deployed.block_number,
			"Deployment confirmed"
		);
		Ok(deployed)
	}
}
