//! Run orchestration
//!
//! A run deploys the game contract and, for the character-mint version, seeds
//! it with the starter characters. Everything the run needs is resolved up
//! front into a [`ScriptPlan`], so invalid input fails before the first
//! transaction.

use crate::constants::{default_boss, default_roster};
use crate::operations::{Deployer, MintOutcome, MintPlan, Seeder};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::types::error::Result;
use epic_chain::ChainClient;
use epic_config::Config;
use epic_types::{DeployedContract, DeploymentParams, DeploymentRequest, GameVariant};
use std::sync::Arc;

/// Everything a run will submit, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPlan {
	pub variant: GameVariant,
	pub request: DeploymentRequest,
	/// Present only for the character-mint version.
	pub mint_plan: Option<MintPlan>,
}

impl ScriptPlan {
	/// Resolves configuration overrides over the built-in game constants.
	///
	/// The boss is only part of the deployment for the boss-battle version,
	/// and only the character-mint version mints.
	pub fn from_config(config: &Config) -> Result<Self> {
		let variant = config.deployment.variant;
		let roster = config
			.deployment
			.roster
			.clone()
			.unwrap_or_else(default_roster);
		roster.validate()?;

		let boss = match variant {
			GameVariant::BossBattle => Some(
				config
					.deployment
					.boss
					.clone()
					.unwrap_or_else(default_boss),
			),
			GameVariant::CharacterMint => None,
		};

		let mint_plan = if variant.mints_characters() {
			Some(match &config.seed.character_indices {
				Some(indices) => MintPlan::new(indices.clone(), roster.len())?,
				None => MintPlan::default_for(roster.len())?,
			})
		} else {
			None
		};

		Ok(Self {
			variant,
			request: DeploymentRequest::new(
				config.deployment.contract_name.clone(),
				DeploymentParams::new(roster, boss),
			),
			mint_plan,
		})
	}
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
	pub contract: DeployedContract,
	pub mints: Vec<MintOutcome>,
}

/// Deploys, seeds when the plan says so, and reports each milestone to `sink`.
///
/// Stops at the first error. Transactions confirmed before the error stay on
/// chain; nothing is rolled back.
pub async fn run(
	client: Arc<dyn ChainClient>,
	plan: &ScriptPlan,
	sink: &dyn ProgressSink,
) -> Result<RunReport> {
	tracing::info!(
		variant = %plan.variant,
		contract = %plan.request.contract_name,
		"Starting run"
	);

	let contract = Deployer::new(client.clone()).deploy(&plan.request).await?;
	sink.emit(&ProgressEvent::Deployed {
		address: contract.address,
	});

	let mints = match &plan.mint_plan {
		Some(mint_plan) => {
			Seeder::new(client)
				.seed(contract.address, mint_plan, sink)
				.await?
		},
		None => Vec::new(),
	};

	sink.emit(&ProgressEvent::Done {
		variant: plan.variant,
	});
	Ok(RunReport { contract, mints })
}

/// Process exit status for a run result: `0` on success, `1` on any error.
pub fn exit_status<T>(result: &Result<T>) -> u8 {
	match result {
		Ok(_) => 0,
		Err(_) => 1,
	}
}
