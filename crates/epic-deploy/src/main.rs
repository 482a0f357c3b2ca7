use clap::Parser;
use epic_chain::{ChainClient, SimulatedChain};
use epic_deploy::{
	cli::{output::Display, parse_exit_status, Cli},
	core::{alloy_client, init_logging, logging},
	exit_status, run, ConsoleProgress, Result, RunReport, ScriptPlan,
};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(e) => {
			let _ = e.print();
			return ExitCode::from(parse_exit_status(&e));
		},
	};

	if let Err(e) = init_logging(&cli.log_level) {
		Display::warning(&e.to_string());
	}

	let result = execute(&cli).await;
	if let Err(err) = &result {
		logging::operation_error("epic-deploy", err);
	}
	ExitCode::from(exit_status(&result))
}

async fn execute(cli: &Cli) -> Result<RunReport> {
	let config = cli.load_config().await?;
	let plan = ScriptPlan::from_config(&config)?;

	let client: Arc<dyn ChainClient> = if cli.simulate {
		Display::warning("Simulated run: nothing is sent to a network");
		Arc::new(SimulatedChain::new())
	} else {
		tracing::info!(
			rpc_url = %config.network.rpc_url,
			chain_id = config.network.chain_id,
			"Connecting to network"
		);
		let client = alloy_client(&config)?;
		client.verify_chain().await?;
		Arc::new(client)
	};

	run(client, &plan, &ConsoleProgress).await
}
