//! Logging setup and operation helpers
//!
//! Pairs user-facing terminal output with structured tracing events so the
//! console stays readable while `RUST_LOG=debug` still shows every step.

use crate::cli::output::Display;
use crate::types::error::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` applies to this workspace's
/// crates and everything else logs at `warn`. Events go to stderr so the
/// progress lines on stdout stay clean.
///
/// # Arguments
/// * `level` - Default level directive, such as `info` or `debug`
///
/// # Errors
/// Returns error if the level is not a valid filter directive or a global
/// subscriber is already installed
pub fn init_logging(level: &str) -> anyhow::Result<()> {
	let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
		EnvFilter::try_new(format!(
			"epic_deploy={level},epic_chain={level},epic_config={level},warn"
		))
	})?;

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_thread_ids(false)
		.compact()
		.try_init()
		.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Log operation start with structured context
///
/// Records the beginning of an operation with the parameters it runs with,
/// without printing anything to the user.
///
/// # Arguments
/// * `operation` - Name of the operation starting
/// * `context` - Additional context for the operation
pub fn operation_start(operation: &str, context: &str) {
	info!(operation = operation, context = context, "Operation started");
}

/// Progress update for multi-step operations
///
/// Logs operation progress without user output, so the console keeps only
/// the progress lines of the run while the log carries each step.
///
/// # Arguments
/// * `operation` - Name of the operation in progress
/// * `step` - Current step description
/// * `progress` - Optional progress tuple (current, total)
pub fn operation_progress(operation: &str, step: &str, progress: Option<(u64, u64)>) {
	match progress {
		Some((current, total)) => {
			info!(
				operation = operation,
				step = step,
				current = current,
				total = total,
				"Operation progress"
			);
		},
		None => {
			info!(operation = operation, step = step, "Operation step");
		},
	}
}

/// High-level operation error with both user and developer logging
///
/// Shows a user-facing error message on stderr while capturing the full
/// error, including its debug form, as a structured event.
///
/// # Arguments
/// * `operation` - Name of the operation that failed
/// * `err` - Error that caused the failure
pub fn operation_error(operation: &str, err: &Error) {
	Display::error(&format!("{} failed: {}", operation, err));
	error!(
		operation = operation,
		error = %err,
		error_debug = ?err,
		"Operation failed"
	);
}
