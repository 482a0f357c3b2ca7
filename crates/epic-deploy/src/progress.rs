//! Progress reporting for a deployment run.
//!
//! Each observable milestone of a run is a [`ProgressEvent`] whose `Display`
//! form is the exact console line. Sinks decide where the lines go.

use colored::Colorize;
use epic_types::{Address, GameVariant, TransactionHash};
use std::fmt;
use std::sync::Mutex;

/// A milestone of a deploy-and-seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
	/// The game contract is confirmed at `address`.
	Deployed { address: Address },
	/// The `ordinal`-th mint (1-based) is confirmed.
	Minted {
		ordinal: usize,
		character_index: u64,
		tx_hash: TransactionHash,
	},
	/// The run finished successfully.
	Done { variant: GameVariant },
}

impl fmt::Display for ProgressEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProgressEvent::Deployed { address } => write!(f, "Contract deployed to: {}", address),
			ProgressEvent::Minted { ordinal, .. } => write!(f, "Minted NFT #{}", ordinal),
			ProgressEvent::Done { variant } => {
				if variant.mints_characters() {
					f.write_str("Done deploying and minting!")
				} else {
					f.write_str("Done deploying!")
				}
			},
		}
	}
}

/// Receives progress events in the order they happen.
pub trait ProgressSink: Send + Sync {
	fn emit(&self, event: &ProgressEvent);
}

/// Prints every event to the terminal and records it as a tracing event.
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
	fn emit(&self, event: &ProgressEvent) {
		match event {
			ProgressEvent::Deployed { address } => {
				tracing::info!(address = %address, "Contract deployed");
				println!("{}", event);
			},
			ProgressEvent::Minted {
				ordinal,
				character_index,
				tx_hash,
			} => {
				tracing::info!(
					ordinal = ordinal,
					character_index = character_index,
					tx_hash = %tx_hash,
					"Character minted"
				);
				println!("{}", event);
			},
			ProgressEvent::Done { variant } => {
				tracing::info!(variant = %variant, "Run complete");
				println!("{}", event.to_string().green().bold());
			},
		}
	}
}

/// Keeps the rendered lines in memory.
#[derive(Debug, Default)]
pub struct RecordingProgress {
	lines: Mutex<Vec<String>>,
}

impl RecordingProgress {
	pub fn new() -> Self {
		Self::default()
	}

	/// Lines emitted so far, in order.
	pub fn lines(&self) -> Vec<String> {
		self.lines
			.lock()
			.map(|lines| lines.clone())
			.unwrap_or_default()
	}
}

impl ProgressSink for RecordingProgress {
	fn emit(&self, event: &ProgressEvent) {
		if let Ok(mut lines) = self.lines.lock() {
			lines.push(event.to_string());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_console_lines() {
		let deployed = ProgressEvent::Deployed {
			address: address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
		};
		assert_eq!(
			deployed.to_string(),
			"Contract deployed to: 0x5FbDB2315678afecb367f032d93F642f64180aa3"
		);

		let minted = ProgressEvent::Minted {
			ordinal: 3,
			character_index: 2,
			tx_hash: TransactionHash(vec![0xab; 32]),
		};
		assert_eq!(minted.to_string(), "Minted NFT #3");

		assert_eq!(
			ProgressEvent::Done {
				variant: GameVariant::CharacterMint
			}
			.to_string(),
			"Done deploying and minting!"
		);
		assert_eq!(
			ProgressEvent::Done {
				variant: GameVariant::BossBattle
			}
			.to_string(),
			"Done deploying!"
		);
	}

	#[test]
	fn test_recording_sink_keeps_order() {
		let sink = RecordingProgress::new();
		sink.emit(&ProgressEvent::Minted {
			ordinal: 1,
			character_index: 0,
			tx_hash: TransactionHash(vec![1]),
		});
		sink.emit(&ProgressEvent::Done {
			variant: GameVariant::BossBattle,
		});
		assert_eq!(sink.lines(), vec!["Minted NFT #1", "Done deploying!"]);
	}
}
