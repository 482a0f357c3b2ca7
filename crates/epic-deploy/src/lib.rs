//! Deploy-and-seed tool for the MyEpicGame contract.
//!
//! Deploys the game contract with its character roster (and, for the
//! boss-battle version, its boss), then mints a fixed sequence of character
//! NFTs one confirmed transaction at a time. The chain is reached through an
//! injected [`epic_chain::ChainClient`], and every run ends in an explicit
//! [`Result`] that the binary maps to a process exit code.

pub mod cli;
pub mod constants;
pub mod core;
pub mod operations;
pub mod progress;
pub mod runner;
pub mod types;

pub use operations::{Deployer, MintOutcome, MintPlan, Seeder};
pub use progress::{ConsoleProgress, ProgressEvent, ProgressSink, RecordingProgress};
pub use runner::{exit_status, run, RunReport, ScriptPlan};
pub use types::error::{Error, Result};
