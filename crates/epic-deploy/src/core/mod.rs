//! Core infrastructure for the deployment tool
//!
//! Logging setup and the construction of chain clients from configuration.

pub mod client;
pub mod logging;

pub use client::{alloy_client, signer_from_config};
pub use logging::init_logging;
