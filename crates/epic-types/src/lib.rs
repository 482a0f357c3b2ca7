//! Common types module for the epic game deployer.
//!
//! This module defines the data types shared by the configuration layer,
//! the chain clients and the deployment tool: the character roster and boss
//! passed to the game contract constructor, deployment requests, and the
//! transaction handles returned by the network.

/// Transaction and deployment types for blockchain interactions.
pub mod delivery;
/// Game contract constructor parameters and variants.
pub mod game;
/// Secure string type for handling private keys.
pub mod secret_string;
/// Utility functions for common formatting.
pub mod utils;

pub use alloy_primitives::Address;
pub use delivery::*;
pub use game::*;
pub use secret_string::SecretString;
pub use utils::{with_0x_prefix, without_0x_prefix};
