//! Deployment operations
//!
//! The two phases of a run: deploying the game contract, then seeding it with
//! character NFTs.

pub mod deploy;
pub mod seed;

pub use deploy::Deployer;
pub use seed::{MintOutcome, MintPlan, Seeder};
