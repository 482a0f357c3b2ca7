//! Types local to the deployment tool.

pub mod error;
