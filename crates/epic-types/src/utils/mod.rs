//! Utility functions for common formatting.

pub mod formatting;

#[cfg(any(test, feature = "testing"))]
pub mod tests;

pub use formatting::{with_0x_prefix, without_0x_prefix};
