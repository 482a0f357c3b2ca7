//! Builders for rosters and receipts.

pub mod roster;
pub mod transaction_receipt;

pub use roster::RosterBuilder;
pub use transaction_receipt::TransactionReceiptBuilder;
