//! Houston Ledger Module
//!
//! Fungible-asset subsystem backing the supply, allocation, and IDO engines:
//! - Per-asset registration with metadata and optional supply monitoring
//! - Per-(asset, account) balances behind an explicit registration step
//! - Linear `Coin` values with merge / extract / zero arithmetic
//! - A (burn, freeze, mint) capability triple issued once per asset
//!
//! The engines treat this as a trusted primitive: every operation either
//! succeeds completely or returns an error without partial mutation.

pub mod coin;
pub mod errors;
pub mod ledger;

pub use coin::{BurnCapability, Coin, FreezeCapability, MintCapability};
pub use errors::LedgerError;
pub use ledger::Ledger;

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
