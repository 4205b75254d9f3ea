//! Houston Supply Controller
//!
//! Administers the HOU coin itself:
//! - Registers the coin with the ledger and holds its capability triple
//! - Accrues the mining reserve linearly and enforces the hard mint cap
//! - Issues `MiningCapability` / `BurningCapability` witnesses so other
//!   subsystems can mint and burn without holding the raw ledger caps
//! - Supports an admin-gated manual burn with an audit event

pub mod controller;
pub mod errors;

pub use controller::{
    projected_emission, AssetCaps, BurningCapability, ManualBurnEvent, MiningCapability,
    SupplyController, SupplyInfo, SupplyStatus,
};
pub use errors::SupplyError;

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
