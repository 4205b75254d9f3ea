//! Houston Shared Types
//!
//! Common vocabulary for the Houston token accounting engine:
//! - Account addresses and their human readable encoding
//! - Stable asset identifiers (the off-chain stand-in for coin type parameters)
//! - The `Clock` seam with wall-clock and manual implementations
//! - Append-only event logs
//! - Numeric constants shared across the supply, allocation, and IDO engines

pub mod address;
pub mod asset;
pub mod clock;
pub mod constants;
pub mod events;

pub use address::{Address, AddressError, ADDRESS_BYTES};
pub use asset::AssetId;
pub use clock::{Clock, ManualClock, SystemClock};
pub use constants::*;
pub use events::EventLog;

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
