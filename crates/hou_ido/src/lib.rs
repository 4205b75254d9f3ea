//! Houston IDO Engine
//!
//! Runs one token sale per offered asset:
//! - Two subscription modes: fixed-cap (partial-fill, no refunds) and
//!   overflow (unbounded commitment, pro-rata distribution with per-asset
//!   refunds)
//! - Multiple accepted payment assets sharing one decimal scale
//! - TGE-plus-interval vesting applied at claim time
//! - Treasury withdrawal that withholds the refund reserve in overflow mode
//! - A `SubscribeCapability` witness letting a whitelist module deposit past
//!   the per-user cap

pub mod engine;
pub mod errors;
pub mod events;
pub mod pool;
pub mod vesting;

pub use engine::{IdoEngine, LaunchParams};
pub use errors::IdoError;
pub use events::{
    ClaimEvent, DepositEvent, PoolCreatedEvent, PoolEvents, WithdrawPaymentEvent,
};
pub use pool::{PaymentStore, Pool, SubscribeCapability, UserInfo};

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
