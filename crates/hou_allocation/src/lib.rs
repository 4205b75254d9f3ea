//! Houston Allocation Vester
//!
//! Distributes the pre-allocated HOU tranches (ecosystem, team, advisors,
//! launchpad) under TGE-plus-cliff-plus-linear-vesting rules. Each tranche
//! carries a monotone `minted` watermark; the admin claims vested amounts to
//! any recipient and every claim is recorded in an audit event.

pub mod errors;
pub mod vester;

pub use errors::AllocationError;
pub use vester::{
    Allocation, AllocationStatus, AllocationVester, VestingEvent, ADVISOR_POOL, ECOSYSTEM_POOL,
    LAUNCHPAD_POOL, TEAM_POOL,
};

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
