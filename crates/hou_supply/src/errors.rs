use hou_ledger::LedgerError;
use thiserror::Error;

/// Errors aborting supply-controller entry calls.
#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("caller does not own the supply controller")]
    NotOwner,

    #[error("mint of {requested} would exceed the mining cap (minted {minted}, cap {cap})")]
    MaxOut {
        requested: u64,
        minted: u64,
        cap: u64,
    },

    #[error("mining has not been initialized")]
    SupplyInfoMissing,

    #[error("requested {requested} exceeds the accrued pending supply {pending}")]
    PendingAmountNotEnough { requested: u64, pending: u64 },

    #[error("ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),
}

impl SupplyError {
    /// Stable abort code carried by each failure.
    pub fn code(&self) -> u32 {
        match self {
            SupplyError::NotOwner => 1,
            SupplyError::MaxOut { .. } => 2,
            SupplyError::SupplyInfoMissing => 4,
            SupplyError::PendingAmountNotEnough { .. } => 5,
            SupplyError::Ledger(_) => 0,
        }
    }
}
