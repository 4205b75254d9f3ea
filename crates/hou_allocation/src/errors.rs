use hou_ledger::LedgerError;
use thiserror::Error;

/// Errors aborting allocation-vester entry calls.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("caller does not own the allocation store")]
    NotOwner,

    #[error("requested {requested} exceeds the pending claim {pending}")]
    PendingAmountNotEnough { requested: u64, pending: u64 },

    #[error("allocations are already initialized")]
    AlreadyInitialized,

    #[error("allocations are not initialized")]
    NotInitialized,

    #[error("unknown allocation pool {0}")]
    UnknownPool(u64),

    #[error("ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),
}

impl AllocationError {
    /// Stable abort code carried by each failure.
    pub fn code(&self) -> u32 {
        match self {
            AllocationError::NotOwner => 1,
            AllocationError::PendingAmountNotEnough { .. } => 5,
            AllocationError::AlreadyInitialized => 6,
            AllocationError::NotInitialized
            | AllocationError::UnknownPool(_)
            | AllocationError::Ledger(_) => 0,
        }
    }
}
