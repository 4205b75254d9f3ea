use hou_types::{Address, AssetId};
use thiserror::Error;

/// Errors surfaced by ledger primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("asset {0} is already initialized")]
    AssetAlreadyInitialized(AssetId),

    #[error("asset {0} is not initialized")]
    UnknownAsset(AssetId),

    #[error("coin of asset {actual} cannot be combined with asset {expected}")]
    AssetMismatch { expected: AssetId, actual: AssetId },

    #[error("account {0} is not registered for asset {1}")]
    NotRegistered(Address, AssetId),

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },

    #[error("insufficient coin value: have {have}, need {need}")]
    InsufficientValue { have: u64, need: u64 },

    #[error("supply overflow for asset {0}")]
    SupplyOverflow(AssetId),
}
