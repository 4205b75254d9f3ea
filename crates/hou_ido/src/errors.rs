use hou_ledger::LedgerError;
use thiserror::Error;

/// Errors aborting IDO entry calls.
#[derive(Debug, Error)]
pub enum IdoError {
    #[error("caller is not the configured admin")]
    NotOwner,

    #[error("deposits are only accepted between start and end time")]
    DepositTime,

    #[error("a pool for this offered asset already exists")]
    PoolDuplicates,

    #[error("schedule violates now <= start < end < distribute, or the sale already started")]
    TimeOrder,

    #[error("subscription cap reached")]
    Cap,

    #[error("caller is not the pool treasury")]
    Treasury,

    #[error("distribution has not started")]
    ClaimTime,

    #[error("no deposit recorded for this user")]
    NoDeposit,

    #[error("payment withdrawal is only allowed after the sale ends")]
    WithdrawPaymentTime,

    #[error("nothing to withdraw")]
    WithdrawZeroAmount,

    #[error("invalid vesting settings")]
    VestingSetting,

    #[error("payment asset is already accepted")]
    DuplicateTokens,

    #[error("payment asset is not accepted or not initialized")]
    PaymentToken,

    #[error("pool or payment store does not exist")]
    NotInitialized,

    #[error("sale price must be non-zero")]
    SalePrice,

    #[error("refund would consume the entire per-asset deposit")]
    Refund,

    #[error("payment asset decimals do not match the pool")]
    PaymentDecimals,

    #[error("payment has already been withdrawn")]
    Withdrawn,

    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),

    #[error("ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),
}

impl IdoError {
    /// Stable abort code carried by each failure.
    pub fn code(&self) -> u32 {
        match self {
            IdoError::NotOwner => 1,
            IdoError::DepositTime => 3,
            IdoError::PoolDuplicates => 5,
            IdoError::TimeOrder => 6,
            IdoError::Cap => 7,
            IdoError::Treasury => 8,
            IdoError::ClaimTime => 9,
            IdoError::NoDeposit => 10,
            IdoError::WithdrawPaymentTime => 11,
            IdoError::WithdrawZeroAmount => 12,
            IdoError::VestingSetting => 14,
            IdoError::DuplicateTokens => 15,
            IdoError::PaymentToken => 16,
            IdoError::NotInitialized => 17,
            IdoError::SalePrice => 18,
            IdoError::Refund => 19,
            IdoError::PaymentDecimals => 20,
            IdoError::Withdrawn => 21,
            IdoError::Overflow(_) | IdoError::Ledger(_) => 0,
        }
    }
}
