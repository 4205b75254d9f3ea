use hou_types::{Address, AssetId, EventLog};
use serde::{Deserialize, Serialize};

/// Emitted once when a pool is launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCreatedEvent {
    pub total_distribute_amt: u64,
    pub max_raised: u64,
    pub sale_price: u128,
}

/// Emitted for every accepted deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositEvent {
    pub user: Address,
    pub amount: u64,
    pub payment_coin: AssetId,
}

/// Emitted for every non-zero claim payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEvent {
    pub user: Address,
    pub claimed: u64,
}

/// Emitted when the treasury withdraws a payment asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawPaymentEvent {
    pub to: Address,
    pub amount: u64,
    pub payment_coin: AssetId,
}

/// The event streams owned by one pool. FIFO per stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolEvents {
    pub created: EventLog<PoolCreatedEvent>,
    pub deposits: EventLog<DepositEvent>,
    pub claims: EventLog<ClaimEvent>,
    pub withdrawals: EventLog<WithdrawPaymentEvent>,
}
