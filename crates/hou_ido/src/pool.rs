use crate::events::PoolEvents;
use hou_ledger::Coin;
use hou_types::{Address, AssetId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Escrow of one accepted payment asset for one pool, plus the one-shot
/// withdrawal flag.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentStore {
    pub(crate) coins: Coin,
    pub withdrawn: bool,
}

impl PaymentStore {
    pub(crate) fn new(asset: AssetId) -> Self {
        Self {
            coins: Coin::zero(asset),
            withdrawn: false,
        }
    }

    /// Payment base units currently escrowed.
    pub fn value(&self) -> u64 {
        self.coins.value()
    }
}

/// Per-depositor sale state. `deposit_amounts` is parallel to the pool's
/// `accepted_tokens`; a slot is zeroed when its refund has been paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub subscribed_amount: u64,
    pub deposit_amounts: Vec<u64>,
    pub entitled: u64,
    pub claimed: u64,
}

/// Witness allowing deposits past the per-user cap. Issued only through
/// [`crate::IdoEngine::request_cap`]; intended for the whitelist/ticket
/// module.
#[derive(Debug)]
pub struct SubscribeCapability {
    offered: AssetId,
}

impl SubscribeCapability {
    pub(crate) fn new(offered: AssetId) -> Self {
        Self { offered }
    }

    /// The offered asset whose pool this capability unlocks.
    pub fn offered(&self) -> &AssetId {
        &self.offered
    }
}

/// One sale. Lifecycle is implicit in time: pending before `start_time`,
/// open through `end_time`, closed until `distribute_start_time`, then
/// distributing.
#[derive(Debug, Serialize, Deserialize)]
pub struct Pool {
    pub offered: AssetId,
    pub start_time: u64,
    pub end_time: u64,
    pub distribute_start_time: u64,
    /// Offered base units per payment base unit, scaled by `PRICE_PRECISION`.
    pub sale_price: u128,
    /// Offered-token inventory locked at launch.
    pub total_offer_amount: u64,
    pub(crate) offer_coins: Coin,
    /// Sum of payment base units deposited across all accepted assets.
    pub total_subscribed_amount: u64,
    /// Zero selects overflow mode; non-zero is normalized so the full offer
    /// clears exactly at `sale_price`.
    pub max_raised: u64,
    /// Enforced on the public deposit path only.
    pub max_raised_per_user: u64,
    pub treasury: Address,
    pub tge_percent: u64,
    pub vesting_interval: u64,
    pub total_vesting_time: u64,
    /// Index 0 is the launch payment asset.
    pub accepted_tokens: Vec<AssetId>,
    pub default_decimals: u8,
    pub(crate) payment_stores: Vec<PaymentStore>,
    pub(crate) users: HashMap<Address, UserInfo>,
    pub(crate) events: PoolEvents,
}

impl Pool {
    /// Fixed-cap pools have a non-zero normalized `max_raised`.
    pub fn is_fixed_cap(&self) -> bool {
        self.max_raised > 0
    }

    /// Position of a payment asset in the accepted list, if accepted.
    pub fn accepted_index(&self, asset: &AssetId) -> Option<usize> {
        self.accepted_tokens.iter().position(|t| t == asset)
    }

    /// Live offered-token escrow.
    pub fn offer_escrow(&self) -> u64 {
        self.offer_coins.value()
    }

    /// Live escrow of one payment asset, if accepted.
    pub fn payment_escrow(&self, asset: &AssetId) -> Option<u64> {
        self.accepted_index(asset)
            .map(|idx| self.payment_stores[idx].value())
    }

    /// Whether the given payment asset has been withdrawn by the treasury.
    pub fn payment_withdrawn(&self, asset: &AssetId) -> Option<bool> {
        self.accepted_index(asset)
            .map(|idx| self.payment_stores[idx].withdrawn)
    }

    pub fn user(&self, who: Address) -> Option<&UserInfo> {
        self.users.get(&who)
    }

    pub fn events(&self) -> &PoolEvents {
        &self.events
    }
}
