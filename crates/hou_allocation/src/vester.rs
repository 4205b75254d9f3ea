use crate::errors::AllocationError;
use hou_ledger::{Ledger, MintCapability};
use hou_types::{Address, AssetId, Clock, EventLog, BASE_UNITS_PER_HOU, ONE_MONTH_SECS, PRICE_PRECISION};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Fixed tranche order.
pub const ECOSYSTEM_POOL: u64 = 0;
pub const TEAM_POOL: u64 = 1;
pub const ADVISOR_POOL: u64 = 2;
pub const LAUNCHPAD_POOL: u64 = 3;

/// One allocation tranche. All amounts are base units; timestamps are
/// seconds. `max == tge_mint + cliff_amount + vesting_amount` and `minted`
/// only increases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub max: u64,
    pub minted: u64,
    pub tge_mint: u64,
    pub cliff_amount: u64,
    pub cliff_start: u64,
    pub cliff_period: u64,
    pub vesting_amount: u64,
    pub vesting_start: u64,
    pub vesting_period: u64,
}

/// Audit record for one allocation claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingEvent {
    pub pool_id: u64,
    pub amount: u64,
    pub to: Address,
}

/// Read model for one tranche.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationStatus {
    pub pool_id: u64,
    pub max: u64,
    pub minted: u64,
    pub pending: u64,
}

/// Holds the ordered allocation tranches and mints vested amounts through
/// the HOU mint capability.
#[derive(Debug)]
pub struct AllocationVester {
    admin: Address,
    clock: Arc<dyn Clock>,
    asset: AssetId,
    mint_cap: MintCapability,
    allocations: Option<Vec<Allocation>>,
    vesting_events: EventLog<VestingEvent>,
}

impl AllocationVester {
    pub fn new(admin: Address, clock: Arc<dyn Clock>, mint_cap: MintCapability) -> Self {
        Self {
            admin,
            clock,
            asset: mint_cap.asset().clone(),
            mint_cap,
            allocations: None,
            vesting_events: EventLog::new(),
        }
    }

    /// One-shot setup of the four tranches, anchored at the current time.
    pub fn initialize_allocation(&mut self, signer: Address) -> Result<(), AllocationError> {
        if signer != self.admin {
            return Err(AllocationError::NotOwner);
        }
        if self.allocations.is_some() {
            return Err(AllocationError::AlreadyInitialized);
        }

        let now = self.clock.now_seconds();
        let tokens = |n: u64| n * BASE_UNITS_PER_HOU;

        // Ecosystem: 5% at TGE, the rest vesting linearly over 24 months.
        let ecosystem_max = tokens(260_000_000);
        let ecosystem_tge = ecosystem_max / 20;
        // Team / Advisor: 10% after a 6-month cliff, the rest vesting
        // linearly over 36 months starting at the cliff deadline.
        let team_max = tokens(250_000_000);
        let team_cliff = team_max / 10;
        let advisor_max = tokens(20_000_000);
        let advisor_cliff = advisor_max / 10;
        // Launchpad: fully liquid at TGE.
        let launchpad_max = tokens(20_000_000);

        self.allocations = Some(vec![
            Allocation {
                max: ecosystem_max,
                minted: 0,
                tge_mint: ecosystem_tge,
                cliff_amount: 0,
                cliff_start: 0,
                cliff_period: 0,
                vesting_amount: ecosystem_max - ecosystem_tge,
                vesting_start: now,
                vesting_period: 24 * ONE_MONTH_SECS,
            },
            Allocation {
                max: team_max,
                minted: 0,
                tge_mint: 0,
                cliff_amount: team_cliff,
                cliff_start: now,
                cliff_period: 6 * ONE_MONTH_SECS,
                vesting_amount: team_max - team_cliff,
                vesting_start: now + 6 * ONE_MONTH_SECS,
                vesting_period: 36 * ONE_MONTH_SECS,
            },
            Allocation {
                max: advisor_max,
                minted: 0,
                tge_mint: 0,
                cliff_amount: advisor_cliff,
                cliff_start: now,
                cliff_period: 6 * ONE_MONTH_SECS,
                vesting_amount: advisor_max - advisor_cliff,
                vesting_start: now + 6 * ONE_MONTH_SECS,
                vesting_period: 36 * ONE_MONTH_SECS,
            },
            Allocation {
                max: launchpad_max,
                minted: 0,
                tge_mint: launchpad_max,
                cliff_amount: 0,
                cliff_start: 0,
                cliff_period: 0,
                vesting_amount: 0,
                vesting_start: 0,
                vesting_period: 0,
            },
        ]);

        info!(target: "allocation", "initialized 4 allocation tranches at t={}", now);
        Ok(())
    }

    /// Base units claimable from a tranche right now.
    pub fn pending_claim(&self, pool_id: u64) -> Result<u64, AllocationError> {
        let allocation = self.allocation_ref(pool_id)?;
        Ok(pending_for(allocation, self.clock.now_seconds()))
    }

    /// Claim `amount` base units from a tranche and deposit them to `to`.
    /// A zero `amount` claims everything pending. Returns the amount minted.
    pub fn claim(
        &mut self,
        signer: Address,
        ledger: &mut Ledger,
        pool_id: u64,
        amount: u64,
        to: Address,
    ) -> Result<u64, AllocationError> {
        if signer != self.admin {
            return Err(AllocationError::NotOwner);
        }

        let pending = {
            let allocation = self.allocation_ref(pool_id)?;
            pending_for(allocation, self.clock.now_seconds())
        };
        if amount > pending {
            return Err(AllocationError::PendingAmountNotEnough {
                requested: amount,
                pending,
            });
        }
        let chosen = if amount == 0 { pending } else { amount };

        let coins = ledger.mint(&self.mint_cap, chosen)?;
        if !ledger.is_registered(&self.asset, to) {
            ledger.register(to, &self.asset)?;
        }
        ledger.deposit(to, coins)?;

        let allocation = self
            .allocations
            .as_mut()
            .ok_or(AllocationError::NotInitialized)?
            .get_mut(pool_id as usize)
            .ok_or(AllocationError::UnknownPool(pool_id))?;
        allocation.minted += chosen;

        self.vesting_events.emit(VestingEvent {
            pool_id,
            amount: chosen,
            to,
        });
        info!(
            target: "allocation",
            "claimed {} base units from pool {} to {}", chosen, pool_id, to
        );
        Ok(chosen)
    }

    pub fn allocation(&self, pool_id: u64) -> Option<&Allocation> {
        self.allocations
            .as_ref()
            .and_then(|allocations| allocations.get(pool_id as usize))
    }

    pub fn allocations(&self) -> &[Allocation] {
        self.allocations.as_deref().unwrap_or(&[])
    }

    pub fn status(&self, pool_id: u64) -> Result<AllocationStatus, AllocationError> {
        let allocation = self.allocation_ref(pool_id)?;
        Ok(AllocationStatus {
            pool_id,
            max: allocation.max,
            minted: allocation.minted,
            pending: pending_for(allocation, self.clock.now_seconds()),
        })
    }

    pub fn vesting_events(&self) -> &EventLog<VestingEvent> {
        &self.vesting_events
    }

    fn allocation_ref(&self, pool_id: u64) -> Result<&Allocation, AllocationError> {
        self.allocations
            .as_ref()
            .ok_or(AllocationError::NotInitialized)?
            .get(pool_id as usize)
            .ok_or(AllocationError::UnknownPool(pool_id))
    }
}

/// Entitlement minus the minted watermark at time `now`, clamped so the
/// tranche can never exceed `max`.
fn pending_for(allocation: &Allocation, now: u64) -> u64 {
    let mut entitled = allocation.tge_mint as u128;

    if allocation.cliff_amount > 0 && now >= allocation.cliff_start + allocation.cliff_period {
        entitled += allocation.cliff_amount as u128;
    }

    if allocation.vesting_amount > 0 && now > allocation.vesting_start {
        let elapsed = now - allocation.vesting_start;
        if elapsed >= allocation.vesting_period {
            entitled += allocation.vesting_amount as u128;
        } else {
            // Multiply-then-divide, keeping 12 fractional digits in the
            // 128-bit intermediate before the final truncation.
            entitled += allocation.vesting_amount as u128 * PRICE_PRECISION * elapsed as u128
                / allocation.vesting_period as u128
                / PRICE_PRECISION;
        }
    }

    let claimable = entitled.saturating_sub(allocation.minted as u128);
    let headroom = (allocation.max - allocation.minted) as u128;
    claimable.min(headroom) as u64
}
