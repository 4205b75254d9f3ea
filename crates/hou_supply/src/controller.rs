use crate::errors::SupplyError;
use hou_ledger::{BurnCapability, Coin, FreezeCapability, Ledger, MintCapability};
use hou_types::{
    Address, AssetId, Clock, EventLog, HOU_DECIMALS, HOU_NAME, HOU_SYMBOL, MINING_SUPPLY_CAP,
    MINING_SUPPLY_PER_SEC,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mining-reserve accounting. `acc_supply` is emission that has accrued but
/// not yet been minted; it is reconciled against the wall clock on every
/// mint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyInfo {
    /// Absolute cap on cumulative mining emission, in base units.
    pub max: u64,
    /// Constant linear emission rate in base units per second.
    pub supply_per_sec: u64,
    /// Base units accrued but not yet minted.
    pub acc_supply: u64,
    /// Last time `acc_supply` was reconciled.
    pub last_supply_ts: u64,
}

/// Witness authorizing mining mints. Obtainable only through
/// [`SupplyController::authorize_mining`].
#[derive(Debug)]
pub struct MiningCapability {
    _private: (),
}

/// Witness authorizing burns. Obtainable only through
/// [`SupplyController::authorize_burning`].
#[derive(Debug)]
pub struct BurningCapability {
    _private: (),
}

/// The ledger capability triple for the HOU coin, owned by the admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCaps {
    pub burn: BurnCapability,
    pub freeze: FreezeCapability,
    pub mint: MintCapability,
}

/// Audit record for an admin self-burn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualBurnEvent {
    pub amount: u64,
}

/// Read model for the current emission state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyStatus {
    pub total_minted: u64,
    pub cap: u64,
    pub remaining: u64,
    pub pending: u64,
    pub emission_percentage: Decimal,
}

/// Administers the HOU coin: hard mint cap, linear mining emission, and the
/// capability witnesses that delegate mint/burn authority.
#[derive(Debug)]
pub struct SupplyController {
    admin: Address,
    clock: Arc<dyn Clock>,
    asset: AssetId,
    caps: Option<AssetCaps>,
    info: Option<SupplyInfo>,
    manual_burns: EventLog<ManualBurnEvent>,
}

impl SupplyController {
    pub fn new(admin: Address, clock: Arc<dyn Clock>) -> Self {
        Self {
            admin,
            clock,
            asset: AssetId::from(HOU_SYMBOL),
            caps: None,
            info: None,
            manual_burns: EventLog::new(),
        }
    }

    /// The HOU asset identifier this controller administers.
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// Register the HOU coin with the ledger and take ownership of its
    /// capability triple. Idempotent.
    pub fn initialize_coin(
        &mut self,
        signer: Address,
        ledger: &mut Ledger,
    ) -> Result<(), SupplyError> {
        if signer != self.admin {
            return Err(SupplyError::NotOwner);
        }
        if self.caps.is_some() {
            return Ok(());
        }
        if ledger.is_initialized(&self.asset) {
            warn!(
                target: "supply",
                "{} is already initialized but its caps are held elsewhere", self.asset
            );
            return Ok(());
        }

        let (burn, freeze, mint) =
            ledger.initialize(self.asset.clone(), HOU_NAME, HOU_SYMBOL, HOU_DECIMALS, true)?;
        self.caps = Some(AssetCaps { burn, freeze, mint });
        info!(target: "supply", "registered {} (\"{}\")", HOU_SYMBOL, HOU_NAME);
        Ok(())
    }

    /// Start the mining emission schedule at the current time. Idempotent.
    pub fn initialize_mining(&mut self, signer: Address) -> Result<(), SupplyError> {
        // Admin assertion: the caller owns the controller and the coin caps.
        if signer != self.admin || self.caps.is_none() {
            return Err(SupplyError::NotOwner);
        }
        if self.info.is_some() {
            return Ok(());
        }

        let now = self.clock.now_seconds();
        self.info = Some(SupplyInfo {
            max: MINING_SUPPLY_CAP,
            supply_per_sec: MINING_SUPPLY_PER_SEC,
            acc_supply: 0,
            last_supply_ts: now,
        });
        info!(
            target: "supply",
            "mining initialized at t={} ({} base units/sec, cap {})",
            now, MINING_SUPPLY_PER_SEC, MINING_SUPPLY_CAP
        );
        Ok(())
    }

    /// Emission accrued and mintable right now, clamped to the cap headroom.
    pub fn pending_supply(&self, ledger: &Ledger) -> Result<u64, SupplyError> {
        let info = self.info.as_ref().ok_or(SupplyError::SupplyInfoMissing)?;
        let minted = total_minted(ledger, &self.asset)?;
        Ok(accrued(info, minted, self.clock.now_seconds()))
    }

    /// Issue a mining witness. Requires admin identity, coin caps, and an
    /// initialized schedule.
    pub fn authorize_mining(&self, signer: Address) -> Result<MiningCapability, SupplyError> {
        if signer != self.admin || self.caps.is_none() {
            return Err(SupplyError::NotOwner);
        }
        if self.info.is_none() {
            return Err(SupplyError::SupplyInfoMissing);
        }
        Ok(MiningCapability { _private: () })
    }

    /// Issue a burning witness under the same conditions as mining.
    pub fn authorize_burning(&self, signer: Address) -> Result<BurningCapability, SupplyError> {
        if signer != self.admin || self.caps.is_none() {
            return Err(SupplyError::NotOwner);
        }
        if self.info.is_none() {
            return Err(SupplyError::SupplyInfoMissing);
        }
        Ok(BurningCapability { _private: () })
    }

    /// Clone of the coin capability triple, for wiring subsystems that mint
    /// HOU directly (the allocation vester). Admin-gated.
    pub fn asset_caps(&self, signer: Address) -> Result<AssetCaps, SupplyError> {
        if signer != self.admin {
            return Err(SupplyError::NotOwner);
        }
        self.caps.clone().ok_or(SupplyError::NotOwner)
    }

    /// Mint from the accrued mining reserve. Reconciles the accrual first;
    /// a zero amount reconciles and returns a zero coin.
    pub fn mint(
        &mut self,
        _cap: &MiningCapability,
        ledger: &mut Ledger,
        amount: u64,
    ) -> Result<Coin, SupplyError> {
        let caps = self.caps.as_ref().ok_or(SupplyError::NotOwner)?;
        let info = self.info.as_mut().ok_or(SupplyError::SupplyInfoMissing)?;
        let now = self.clock.now_seconds();
        let minted = total_minted(ledger, &self.asset)?;

        if minted as u128 + amount as u128 > info.max as u128 {
            return Err(SupplyError::MaxOut {
                requested: amount,
                minted,
                cap: info.max,
            });
        }

        info.acc_supply = accrued(info, minted, now);
        info.last_supply_ts = now;

        if amount == 0 {
            return Ok(Coin::zero(self.asset.clone()));
        }
        if amount > info.acc_supply {
            return Err(SupplyError::PendingAmountNotEnough {
                requested: amount,
                pending: info.acc_supply,
            });
        }

        info.acc_supply -= amount;
        let coin = ledger.mint(&caps.mint, amount)?;
        debug!(target: "supply", "minted {} base units from the mining reserve", amount);
        Ok(coin)
    }

    /// Destroy coins under a burning witness.
    pub fn burn(
        &mut self,
        _cap: &BurningCapability,
        ledger: &mut Ledger,
        coins: Coin,
    ) -> Result<(), SupplyError> {
        let caps = self.caps.as_ref().ok_or(SupplyError::NotOwner)?;
        let amount = coins.value();
        ledger.burn(coins, &caps.burn)?;
        debug!(target: "supply", "burned {} base units", amount);
        Ok(())
    }

    /// Admin-gated burn of the admin's own balance.
    pub fn manual_burn(
        &mut self,
        signer: Address,
        ledger: &mut Ledger,
        amount: u64,
    ) -> Result<(), SupplyError> {
        if signer != self.admin {
            return Err(SupplyError::NotOwner);
        }
        let caps = self.caps.as_ref().ok_or(SupplyError::NotOwner)?;

        let coins = ledger.withdraw(self.admin, &self.asset, amount)?;
        ledger.burn(coins, &caps.burn)?;
        self.manual_burns.emit(ManualBurnEvent { amount });
        info!(target: "supply", "manually burned {} base units", amount);
        Ok(())
    }

    /// Current emission snapshot.
    pub fn status(&self, ledger: &Ledger) -> Result<SupplyStatus, SupplyError> {
        let info = self.info.as_ref().ok_or(SupplyError::SupplyInfoMissing)?;
        let minted = total_minted(ledger, &self.asset)?;
        let pending = accrued(info, minted, self.clock.now_seconds());
        let emission_percentage = if info.max > 0 {
            Decimal::from(minted) / Decimal::from(info.max) * Decimal::from(100)
        } else {
            Decimal::ZERO
        };

        Ok(SupplyStatus {
            total_minted: minted,
            cap: info.max,
            remaining: info.max.saturating_sub(minted),
            pending,
            emission_percentage,
        })
    }

    pub fn manual_burn_events(&self) -> &EventLog<ManualBurnEvent> {
        &self.manual_burns
    }
}

/// Project the cumulative mining emission after `elapsed_secs`, clamped to
/// the cap.
pub fn projected_emission(elapsed_secs: u64) -> u64 {
    let linear = MINING_SUPPLY_PER_SEC as u128 * elapsed_secs as u128;
    linear.min(MINING_SUPPLY_CAP as u128) as u64
}

fn accrued(info: &SupplyInfo, total_minted: u64, now: u64) -> u64 {
    let elapsed = now.saturating_sub(info.last_supply_ts);
    let pending = info.acc_supply as u128 + info.supply_per_sec as u128 * elapsed as u128;
    let headroom = info.max.saturating_sub(total_minted) as u128;
    pending.min(headroom) as u64
}

fn total_minted(ledger: &Ledger, asset: &AssetId) -> Result<u64, SupplyError> {
    Ok(ledger.supply(asset)?.unwrap_or(0) as u64)
}
