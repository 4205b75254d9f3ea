use crate::errors::IdoError;
use crate::events::{
    ClaimEvent, DepositEvent, PoolCreatedEvent, PoolEvents, WithdrawPaymentEvent,
};
use crate::pool::{PaymentStore, Pool, SubscribeCapability, UserInfo};
use crate::vesting::{claimable_amount, entitlement_at_price};
use hou_ledger::Ledger;
use hou_types::{Address, AssetId, Clock, PRICE_PRECISION, TGE_PERCENT_DENOM};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Arguments to [`IdoEngine::create_launch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchParams {
    pub offered: AssetId,
    pub payment: AssetId,
    pub treasury: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub distribute_start_time: u64,
    pub total_offer_amount: u64,
    pub sale_price: u128,
    pub max_raised: u64,
    pub max_raised_per_user: u64,
}

/// Runs one sale per offered asset. Entry calls are strict-serial; a caller
/// adding concurrency wraps the engine in a single-writer lock per pool.
#[derive(Debug)]
pub struct IdoEngine {
    admin: Address,
    clock: Arc<dyn Clock>,
    pools: HashMap<AssetId, Pool>,
}

impl IdoEngine {
    pub fn new(admin: Address, clock: Arc<dyn Clock>) -> Self {
        Self {
            admin,
            clock,
            pools: HashMap::new(),
        }
    }

    /// Launch a sale for `params.offered`, escrowing the full offer
    /// inventory from the admin. One-shot per offered asset.
    pub fn create_launch(
        &mut self,
        signer: Address,
        ledger: &mut Ledger,
        params: LaunchParams,
    ) -> Result<(), IdoError> {
        if signer != self.admin {
            return Err(IdoError::NotOwner);
        }
        if self.pools.contains_key(&params.offered) {
            return Err(IdoError::PoolDuplicates);
        }

        let now = self.clock.now_seconds();
        if !(now <= params.start_time
            && params.start_time < params.end_time
            && params.end_time < params.distribute_start_time)
        {
            return Err(IdoError::TimeOrder);
        }
        if params.sale_price == 0 {
            return Err(IdoError::SalePrice);
        }
        if !ledger.account_exists(params.treasury) {
            return Err(IdoError::Treasury);
        }
        if !ledger.is_initialized(&params.payment) {
            return Err(IdoError::PaymentToken);
        }
        let default_decimals = ledger.decimals(&params.payment)?;

        // In fixed-cap mode the cap is normalized so the whole offer
        // inventory is exactly sellable at the sale price.
        let mut max_raised = params.max_raised;
        if max_raised > 0 {
            let implied = PRICE_PRECISION
                .checked_mul(params.total_offer_amount as u128)
                .ok_or(IdoError::Overflow("max_raised"))?
                / params.sale_price;
            if implied != max_raised as u128 {
                max_raised =
                    u64::try_from(implied).map_err(|_| IdoError::Overflow("max_raised"))?;
            }
        }

        let offer_coins = ledger.withdraw(signer, &params.offered, params.total_offer_amount)?;

        let mut events = PoolEvents::default();
        events.created.emit(PoolCreatedEvent {
            total_distribute_amt: params.total_offer_amount,
            max_raised,
            sale_price: params.sale_price,
        });

        info!(
            target: "ido",
            "launched pool {}: offer {}, price {}, max_raised {} ({} mode)",
            params.offered,
            params.total_offer_amount,
            params.sale_price,
            max_raised,
            if max_raised > 0 { "fixed-cap" } else { "overflow" }
        );

        self.pools.insert(
            params.offered.clone(),
            Pool {
                offered: params.offered,
                start_time: params.start_time,
                end_time: params.end_time,
                distribute_start_time: params.distribute_start_time,
                sale_price: params.sale_price,
                total_offer_amount: params.total_offer_amount,
                offer_coins,
                total_subscribed_amount: 0,
                max_raised,
                max_raised_per_user: params.max_raised_per_user,
                treasury: params.treasury,
                tge_percent: TGE_PERCENT_DENOM,
                vesting_interval: 0,
                total_vesting_time: 0,
                accepted_tokens: vec![params.payment.clone()],
                default_decimals,
                payment_stores: vec![PaymentStore::new(params.payment)],
                users: HashMap::new(),
                events,
            },
        );
        Ok(())
    }

    /// Configure claim vesting. Only before the sale opens.
    pub fn add_vesting(
        &mut self,
        signer: Address,
        offered: &AssetId,
        tge_percent: u64,
        vesting_interval: u64,
        total_vesting_time: u64,
    ) -> Result<(), IdoError> {
        if signer != self.admin {
            return Err(IdoError::NotOwner);
        }
        let now = self.clock.now_seconds();
        let pool = self.pools.get_mut(offered).ok_or(IdoError::NotInitialized)?;
        if now >= pool.start_time {
            return Err(IdoError::TimeOrder);
        }
        if tge_percent >= TGE_PERCENT_DENOM
            || vesting_interval == 0
            || total_vesting_time < vesting_interval
        {
            return Err(IdoError::VestingSetting);
        }

        pool.tge_percent = tge_percent;
        pool.vesting_interval = vesting_interval;
        pool.total_vesting_time = total_vesting_time;
        debug!(
            target: "ido",
            "pool {}: vesting set to {} bps TGE, interval {}, total {}",
            offered, tge_percent, vesting_interval, total_vesting_time
        );
        Ok(())
    }

    /// Accept an additional payment asset. Only before the sale opens; the
    /// asset must share the pool's decimal scale.
    pub fn add_payment_tokens(
        &mut self,
        signer: Address,
        ledger: &Ledger,
        offered: &AssetId,
        payment: AssetId,
    ) -> Result<(), IdoError> {
        if signer != self.admin {
            return Err(IdoError::NotOwner);
        }
        let now = self.clock.now_seconds();
        let pool = self.pools.get_mut(offered).ok_or(IdoError::NotInitialized)?;
        if now >= pool.start_time {
            return Err(IdoError::TimeOrder);
        }
        if !ledger.is_initialized(&payment) {
            return Err(IdoError::PaymentToken);
        }
        if pool.accepted_index(&payment).is_some() {
            return Err(IdoError::DuplicateTokens);
        }
        if ledger.decimals(&payment)? != pool.default_decimals {
            return Err(IdoError::PaymentDecimals);
        }

        pool.accepted_tokens.push(payment.clone());
        pool.payment_stores.push(PaymentStore::new(payment.clone()));
        debug!(target: "ido", "pool {}: accepting payment asset {}", offered, payment);
        Ok(())
    }

    /// Public deposit path: subject to the per-user cap.
    pub fn deposit(
        &mut self,
        ledger: &mut Ledger,
        user: Address,
        offered: &AssetId,
        payment: &AssetId,
        amount: u64,
    ) -> Result<u64, IdoError> {
        self.deposit_internal(ledger, user, offered, payment, amount, true)
    }

    /// Capability deposit path: bypasses the per-user cap. Intended for the
    /// whitelist/ticket module.
    pub fn deposit_with_cap(
        &mut self,
        ledger: &mut Ledger,
        user: Address,
        payment: &AssetId,
        amount: u64,
        cap: &SubscribeCapability,
    ) -> Result<u64, IdoError> {
        let offered = cap.offered().clone();
        self.deposit_internal(ledger, user, &offered, payment, amount, false)
    }

    fn deposit_internal(
        &mut self,
        ledger: &mut Ledger,
        user: Address,
        offered: &AssetId,
        payment: &AssetId,
        amount: u64,
        enforce_user_cap: bool,
    ) -> Result<u64, IdoError> {
        let now = self.clock.now_seconds();
        let pool = self.pools.get_mut(offered).ok_or(IdoError::NotInitialized)?;
        let idx = pool.accepted_index(payment).ok_or(IdoError::PaymentToken)?;

        if now < pool.start_time || now > pool.end_time {
            return Err(IdoError::DepositTime);
        }

        // Fixed-cap pools partially fill the deposit that crosses the cap.
        let mut amount = amount;
        if pool.max_raised > 0 {
            if pool.total_subscribed_amount >= pool.max_raised {
                return Err(IdoError::Cap);
            }
            let remaining = pool.max_raised - pool.total_subscribed_amount;
            if remaining < amount {
                amount = remaining;
            }
        }

        let previous = pool
            .users
            .get(&user)
            .map(|u| u.subscribed_amount)
            .unwrap_or(0);
        let subscribed = previous
            .checked_add(amount)
            .ok_or(IdoError::Overflow("subscription"))?;
        if enforce_user_cap && subscribed > pool.max_raised_per_user {
            return Err(IdoError::Cap);
        }
        let entitled = if pool.max_raised > 0 {
            Some(entitlement_at_price(pool.sale_price, subscribed)?)
        } else {
            None
        };

        let coins = ledger.withdraw(user, payment, amount)?;

        pool.total_subscribed_amount += amount;
        let accepted_len = pool.accepted_tokens.len();
        let Pool {
            payment_stores,
            users,
            events,
            ..
        } = pool;
        payment_stores[idx].coins.merge(coins)?;

        let entry = users.entry(user).or_insert_with(|| UserInfo {
            subscribed_amount: 0,
            deposit_amounts: vec![0; accepted_len],
            entitled: 0,
            claimed: 0,
        });
        entry.subscribed_amount = subscribed;
        entry.deposit_amounts[idx] += amount;
        if let Some(entitled) = entitled {
            entry.entitled = entitled;
        }

        events.deposits.emit(DepositEvent {
            user,
            amount,
            payment_coin: payment.clone(),
        });
        debug!(
            target: "ido",
            "pool {}: {} deposited {} {} (subscribed {})",
            offered, user, amount, payment, subscribed
        );
        Ok(subscribed)
    }

    /// Claim entitlement (and any refund owed in `payment`) after
    /// distribution starts. Returns the offered base units paid out; a zero
    /// claimable is a silent no-op aside from the refund.
    pub fn claim(
        &mut self,
        ledger: &mut Ledger,
        user: Address,
        offered: &AssetId,
        payment: &AssetId,
    ) -> Result<u64, IdoError> {
        let now = self.clock.now_seconds();
        let pool = self.pools.get_mut(offered).ok_or(IdoError::NotInitialized)?;
        if now < pool.distribute_start_time {
            return Err(IdoError::ClaimTime);
        }
        let idx = pool.accepted_index(payment).ok_or(IdoError::PaymentToken)?;

        let sale_price = pool.sale_price;
        let fixed_cap = pool.max_raised > 0;
        let total_offer = pool.total_offer_amount;
        let total_subscribed = pool.total_subscribed_amount;
        let distribute_start = pool.distribute_start_time;
        let tge_percent = pool.tge_percent;
        let vesting_interval = pool.vesting_interval;
        let total_vesting_time = pool.total_vesting_time;
        let offered_asset = pool.offered.clone();

        let Pool {
            payment_stores,
            users,
            offer_coins,
            events,
            ..
        } = pool;
        let user_info = users.get_mut(&user).ok_or(IdoError::NoDeposit)?;

        // Entitlement under both laws: what the subscription buys at the
        // sale price, and the pro-rata share of the offer inventory.
        let non_overflow = entitlement_at_price(sale_price, user_info.subscribed_amount)?;
        let overflow = if fixed_cap {
            non_overflow
        } else if total_subscribed == 0 {
            0
        } else {
            (total_offer as u128 * user_info.subscribed_amount as u128
                / total_subscribed as u128) as u64
        };

        // Oversubscribed: the surplus payment is refunded in this payment
        // asset, once.
        if overflow < non_overflow {
            let deposited = user_info.deposit_amounts[idx];
            if deposited > 0 {
                let excess_payment =
                    (non_overflow - overflow) as u128 * PRICE_PRECISION / sale_price;
                let refund = excess_payment
                    .checked_mul(deposited as u128)
                    .ok_or(IdoError::Overflow("refund"))?
                    / user_info.subscribed_amount as u128;
                let refund = refund as u64;
                if refund >= deposited {
                    return Err(IdoError::Refund);
                }

                let coins = payment_stores[idx].coins.extract(refund)?;
                ledger.deposit(user, coins)?;
                user_info.deposit_amounts[idx] = 0;
                debug!(
                    target: "ido",
                    "pool {}: refunded {} {} to {}", offered_asset, refund, payment, user
                );
            }
        }

        // The entitlement locks at first claim and never moves again.
        if user_info.entitled == 0 {
            user_info.entitled = overflow.min(non_overflow);
        }

        if !ledger.is_registered(&offered_asset, user) {
            ledger.register(user, &offered_asset)?;
        }

        let claimable = claimable_amount(
            user_info.entitled,
            user_info.claimed,
            now,
            distribute_start,
            tge_percent,
            vesting_interval,
            total_vesting_time,
        );
        if claimable > 0 {
            user_info.claimed += claimable;
            let coins = offer_coins.extract(claimable)?;
            ledger.deposit(user, coins)?;
            events.claims.emit(ClaimEvent {
                user,
                claimed: claimable,
            });
            info!(
                target: "ido",
                "pool {}: {} claimed {} base units", offered_asset, user, claimable
            );
        }
        Ok(claimable)
    }

    /// Treasury withdrawal of one payment asset after the sale ends. In
    /// overflow mode the pro-rata refund reserve stays behind. One-shot per
    /// payment asset.
    pub fn withdraw_payment(
        &mut self,
        ledger: &mut Ledger,
        signer: Address,
        offered: &AssetId,
        payment: &AssetId,
    ) -> Result<u64, IdoError> {
        let now = self.clock.now_seconds();
        let pool = self.pools.get_mut(offered).ok_or(IdoError::NotInitialized)?;
        let idx = pool.accepted_index(payment).ok_or(IdoError::NotInitialized)?;

        if pool.payment_stores[idx].withdrawn {
            return Err(IdoError::Withdrawn);
        }
        if signer != pool.treasury {
            return Err(IdoError::Treasury);
        }
        if now <= pool.end_time {
            return Err(IdoError::WithdrawPaymentTime);
        }

        let stored = pool.payment_stores[idx].value();
        let amount = if pool.max_raised > 0 {
            stored
        } else if pool.total_subscribed_amount == 0 {
            0
        } else {
            // Only the slice of the escrow that corresponds to sold
            // inventory leaves; the rest funds per-user refunds.
            let offer_in_payment = pool.total_offer_amount as u128 * stored as u128
                / pool.total_subscribed_amount as u128;
            let allowed = offer_in_payment * PRICE_PRECISION / pool.sale_price;
            stored.min(u64::try_from(allowed).unwrap_or(u64::MAX))
        };
        if amount == 0 {
            return Err(IdoError::WithdrawZeroAmount);
        }

        pool.payment_stores[idx].withdrawn = true;
        let coins = pool.payment_stores[idx].coins.extract(amount)?;
        let treasury = pool.treasury;
        if !ledger.is_registered(payment, treasury) {
            ledger.register(treasury, payment)?;
        }
        ledger.deposit(treasury, coins)?;
        pool.events.withdrawals.emit(WithdrawPaymentEvent {
            to: treasury,
            amount,
            payment_coin: payment.clone(),
        });
        info!(
            target: "ido",
            "pool {}: treasury withdrew {} {}", offered, amount, payment
        );
        Ok(amount)
    }

    /// Issue the subscribe witness for a pool. Admin-gated; intended for the
    /// whitelist/ticket module.
    pub fn request_cap(
        &self,
        signer: Address,
        offered: &AssetId,
    ) -> Result<SubscribeCapability, IdoError> {
        if signer != self.admin {
            return Err(IdoError::NotOwner);
        }
        if !self.pools.contains_key(offered) {
            return Err(IdoError::NotInitialized);
        }
        Ok(SubscribeCapability::new(offered.clone()))
    }

    /// Whether the sale for `offered` has opened. Pre-open (or absent) pools
    /// may still change settings.
    pub fn is_ido_started(&self, offered: &AssetId) -> bool {
        self.pools
            .get(offered)
            .map(|pool| self.clock.now_seconds() >= pool.start_time)
            .unwrap_or(false)
    }

    pub fn pool(&self, offered: &AssetId) -> Option<&Pool> {
        self.pools.get(offered)
    }

    pub fn user_info(&self, offered: &AssetId, who: Address) -> Option<&UserInfo> {
        self.pools.get(offered).and_then(|pool| pool.user(who))
    }
}
