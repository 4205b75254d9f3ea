use crate::coin::{BurnCapability, Coin, FreezeCapability, MintCapability};
use crate::errors::LedgerError;
use hou_types::{Address, AssetId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Metadata and monitored supply for one registered asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AssetInfo {
    name: String,
    symbol: String,
    decimals: u8,
    monitor_supply: bool,
    supply: u128,
}

/// Deterministic in-memory fungible-asset ledger.
///
/// Balances live under `(asset, account)`; an account must register for an
/// asset before it can hold a balance of it. Asset initialization is
/// one-shot and yields the (burn, freeze, mint) capability triple for that
/// asset — possession of a capability, not identity, authorizes the
/// privileged operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    assets: HashMap<AssetId, AssetInfo>,
    balances: HashMap<AssetId, HashMap<Address, u64>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot asset registration. Returns the capability triple for the
    /// new asset.
    pub fn initialize(
        &mut self,
        asset: AssetId,
        name: &str,
        symbol: &str,
        decimals: u8,
        monitor_supply: bool,
    ) -> Result<(BurnCapability, FreezeCapability, MintCapability), LedgerError> {
        if self.assets.contains_key(&asset) {
            return Err(LedgerError::AssetAlreadyInitialized(asset));
        }

        self.assets.insert(
            asset.clone(),
            AssetInfo {
                name: name.to_string(),
                symbol: symbol.to_string(),
                decimals,
                monitor_supply,
                supply: 0,
            },
        );
        self.balances.insert(asset.clone(), HashMap::new());

        info!(
            target: "ledger",
            "initialized asset {} ({} \"{}\", decimals {})",
            asset, symbol, name, decimals
        );

        Ok((
            BurnCapability::new(asset.clone()),
            FreezeCapability::new(asset.clone()),
            MintCapability::new(asset),
        ))
    }

    /// Produce fresh value. Requires the asset's mint capability.
    pub fn mint(&mut self, cap: &MintCapability, amount: u64) -> Result<Coin, LedgerError> {
        let info = self
            .assets
            .get_mut(cap.asset())
            .ok_or_else(|| LedgerError::UnknownAsset(cap.asset().clone()))?;

        if info.monitor_supply {
            info.supply = info
                .supply
                .checked_add(amount as u128)
                .ok_or_else(|| LedgerError::SupplyOverflow(cap.asset().clone()))?;
        }

        debug!(target: "ledger", "minted {} of {}", amount, cap.asset());
        Ok(Coin::new(cap.asset().clone(), amount))
    }

    /// Destroy value. Requires the asset's burn capability.
    pub fn burn(&mut self, coin: Coin, cap: &BurnCapability) -> Result<(), LedgerError> {
        if coin.asset() != cap.asset() {
            return Err(LedgerError::AssetMismatch {
                expected: cap.asset().clone(),
                actual: coin.asset().clone(),
            });
        }

        let info = self
            .assets
            .get_mut(cap.asset())
            .ok_or_else(|| LedgerError::UnknownAsset(cap.asset().clone()))?;

        if info.monitor_supply {
            info.supply = info.supply.saturating_sub(coin.value() as u128);
        }

        debug!(target: "ledger", "burned {} of {}", coin.value(), cap.asset());
        Ok(())
    }

    /// Debit `amount` base units of `asset` from `who`.
    pub fn withdraw(
        &mut self,
        who: Address,
        asset: &AssetId,
        amount: u64,
    ) -> Result<Coin, LedgerError> {
        let accounts = self
            .balances
            .get_mut(asset)
            .ok_or_else(|| LedgerError::UnknownAsset(asset.clone()))?;
        let balance = accounts
            .get_mut(&who)
            .ok_or_else(|| LedgerError::NotRegistered(who, asset.clone()))?;

        if *balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: *balance,
                need: amount,
            });
        }

        *balance -= amount;
        Ok(Coin::new(asset.clone(), amount))
    }

    /// Credit a coin to `to`. The account must be registered for the asset.
    pub fn deposit(&mut self, to: Address, coin: Coin) -> Result<(), LedgerError> {
        let accounts = self
            .balances
            .get_mut(coin.asset())
            .ok_or_else(|| LedgerError::UnknownAsset(coin.asset().clone()))?;
        let balance = accounts
            .get_mut(&to)
            .ok_or_else(|| LedgerError::NotRegistered(to, coin.asset().clone()))?;

        *balance = balance.saturating_add(coin.value());
        Ok(())
    }

    /// Current balance; zero for unregistered accounts.
    pub fn balance(&self, asset: &AssetId, who: Address) -> u64 {
        self.balances
            .get(asset)
            .and_then(|accounts| accounts.get(&who))
            .copied()
            .unwrap_or(0)
    }

    pub fn decimals(&self, asset: &AssetId) -> Result<u8, LedgerError> {
        self.assets
            .get(asset)
            .map(|info| info.decimals)
            .ok_or_else(|| LedgerError::UnknownAsset(asset.clone()))
    }

    /// Monitored total supply, or `None` when the asset opted out.
    pub fn supply(&self, asset: &AssetId) -> Result<Option<u128>, LedgerError> {
        self.assets
            .get(asset)
            .map(|info| info.monitor_supply.then_some(info.supply))
            .ok_or_else(|| LedgerError::UnknownAsset(asset.clone()))
    }

    pub fn is_initialized(&self, asset: &AssetId) -> bool {
        self.assets.contains_key(asset)
    }

    pub fn is_registered(&self, asset: &AssetId, who: Address) -> bool {
        self.balances
            .get(asset)
            .map(|accounts| accounts.contains_key(&who))
            .unwrap_or(false)
    }

    /// Open a zero balance for `who`. Idempotent.
    pub fn register(&mut self, who: Address, asset: &AssetId) -> Result<(), LedgerError> {
        let accounts = self
            .balances
            .get_mut(asset)
            .ok_or_else(|| LedgerError::UnknownAsset(asset.clone()))?;
        accounts.entry(who).or_insert(0);
        Ok(())
    }

    /// Whether `who` is known to the ledger under any asset.
    pub fn account_exists(&self, who: Address) -> bool {
        self.balances
            .values()
            .any(|accounts| accounts.contains_key(&who))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address([tag; 32])
    }

    fn usdt_ledger() -> (Ledger, MintCapability, BurnCapability) {
        let mut ledger = Ledger::new();
        let (burn, _freeze, mint) = ledger
            .initialize(AssetId::from("USDT"), "Tether", "USDT", 6, true)
            .unwrap();
        (ledger, mint, burn)
    }

    #[test]
    fn test_initialize_is_one_shot() {
        let (mut ledger, _mint, _burn) = usdt_ledger();
        let err = ledger
            .initialize(AssetId::from("USDT"), "Tether", "USDT", 6, true)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::AssetAlreadyInitialized(AssetId::from("USDT"))
        );
    }

    #[test]
    fn test_mint_deposit_withdraw_cycle() {
        let (mut ledger, mint, _burn) = usdt_ledger();
        let asset = AssetId::from("USDT");
        let alice = addr(1);

        ledger.register(alice, &asset).unwrap();
        let coin = ledger.mint(&mint, 1_000).unwrap();
        ledger.deposit(alice, coin).unwrap();

        assert_eq!(ledger.balance(&asset, alice), 1_000);
        assert_eq!(ledger.supply(&asset).unwrap(), Some(1_000));

        let taken = ledger.withdraw(alice, &asset, 400).unwrap();
        assert_eq!(taken.value(), 400);
        assert_eq!(ledger.balance(&asset, alice), 600);
        // Withdraw moves value out of the account, not out of existence.
        assert_eq!(ledger.supply(&asset).unwrap(), Some(1_000));
    }

    #[test]
    fn test_burn_reduces_supply() {
        let (mut ledger, mint, burn) = usdt_ledger();
        let coin = ledger.mint(&mint, 500).unwrap();
        ledger.burn(coin, &burn).unwrap();
        assert_eq!(ledger.supply(&AssetId::from("USDT")).unwrap(), Some(0));
    }

    #[test]
    fn test_deposit_requires_registration() {
        let (mut ledger, mint, _burn) = usdt_ledger();
        let coin = ledger.mint(&mint, 10).unwrap();
        let err = ledger.deposit(addr(2), coin).unwrap_err();
        assert!(matches!(err, LedgerError::NotRegistered(_, _)));
    }

    #[test]
    fn test_withdraw_insufficient_balance() {
        let (mut ledger, mint, _burn) = usdt_ledger();
        let asset = AssetId::from("USDT");
        let alice = addr(1);

        ledger.register(alice, &asset).unwrap();
        let coin = ledger.mint(&mint, 100).unwrap();
        ledger.deposit(alice, coin).unwrap();

        let err = ledger.withdraw(alice, &asset, 101).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientBalance { have: 100, need: 101 });
        assert_eq!(ledger.balance(&asset, alice), 100);
    }

    #[test]
    fn test_account_exists_across_assets() {
        let (mut ledger, _mint, _burn) = usdt_ledger();
        let alice = addr(1);
        assert!(!ledger.account_exists(alice));

        ledger.register(alice, &AssetId::from("USDT")).unwrap();
        assert!(ledger.account_exists(alice));
        assert!(ledger.is_registered(&AssetId::from("USDT"), alice));
        assert!(!ledger.is_registered(&AssetId::from("ABC"), alice));
    }

    #[test]
    fn test_unmonitored_supply_is_none() {
        let mut ledger = Ledger::new();
        let (_b, _f, mint) = ledger
            .initialize(AssetId::from("ABC"), "ABC Coin", "ABC", 6, false)
            .unwrap();
        let _coin = ledger.mint(&mint, 42).unwrap();
        assert_eq!(ledger.supply(&AssetId::from("ABC")).unwrap(), None);
    }
}
