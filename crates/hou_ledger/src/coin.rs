use crate::errors::LedgerError;
use hou_types::AssetId;
use serde::{Deserialize, Serialize};

/// A quantity of one asset.
///
/// Coins are linear: they are produced only by [`crate::Ledger::mint`],
/// [`crate::Ledger::withdraw`], [`Coin::extract`], or [`Coin::zero`], and
/// consumed by deposit, burn, or merge. The amount field is private so that
/// value cannot be conjured outside the ledger.
#[derive(Debug, Serialize, Deserialize)]
#[must_use]
pub struct Coin {
    asset: AssetId,
    amount: u64,
}

impl Coin {
    pub(crate) fn new(asset: AssetId, amount: u64) -> Self {
        Self { asset, amount }
    }

    /// A coin of zero value for the given asset.
    pub fn zero(asset: AssetId) -> Self {
        Self { asset, amount: 0 }
    }

    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// Base-unit value carried by this coin.
    pub fn value(&self) -> u64 {
        self.amount
    }

    /// Absorb `other` into `self`. Fails if the assets differ.
    pub fn merge(&mut self, other: Coin) -> Result<(), LedgerError> {
        if other.asset != self.asset {
            return Err(LedgerError::AssetMismatch {
                expected: self.asset.clone(),
                actual: other.asset,
            });
        }
        self.amount = self.amount.saturating_add(other.amount);
        Ok(())
    }

    /// Split `amount` base units out of `self`.
    pub fn extract(&mut self, amount: u64) -> Result<Coin, LedgerError> {
        if amount > self.amount {
            return Err(LedgerError::InsufficientValue {
                have: self.amount,
                need: amount,
            });
        }
        self.amount -= amount;
        Ok(Coin {
            asset: self.asset.clone(),
            amount,
        })
    }
}

/// Authority to mint fresh value of one asset. Issued once, at asset
/// initialization, to the initializing account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintCapability {
    asset: AssetId,
}

/// Authority to destroy value of one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnCapability {
    asset: AssetId,
}

/// Authority to freeze accounts of one asset. Held for completeness of the
/// capability triple; the accounting core never freezes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeCapability {
    asset: AssetId,
}

impl MintCapability {
    pub(crate) fn new(asset: AssetId) -> Self {
        Self { asset }
    }

    pub fn asset(&self) -> &AssetId {
        &self.asset
    }
}

impl BurnCapability {
    pub(crate) fn new(asset: AssetId) -> Self {
        Self { asset }
    }

    pub fn asset(&self) -> &AssetId {
        &self.asset
    }
}

impl FreezeCapability {
    pub(crate) fn new(asset: AssetId) -> Self {
        Self { asset }
    }

    pub fn asset(&self) -> &AssetId {
        &self.asset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_and_extract() {
        let usdt = AssetId::from("USDT");
        let mut coin = Coin::new(usdt.clone(), 1_000);

        coin.merge(Coin::new(usdt.clone(), 500)).unwrap();
        assert_eq!(coin.value(), 1_500);

        let part = coin.extract(600).unwrap();
        assert_eq!(part.value(), 600);
        assert_eq!(coin.value(), 900);
    }

    #[test]
    fn test_merge_rejects_other_asset() {
        let mut coin = Coin::new(AssetId::from("USDT"), 100);
        let err = coin.merge(Coin::new(AssetId::from("ABC"), 1)).unwrap_err();
        assert!(matches!(err, LedgerError::AssetMismatch { .. }));
        assert_eq!(coin.value(), 100);
    }

    #[test]
    fn test_extract_beyond_value() {
        let mut coin = Coin::new(AssetId::from("USDT"), 10);
        let err = coin.extract(11).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientValue { have: 10, need: 11 }
        );
    }

    #[test]
    fn test_zero_coin() {
        let zero = Coin::zero(AssetId::from("HOU"));
        assert_eq!(zero.value(), 0);
        assert_eq!(zero.asset(), &AssetId::from("HOU"));
    }
}
