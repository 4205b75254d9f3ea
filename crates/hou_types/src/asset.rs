use serde::{Deserialize, Serialize};

/// Stable identifier for a fungible asset type (e.g. `"HOU"`, `"USDT"`).
///
/// Pools, escrows, and capabilities all carry an `AssetId`; two values refer
/// to the same asset exactly when they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        AssetId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        AssetId(value.to_string())
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_identity() {
        let a = AssetId::from("USDT");
        let b = AssetId::new("USDT");
        let c = AssetId::from("ABC");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "USDT");
    }
}
