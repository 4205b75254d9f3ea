//! Numeric constants shared across the supply, allocation, and IDO engines.

/// Scale factor for ratio arithmetic: 12 fractional digits are preserved in
/// every 128-bit multiply-then-divide before the final truncation.
pub const PRICE_PRECISION: u128 = 1_000_000_000_000;

/// Denominator for TGE percentages expressed in basis points.
pub const TGE_PERCENT_DENOM: u64 = 10_000;

/// HOU coin metadata.
pub const HOU_NAME: &str = "Houston Token";
pub const HOU_SYMBOL: &str = "HOU";
pub const HOU_DECIMALS: u8 = 8;

/// Prefix of the human readable address form (`hou` + 64 hex characters).
pub const ADDRESS_PREFIX: &str = "hou";

/// Base units per whole HOU token (10^8).
pub const BASE_UNITS_PER_HOU: u64 = 100_000_000;

/// Absolute cap on total HOU supply: 10^9 tokens.
pub const HOU_MAX_SUPPLY: u64 = 1_000_000_000 * BASE_UNITS_PER_HOU;

/// Cap on cumulative mining emission: 4.5·10^8 tokens.
pub const MINING_SUPPLY_CAP: u64 = 450_000_000 * BASE_UNITS_PER_HOU;

/// The mining reserve is emitted linearly over three years.
pub const MINING_EMISSION_SECS: u64 = 3 * 365 * 24 * 3600;

/// Constant mining emission rate in base units per second.
pub const MINING_SUPPLY_PER_SEC: u64 = MINING_SUPPLY_CAP / MINING_EMISSION_SECS;

/// One vesting month in seconds (1/12 of a 365-day year).
pub const ONE_MONTH_SECS: u64 = 365 * 24 * 3600 / 12;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_values() {
        assert_eq!(PRICE_PRECISION, 10u128.pow(12));
        assert_eq!(HOU_MAX_SUPPLY, 100_000_000_000_000_000);
        assert_eq!(MINING_SUPPLY_CAP, 45_000_000_000_000_000);
        assert_eq!(MINING_EMISSION_SECS, 94_608_000);
        assert_eq!(ONE_MONTH_SECS, 2_628_000);
    }

    #[test]
    fn test_mining_rate_is_positive() {
        assert!(MINING_SUPPLY_PER_SEC > 0);
        // The linear schedule never overshoots the cap.
        assert!(MINING_SUPPLY_PER_SEC as u128 * MINING_EMISSION_SECS as u128 <= MINING_SUPPLY_CAP as u128);
    }
}
