//! Entitlement and claim-vesting arithmetic. All ratios use 128-bit
//! intermediates and truncate at the end; the exact multiply-then-divide
//! order is part of the numeric contract.

use crate::errors::IdoError;
use hou_types::{PRICE_PRECISION, TGE_PERCENT_DENOM};

/// Offered base units bought by `payment_amount` at `sale_price`.
pub(crate) fn entitlement_at_price(sale_price: u128, payment_amount: u64) -> Result<u64, IdoError> {
    let scaled = sale_price
        .checked_mul(payment_amount as u128)
        .ok_or(IdoError::Overflow("entitlement"))?;
    u64::try_from(scaled / PRICE_PRECISION).map_err(|_| IdoError::Overflow("entitlement"))
}

/// Cumulative claimable amount minus the `claimed` watermark at `now`.
///
/// With `tge_percent == TGE_PERCENT_DENOM` the full entitlement unlocks at
/// `distribute_start`; otherwise the TGE slice unlocks there and the rest
/// vests in discrete `vesting_interval` steps over `total_vesting_time`.
pub(crate) fn claimable_amount(
    entitled: u64,
    claimed: u64,
    now: u64,
    distribute_start: u64,
    tge_percent: u64,
    vesting_interval: u64,
    total_vesting_time: u64,
) -> u64 {
    if entitled == 0 || now < distribute_start {
        return 0;
    }
    if tge_percent == TGE_PERCENT_DENOM {
        return entitled - claimed;
    }

    let num_intervals = (now - distribute_start) / vesting_interval;
    let tge = (entitled as u128 * tge_percent as u128 / TGE_PERCENT_DENOM as u128) as u64;
    let left = entitled - tge;
    let passed = (num_intervals * vesting_interval).min(total_vesting_time);
    let vested = (left as u128 * passed as u128 / total_vesting_time as u128) as u64;

    (tge + vested).saturating_sub(claimed)
}
