//! Randomized conservation checks for overflow-mode sales, plus a
//! serial-access smoke test: many depositors with seeded random commitments
//! must never extract more than the offer inventory or more payment than
//! they put in.

use hou_ido::{IdoEngine, LaunchParams};
use hou_ledger::{Ledger, MintCapability};
use hou_types::{Address, AssetId, ManualClock, PRICE_PRECISION};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const START: u64 = 100;
const END: u64 = 1_000;
const DISTRIBUTE: u64 = 2_000;
const OFFER: u64 = 1_000_000_000_000;
const PRICE: u128 = 1_000_000_000_000_000;

fn test_address(tag: u64) -> Address {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&tag.to_le_bytes());
    Address(bytes)
}

fn setup() -> (IdoEngine, Ledger, Arc<ManualClock>, Address, MintCapability) {
    let admin = test_address(u64::MAX);
    let treasury = test_address(u64::MAX - 1);
    let clock = Arc::new(ManualClock::new(0));
    let mut ledger = Ledger::new();

    let (_b, _f, ltk_mint) = ledger
        .initialize(AssetId::from("LTK"), "Launch Token", "LTK", 8, true)
        .unwrap();
    let (_b, _f, usdt_mint) = ledger
        .initialize(AssetId::from("USDT"), "Tether", "USDT", 6, true)
        .unwrap();
    ledger.register(admin, &AssetId::from("LTK")).unwrap();
    let coins = ledger.mint(&ltk_mint, OFFER).unwrap();
    ledger.deposit(admin, coins).unwrap();
    ledger.register(treasury, &AssetId::from("USDT")).unwrap();

    let mut engine = IdoEngine::new(admin, clock.clone());
    engine
        .create_launch(
            admin,
            &mut ledger,
            LaunchParams {
                offered: AssetId::from("LTK"),
                payment: AssetId::from("USDT"),
                treasury,
                start_time: START,
                end_time: END,
                distribute_start_time: DISTRIBUTE,
                total_offer_amount: OFFER,
                sale_price: PRICE,
                max_raised: 0,
                max_raised_per_user: u64::MAX,
            },
        )
        .unwrap();
    (engine, ledger, clock, treasury, usdt_mint)
}

#[test]
fn test_randomized_overflow_conservation() {
    let (mut engine, mut ledger, clock, treasury, usdt_mint) = setup();
    let ltk = AssetId::from("LTK");
    let usdt = AssetId::from("USDT");
    let mut rng = StdRng::seed_from_u64(42);

    let depositor_count = 50u64;
    let mut deposits = Vec::with_capacity(depositor_count as usize);

    clock.set(START);
    for tag in 0..depositor_count {
        let user = test_address(tag);
        let amount = rng.gen_range(1_000_000u64..50_000_000_000);
        ledger.register(user, &usdt).unwrap();
        let coins = ledger.mint(&usdt_mint, amount).unwrap();
        ledger.deposit(user, coins).unwrap();

        engine.deposit(&mut ledger, user, &ltk, &usdt, amount).unwrap();
        deposits.push((user, amount));
    }
    let total_deposited: u64 = deposits.iter().map(|(_, amount)| amount).sum();
    assert_eq!(
        engine.pool(&ltk).unwrap().total_subscribed_amount,
        total_deposited
    );

    clock.set(END + 1);
    let withdrawn = engine
        .withdraw_payment(&mut ledger, treasury, &ltk, &usdt)
        .unwrap();

    clock.set(DISTRIBUTE);
    let mut total_claimed = 0u64;
    let mut total_refunded = 0u64;
    for (user, amount) in &deposits {
        let before = ledger.balance(&usdt, *user);
        let claimed = engine.claim(&mut ledger, *user, &ltk, &usdt).unwrap();
        total_claimed += claimed;
        total_refunded += ledger.balance(&usdt, *user) - before;

        // Each user's payout matches their pro-rata share exactly.
        assert_eq!(
            claimed,
            (OFFER as u128 * *amount as u128 / total_deposited as u128) as u64
        );
    }

    // Offer conservation: everything claimed fits in the inventory and the
    // residual is truncation dust, bounded by one unit per depositor.
    assert!(total_claimed <= OFFER);
    assert!(OFFER - total_claimed < depositor_count);

    // Refund conservation: refunds plus the treasury sweep never exceed the
    // deposits.
    assert!(total_refunded + withdrawn <= total_deposited);
    assert_eq!(
        engine.pool(&ltk).unwrap().payment_escrow(&usdt),
        Some(total_deposited - withdrawn - total_refunded)
    );

    // The sold slice the treasury swept prices out to (almost) the offer.
    let sold_in_offer_units = withdrawn as u128 * PRICE / PRICE_PRECISION;
    assert!(sold_in_offer_units <= OFFER as u128);
}

#[test]
fn test_engine_behind_a_single_writer_lock() {
    // The engine itself is strict-serial; per-pool serializability comes
    // from wrapping it in a single-writer lock.
    let (engine, ledger, clock, _treasury, usdt_mint) = setup();
    let ltk = AssetId::from("LTK");
    let usdt = AssetId::from("USDT");

    clock.set(START);
    let shared = Arc::new(RwLock::new((engine, ledger)));

    let handles: Vec<_> = (0..4u64)
        .map(|tag| {
            let shared = Arc::clone(&shared);
            let usdt = usdt.clone();
            let ltk = ltk.clone();
            let usdt_mint = usdt_mint.clone();
            std::thread::spawn(move || {
                let user = test_address(tag);
                let mut guard = shared.write();
                let (engine, ledger) = &mut *guard;
                ledger.register(user, &usdt).unwrap();
                let coins = ledger.mint(&usdt_mint, 1_000_000).unwrap();
                ledger.deposit(user, coins).unwrap();
                engine.deposit(ledger, user, &ltk, &usdt, 1_000_000).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let guard = shared.read();
    assert_eq!(guard.0.pool(&ltk).unwrap().total_subscribed_amount, 4_000_000);
}
