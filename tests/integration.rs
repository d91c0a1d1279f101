//! Integration tests exercising the full system through [`PoolHandle`].
//!
//! These tests verify end-to-end flows through the public API:
//! the reference pricing values, slippage rejection, LP accounting,
//! settlement against an in-memory token ledger, authorization and
//! concurrent access.

#![allow(clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use pair_amm::config::PoolConfig;
use pair_amm::domain::{
    AccountId, Amount, LpShares, PrecisionScale, Ratio, Rounding, SwapDirection, SwapSpec, TokenId,
    TokenPair,
};
use pair_amm::handle::PoolHandle;
use pair_amm::math::product;
use pair_amm::pool::{SeedRule, TokenABasis};
use pair_amm::traits::{AllowAll, AssetTransfer, Governed, NoopTransfer, Transfer, TransferError};
use pair_amm::AmmError;
use parking_lot::Mutex;

const P: u128 = 10_000_000;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tok_a() -> TokenId {
    TokenId::from_bytes([1u8; 32])
}

fn tok_b() -> TokenId {
    TokenId::from_bytes([2u8; 32])
}

fn custody() -> AccountId {
    AccountId::from_bytes([0xaa; 32])
}

fn governor() -> AccountId {
    AccountId::from_bytes([0x60; 32])
}

fn alice() -> AccountId {
    AccountId::from_bytes([0x0a; 32])
}

fn bob() -> AccountId {
    AccountId::from_bytes([0x0b; 32])
}

fn exact_in(v: u128) -> SwapSpec {
    let Ok(spec) = SwapSpec::exact_in(Amount::new(v)) else {
        panic!("non-zero");
    };
    spec
}

fn full_tolerance() -> Ratio {
    PrecisionScale::DEFAULT.one()
}

fn accounting_pool(ra: u128, rb: u128) -> PoolHandle {
    init_tracing();
    let handle = PoolHandle::accounting(custody());
    let Ok(()) = handle.initialize(tok_a(), tok_b(), Amount::new(ra), Amount::new(rb)) else {
        panic!("fresh handle");
    };
    handle
}

/// Token balances keyed by `(token, account)`; batches apply atomically.
#[derive(Debug, Default)]
struct InMemoryLedger {
    balances: Mutex<HashMap<(TokenId, AccountId), u128>>,
}

impl InMemoryLedger {
    fn credit(&self, token: TokenId, account: AccountId, amount: u128) {
        *self.balances.lock().entry((token, account)).or_insert(0) += amount;
    }

    fn balance_of(&self, token: TokenId, account: AccountId) -> u128 {
        self.balances
            .lock()
            .get(&(token, account))
            .copied()
            .unwrap_or(0)
    }
}

impl AssetTransfer for InMemoryLedger {
    fn settle(&self, batch: &[Transfer]) -> Result<(), TransferError> {
        let mut balances = self.balances.lock();
        let mut staged = balances.clone();
        for t in batch {
            let from = staged.entry((t.token, t.from)).or_insert(0);
            let Some(left) = from.checked_sub(t.amount.get()) else {
                return Err(TransferError::new(10, "INSUFFICIENT_TOKEN_BALANCE"));
            };
            *from = left;
            *staged.entry((t.token, t.to)).or_insert(0) += t.amount.get();
        }
        *balances = staged;
        Ok(())
    }
}

type LedgerHandle = PoolHandle<InMemoryLedger, Governed, TokenABasis>;

/// Alice funds and seeds a `(500·P, 1000·P)` pool; bob holds 10·P of each token.
fn ledger_pool() -> LedgerHandle {
    init_tracing();
    let ledger = InMemoryLedger::default();
    ledger.credit(tok_a(), alice(), 1_000 * P);
    ledger.credit(tok_b(), alice(), 2_000 * P);
    ledger.credit(tok_a(), bob(), 10 * P);
    ledger.credit(tok_b(), bob(), 10 * P);
    let handle = PoolHandle::new(
        custody(),
        ledger,
        Governed::new(governor()),
        TokenABasis::new(SeedRule::Descaled),
    );
    let Ok(seed) = handle.initialize_with_provider(
        tok_a(),
        tok_b(),
        Amount::new(500 * P),
        Amount::new(1_000 * P),
        alice(),
    ) else {
        panic!("alice can fund the pool");
    };
    assert_eq!(seed, LpShares::new(500));
    handle
}

fn assert_custody_matches_reserves(handle: &LedgerHandle) {
    let Ok((ra, rb)) = handle.pair_quantities() else {
        panic!("initialized");
    };
    let ledger = handle.transfer();
    assert_eq!(ledger.balance_of(tok_a(), custody()), ra.get());
    assert_eq!(ledger.balance_of(tok_b(), custody()), rb.get());
}

fn assert_lp_consistent<T, A, S>(handle: &PoolHandle<T, A, S>)
where
    T: AssetTransfer,
    A: pair_amm::traits::Authorizer,
    S: pair_amm::traits::LiquidityMintStrategy,
{
    let Ok(consistent) = handle.read(|pool| Ok(pool.lp_supply_matches_balances())) else {
        panic!("initialized");
    };
    assert!(consistent, "LP balances drifted from total supply");
}

// ===========================================================================
// Suite 1: Reference pricing values
// ===========================================================================

#[test]
fn spot_price_reference_values() {
    let Ok(price) = accounting_pool(100, 50).spot_price() else {
        panic!("non-zero reserve");
    };
    assert_eq!(price.raw(), 20_000_000);
    let Ok(price) = accounting_pool(50, 100).spot_price() else {
        panic!("non-zero reserve");
    };
    assert_eq!(price.raw(), 5_000_000);
}

#[test]
fn small_reserve_quotes() {
    let handle = accounting_pool(24, 16);
    assert_eq!(handle.out_given_in(Amount::new(10)), Ok(Amount::new(5)));
    assert_eq!(handle.in_given_out(Amount::new(11)), Ok(Amount::new(52)));
}

#[test]
fn scaled_reserve_quote() {
    let handle = accounting_pool(24 * P, 16 * P);
    assert_eq!(
        handle.out_given_in(Amount::new(10 * P)),
        Ok(Amount::new(47_058_824))
    );
}

#[test]
fn price_impact_reference_values() {
    let handle = accounting_pool(114 * P, 220 * P);
    let Ok(impact_in) = handle.slippage_out_given_in(Amount::new(P)) else {
        panic!("valid trade");
    };
    assert_eq!(impact_in.raw(), 86_956);
    let Ok(impact_out) = handle.slippage_in_given_out(Amount::new(P)) else {
        panic!("valid trade");
    };
    assert_eq!(impact_out.raw(), 45_661);
}

#[test]
fn exact_out_of_exact_in_covers_input() {
    let handle = accounting_pool(114 * P, 220 * P);
    for x in [1, 7, 1_000, P, 3 * P + 1, 50 * P] {
        let Ok(out) = handle.out_given_in(Amount::new(x)) else {
            continue;
        };
        let Ok(back) = handle.in_given_out(out) else {
            panic!("an achievable output is always quotable");
        };
        assert!(back.get() >= x, "x={x} back={back}");
    }
}

#[test]
fn quotes_do_not_mutate() {
    let handle = accounting_pool(24, 16);
    let Ok(before) = handle.snapshot() else {
        panic!("initialized");
    };
    let _ = handle.out_given_in(Amount::new(10));
    let _ = handle.slippage_in_given_out(Amount::new(3));
    assert_eq!(handle.snapshot(), Ok(before));
}

// ===========================================================================
// Suite 2: Swaps and slippage
// ===========================================================================

#[test]
fn large_trade_rejected_by_slippage() {
    let handle = accounting_pool(200 * P, 220 * P);
    let result = handle.swap(alice(), &tok_a(), exact_in(100 * P));
    let Err(AmmError::SlippageExceeded { impact, tolerance }) = result else {
        panic!("expected SlippageExceeded, got {result:?}");
    };
    assert!(impact > tolerance);
    assert_eq!(
        handle.pair_quantities(),
        Ok((Amount::new(200 * P), Amount::new(220 * P)))
    );
}

#[test]
fn raised_tolerance_admits_trade() {
    let handle = accounting_pool(24, 16);
    let Ok(()) = handle.set_slippage(alice(), full_tolerance()) else {
        panic!("AllowAll permits");
    };
    let Ok(quote) = handle.swap(alice(), &tok_a(), exact_in(10)) else {
        panic!("within tolerance");
    };
    assert_eq!(quote.direction(), SwapDirection::AToB);
    assert_eq!(quote.amount_out(), Amount::new(5));
    assert_eq!(handle.pair_quantities(), Ok((Amount::new(34), Amount::new(11))));
}

#[test]
fn pool_favouring_rounding_never_shrinks_product() {
    init_tracing();
    let json = format!(
        r#"{{"token_a":"{}","token_b":"{}","reserve_a":24,"reserve_b":16,"slippage_tolerance":{P},"reserve_rounding":"up"}}"#,
        tok_a(),
        tok_b()
    );
    let Ok(cfg) = serde_json::from_str::<PoolConfig>(&json) else {
        panic!("valid json config");
    };
    assert_eq!(cfg.reserve_rounding(), Rounding::Up);
    let handle = PoolHandle::accounting(custody());
    let Ok(()) = handle.initialize_from_config(&cfg) else {
        panic!("fresh handle");
    };
    for spec in [exact_in(10), exact_in(7), exact_in(3)] {
        let Ok((ra, rb)) = handle.pair_quantities() else {
            panic!("initialized");
        };
        let k_before = product(ra.get(), rb.get());
        if handle.swap(alice(), &tok_a(), spec).is_err() {
            continue;
        }
        let Ok((ra, rb)) = handle.pair_quantities() else {
            panic!("initialized");
        };
        assert!(product(ra.get(), rb.get()) >= k_before);
    }
}

#[test]
fn unknown_token_rejected() {
    let handle = accounting_pool(1_000, 1_000);
    let result = handle.swap(alice(), &TokenId::from_bytes([9u8; 32]), exact_in(10));
    assert!(matches!(result, Err(AmmError::InvalidToken(_))));
}

// ===========================================================================
// Suite 3: Liquidity accounting
// ===========================================================================

#[test]
fn burn_five_of_hundred() {
    init_tracing();
    let handle = PoolHandle::new(
        custody(),
        NoopTransfer,
        AllowAll,
        TokenABasis::new(SeedRule::Descaled),
    );
    let Ok(seed) = handle.initialize_with_provider(
        tok_a(),
        tok_b(),
        Amount::new(100 * P),
        Amount::new(100 * P),
        alice(),
    ) else {
        panic!("fresh handle");
    };
    assert_eq!(seed, LpShares::new(100));
    let Ok(out) = handle.remove_liquidity(alice(), LpShares::new(5)) else {
        panic!("alice owns 100");
    };
    assert_eq!(out, (Amount::new(5 * P), Amount::new(5 * P)));
    assert_eq!(
        handle.pair_quantities(),
        Ok((Amount::new(95 * P), Amount::new(95 * P)))
    );
    assert_eq!(handle.total_lp_supply(), Ok(LpShares::new(95)));
    assert_eq!(handle.lp_balance(&alice()), Ok(LpShares::new(95)));
}

#[test]
fn mixed_operations_keep_lp_consistent() {
    init_tracing();
    let handle = PoolHandle::accounting(custody());
    let Ok(first) = handle.initialize_with_provider(
        tok_a(),
        tok_b(),
        Amount::new(1_000 * P),
        Amount::new(1_000 * P),
        alice(),
    ) else {
        panic!("fresh handle");
    };
    assert_eq!(first, LpShares::new(1_000 * P));
    let Ok(()) = handle.set_slippage(governor(), full_tolerance()) else {
        panic!("AllowAll permits");
    };
    assert_lp_consistent(&handle);

    let Ok(minted) = handle.add_liquidity(bob(), Amount::new(11 * P), Amount::new(13 * P)) else {
        panic!("proportional deposit");
    };
    assert_eq!(minted, LpShares::new(11 * P));
    assert_lp_consistent(&handle);

    let Ok(_) = handle.swap(bob(), &tok_b(), exact_in(4 * P)) else {
        panic!("swap");
    };
    let Ok(bob_lp) = handle.lp_balance(&bob()) else {
        panic!("initialized");
    };
    let Ok(_) = handle.remove_liquidity(bob(), bob_lp) else {
        panic!("bob owns his shares");
    };
    assert_eq!(handle.lp_balance(&bob()), Ok(LpShares::ZERO));
    assert_lp_consistent(&handle);

    let result = handle.remove_liquidity(bob(), LpShares::new(1));
    assert!(matches!(result, Err(AmmError::InsufficientBalance { .. })));

    let Ok(snapshot) = handle.snapshot() else {
        panic!("initialized");
    };
    assert_eq!(snapshot.holder_count, 1);
    assert_eq!(snapshot.total_lp_supply, LpShares::new(1_000 * P));
}

#[test]
fn dust_deposit_cannot_claim_unowned_reserves() {
    let handle = accounting_pool(100 * P, 100 * P);
    let mallory = AccountId::from_bytes([0x4d; 32]);
    assert_eq!(
        handle.add_liquidity(mallory, Amount::new(1), Amount::new(1)),
        Err(AmmError::PoolNotInitialized)
    );
    assert_eq!(
        handle.remove_liquidity(mallory, LpShares::new(1)),
        Err(AmmError::PoolNotInitialized)
    );
    assert_eq!(handle.lp_balance(&mallory), Ok(LpShares::ZERO));
    assert_eq!(
        handle.pair_quantities(),
        Ok((Amount::new(100 * P), Amount::new(100 * P)))
    );
}

#[test]
fn staged_deposit_settled_by_host() {
    let handle = ledger_pool();
    let Ok(plan) = handle.plan_add_liquidity(bob(), Amount::new(5 * P), Amount::new(10 * P)) else {
        panic!("priced");
    };
    let movements = [
        Transfer {
            token: tok_a(),
            from: bob(),
            to: custody(),
            amount: plan.delta().amount_a(),
        },
        Transfer {
            token: tok_b(),
            from: bob(),
            to: custody(),
            amount: plan.delta().amount_b(),
        },
    ];
    let Ok(()) = handle.transfer().settle(&movements) else {
        panic!("bob can fund the deposit");
    };
    let Ok(delta) = handle.commit_liquidity(plan) else {
        panic!("nothing changed since planning");
    };
    assert_eq!(delta.lp_shares(), LpShares::new(5));
    assert_eq!(handle.lp_balance(&bob()), Ok(LpShares::new(5)));
    assert_custody_matches_reserves(&handle);
    assert_lp_consistent(&handle);
}

// ===========================================================================
// Suite 4: Settlement against a token ledger
// ===========================================================================

#[test]
fn seeding_moves_reserves_into_custody() {
    let handle = ledger_pool();
    assert_custody_matches_reserves(&handle);
    assert_eq!(handle.transfer().balance_of(tok_a(), alice()), 500 * P);
    assert_eq!(handle.lp_balance(&alice()), Ok(LpShares::new(500)));
}

#[test]
fn swap_settles_through_custody() {
    let handle = ledger_pool();
    let Ok(quote) = handle.swap(bob(), &tok_a(), exact_in(P)) else {
        panic!("within default tolerance");
    };
    assert_eq!(quote.amount_out(), Amount::new(19_960_080));
    let ledger = handle.transfer();
    assert_eq!(ledger.balance_of(tok_a(), bob()), 9 * P);
    assert_eq!(ledger.balance_of(tok_b(), bob()), 10 * P + 19_960_080);
    assert_custody_matches_reserves(&handle);
}

#[test]
fn liquidity_round_trip_settles() {
    let handle = ledger_pool();
    let Ok(minted) = handle.add_liquidity(bob(), Amount::new(5 * P), Amount::new(10 * P)) else {
        panic!("bob can fund the deposit");
    };
    assert_eq!(minted, LpShares::new(5));
    assert_custody_matches_reserves(&handle);

    let Ok((a, b)) = handle.remove_liquidity(bob(), minted) else {
        panic!("bob owns the shares");
    };
    assert_eq!((a, b), (Amount::new(5 * P), Amount::new(10 * P)));
    assert_eq!(handle.transfer().balance_of(tok_a(), bob()), 10 * P);
    assert_custody_matches_reserves(&handle);
    assert_lp_consistent(&handle);
}

#[test]
fn failed_settlement_leaves_state_unchanged() {
    let handle = ledger_pool();
    let Ok(before) = handle.snapshot() else {
        panic!("initialized");
    };

    // bob holds 10·P of token A; this swap needs 20·P.
    let Ok(()) = handle.set_slippage(governor(), full_tolerance()) else {
        panic!("governor may set slippage");
    };
    let Ok(before_swap) = handle.snapshot() else {
        panic!("initialized");
    };
    let result = handle.swap(bob(), &tok_a(), exact_in(20 * P));
    assert_eq!(
        result,
        Err(AmmError::TransferFailed {
            code: 10,
            reason: "INSUFFICIENT_TOKEN_BALANCE".to_owned(),
        })
    );
    assert_eq!(handle.snapshot(), Ok(before_swap));

    let result = handle.add_liquidity(bob(), Amount::new(50 * P), Amount::new(100 * P));
    assert!(matches!(result, Err(AmmError::TransferFailed { code: 10, .. })));
    assert_eq!(handle.lp_balance(&bob()), Ok(LpShares::ZERO));
    assert_eq!(handle.total_lp_supply(), Ok(before.total_lp_supply));
    assert_eq!(handle.transfer().balance_of(tok_a(), bob()), 10 * P);
    assert_custody_matches_reserves(&handle);
    assert_lp_consistent(&handle);
}

// ===========================================================================
// Suite 5: Authorization and lifecycle
// ===========================================================================

#[test]
fn unauthorized_slippage_change_rejected() {
    let handle = ledger_pool();
    let Ok(current) = handle.slippage() else {
        panic!("initialized");
    };
    let result = handle.set_slippage(alice(), full_tolerance());
    assert!(matches!(result, Err(AmmError::Unauthorized(_))));
    assert_eq!(handle.slippage(), Ok(current));

    assert!(handle.set_slippage(governor(), full_tolerance()).is_ok());
    assert_eq!(handle.slippage(), Ok(full_tolerance()));
}

#[test]
fn tolerance_above_one_rejected() {
    let handle = accounting_pool(10, 10);
    let too_much = Ratio::new(P + 1, PrecisionScale::DEFAULT);
    assert!(matches!(
        handle.set_slippage(alice(), too_much),
        Err(AmmError::InvalidConfiguration(_))
    ));
}

#[test]
fn lifecycle_errors() {
    init_tracing();
    let handle = PoolHandle::accounting(custody());
    assert_eq!(handle.token_pair_ids(), Err(AmmError::PoolNotInitialized));
    assert_eq!(
        handle.swap(alice(), &tok_a(), exact_in(1)),
        Err(AmmError::PoolNotInitialized)
    );
    assert!(matches!(
        handle.initialize(tok_a(), tok_b(), Amount::ZERO, Amount::new(1)),
        Err(AmmError::InvalidAmount(_))
    ));
    assert!(!handle.is_initialized());

    let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
        panic!("distinct tokens");
    };
    let Ok(cfg) = PoolConfig::new(pair, Amount::new(5), Amount::new(5)) else {
        panic!("valid config");
    };
    assert!(handle.initialize_from_config(&cfg).is_ok());
    assert_eq!(
        handle.initialize_from_config(&cfg),
        Err(AmmError::PoolAlreadyInitialized)
    );
    assert_eq!(handle.token_pair_ids(), Ok((tok_a(), tok_b())));
}

// ===========================================================================
// Suite 6: Concurrent access
// ===========================================================================

#[test]
fn concurrent_swaps_are_serialized() {
    let handle = Arc::new(accounting_pool(1_000_000_000_000, 1_000_000_000_000));
    let Ok(()) = handle.set_slippage(governor(), full_tolerance()) else {
        panic!("AllowAll permits");
    };

    let workers: Vec<_> = (0..4u8)
        .map(|i| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                let trader = AccountId::from_bytes([0x20 + i; 32]);
                for n in 0..25u128 {
                    let token = if (n + u128::from(i)) % 2 == 0 { tok_a() } else { tok_b() };
                    let Ok(_) = handle.swap(trader, &token, exact_in(1_000 + n)) else {
                        panic!("small swap on deep pool");
                    };
                }
            })
        })
        .collect();
    for worker in workers {
        let Ok(()) = worker.join() else {
            panic!("worker panicked");
        };
    }

    let Ok(snapshot) = handle.snapshot() else {
        panic!("initialized");
    };
    assert_eq!(snapshot.revision, 101);
    assert!(
        product(snapshot.reserve_a.get(), snapshot.reserve_b.get())
            <= product(1_000_000_000_000, 1_000_000_000_000)
    );
}
