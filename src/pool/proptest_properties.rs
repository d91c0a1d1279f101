//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Conservation**: pool-favouring rounding never shrinks `k`;
//!    floor rounding loses strictly less than one output unit.
//! 2. **Inverse bound**: `quote_exact_out(quote_exact_in(x)) >= x`.
//! 3. **Swap reversibility**: with pool-favouring rounding a round trip
//!    A→B→A returns ≤ original.
//! 4. **Balance invariant**: `Σ balances == total_lp_supply` after any
//!    sequence of operations.
//! 5. **No partial effects**: a failed operation leaves the pool as it was.
//! 6. **Liquidity conservation**: deposit then withdraw returns ≤ deposit.
//! 7. **Price direction**: selling A raises the price of B in A.
//! 8. **Ownership**: reserves without LP holders never accept a deposit.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{LiquidityLedger, Pool, SeedRule, SwapExecutor, TokenABasis};
use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, LpShares, PrecisionScale, Rounding, SwapSpec, TokenId, TokenPair};
use crate::engine::QuoteEngine;
use crate::math::product;
use crate::traits::FromConfig;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok_a() -> TokenId {
    TokenId::from_bytes([1u8; 32])
}

fn tok_b() -> TokenId {
    TokenId::from_bytes([2u8; 32])
}

fn holder(i: u8) -> AccountId {
    AccountId::from_bytes([i.wrapping_add(10); 32])
}

/// A pool that accepts any price impact.
fn make_pool(ra: u128, rb: u128, rounding: Rounding) -> Pool {
    let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
        panic!("valid pair");
    };
    let Ok(cfg) = PoolConfig::new(pair, Amount::new(ra), Amount::new(rb)) else {
        panic!("valid config");
    };
    let cfg = cfg
        .with_reserve_rounding(rounding)
        .with_slippage_tolerance(PrecisionScale::DEFAULT.get());
    let Ok(pool) = Pool::from_config(&cfg) else {
        panic!("valid pool");
    };
    pool
}

fn exact_in(v: u128) -> Option<SwapSpec> {
    SwapSpec::exact_in(Amount::new(v)).ok()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000_000].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000_000u128
}

/// Trade sizes as a per-mille fraction of the input reserve.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=2_000u128
}

#[derive(Debug, Clone)]
enum Op {
    Add { who: u8, a: u128, b: u128 },
    Remove { who: u8, per_mille: u128 },
    SwapA(u128),
    SwapB(u128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 1u128..1_000_000, 1u128..1_000_000).prop_map(|(who, a, b)| Op::Add { who, a, b }),
        (0u8..4, 1u128..=1_000).prop_map(|(who, per_mille)| Op::Remove { who, per_mille }),
        (1u128..1_000_000).prop_map(Op::SwapA),
        (1u128..1_000_000).prop_map(Op::SwapB),
    ]
}

// ---------------------------------------------------------------------------
// Property 1: Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_product_never_decreases_when_pool_favouring(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let mut pool = make_pool(ra, rb, Rounding::Up);
        let k_before = product(ra, rb);
        let Some(spec) = exact_in((ra * frac / 1_000).max(1)) else {
            return Ok(());
        };
        if SwapExecutor::swap(&mut pool, &tok_a(), spec).is_err() {
            return Ok(());
        }
        let (a, b) = pool.reserves();
        prop_assert!(
            product(a.get(), b.get()) >= k_before,
            "k shrank: ({}, {}) from ({}, {})", a, b, ra, rb
        );
    }

    #[test]
    fn prop_floor_loss_below_one_output_unit(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let mut pool = make_pool(ra, rb, Rounding::Down);
        let k_before = product(ra, rb);
        let Some(spec) = exact_in((ra * frac / 1_000).max(1)) else {
            return Ok(());
        };
        if SwapExecutor::swap(&mut pool, &tok_a(), spec).is_err() {
            return Ok(());
        }
        let (a, b) = pool.reserves();
        let k_after = product(a.get(), b.get());
        prop_assert!(
            k_before < k_after + crate::math::U256::from(a.get()),
            "loss reached a full output unit: ({}, {}) from ({}, {})", a, b, ra, rb
        );
    }
}

// ---------------------------------------------------------------------------
// Properties 2 and 3: Inverse bound and reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_exact_out_of_exact_in_is_at_least_input(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let engine = QuoteEngine::new(PrecisionScale::DEFAULT);
        let x = Amount::new((ra * frac / 1_000).max(1));
        let (r_in, r_out) = (Amount::new(ra), Amount::new(rb));
        let Ok(out) = engine.quote_exact_in(r_in, r_out, x) else {
            return Ok(());
        };
        let Ok(back) = engine.quote_exact_out(r_in, r_out, out) else {
            return Ok(());
        };
        prop_assert!(back >= x, "round trip favoured trader: {} < {}", back, x);
    }

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let mut pool = make_pool(ra, rb, Rounding::Up);

        let Some(spec_ab) = exact_in(swap_in) else {
            return Ok(());
        };
        let Ok(ab) = SwapExecutor::swap(&mut pool, &tok_a(), spec_ab) else {
            return Ok(());
        };
        let Some(spec_ba) = exact_in(ab.amount_out().get()) else {
            return Ok(());
        };
        let Ok(ba) = SwapExecutor::swap(&mut pool, &tok_b(), spec_ba) else {
            return Ok(());
        };

        prop_assert!(
            ba.amount_out().get() <= swap_in,
            "round-trip should not gain: final={} > original={}",
            ba.amount_out(), swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Properties 4 and 5: Balance invariant, no partial effects
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_balances_sum_to_supply(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let ledger = LiquidityLedger::new(TokenABasis::new(SeedRule::GeometricMean));
        let Ok((mut pool, _)) = Pool::initialize_with_provider(
            tok_a(), tok_b(), Amount::new(ra), Amount::new(rb), holder(0), ledger.strategy(),
        ) else {
            return Ok(());
        };
        let Ok(()) = pool.set_slippage_tolerance(PrecisionScale::DEFAULT.one()) else {
            panic!("valid tolerance");
        };

        for op in ops {
            let before = pool.clone();
            let failed = match op {
                Op::Add { who, a, b } => ledger
                    .add_liquidity(&mut pool, holder(who), Amount::new(a), Amount::new(b))
                    .is_err(),
                Op::Remove { who, per_mille } => {
                    let owned = pool.lp_balance(&holder(who)).get();
                    let lp = LpShares::new(owned * per_mille / 1_000);
                    ledger.remove_liquidity(&mut pool, holder(who), lp).is_err()
                }
                Op::SwapA(v) => exact_in(v)
                    .map_or(true, |s| SwapExecutor::swap(&mut pool, &tok_a(), s).is_err()),
                Op::SwapB(v) => exact_in(v)
                    .map_or(true, |s| SwapExecutor::swap(&mut pool, &tok_b(), s).is_err()),
            };
            prop_assert!(pool.lp_supply_matches_balances(), "balances drifted from supply");
            if failed {
                prop_assert_eq!(&pool, &before, "failed operation mutated the pool");
            } else {
                prop_assert_eq!(pool.revision(), before.revision() + 1);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Properties 6 and 7: Liquidity conservation, price direction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_then_withdraw_never_gains(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let ledger = LiquidityLedger::new(TokenABasis::default());
        let Ok((mut pool, _)) = Pool::initialize_with_provider(
            tok_a(), tok_b(), Amount::new(ra), Amount::new(rb), holder(0), ledger.strategy(),
        ) else {
            return Ok(());
        };
        let a = (ra * frac / 1_000).max(1);
        let b = (rb * frac / 1_000).max(1);
        let Ok(minted) = ledger.add_liquidity(&mut pool, holder(1), Amount::new(a), Amount::new(b)) else {
            return Ok(());
        };
        let Ok(back) = ledger.remove_liquidity(&mut pool, holder(1), minted.lp_shares()) else {
            panic!("provider owns the minted shares");
        };
        prop_assert!(back.amount_a().get() <= a, "gained token A: {} > {}", back.amount_a(), a);
        prop_assert!(pool.lp_balance(&holder(1)).is_zero());
    }

    #[test]
    fn prop_selling_a_raises_price_of_b(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let mut pool = make_pool(ra, rb, Rounding::Down);
        let Ok(before) = pool.spot_price() else {
            return Ok(());
        };
        let Some(spec) = exact_in((ra * frac / 1_000).max(1)) else {
            return Ok(());
        };
        if SwapExecutor::swap(&mut pool, &tok_a(), spec).is_err() {
            return Ok(());
        }
        let Ok(after) = pool.spot_price() else {
            return Ok(());
        };
        prop_assert!(after >= before, "price moved the wrong way: {} < {}", after, before);
    }
}

// ---------------------------------------------------------------------------
// Property 8: Ownership
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unowned_reserves_refuse_deposits(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        a in 1u128..1_000_000_000,
        b in 1u128..1_000_000_000,
    ) {
        let mut pool = make_pool(ra, rb, Rounding::Down);
        let before = pool.clone();
        let ledger = LiquidityLedger::<TokenABasis>::default();
        let result = ledger.add_liquidity(&mut pool, holder(3), Amount::new(a), Amount::new(b));
        prop_assert_eq!(result, Err(crate::error::AmmError::PoolNotInitialized));
        prop_assert_eq!(&pool, &before);
    }
}
