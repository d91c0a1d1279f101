//! Two-asset pool lifecycle example.
//!
//! Demonstrates loading a pool configuration from JSON, seeding liquidity,
//! pricing and executing swaps, tripping the slippage guard, and
//! withdrawing liquidity, all through a [`PoolHandle`].
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example pair_lifecycle
//! ```

use pair_amm::config::PoolConfig;
use pair_amm::domain::{AccountId, Amount, LpShares, PrecisionScale, Ratio, SwapSpec, TokenId};
use pair_amm::handle::PoolHandle;
use pair_amm::pool::{SeedRule, TokenABasis};
use pair_amm::traits::{Governed, NoopTransfer};
use pair_amm::AmmError;

const P: u128 = PrecisionScale::DEFAULT.get();

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Constant-Product Pair Lifecycle ===\n");

    // ── 1. Identities ──────────────────────────────────────────────────
    let hbar = TokenId::from_bytes([1u8; 32]);
    let usdc = TokenId::from_bytes([2u8; 32]);
    let custody = AccountId::from_bytes([0xaa; 32]);
    let governor = AccountId::from_bytes([0x60; 32]);
    let alice = AccountId::from_bytes([0x0a; 32]);
    let bob = AccountId::from_bytes([0x0b; 32]);

    // ── 2. Load a configuration ────────────────────────────────────────
    //    Precision and rounding fall back to their defaults.
    let json = format!(
        r#"{{"token_a":"{hbar}","token_b":"{usdc}","reserve_a":{},"reserve_b":{},"slippage_tolerance":{}}}"#,
        100 * P,
        250 * P,
        P / 100
    );
    let config: PoolConfig = serde_json::from_str(&json)?;
    config.validate()?;
    println!("Config: tolerance = {}", config.slippage_tolerance());

    // ── 3. Create the handle; alice funds the pool and owns the seed ───
    let handle = PoolHandle::new(
        custody,
        NoopTransfer,
        Governed::new(governor),
        TokenABasis::new(SeedRule::Descaled),
    );
    let seed = handle.initialize_from_config_with_provider(&config, alice)?;
    let (ra, rb) = handle.pair_quantities()?;
    println!("Pool created: reserves = ({ra}, {rb}), alice holds {seed} LP");
    println!("  Spot price (B in A): {}", handle.spot_price()?);

    // ── 4. A second provider deposits proportionally ───────────────────
    let minted = handle.add_liquidity(bob, Amount::new(10 * P), Amount::new(25 * P))?;
    println!("\nBob deposits 10 A + 25 B → {minted} LP");

    // ── 5. Quote, then swap ────────────────────────────────────────────
    let amount_in = Amount::new(P / 2);
    println!("\nQuote for {amount_in} A in:");
    println!("  out:    {}", handle.out_given_in(amount_in)?);
    println!("  impact: {}", handle.slippage_out_given_in(amount_in)?);

    let quote = handle.swap(bob, &hbar, SwapSpec::exact_in(amount_in)?)?;
    println!("Bob swaps: {quote}");

    let quote = handle.swap(bob, &usdc, SwapSpec::exact_out(Amount::new(P / 4))?)?;
    println!("Bob swaps: {quote}");

    // ── 6. A large trade trips the guard ───────────────────────────────
    match handle.swap(bob, &hbar, SwapSpec::exact_in(Amount::new(20 * P))?) {
        Err(AmmError::SlippageExceeded { impact, tolerance }) => {
            println!("\nRejected: impact {impact} > tolerance {tolerance}");
        }
        other => println!("\nUnexpected outcome: {other:?}"),
    }

    // ── 7. Only the governor may widen the tolerance ───────────────────
    let wide = Ratio::new(P / 5, PrecisionScale::DEFAULT);
    if let Err(err) = handle.set_slippage(bob, wide) {
        println!("Bob cannot change slippage: {err}");
    }
    handle.set_slippage(governor, wide)?;
    let quote = handle.swap(bob, &hbar, SwapSpec::exact_in(Amount::new(20 * P))?)?;
    println!("After governor widens tolerance to {}: {quote}", handle.slippage()?);

    // ── 8. Withdraw ────────────────────────────────────────────────────
    let burn = LpShares::new(seed.get() / 2);
    let (out_a, out_b) = handle.remove_liquidity(alice, burn)?;
    println!("\nAlice burns {burn} LP → ({out_a} A, {out_b} B)");

    let snapshot = handle.snapshot()?;
    println!("\nFinal snapshot:");
    println!("  reserves:  ({}, {})", snapshot.reserve_a, snapshot.reserve_b);
    println!("  LP supply: {}", snapshot.total_lp_supply);
    println!("  holders:   {}", snapshot.holder_count);
    println!("  revision:  {}", snapshot.revision);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    println!("\n=== Done ===");
    Ok(())
}
