//! # Pair AMM
//!
//! Pricing and liquidity-accounting core of a two-asset constant-product
//! automated market maker.
//!
//! The crate computes spot prices, exact-in and exact-out quotes and their
//! price impact, rejects trades above a slippage tolerance, and keeps the
//! LP share ledger in step with the reserves.  It never moves tokens
//! itself: every movement is handed to an
//! [`AssetTransfer`](traits::AssetTransfer) collaborator as one batch, and
//! the pool is updated only once that batch settles.
//!
//! All amounts are raw `u128` integers.  Products are formed in a 256-bit
//! intermediate and divided back with explicit rounding; fractional values
//! (spot price, impact, tolerance) are [`Ratio`](domain::Ratio)s scaled by
//! a [`PrecisionScale`](domain::PrecisionScale), `10_000_000` by default.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | yes | `Serialize`/`Deserialize` for ids, amounts, ratios, config and snapshots |
//!
//! ## Create a pool and execute a swap
//!
//! ```rust
//! use pair_amm::domain::{AccountId, Amount, SwapSpec, TokenId};
//! use pair_amm::handle::PoolHandle;
//!
//! let p = 10_000_000u128;
//! let hbar = TokenId::from_bytes([1u8; 32]);
//! let usdc = TokenId::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([7u8; 32]);
//!
//! // 1. A handle with no-op settlement and open permissions
//! let handle = PoolHandle::accounting(AccountId::from_bytes([0xaa; 32]));
//!
//! // 2. Seed the pool; alice owns the initial liquidity
//! handle
//!     .initialize_with_provider(hbar, usdc, Amount::new(1_000 * p), Amount::new(2_000 * p), alice)
//!     .expect("fresh handle");
//!
//! // 3. Price B in A is 0.5
//! assert_eq!(handle.spot_price().expect("initialized").raw(), p / 2);
//!
//! // 4. Sell one unit of token A within the default 0.5% tolerance
//! let spec = SwapSpec::exact_in(Amount::new(p)).expect("non-zero");
//! let quote = handle.swap(alice, &hbar, spec).expect("swap succeeded");
//! assert!(quote.amount_out().get() > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │    Host      │  owns a PoolHandle, supplies AssetTransfer + Authorizer
//! └──────┬──────┘
//!        │ swap / add_liquidity / remove_liquidity
//!        ▼
//! ┌─────────────┐
//! │   Handle     │  lock → plan → settle → commit
//! └──────┬──────┘
//!        │ SwapExecutor / LiquidityLedger
//!        ▼
//! ┌─────────────┐
//! │    Pool      │  reserves, LP supply, holder balances, revision
//! └──────┬──────┘
//!        │ QuoteEngine + SlippageGuard
//!        ▼
//! ┌─────────────┐
//! │   Domain     │  Amount, Ratio, LpShares, TokenPair, …
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Ratio`](domain::Ratio), [`TokenPair`](domain::TokenPair), etc. |
//! | [`math`]   | Checked arithmetic and 256-bit `mul_div` / `isqrt` |
//! | [`engine`] | [`QuoteEngine`](engine::QuoteEngine) and [`SlippageGuard`](engine::SlippageGuard) |
//! | [`pool`]   | The [`Pool`](pool::Pool) aggregate, [`SwapExecutor`](pool::SwapExecutor), [`LiquidityLedger`](pool::LiquidityLedger) |
//! | [`handle`] | [`PoolHandle`](handle::PoolHandle): locking, settlement, authorization |
//! | [`traits`] | Seams: [`AssetTransfer`](traits::AssetTransfer), [`Authorizer`](traits::Authorizer), [`LiquidityMintStrategy`](traits::LiquidityMintStrategy), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) blueprint |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (`debug` for quotes and plans,
//! `info` for commits, `warn` for rejections) and never installs a
//! subscriber.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod handle;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;

pub use error::{AmmError, Result};
