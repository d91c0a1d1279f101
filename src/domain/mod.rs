//! Value types for the pair AMM: identities, quantities, ratios and the
//! shapes of swap and liquidity requests.
//!
//! Every type is a small `Copy` newtype or enum with validated
//! constructors.  Quantities are raw `u128` integers; anything fractional
//! is a [`Ratio`] on a [`PrecisionScale`].

mod amount;
mod ids;
mod liquidity_delta;
mod lp_shares;
mod precision;
mod ratio;
mod rounding;
mod swap_quote;
mod swap_spec;
mod token_pair;

pub use amount::Amount;
pub use ids::{AccountId, TokenId};
pub use liquidity_delta::LiquidityDelta;
pub use lp_shares::LpShares;
pub use precision::PrecisionScale;
pub use ratio::Ratio;
pub use rounding::Rounding;
pub use swap_quote::SwapQuote;
pub use swap_spec::{SwapDirection, SwapSpec};
pub use token_pair::TokenPair;
