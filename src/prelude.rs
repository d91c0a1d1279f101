//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pair_amm::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, LiquidityDelta, LpShares, PrecisionScale, Ratio, Rounding, SwapDirection,
    SwapQuote, SwapSpec, TokenId, TokenPair,
};

pub use crate::traits::{
    AllowAll, AssetTransfer, Authorizer, FromConfig, Governed, LiquidityMintStrategy,
    NoopTransfer, Transfer, TransferError,
};

pub use crate::config::PoolConfig;
pub use crate::engine::{QuoteEngine, SlippageGuard};
pub use crate::error::{AmmError, Result};
pub use crate::handle::PoolHandle;
pub use crate::pool::{BalancedMin, LiquidityLedger, Pool, SeedRule, SwapExecutor, TokenABasis};
