//! The pool aggregate and the two paths that mutate it.
//!
//! | Type | Role |
//! |------|------|
//! | [`Pool`] | reserves, LP supply, holder balances, tolerance |
//! | [`SwapExecutor`] | validate → quote → guard → commit |
//! | [`LiquidityLedger`] | proportional mint/burn through a [`LiquidityMintStrategy`](crate::traits::LiquidityMintStrategy) |
//! | [`TokenABasis`], [`BalancedMin`] | shipped minting strategies |

mod executor;
mod ledger;
mod mint;
mod state;

#[cfg(test)]
mod proptest_properties;

pub use executor::{SwapExecutor, SwapPlan};
pub use ledger::{LiquidityAction, LiquidityLedger, LiquidityPlan};
pub use mint::{BalancedMin, SeedRule, TokenABasis};
pub use state::{Pool, PoolSnapshot};
