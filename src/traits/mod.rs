//! Seams between the pool core and its host.
//!
//! [`FromConfig`] builds a pool from configuration,
//! [`LiquidityMintStrategy`] decides LP minting, and the two collaborator
//! traits, [`AssetTransfer`] and [`Authorizer`], connect the handle to the
//! ledger that actually moves tokens and to whoever decides permissions.

mod authorizer;
mod from_config;
mod liquidity_mint;
mod transfer;

pub use authorizer::{AllowAll, Authorizer, Governed};
pub use from_config::FromConfig;
pub use liquidity_mint::{LiquidityMintStrategy, MintBasis};
pub use transfer::{AssetTransfer, NoopTransfer, Transfer, TransferError};
