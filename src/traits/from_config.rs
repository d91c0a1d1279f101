//! Construction of a pool from its configuration.
//!
//! [`FromConfig`] gives a uniform, validated path from a configuration
//! struct to a ready pool.  The handle uses it for
//! [`initialize_from_config`](crate::handle::PoolHandle::initialize_from_config):
//!
//! ```text
//! PoolConfig ──validate()──► Pool::from_config(&cfg) ──► PoolHandle
//! ```
//!
//! # Validation Contract
//!
//! Implementations **must** validate every configuration invariant during
//! construction.  A successfully constructed pool is guaranteed to be in
//! a valid initial state:
//!
//! - the token pair has two distinct ids
//! - both initial reserves are non-zero
//! - the precision scale is non-zero
//! - the slippage tolerance is at most 100%

use crate::error::AmmError;

/// Builds `Self` from a configuration value.
///
/// There is no blanket implementation; every pairing of a type with a
/// configuration is written out explicitly.
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] (or a more specific
/// variant such as [`AmmError::InvalidToken`]) if the configuration is
/// invalid.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// The configuration is borrowed because callers often keep it for
    /// logging or a later retry.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if any parameter is out of
    ///   range or inconsistent.
    /// - [`AmmError::InvalidToken`] if the token pair is invalid.
    /// - [`AmmError::InvalidAmount`] if an initial reserve is zero.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
