//! Unified error types for the pair AMM core.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every variant is a local, synchronous, non-retryable
//! decision: the core never retries internally, and a failed call leaves
//! the pool exactly as it was before the call.

use crate::domain::{LpShares, Ratio};

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every failure the pricing and liquidity core can report.
///
/// Variants carrying a `&'static str` describe which check failed so that
/// callers can log a precise reason without string allocation on the hot
/// path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// The token parameter matches neither configured asset, or the pair
    /// itself is malformed.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A zero or otherwise nonsensical quantity.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The requested exact-out amount is not below the available reserve,
    /// or an exact-in trade would drain the output reserve.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// An LP holder tried to burn more shares than it owns.
    #[error("insufficient LP balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Shares the caller asked to burn.
        requested: LpShares,
        /// Shares the caller actually holds.
        available: LpShares,
    },

    /// The computed price impact is strictly above the configured tolerance.
    #[error("slippage exceeded: impact {impact} > tolerance {tolerance}")]
    SlippageExceeded {
        /// Price impact of the rejected trade.
        impact: Ratio,
        /// Tolerance configured on the pool.
        tolerance: Ratio,
    },

    /// The pool has not been initialized, or its reserves / LP supply are
    /// empty for the requested operation.
    #[error("pool not initialized")]
    PoolNotInitialized,

    /// `initialize` was called on a handle that already owns a pool.
    #[error("pool already initialized")]
    PoolAlreadyInitialized,

    /// A divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A result does not fit the target integer width.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// The external transfer collaborator rejected the settlement batch.
    /// Pool state is unchanged.
    #[error("transfer failed (code {code}): {reason}")]
    TransferFailed {
        /// Collaborator-specific status code.
        code: i32,
        /// Human-readable reason reported by the collaborator.
        reason: String,
    },

    /// The caller is not allowed to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A staged plan was computed against an older pool revision.
    #[error("stale quote: planned at revision {expected}, pool is at {found}")]
    StaleQuote {
        /// Revision recorded in the plan.
        expected: u64,
        /// Current pool revision.
        found: u64,
    },
}
