//! The pluggable LP minting rule.
//!
//! How many shares a deposit earns is a policy decision, especially for
//! deposits whose `amount_a : amount_b` ratio does not match the reserves.
//! [`LiquidityMintStrategy`] isolates that decision behind a stable
//! interface; [`LiquidityLedger`](crate::pool::LiquidityLedger) applies
//! whichever strategy it is given and owns everything else (validation,
//! reserve and balance updates).
//!
//! Shipped strategies live in [`pool`](crate::pool):
//!
//! | Strategy | First deposit | Later deposits |
//! |----------|---------------|----------------|
//! | [`TokenABasis`](crate::pool::TokenABasis) | per [`SeedRule`](crate::pool::SeedRule) | `floor(T × a / Ra)` |
//! | [`BalancedMin`](crate::pool::BalancedMin) | `isqrt(a × b)` | `min(floor(T × a / Ra), floor(T × b / Rb))` |

use crate::domain::{Amount, LpShares, PrecisionScale};
use crate::error::AmmError;

/// Reserves and supply a deposit is priced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintBasis {
    /// Token A reserve before the deposit.
    pub reserve_a: Amount,
    /// Token B reserve before the deposit.
    pub reserve_b: Amount,
    /// LP supply before the deposit.
    pub total_supply: LpShares,
    /// The pool's precision scale.
    pub precision: PrecisionScale,
}

/// Computes LP shares for a deposit.
///
/// Implementations are pure: they never mutate state and may return zero,
/// which the ledger rejects as [`AmmError::InvalidAmount`].
pub trait LiquidityMintStrategy {
    /// Shares minted to the provider who funds a new pool.
    ///
    /// # Errors
    ///
    /// Implementation-specific; typically [`AmmError::ArithmeticOverflow`].
    fn initial_mint(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        precision: PrecisionScale,
    ) -> Result<LpShares, AmmError>;

    /// Shares minted against an existing, non-zero supply.
    ///
    /// # Errors
    ///
    /// Implementation-specific; typically [`AmmError::DivisionByZero`] or
    /// [`AmmError::ArithmeticOverflow`].
    fn proportional_mint(
        &self,
        basis: &MintBasis,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LpShares, AmmError>;
}

impl<S: LiquidityMintStrategy + ?Sized> LiquidityMintStrategy for &S {
    fn initial_mint(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        precision: PrecisionScale,
    ) -> Result<LpShares, AmmError> {
        (**self).initial_mint(amount_a, amount_b, precision)
    }

    fn proportional_mint(
        &self,
        basis: &MintBasis,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LpShares, AmmError> {
        (**self).proportional_mint(basis, amount_a, amount_b)
    }
}
