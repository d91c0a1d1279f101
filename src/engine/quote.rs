//! Constant-product quote formulas.
//!
//! All operations take a `(reserve_in, reserve_out)` snapshot and never
//! touch pool state.  With the default [`Rounding::Down`] every division
//! truncates, matching a ledger's native integer semantics:
//!
//! ```text
//! exact in:  new_out = floor(rin × rout / (rin + amount_in))
//!            amount_out = rout − new_out
//! exact out: new_in = floor(rin × rout / (rout − amount_out))
//!            amount_in = new_in − rin
//! ```
//!
//! Quoting exact-in then exact-out on the result is *not* an identity;
//! the two formulas are inverses only up to rounding.

use crate::domain::{Amount, PrecisionScale, Ratio, Rounding, SwapSpec};
use crate::error::AmmError;
use crate::math::{div_wide, product, CheckedArithmetic};

/// Pure pricing functions for one precision scale and rounding policy.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, PrecisionScale};
/// use pair_amm::engine::QuoteEngine;
///
/// let engine = QuoteEngine::new(PrecisionScale::DEFAULT);
/// let out = engine.quote_exact_in(Amount::new(24), Amount::new(16), Amount::new(10));
/// assert_eq!(out, Ok(Amount::new(5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuoteEngine {
    precision: PrecisionScale,
    reserve_rounding: Rounding,
}

impl QuoteEngine {
    /// Creates an engine with ledger-compatible (floor) rounding.
    #[must_use]
    pub const fn new(precision: PrecisionScale) -> Self {
        Self {
            precision,
            reserve_rounding: Rounding::Down,
        }
    }

    /// Overrides how `k / new_reserve` is rounded.
    ///
    /// [`Rounding::Up`] keeps the remainder in the pool, so the constant
    /// product never decreases across a swap.
    #[must_use]
    pub const fn with_reserve_rounding(mut self, rounding: Rounding) -> Self {
        self.reserve_rounding = rounding;
        self
    }

    /// Returns the precision scale.
    #[must_use]
    pub const fn precision(&self) -> PrecisionScale {
        self.precision
    }

    /// Returns the rounding used for the new-reserve division.
    #[must_use]
    pub const fn reserve_rounding(&self) -> Rounding {
        self.reserve_rounding
    }

    /// Price of token B in units of token A: `floor(reserve_a × P / reserve_b)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `reserve_b` is zero.
    pub fn spot_price(&self, reserve_a: Amount, reserve_b: Amount) -> Result<Ratio, AmmError> {
        Ratio::from_fraction(
            reserve_a.get(),
            reserve_b.get(),
            self.precision,
            Rounding::Down,
        )
    }

    /// Output received for selling exactly `amount_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `amount_in` is zero, or the trade is
    ///   too small to yield any output.
    /// - [`AmmError::PoolNotInitialized`] if either reserve is zero.
    /// - [`AmmError::InsufficientLiquidity`] if the trade would drain
    ///   `reserve_out`.
    /// - [`AmmError::ArithmeticOverflow`] if `reserve_in + amount_in`
    ///   exceeds `u128`.
    pub fn quote_exact_in(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_in: Amount,
    ) -> Result<Amount, AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidAmount("amount_in must be non-zero"));
        }
        check_reserves(reserve_in, reserve_out)?;

        let k = product(reserve_in.get(), reserve_out.get());
        let new_reserve_in = reserve_in.safe_add(&amount_in)?;
        let new_reserve_out = Amount::new(div_wide(
            k,
            new_reserve_in.get(),
            self.reserve_rounding,
        )?);
        let amount_out = reserve_out.safe_sub(&new_reserve_out)?;

        if amount_out.is_zero() {
            return Err(AmmError::InvalidAmount("amount_in too small to price"));
        }
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        Ok(amount_out)
    }

    /// Input required to receive exactly `amount_out`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `amount_out` is zero, or the trade
    ///   is too small to require any input.
    /// - [`AmmError::PoolNotInitialized`] if either reserve is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `amount_out >= reserve_out`.
    /// - [`AmmError::ArithmeticOverflow`] if the new input reserve exceeds
    ///   `u128`.
    pub fn quote_exact_out(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_out: Amount,
    ) -> Result<Amount, AmmError> {
        if amount_out.is_zero() {
            return Err(AmmError::InvalidAmount("amount_out must be non-zero"));
        }
        check_reserves(reserve_in, reserve_out)?;
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }

        let k = product(reserve_in.get(), reserve_out.get());
        let new_reserve_out = reserve_out.safe_sub(&amount_out)?;
        let new_reserve_in = Amount::new(div_wide(
            k,
            new_reserve_out.get(),
            self.reserve_rounding,
        )?);
        let amount_in = new_reserve_in.safe_sub(&reserve_in)?;

        if amount_in.is_zero() {
            return Err(AmmError::InvalidAmount("amount_out too small to price"));
        }
        Ok(amount_in)
    }

    /// Resolves a [`SwapSpec`] into `(amount_in, amount_out)`.
    ///
    /// # Errors
    ///
    /// Same as [`quote_exact_in`](Self::quote_exact_in) or
    /// [`quote_exact_out`](Self::quote_exact_out).
    pub fn quote(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        spec: SwapSpec,
    ) -> Result<(Amount, Amount), AmmError> {
        match spec {
            SwapSpec::ExactIn { amount_in } => {
                let out = self.quote_exact_in(reserve_in, reserve_out, amount_in)?;
                Ok((amount_in, out))
            }
            SwapSpec::ExactOut { amount_out } => {
                let amount_in = self.quote_exact_out(reserve_in, reserve_out, amount_out)?;
                Ok((amount_in, amount_out))
            }
        }
    }
}

fn check_reserves(reserve_in: Amount, reserve_out: Amount) -> Result<(), AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::PoolNotInitialized);
    }
    Ok(())
}
