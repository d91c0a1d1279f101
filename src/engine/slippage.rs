//! Price-impact measurement and the tolerance check.

use tracing::warn;

use super::QuoteEngine;
use crate::domain::{Amount, Ratio, Rounding, SwapSpec};
use crate::error::AmmError;
use crate::math::mul_div;

/// A priced trade together with its impact against the spot rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// Amount paid into the pool.
    pub amount_in: Amount,
    /// Amount paid out of the pool.
    pub amount_out: Amount,
    /// Fractional deviation from the ideal spot-rate trade.
    pub impact: Ratio,
}

/// Measures how far a trade's realized rate deviates from the spot rate
/// and rejects trades that deviate by more than a tolerance.
///
/// Impact is always expressed on the engine's precision scale:
///
/// ```text
/// exact in:  ideal_out = floor(amount_in × rout / rin)
///            impact    = floor((ideal_out − actual_out) × P / ideal_out)
/// exact out: ideal_in  = floor(amount_out × rin / rout)
///            impact    = floor((actual_in − ideal_in) × P / ideal_in)
/// ```
///
/// On very small exact-in trades floor division can make `actual_out`
/// exceed `ideal_out` by one unit; the impact is then zero.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, PrecisionScale};
/// use pair_amm::engine::{QuoteEngine, SlippageGuard};
///
/// let p = 10_000_000u128;
/// let guard = SlippageGuard::new(QuoteEngine::new(PrecisionScale::DEFAULT));
/// let impact = guard
///     .price_impact_exact_in(Amount::new(114 * p), Amount::new(220 * p), Amount::new(p))
///     .expect("valid trade");
/// assert_eq!(impact.raw(), 86_956);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlippageGuard {
    engine: QuoteEngine,
}

impl SlippageGuard {
    /// Creates a guard that prices trades with `engine`.
    #[must_use]
    pub const fn new(engine: QuoteEngine) -> Self {
        Self { engine }
    }

    /// Returns the underlying quote engine.
    #[must_use]
    pub const fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Price impact of selling exactly `amount_in`.
    ///
    /// # Errors
    ///
    /// - Any error of [`QuoteEngine::quote_exact_in`].
    /// - [`AmmError::InvalidAmount`] if the ideal output is zero.
    pub fn price_impact_exact_in(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_in: Amount,
    ) -> Result<Ratio, AmmError> {
        let actual_out = self
            .engine
            .quote_exact_in(reserve_in, reserve_out, amount_in)?;
        self.impact_exact_in(reserve_in, reserve_out, amount_in, actual_out)
    }

    /// Price impact of buying exactly `amount_out`.
    ///
    /// # Errors
    ///
    /// - Any error of [`QuoteEngine::quote_exact_out`].
    /// - [`AmmError::InvalidAmount`] if the ideal input is zero.
    pub fn price_impact_exact_out(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_out: Amount,
    ) -> Result<Ratio, AmmError> {
        let actual_in = self
            .engine
            .quote_exact_out(reserve_in, reserve_out, amount_out)?;
        self.impact_exact_out(reserve_in, reserve_out, amount_out, actual_in)
    }

    /// Quotes a trade and measures its impact in one pass.
    ///
    /// # Errors
    ///
    /// Same as the quote and impact functions for the given [`SwapSpec`] variant.
    pub fn assess(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        spec: SwapSpec,
    ) -> Result<Assessment, AmmError> {
        let (amount_in, amount_out) = self.engine.quote(reserve_in, reserve_out, spec)?;
        let impact = if spec.is_exact_in() {
            self.impact_exact_in(reserve_in, reserve_out, amount_in, amount_out)?
        } else {
            self.impact_exact_out(reserve_in, reserve_out, amount_out, amount_in)?
        };
        Ok(Assessment {
            amount_in,
            amount_out,
            impact,
        })
    }

    /// Accepts `impact` unless it is strictly above `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::SlippageExceeded`] if `impact > tolerance`.
    pub fn check(impact: Ratio, tolerance: Ratio) -> Result<(), AmmError> {
        if impact > tolerance {
            warn!(%impact, %tolerance, "price impact above tolerance");
            return Err(AmmError::SlippageExceeded { impact, tolerance });
        }
        Ok(())
    }

    fn impact_exact_in(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_in: Amount,
        actual_out: Amount,
    ) -> Result<Ratio, AmmError> {
        let ideal_out = mul_div(
            amount_in.get(),
            reserve_out.get(),
            reserve_in.get(),
            Rounding::Down,
        )?;
        if ideal_out == 0 {
            return Err(AmmError::InvalidAmount("ideal output is zero"));
        }
        let shortfall = ideal_out.saturating_sub(actual_out.get());
        Ratio::from_fraction(shortfall, ideal_out, self.engine.precision(), Rounding::Down)
    }

    fn impact_exact_out(
        &self,
        reserve_in: Amount,
        reserve_out: Amount,
        amount_out: Amount,
        actual_in: Amount,
    ) -> Result<Ratio, AmmError> {
        let ideal_in = mul_div(
            amount_out.get(),
            reserve_in.get(),
            reserve_out.get(),
            Rounding::Down,
        )?;
        if ideal_in == 0 {
            return Err(AmmError::InvalidAmount("ideal input is zero"));
        }
        let excess = actual_in.get().saturating_sub(ideal_in);
        Ratio::from_fraction(excess, ideal_in, self.engine.precision(), Rounding::Down)
    }
}
