//! Configuration for a two-asset constant-product pool.

use crate::domain::{Amount, PrecisionScale, Ratio, Rounding, TokenId, TokenPair};
use crate::error::AmmError;

/// Declarative blueprint for a pool (`x · y = k`, no fee).
///
/// Built in code with [`PoolConfig::new`] and the `with_*` setters, or
/// deserialized (with the `serde` feature) from a host's configuration
/// file.  Optional fields fall back to defaults:
///
/// | Field | Default |
/// |-------|---------|
/// | `precision` | `10_000_000` |
/// | `slippage_tolerance` | `floor(precision / 200)` (0.5%) |
/// | `reserve_rounding` | `down` (ledger-compatible floor) |
///
/// `slippage_tolerance` is a raw value on `precision`, so `50_000` with the
/// default scale means 0.5%.
///
/// # Validation
///
/// - token A and token B must differ
/// - both reserves must be non-zero
/// - the tolerance must not exceed `precision` (100%)
///
/// # Examples
///
/// ```
/// use pair_amm::config::PoolConfig;
/// use pair_amm::domain::{Amount, TokenId, TokenPair};
///
/// let pair = TokenPair::new(TokenId::from_bytes([1; 32]), TokenId::from_bytes([2; 32]))
///     .expect("distinct tokens");
/// let cfg = PoolConfig::new(pair, Amount::new(1_000), Amount::new(2_000))
///     .expect("valid config")
///     .with_slippage_tolerance(100_000);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.slippage_tolerance().raw(), 100_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct PoolConfig {
    token_a: TokenId,
    token_b: TokenId,
    reserve_a: Amount,
    reserve_b: Amount,
    #[cfg_attr(feature = "serde", serde(default))]
    precision: PrecisionScale,
    #[cfg_attr(feature = "serde", serde(default))]
    slippage_tolerance: Option<u128>,
    #[cfg_attr(feature = "serde", serde(default))]
    reserve_rounding: Rounding,
}

impl PoolConfig {
    /// Creates a configuration with default precision, tolerance and
    /// rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] if either reserve is zero.
    pub fn new(pair: TokenPair, reserve_a: Amount, reserve_b: Amount) -> Result<Self, AmmError> {
        let config = Self {
            token_a: pair.token_a(),
            token_b: pair.token_b(),
            reserve_a,
            reserve_b,
            precision: PrecisionScale::DEFAULT,
            slippage_tolerance: None,
            reserve_rounding: Rounding::Down,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the precision scale.
    #[must_use]
    pub const fn with_precision(mut self, precision: PrecisionScale) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the slippage tolerance as a raw value on the precision scale.
    #[must_use]
    pub const fn with_slippage_tolerance(mut self, raw: u128) -> Self {
        self.slippage_tolerance = Some(raw);
        self
    }

    /// Sets the rounding of the new-reserve division in quotes.
    #[must_use]
    pub const fn with_reserve_rounding(mut self, rounding: Rounding) -> Self {
        self.reserve_rounding = rounding;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// Deserialized configurations bypass [`new`](Self::new), so consumers
    /// call this before building a pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if both token ids are equal.
    /// - [`AmmError::InvalidAmount`] if either reserve is zero.
    /// - [`AmmError::InvalidConfiguration`] if the tolerance exceeds 100%.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.token_pair()?;
        if self.reserve_a.is_zero() || self.reserve_b.is_zero() {
            return Err(AmmError::InvalidAmount("initial reserves must be non-zero"));
        }
        if self.slippage_tolerance() > self.precision.one() {
            return Err(AmmError::InvalidConfiguration(
                "slippage tolerance must not exceed 100%",
            ));
        }
        Ok(())
    }

    /// Returns the configured token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both ids are equal.
    pub fn token_pair(&self) -> Result<TokenPair, AmmError> {
        TokenPair::new(self.token_a, self.token_b)
    }

    /// Returns the initial reserve of token A.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the initial reserve of token B.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns the precision scale.
    #[must_use]
    pub const fn precision(&self) -> PrecisionScale {
        self.precision
    }

    /// Returns the tolerance, resolving the default when unset.
    #[must_use]
    pub const fn slippage_tolerance(&self) -> Ratio {
        match self.slippage_tolerance {
            Some(raw) => Ratio::new(raw, self.precision),
            None => self.precision.default_slippage_tolerance(),
        }
    }

    /// Returns the reserve rounding policy.
    #[must_use]
    pub const fn reserve_rounding(&self) -> Rounding {
        self.reserve_rounding
    }
}
