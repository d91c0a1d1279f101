//! Fixed-point ratio on a pool's precision scale.

use core::cmp::Ordering;
use core::fmt;

use super::{PrecisionScale, Rounding};
use crate::error::AmmError;
use crate::math::{mul_div, U256};

/// A non-negative fraction stored as `raw / scale`.
///
/// Spot prices, price impacts and slippage tolerances are all `Ratio`s.
/// Comparison is by value (cross-multiplied in 256 bits), so ratios on
/// different scales still order correctly.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{PrecisionScale, Ratio, Rounding};
///
/// let p = PrecisionScale::DEFAULT;
/// let price = Ratio::from_fraction(100, 50, p, Rounding::Down).expect("non-zero denominator");
/// assert_eq!(price.raw(), 20_000_000);
/// assert_eq!(price.to_string(), "2.0000000");
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratio {
    raw: u128,
    scale: PrecisionScale,
}

impl Ratio {
    /// Wraps a raw fixed-point value.
    #[must_use]
    pub const fn new(raw: u128, scale: PrecisionScale) -> Self {
        Self { raw, scale }
    }

    /// Zero on the given scale.
    #[must_use]
    pub const fn zero(scale: PrecisionScale) -> Self {
        Self { raw: 0, scale }
    }

    /// `numerator / denominator` expressed on `scale`:
    /// `raw = numerator × P / denominator`, rounded as requested.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::ArithmeticOverflow`] if the raw value exceeds `u128`.
    pub fn from_fraction(
        numerator: u128,
        denominator: u128,
        scale: PrecisionScale,
        rounding: Rounding,
    ) -> Result<Self, AmmError> {
        let raw = mul_div(numerator, scale.get(), denominator, rounding)?;
        Ok(Self { raw, scale })
    }

    /// Returns the raw fixed-point integer.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.raw
    }

    /// Returns the scale the raw value is expressed on.
    #[must_use]
    pub const fn scale(&self) -> PrecisionScale {
        self.scale
    }

    /// Returns `true` if the ratio is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Lossy conversion for display and reporting.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.raw as f64 / self.scale.get() as f64
    }

    fn cross(&self, other: &Self) -> (U256, U256) {
        (
            U256::from(self.raw) * U256::from(other.scale.get()),
            U256::from(other.raw) * U256::from(self.scale.get()),
        )
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, rhs) = self.cross(other);
        lhs == rhs
    }
}

impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = self.cross(other);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.scale.get();
        match self.scale.decimal_places() {
            Some(0) => write!(f, "{}", self.raw),
            Some(places) => {
                let width = places as usize;
                write!(f, "{}.{:0width$}", self.raw / p, self.raw % p)
            }
            None => write!(f, "{}/{}", self.raw, p),
        }
    }
}
