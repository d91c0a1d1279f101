//! Fixed-point scale shared by every ratio a pool computes.

use core::fmt;

use super::Ratio;
use crate::error::AmmError;

/// The integer multiplier `P` used to represent fractional values.
///
/// A ratio `r` is stored as the integer `floor(r × P)`.  The scale is
/// copied into a pool at creation and never changes afterwards.  Zero is
/// rejected because every ratio would divide by it.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::PrecisionScale;
///
/// let p = PrecisionScale::DEFAULT;
/// assert_eq!(p.get(), 10_000_000);
/// assert_eq!(p.default_slippage_tolerance().raw(), 50_000); // 0.5%
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u128", into = "u128"))]
pub struct PrecisionScale(u128);

impl PrecisionScale {
    /// The scale used when none is configured: `10_000_000`.
    pub const DEFAULT: Self = Self(10_000_000);

    /// Creates a scale.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `value` is zero.
    pub const fn new(value: u128) -> Result<Self, AmmError> {
        if value == 0 {
            return Err(AmmError::InvalidConfiguration(
                "precision scale must be non-zero",
            ));
        }
        Ok(Self(value))
    }

    /// Returns `P`.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// The default slippage tolerance, `floor(P × 5 / 1000)` (0.5%).
    #[must_use]
    pub const fn default_slippage_tolerance(&self) -> Ratio {
        // floor(5P / 1000) == floor(P / 200) and cannot overflow.
        Ratio::new(self.0 / 200, *self)
    }

    /// `1.0` on this scale.
    #[must_use]
    pub const fn one(&self) -> Ratio {
        Ratio::new(self.0, *self)
    }

    /// Drops the scale from a raw quantity, truncating.
    #[must_use]
    pub const fn descale(&self, raw: u128) -> u128 {
        raw / self.0
    }

    /// Number of decimal places if `P` is a power of ten.
    #[must_use]
    pub const fn decimal_places(&self) -> Option<u32> {
        let mut v = self.0;
        let mut places = 0u32;
        while v % 10 == 0 {
            v /= 10;
            places += 1;
        }
        if v == 1 {
            Some(places)
        } else {
            None
        }
    }
}

impl Default for PrecisionScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u128> for PrecisionScale {
    type Error = AmmError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PrecisionScale> for u128 {
    fn from(scale: PrecisionScale) -> Self {
        scale.0
    }
}

impl fmt::Display for PrecisionScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
