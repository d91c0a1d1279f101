//! Liquidity-provider share units.

use core::fmt;

/// Fungible units of proportional ownership of a pool's reserves.
///
/// Distinct from [`Amount`](super::Amount): shares are minted and burned
/// by the pool and never name an asset.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::LpShares;
///
/// let supply = LpShares::new(100);
/// assert_eq!(supply.checked_sub(&LpShares::new(5)), Some(LpShares::new(95)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LpShares(u128);

impl LpShares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw `u128` share count.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw share count.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for LpShares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
