//! Explicit rounding direction for integer division.

/// Rounding direction for every division in the crate.
///
/// Quote formulas divide the constant product `k` by a new reserve; the
/// direction chosen there decides who absorbs the remainder:
///
/// | Direction | `k / new_reserve` | Who benefits |
/// |-----------|-------------------|--------------|
/// | [`Rounding::Down`] | floor (ledger-compatible) | the trader, by less than one unit |
/// | [`Rounding::Up`] | ceiling | the pool |
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::default(), Rounding::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor). Matches native ledger integer division.
    #[default]
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
