//! Shipped LP minting strategies.

use crate::domain::{Amount, LpShares, PrecisionScale, Rounding};
use crate::error::AmmError;
use crate::math::{isqrt, mul_div, product};
use crate::traits::{LiquidityMintStrategy, MintBasis};

/// How [`TokenABasis`] seeds a newly created pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SeedRule {
    /// Seed equals `amount_a`.
    #[default]
    AmountA,
    /// Seed equals `floor(amount_a / P)`: whole units of token A.
    Descaled,
    /// Seed equals `isqrt(amount_a × amount_b)`.
    GeometricMean,
}

/// Token A is the proportionality basis.
///
/// Later deposits mint `floor(total_supply × amount_a / reserve_a)`;
/// `amount_b` is accepted as given and never re-derived, so an unbalanced
/// deposit donates its excess token B to existing holders.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, LpShares, PrecisionScale};
/// use pair_amm::pool::{SeedRule, TokenABasis};
/// use pair_amm::traits::{LiquidityMintStrategy, MintBasis};
///
/// let strategy = TokenABasis::default();
/// let basis = MintBasis {
///     reserve_a: Amount::new(1_000),
///     reserve_b: Amount::new(4_000),
///     total_supply: LpShares::new(500),
///     precision: PrecisionScale::DEFAULT,
/// };
/// let minted = strategy
///     .proportional_mint(&basis, Amount::new(100), Amount::new(1))
///     .expect("non-zero reserve");
/// assert_eq!(minted, LpShares::new(50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenABasis {
    seed: SeedRule,
}

impl TokenABasis {
    /// Creates the strategy with the given seed rule.
    #[must_use]
    pub const fn new(seed: SeedRule) -> Self {
        Self { seed }
    }

    /// Returns the seed rule.
    #[must_use]
    pub const fn seed_rule(&self) -> SeedRule {
        self.seed
    }
}

impl LiquidityMintStrategy for TokenABasis {
    fn initial_mint(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        precision: PrecisionScale,
    ) -> Result<LpShares, AmmError> {
        let seed = match self.seed {
            SeedRule::AmountA => amount_a.get(),
            SeedRule::Descaled => precision.descale(amount_a.get()),
            SeedRule::GeometricMean => isqrt(product(amount_a.get(), amount_b.get())),
        };
        Ok(LpShares::new(seed))
    }

    fn proportional_mint(
        &self,
        basis: &MintBasis,
        amount_a: Amount,
        _amount_b: Amount,
    ) -> Result<LpShares, AmmError> {
        let minted = mul_div(
            basis.total_supply.get(),
            amount_a.get(),
            basis.reserve_a.get(),
            Rounding::Down,
        )?;
        Ok(LpShares::new(minted))
    }
}

/// Both tokens count; the scarcer side decides.
///
/// Seeds `isqrt(amount_a × amount_b)` and then mints
/// `min(floor(T × a / Ra), floor(T × b / Rb))`, so an unbalanced deposit
/// is credited only for its balanced part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalancedMin;

impl LiquidityMintStrategy for BalancedMin {
    fn initial_mint(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        _precision: PrecisionScale,
    ) -> Result<LpShares, AmmError> {
        Ok(LpShares::new(isqrt(product(amount_a.get(), amount_b.get()))))
    }

    fn proportional_mint(
        &self,
        basis: &MintBasis,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LpShares, AmmError> {
        let total = basis.total_supply.get();
        let share_a = mul_div(total, amount_a.get(), basis.reserve_a.get(), Rounding::Down)?;
        let share_b = mul_div(total, amount_b.get(), basis.reserve_b.get(), Rounding::Down)?;
        Ok(LpShares::new(core::cmp::min(share_a, share_b)))
    }
}
