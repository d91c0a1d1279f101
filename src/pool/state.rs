//! The pool aggregate: reserves, LP supply and holder balances.
//!
//! A [`Pool`] is a plain owned value.  Exclusive access (`&mut Pool`) is
//! what serializes mutations; [`PoolHandle`](crate::handle::PoolHandle)
//! adds a lock for shared use.  Every mutation is computed up front into
//! a [`StateUpdate`] and only then written, so a failing operation never
//! leaves partial effects.
//!
//! # Invariants
//!
//! - `total_lp_supply == Σ lp_balances`
//! - zero balances are never stored
//! - `revision` increases by one on every committed mutation

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, LpShares, PrecisionScale, Ratio, Rounding, SwapDirection, TokenId,
    TokenPair,
};
use crate::engine::{QuoteEngine, SlippageGuard};
use crate::error::AmmError;
use crate::math::mul_div;
use crate::traits::{FromConfig, LiquidityMintStrategy};

/// A two-asset constant-product pool.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, TokenId};
/// use pair_amm::pool::Pool;
///
/// let a = TokenId::from_bytes([1; 32]);
/// let b = TokenId::from_bytes([2; 32]);
/// let pool = Pool::initialize(a, b, Amount::new(100), Amount::new(50)).expect("valid pool");
///
/// assert_eq!(pool.spot_price().expect("non-zero reserve").raw(), 20_000_000);
/// assert!(pool.total_lp_supply().is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pair: TokenPair,
    reserve_a: Amount,
    reserve_b: Amount,
    precision: PrecisionScale,
    slippage_tolerance: Ratio,
    reserve_rounding: Rounding,
    total_lp_supply: LpShares,
    lp_balances: BTreeMap<AccountId, LpShares>,
    revision: u64,
}

/// Fully computed post-state of one mutation.
///
/// Produced by the executor and the ledger while planning; applying it
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StateUpdate {
    pub(crate) reserve_a: Amount,
    pub(crate) reserve_b: Amount,
    pub(crate) total_lp_supply: LpShares,
    /// `(holder, new balance)`; a zero balance removes the entry.
    pub(crate) holder: Option<(AccountId, LpShares)>,
}

impl Pool {
    /// Creates a pool with the given reserves and no LP supply.
    ///
    /// Precision, tolerance and rounding take their defaults.  The
    /// reserves are not owned by anyone, so the pool trades but never
    /// accepts deposits; use
    /// [`initialize_with_provider`](Self::initialize_with_provider) for a
    /// pool with LP holders.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token_a == token_b`.
    /// - [`AmmError::InvalidAmount`] if either reserve is zero.
    pub fn initialize(
        token_a: TokenId,
        token_b: TokenId,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<Self, AmmError> {
        let pair = TokenPair::new(token_a, token_b)?;
        let config = PoolConfig::new(pair, reserve_a, reserve_b)?;
        Self::from_config(&config)
    }

    /// Creates a pool and mints the strategy's seed shares to `provider`,
    /// so the initial reserves are owned.
    ///
    /// # Errors
    ///
    /// - Everything [`initialize`](Self::initialize) returns.
    /// - Everything [`seeded_by`](Self::seeded_by) returns.
    pub fn initialize_with_provider<S: LiquidityMintStrategy>(
        token_a: TokenId,
        token_b: TokenId,
        reserve_a: Amount,
        reserve_b: Amount,
        provider: AccountId,
        strategy: &S,
    ) -> Result<(Self, LpShares), AmmError> {
        Self::initialize(token_a, token_b, reserve_a, reserve_b)?.seeded_by(provider, strategy)
    }

    /// Mints the strategy's seed for the current reserves to `provider`.
    ///
    /// Only a freshly created pool can be seeded.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the pool already has LP
    ///   supply or has been mutated.
    /// - [`AmmError::InvalidAmount`] if the strategy seeds zero shares.
    /// - Any error of [`LiquidityMintStrategy::initial_mint`].
    pub fn seeded_by<S: LiquidityMintStrategy>(
        mut self,
        provider: AccountId,
        strategy: &S,
    ) -> Result<(Self, LpShares), AmmError> {
        if !self.total_lp_supply.is_zero() || self.revision != 0 {
            return Err(AmmError::InvalidConfiguration("only a fresh pool can be seeded"));
        }
        let seed = strategy.initial_mint(self.reserve_a, self.reserve_b, self.precision)?;
        if seed.is_zero() {
            return Err(AmmError::InvalidAmount("initial reserves too small to mint"));
        }
        self.total_lp_supply = seed;
        self.lp_balances.insert(provider, seed);
        Ok((self, seed))
    }

    // -- accessors ------------------------------------------------------

    /// Returns the token pair.
    #[must_use]
    pub const fn pair(&self) -> &TokenPair {
        &self.pair
    }

    /// Returns the token A reserve.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the token B reserve.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns `(reserve_a, reserve_b)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Returns `(reserve_in, reserve_out)` for a trade direction.
    #[must_use]
    pub const fn reserves_for(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// Returns the precision scale.
    #[must_use]
    pub const fn precision(&self) -> PrecisionScale {
        self.precision
    }

    /// Returns the slippage tolerance.
    #[must_use]
    pub const fn slippage_tolerance(&self) -> Ratio {
        self.slippage_tolerance
    }

    /// Returns the rounding of the new-reserve division in quotes.
    #[must_use]
    pub const fn reserve_rounding(&self) -> Rounding {
        self.reserve_rounding
    }

    /// Returns the outstanding LP supply.
    #[must_use]
    pub const fn total_lp_supply(&self) -> LpShares {
        self.total_lp_supply
    }

    /// Returns `holder`'s LP balance (zero if unknown).
    #[must_use]
    pub fn lp_balance(&self, holder: &AccountId) -> LpShares {
        self.lp_balances.get(holder).copied().unwrap_or(LpShares::ZERO)
    }

    /// Iterates over all holders with a non-zero balance, in id order.
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, &LpShares)> {
        self.lp_balances.iter()
    }

    /// Returns the number of committed mutations since creation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns a quote engine configured for this pool.
    #[must_use]
    pub const fn engine(&self) -> QuoteEngine {
        QuoteEngine::new(self.precision).with_reserve_rounding(self.reserve_rounding)
    }

    /// Returns a slippage guard configured for this pool.
    #[must_use]
    pub const fn guard(&self) -> SlippageGuard {
        SlippageGuard::new(self.engine())
    }

    // -- queries --------------------------------------------------------

    /// Price of token B in units of token A, `floor(reserve_a × P / reserve_b)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `reserve_b` is zero.
    pub fn spot_price(&self) -> Result<Ratio, AmmError> {
        self.engine().spot_price(self.reserve_a, self.reserve_b)
    }

    /// Returns `true` if the LP balances sum to the total supply.
    #[must_use]
    pub fn lp_supply_matches_balances(&self) -> bool {
        let mut sum = LpShares::ZERO;
        for balance in self.lp_balances.values() {
            match sum.checked_add(balance) {
                Some(next) => sum = next,
                None => return false,
            }
        }
        sum == self.total_lp_supply
    }

    /// Serializable point-in-time view of the pool.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            token_a: self.pair.token_a(),
            token_b: self.pair.token_b(),
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
            precision: self.precision,
            slippage_tolerance: self.slippage_tolerance,
            total_lp_supply: self.total_lp_supply,
            holder_count: self.lp_balances.len(),
            revision: self.revision,
        }
    }

    // -- mutation -------------------------------------------------------

    /// Replaces the slippage tolerance.
    ///
    /// A tolerance on another scale is converted (truncating) to the
    /// pool's precision.  Authorization is the caller's concern; see
    /// [`PoolHandle::set_slippage`](crate::handle::PoolHandle::set_slippage).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if `tolerance` exceeds 100%.
    /// - [`AmmError::ArithmeticOverflow`] if rescaling overflows.
    pub fn set_slippage_tolerance(&mut self, tolerance: Ratio) -> Result<(), AmmError> {
        if tolerance > self.precision.one() {
            return Err(AmmError::InvalidConfiguration(
                "slippage tolerance must not exceed 100%",
            ));
        }
        let raw = if tolerance.scale() == self.precision {
            tolerance.raw()
        } else {
            mul_div(
                tolerance.raw(),
                self.precision.get(),
                tolerance.scale().get(),
                Rounding::Down,
            )?
        };
        let previous = self.slippage_tolerance;
        self.slippage_tolerance = Ratio::new(raw, self.precision);
        self.revision = self.revision.wrapping_add(1);
        info!(%previous, current = %self.slippage_tolerance, "slippage tolerance updated");
        Ok(())
    }

    /// Rejects a plan computed against an older state.
    pub(crate) const fn ensure_revision(&self, expected: u64) -> Result<(), AmmError> {
        if self.revision != expected {
            return Err(AmmError::StaleQuote {
                expected,
                found: self.revision,
            });
        }
        Ok(())
    }

    /// Writes a precomputed post-state.  Cannot fail.
    pub(crate) fn apply(&mut self, update: StateUpdate) {
        self.reserve_a = update.reserve_a;
        self.reserve_b = update.reserve_b;
        self.total_lp_supply = update.total_lp_supply;
        if let Some((holder, balance)) = update.holder {
            if balance.is_zero() {
                self.lp_balances.remove(&holder);
            } else {
                self.lp_balances.insert(holder, balance);
            }
        }
        self.revision = self.revision.wrapping_add(1);
    }
}

impl FromConfig<PoolConfig> for Pool {
    /// Creates a pool from a validated configuration, with no LP supply.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        let pair = config.token_pair()?;
        let pool = Self {
            pair,
            reserve_a: config.reserve_a(),
            reserve_b: config.reserve_b(),
            precision: config.precision(),
            slippage_tolerance: config.slippage_tolerance(),
            reserve_rounding: config.reserve_rounding(),
            total_lp_supply: LpShares::ZERO,
            lp_balances: BTreeMap::new(),
            revision: 0,
        };
        debug!(
            token_a = %pair.token_a().short(),
            token_b = %pair.token_b().short(),
            reserve_a = %pool.reserve_a,
            reserve_b = %pool.reserve_b,
            "pool built"
        );
        Ok(pool)
    }
}

/// Point-in-time view of a [`Pool`], suitable for logging or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolSnapshot {
    /// Token A id.
    pub token_a: TokenId,
    /// Token B id.
    pub token_b: TokenId,
    /// Token A reserve.
    pub reserve_a: Amount,
    /// Token B reserve.
    pub reserve_b: Amount,
    /// Precision scale.
    pub precision: PrecisionScale,
    /// Slippage tolerance.
    pub slippage_tolerance: Ratio,
    /// Outstanding LP supply.
    pub total_lp_supply: LpShares,
    /// Number of holders with a non-zero balance.
    pub holder_count: usize,
    /// Committed mutations since creation.
    pub revision: u64,
}
