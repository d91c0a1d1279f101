//! Proportional LP share minting and burning.
//!
//! # Deposit
//!
//! - Both amounts must be non-zero and the pool must hold reserves.
//! - The pool must already have LP supply.  Reserves nobody owns never
//!   take a deposit: the seed is minted only when the pool is created,
//!   see [`Pool::seeded_by`].
//! - Shares follow the strategy's proportional rule.
//! - `reserve_a += amount_a`, `reserve_b += amount_b`, supply and the
//!   provider's balance grow by the minted amount.
//!
//! # Withdrawal
//!
//! - `amount_x = floor(reserve_x × lp / total_supply)` for each side.
//! - Reserves, supply and the provider's balance shrink accordingly.
//!
//! Like the swap path, each operation is split into a pure `plan_*` step
//! and a [`commit`](LiquidityLedger::commit) that cannot partially fail.

use tracing::{debug, info};

use super::mint::TokenABasis;
use super::state::{Pool, StateUpdate};
use crate::domain::{AccountId, Amount, LiquidityDelta, LpShares, Rounding};
use crate::error::AmmError;
use crate::math::{mul_div, CheckedArithmetic};
use crate::traits::{LiquidityMintStrategy, MintBasis};

/// Whether a plan deposits or withdraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiquidityAction {
    /// Deposit and mint.
    Add,
    /// Burn and withdraw.
    Remove,
}

/// A validated liquidity change that has not been applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a plan does nothing until it is committed"]
pub struct LiquidityPlan {
    revision: u64,
    action: LiquidityAction,
    provider: AccountId,
    delta: LiquidityDelta,
    update: StateUpdate,
}

impl LiquidityPlan {
    /// Returns whether this is a deposit or a withdrawal.
    #[must_use]
    pub const fn action(&self) -> LiquidityAction {
        self.action
    }

    /// Returns the account whose balance changes.
    #[must_use]
    pub const fn provider(&self) -> AccountId {
        self.provider
    }

    /// Returns the shares and amounts that will move.
    #[must_use]
    pub const fn delta(&self) -> LiquidityDelta {
        self.delta
    }

    /// Returns the pool revision the plan was computed against.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

/// Applies a [`LiquidityMintStrategy`] to a [`Pool`].
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{AccountId, Amount, LpShares, TokenId};
/// use pair_amm::pool::{LiquidityLedger, Pool, SeedRule, TokenABasis};
///
/// let p = 10_000_000u128;
/// let alice = AccountId::from_bytes([7; 32]);
/// let ledger = LiquidityLedger::new(TokenABasis::new(SeedRule::Descaled));
/// let (mut pool, _) = Pool::initialize_with_provider(
///     TokenId::from_bytes([1; 32]),
///     TokenId::from_bytes([2; 32]),
///     Amount::new(100 * p),
///     Amount::new(100 * p),
///     alice,
///     ledger.strategy(),
/// )
/// .expect("valid pool");
///
/// let out = ledger.remove_liquidity(&mut pool, alice, LpShares::new(5)).expect("owns 100");
/// assert_eq!(out.amount_a(), Amount::new(5 * p));
/// assert_eq!(pool.reserves(), (Amount::new(95 * p), Amount::new(95 * p)));
/// assert_eq!(pool.total_lp_supply(), LpShares::new(95));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LiquidityLedger<S = TokenABasis> {
    strategy: S,
}

impl<S: LiquidityMintStrategy> LiquidityLedger<S> {
    /// Creates a ledger that mints with `strategy`.
    pub const fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Returns the minting strategy.
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Previews a deposit without mutating the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if either amount is zero or nothing
    ///   would be minted.
    /// - [`AmmError::PoolNotInitialized`] if both reserves are zero or
    ///   the pool has no LP supply.
    /// - Any error of the strategy.
    pub fn quote_add_liquidity(
        &self,
        pool: &Pool,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityDelta, AmmError> {
        let minted = self.mint_for(pool, amount_a, amount_b)?;
        Ok(LiquidityDelta::new(minted, amount_a, amount_b))
    }

    /// Previews a withdrawal of `lp_amount` shares.
    ///
    /// Does not check any holder's balance, only that the supply covers it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `lp_amount` is zero.
    /// - [`AmmError::PoolNotInitialized`] if the supply is zero.
    /// - [`AmmError::InsufficientBalance`] if `lp_amount` exceeds the supply.
    pub fn quote_remove_liquidity(
        &self,
        pool: &Pool,
        lp_amount: LpShares,
    ) -> Result<LiquidityDelta, AmmError> {
        check_burn(pool, lp_amount)?;
        let supply = pool.total_lp_supply();
        if lp_amount > supply {
            return Err(AmmError::InsufficientBalance {
                requested: lp_amount,
                available: supply,
            });
        }
        burn_amounts(pool, lp_amount)
    }

    /// Validates and prices a deposit by `provider`.
    ///
    /// # Errors
    ///
    /// Same as [`quote_add_liquidity`](Self::quote_add_liquidity), plus
    /// [`AmmError::ArithmeticOverflow`] if a reserve, the supply or the
    /// provider's balance would overflow.
    pub fn plan_add(
        &self,
        pool: &Pool,
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityPlan, AmmError> {
        let minted = self.mint_for(pool, amount_a, amount_b)?;
        let update = StateUpdate {
            reserve_a: pool.reserve_a().safe_add(&amount_a)?,
            reserve_b: pool.reserve_b().safe_add(&amount_b)?,
            total_lp_supply: pool.total_lp_supply().safe_add(&minted)?,
            holder: Some((provider, pool.lp_balance(&provider).safe_add(&minted)?)),
        };
        debug!(
            provider = %provider.short(),
            %amount_a,
            %amount_b,
            lp = %minted,
            "liquidity deposit planned"
        );
        Ok(LiquidityPlan {
            revision: pool.revision(),
            action: LiquidityAction::Add,
            provider,
            delta: LiquidityDelta::new(minted, amount_a, amount_b),
            update,
        })
    }

    /// Validates and prices a withdrawal by `provider`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `lp_amount` is zero.
    /// - [`AmmError::PoolNotInitialized`] if the supply is zero.
    /// - [`AmmError::InsufficientBalance`] if `provider` holds fewer than
    ///   `lp_amount` shares.
    pub fn plan_remove(
        &self,
        pool: &Pool,
        provider: AccountId,
        lp_amount: LpShares,
    ) -> Result<LiquidityPlan, AmmError> {
        check_burn(pool, lp_amount)?;
        let available = pool.lp_balance(&provider);
        if available < lp_amount {
            return Err(AmmError::InsufficientBalance {
                requested: lp_amount,
                available,
            });
        }
        let delta = burn_amounts(pool, lp_amount)?;
        let update = StateUpdate {
            reserve_a: pool.reserve_a().safe_sub(&delta.amount_a())?,
            reserve_b: pool.reserve_b().safe_sub(&delta.amount_b())?,
            total_lp_supply: pool.total_lp_supply().safe_sub(&lp_amount)?,
            holder: Some((provider, available.safe_sub(&lp_amount)?)),
        };
        debug!(
            provider = %provider.short(),
            lp = %lp_amount,
            amount_a = %delta.amount_a(),
            amount_b = %delta.amount_b(),
            "liquidity withdrawal planned"
        );
        Ok(LiquidityPlan {
            revision: pool.revision(),
            action: LiquidityAction::Remove,
            provider,
            delta,
            update,
        })
    }

    /// Applies a plan computed against the pool's current revision.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::StaleQuote`] if the pool changed since planning.
    pub fn commit(&self, pool: &mut Pool, plan: LiquidityPlan) -> Result<LiquidityDelta, AmmError> {
        pool.ensure_revision(plan.revision)?;
        pool.apply(plan.update);
        info!(
            action = ?plan.action,
            provider = %plan.provider.short(),
            lp = %plan.delta.lp_shares(),
            total_lp_supply = %pool.total_lp_supply(),
            "liquidity committed"
        );
        Ok(plan.delta)
    }

    /// Deposits `amount_a` and `amount_b` for `provider`.
    ///
    /// # Errors
    ///
    /// Same as [`plan_add`](Self::plan_add).  On error the pool is unchanged.
    pub fn add_liquidity(
        &self,
        pool: &mut Pool,
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityDelta, AmmError> {
        let plan = self.plan_add(pool, provider, amount_a, amount_b)?;
        self.commit(pool, plan)
    }

    /// Burns `lp_amount` of `provider`'s shares.
    ///
    /// # Errors
    ///
    /// Same as [`plan_remove`](Self::plan_remove).  On error the pool is
    /// unchanged.
    pub fn remove_liquidity(
        &self,
        pool: &mut Pool,
        provider: AccountId,
        lp_amount: LpShares,
    ) -> Result<LiquidityDelta, AmmError> {
        let plan = self.plan_remove(pool, provider, lp_amount)?;
        self.commit(pool, plan)
    }

    fn mint_for(&self, pool: &Pool, amount_a: Amount, amount_b: Amount) -> Result<LpShares, AmmError> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("both deposit amounts must be non-zero"));
        }
        if pool.reserve_a().is_zero() && pool.reserve_b().is_zero() {
            return Err(AmmError::PoolNotInitialized);
        }
        if pool.total_lp_supply().is_zero() {
            return Err(AmmError::PoolNotInitialized);
        }
        let basis = MintBasis {
            reserve_a: pool.reserve_a(),
            reserve_b: pool.reserve_b(),
            total_supply: pool.total_lp_supply(),
            precision: pool.precision(),
        };
        let minted = self.strategy.proportional_mint(&basis, amount_a, amount_b)?;
        if minted.is_zero() {
            return Err(AmmError::InvalidAmount("deposit too small to mint shares"));
        }
        Ok(minted)
    }
}

fn check_burn(pool: &Pool, lp_amount: LpShares) -> Result<(), AmmError> {
    if lp_amount.is_zero() {
        return Err(AmmError::InvalidAmount("cannot burn zero shares"));
    }
    if pool.total_lp_supply().is_zero() {
        return Err(AmmError::PoolNotInitialized);
    }
    Ok(())
}

fn burn_amounts(pool: &Pool, lp_amount: LpShares) -> Result<LiquidityDelta, AmmError> {
    let supply = pool.total_lp_supply().get();
    let amount_a = mul_div(pool.reserve_a().get(), lp_amount.get(), supply, Rounding::Down)?;
    let amount_b = mul_div(pool.reserve_b().get(), lp_amount.get(), supply, Rounding::Down)?;
    Ok(LiquidityDelta::new(
        lp_amount,
        Amount::new(amount_a),
        Amount::new(amount_b),
    ))
}
