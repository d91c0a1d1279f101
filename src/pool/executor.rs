//! The swap path: validate, quote, guard, commit.
//!
//! # Algorithm
//!
//! 1. Resolve the [`SwapDirection`] from `token_in`; unknown tokens fail
//!    with [`AmmError::InvalidToken`].
//! 2. Read `(reserve_in, reserve_out)` for that direction.
//! 3. Quote the trade with the pool's [`QuoteEngine`](crate::engine::QuoteEngine).
//! 4. Measure the price impact and reject it above the pool's tolerance.
//! 5. Compute `reserve_in + amount_in` and `reserve_out − amount_out`.
//! 6. Write both reserves in one step and return the realized amounts.
//!
//! Steps 1–5 form [`SwapExecutor::plan`] and only read the pool; step 6 is
//! [`SwapExecutor::commit`].  Hosts that must settle token movements before
//! committing run the two halves separately.

use tracing::{debug, info};

use super::state::{Pool, StateUpdate};
use crate::domain::{Amount, Ratio, SwapDirection, SwapQuote, SwapSpec, TokenId};
use crate::engine::SlippageGuard;
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// A priced, guarded swap that has not been applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a plan does nothing until it is committed"]
pub struct SwapPlan {
    revision: u64,
    quote: SwapQuote,
    impact: Ratio,
    update: StateUpdate,
}

impl SwapPlan {
    /// Returns the realized amounts the plan will commit.
    #[must_use]
    pub const fn quote(&self) -> SwapQuote {
        self.quote
    }

    /// Returns the trade's price impact.
    #[must_use]
    pub const fn impact(&self) -> Ratio {
        self.impact
    }

    /// Returns the pool revision the plan was computed against.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the reserves the pool will hold after commit.
    #[must_use]
    pub const fn new_reserves(&self) -> (Amount, Amount) {
        (self.update.reserve_a, self.update.reserve_b)
    }
}

/// Orchestrates a single swap against a [`Pool`].
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, SwapSpec, TokenId};
/// use pair_amm::pool::{Pool, SwapExecutor};
///
/// let a = TokenId::from_bytes([1; 32]);
/// let b = TokenId::from_bytes([2; 32]);
/// let mut pool = Pool::initialize(a, b, Amount::new(24), Amount::new(16)).expect("valid pool");
/// pool.set_slippage_tolerance(pool.precision().one()).expect("100% is allowed");
///
/// let spec = SwapSpec::exact_in(Amount::new(10)).expect("non-zero");
/// let quote = SwapExecutor::swap(&mut pool, &a, spec).expect("swap ok");
/// assert_eq!(quote.amount_out(), Amount::new(5));
/// assert_eq!(pool.reserves(), (Amount::new(34), Amount::new(11)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapExecutor;

impl SwapExecutor {
    /// Prices and guards a swap without touching the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    /// - [`AmmError::SlippageExceeded`] if the impact is above tolerance.
    /// - Any quote error: [`AmmError::InvalidAmount`],
    ///   [`AmmError::InsufficientLiquidity`],
    ///   [`AmmError::PoolNotInitialized`], [`AmmError::ArithmeticOverflow`].
    pub fn plan(pool: &Pool, token_in: &TokenId, spec: SwapSpec) -> Result<SwapPlan, AmmError> {
        let direction = pool.pair().direction_for(token_in)?;
        let (reserve_in, reserve_out) = pool.reserves_for(direction);

        let assessment = pool.guard().assess(reserve_in, reserve_out, spec)?;
        debug!(
            %direction,
            %spec,
            amount_in = %assessment.amount_in,
            amount_out = %assessment.amount_out,
            impact = %assessment.impact,
            "swap quoted"
        );
        SlippageGuard::check(assessment.impact, pool.slippage_tolerance())?;

        let new_in = reserve_in.safe_add(&assessment.amount_in)?;
        let new_out = reserve_out.safe_sub(&assessment.amount_out)?;
        let (reserve_a, reserve_b) = match direction {
            SwapDirection::AToB => (new_in, new_out),
            SwapDirection::BToA => (new_out, new_in),
        };

        Ok(SwapPlan {
            revision: pool.revision(),
            quote: SwapQuote::new(direction, assessment.amount_in, assessment.amount_out),
            impact: assessment.impact,
            update: StateUpdate {
                reserve_a,
                reserve_b,
                total_lp_supply: pool.total_lp_supply(),
                holder: None,
            },
        })
    }

    /// Applies a plan computed against the pool's current revision.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::StaleQuote`] if the pool changed since planning.
    pub fn commit(pool: &mut Pool, plan: SwapPlan) -> Result<SwapQuote, AmmError> {
        pool.ensure_revision(plan.revision)?;
        pool.apply(plan.update);
        info!(
            direction = %plan.quote.direction(),
            amount_in = %plan.quote.amount_in(),
            amount_out = %plan.quote.amount_out(),
            reserve_a = %pool.reserve_a(),
            reserve_b = %pool.reserve_b(),
            "swap committed"
        );
        Ok(plan.quote)
    }

    /// [`plan`](Self::plan) followed by [`commit`](Self::commit).
    ///
    /// # Errors
    ///
    /// Same as [`plan`](Self::plan).  On error the pool is unchanged.
    pub fn swap(pool: &mut Pool, token_in: &TokenId, spec: SwapSpec) -> Result<SwapQuote, AmmError> {
        let plan = Self::plan(pool, token_in, spec)?;
        Self::commit(pool, plan)
    }
}
