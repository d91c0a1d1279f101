//! Lock-protected pool owner with settlement and authorization.

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, LiquidityDelta, LpShares, Ratio, SwapQuote, SwapSpec, TokenId,
};
use crate::error::AmmError;
use crate::pool::{
    LiquidityAction, LiquidityLedger, LiquidityPlan, Pool, PoolSnapshot, SwapExecutor, SwapPlan,
    TokenABasis,
};
use crate::traits::{
    AllowAll, AssetTransfer, Authorizer, FromConfig, LiquidityMintStrategy, NoopTransfer, Transfer,
};

/// Owns one [`Pool`] and serializes every operation on it.
///
/// Mutations run *plan → settle → commit* under a single lock: the
/// movements a plan implies are handed to the [`AssetTransfer`] as one
/// batch, and the pool is written only if that batch settles.  Zero
/// amount movements are left out of the batch.
///
/// Swaps and liquidity changes move tokens between the caller and
/// [`custody`](Self::custody), the account that holds the reserves.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{AccountId, Amount, SwapSpec, TokenId};
/// use pair_amm::handle::PoolHandle;
///
/// let a = TokenId::from_bytes([1; 32]);
/// let b = TokenId::from_bytes([2; 32]);
/// let trader = AccountId::from_bytes([7; 32]);
///
/// let handle = PoolHandle::accounting(AccountId::from_bytes([0xaa; 32]));
/// handle
///     .initialize(a, b, Amount::new(1_000_000), Amount::new(1_000_000))
///     .expect("fresh handle");
/// assert_eq!(handle.out_given_in(Amount::new(100)).expect("priced"), Amount::new(100));
///
/// let spec = SwapSpec::exact_in(Amount::new(100)).expect("non-zero");
/// let quote = handle.swap(trader, &a, spec).expect("small trade");
/// assert_eq!(quote.amount_out(), Amount::new(100));
/// assert_eq!(
///     handle.pair_quantities().expect("initialized"),
///     (Amount::new(1_000_100), Amount::new(999_900))
/// );
/// ```
#[derive(Debug)]
pub struct PoolHandle<T = NoopTransfer, A = AllowAll, S = TokenABasis> {
    custody: AccountId,
    transfer: T,
    authorizer: A,
    ledger: LiquidityLedger<S>,
    pool: Mutex<Option<Pool>>,
}

impl PoolHandle {
    /// A handle that settles nothing and permits everyone.
    #[must_use]
    pub fn accounting(custody: AccountId) -> Self {
        Self::new(custody, NoopTransfer, AllowAll, TokenABasis::default())
    }
}

impl<T, A, S> PoolHandle<T, A, S>
where
    T: AssetTransfer,
    A: Authorizer,
    S: LiquidityMintStrategy,
{
    /// Creates an empty handle.  Call [`initialize`](Self::initialize)
    /// before anything else.
    pub fn new(custody: AccountId, transfer: T, authorizer: A, strategy: S) -> Self {
        Self {
            custody,
            transfer,
            authorizer,
            ledger: LiquidityLedger::new(strategy),
            pool: Mutex::new(None),
        }
    }

    /// Returns the account that holds the pool's reserves.
    pub const fn custody(&self) -> AccountId {
        self.custody
    }

    /// Returns the transfer collaborator.
    pub const fn transfer(&self) -> &T {
        &self.transfer
    }

    /// Returns the authorization collaborator.
    pub const fn authorizer(&self) -> &A {
        &self.authorizer
    }

    /// Returns the liquidity ledger, and through it the mint strategy.
    pub const fn ledger(&self) -> &LiquidityLedger<S> {
        &self.ledger
    }

    /// Returns `true` once a pool has been installed.
    pub fn is_initialized(&self) -> bool {
        self.pool.lock().is_some()
    }

    // -- lifecycle ------------------------------------------------------

    /// Creates a trade-only pool with default parameters.
    ///
    /// No tokens move: the deployer funds custody separately and keeps
    /// ownership of the reserves outside the LP ledger.  Such a pool has
    /// no LP supply, so [`add_liquidity`](Self::add_liquidity) fails with
    /// [`AmmError::PoolNotInitialized`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolAlreadyInitialized`] on a second call.
    /// - Any error of [`Pool::initialize`].
    pub fn initialize(
        &self,
        token_a: TokenId,
        token_b: TokenId,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<(), AmmError> {
        self.install(|| Pool::initialize(token_a, token_b, reserve_a, reserve_b))
    }

    /// Creates a trade-only pool from a configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolAlreadyInitialized`] on a second call.
    /// - Any validation error of `config`.
    pub fn initialize_from_config(&self, config: &PoolConfig) -> Result<(), AmmError> {
        self.install(|| Pool::from_config(config))
    }

    /// Creates the pool funded by `provider`, who receives the seed shares.
    ///
    /// Both reserves are pulled from `provider` into custody before the
    /// pool is installed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolAlreadyInitialized`] on a second call.
    /// - [`AmmError::Unauthorized`] if `provider` may not provide liquidity.
    /// - [`AmmError::TransferFailed`] if the deposit does not settle.
    /// - Any error of [`Pool::initialize_with_provider`].
    pub fn initialize_with_provider(
        &self,
        token_a: TokenId,
        token_b: TokenId,
        reserve_a: Amount,
        reserve_b: Amount,
        provider: AccountId,
    ) -> Result<LpShares, AmmError> {
        self.install_seeded(provider, || {
            Pool::initialize(token_a, token_b, reserve_a, reserve_b)
        })
    }

    /// Creates the pool from a configuration, funded by `provider`.
    ///
    /// # Errors
    ///
    /// Same as [`initialize_with_provider`](Self::initialize_with_provider),
    /// plus any validation error of `config`.
    pub fn initialize_from_config_with_provider(
        &self,
        config: &PoolConfig,
        provider: AccountId,
    ) -> Result<LpShares, AmmError> {
        self.install_seeded(provider, || Pool::from_config(config))
    }

    // -- reads ----------------------------------------------------------

    /// Price of token B in token A.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`], or [`AmmError::DivisionByZero`]
    /// after a full withdrawal.
    pub fn spot_price(&self) -> Result<Ratio, AmmError> {
        self.read(Pool::spot_price)
    }

    /// Token B received for selling exactly `amount_in` of token A.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`] or any quote error.
    pub fn out_given_in(&self, amount_in: Amount) -> Result<Amount, AmmError> {
        self.read(|pool| {
            pool.engine()
                .quote_exact_in(pool.reserve_a(), pool.reserve_b(), amount_in)
        })
    }

    /// Token A required to buy exactly `amount_out` of token B.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`] or any quote error.
    pub fn in_given_out(&self, amount_out: Amount) -> Result<Amount, AmmError> {
        self.read(|pool| {
            pool.engine()
                .quote_exact_out(pool.reserve_a(), pool.reserve_b(), amount_out)
        })
    }

    /// Price impact of selling exactly `amount_in` of token A.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`] or any impact error.
    pub fn slippage_out_given_in(&self, amount_in: Amount) -> Result<Ratio, AmmError> {
        self.read(|pool| {
            pool.guard()
                .price_impact_exact_in(pool.reserve_a(), pool.reserve_b(), amount_in)
        })
    }

    /// Price impact of buying exactly `amount_out` of token B.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`] or any impact error.
    pub fn slippage_in_given_out(&self, amount_out: Amount) -> Result<Ratio, AmmError> {
        self.read(|pool| {
            pool.guard()
                .price_impact_exact_out(pool.reserve_a(), pool.reserve_b(), amount_out)
        })
    }

    /// Returns `(reserve_a, reserve_b)`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`].
    pub fn pair_quantities(&self) -> Result<(Amount, Amount), AmmError> {
        self.read(|pool| Ok(pool.reserves()))
    }

    /// Returns `(token_a, token_b)`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`].
    pub fn token_pair_ids(&self) -> Result<(TokenId, TokenId), AmmError> {
        self.read(|pool| Ok((pool.pair().token_a(), pool.pair().token_b())))
    }

    /// Returns the slippage tolerance.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`].
    pub fn slippage(&self) -> Result<Ratio, AmmError> {
        self.read(|pool| Ok(pool.slippage_tolerance()))
    }

    /// Returns `holder`'s LP balance.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`].
    pub fn lp_balance(&self, holder: &AccountId) -> Result<LpShares, AmmError> {
        self.read(|pool| Ok(pool.lp_balance(holder)))
    }

    /// Returns the outstanding LP supply.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`].
    pub fn total_lp_supply(&self) -> Result<LpShares, AmmError> {
        self.read(|pool| Ok(pool.total_lp_supply()))
    }

    /// Point-in-time view of the pool.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`].
    pub fn snapshot(&self) -> Result<PoolSnapshot, AmmError> {
        self.read(|pool| Ok(pool.snapshot()))
    }

    /// Runs `f` against the pool under the lock.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`], or whatever `f` returns.
    pub fn read<R>(&self, f: impl FnOnce(&Pool) -> Result<R, AmmError>) -> Result<R, AmmError> {
        let slot = self.pool.lock();
        let pool = slot.as_ref().ok_or(AmmError::PoolNotInitialized)?;
        f(pool)
    }

    // -- mutations ------------------------------------------------------

    /// Swaps `spec` of `token_in` for the other asset on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotInitialized`].
    /// - Any error of [`SwapExecutor::plan`].
    /// - [`AmmError::TransferFailed`] if the movements do not settle.
    ///
    /// On error the pool is unchanged.
    pub fn swap(
        &self,
        caller: AccountId,
        token_in: &TokenId,
        spec: SwapSpec,
    ) -> Result<SwapQuote, AmmError> {
        let mut slot = self.pool.lock();
        let pool = slot.as_mut().ok_or(AmmError::PoolNotInitialized)?;
        let plan = SwapExecutor::plan(pool, token_in, spec)?;
        let quote = plan.quote();
        let (token_in, token_out) = pool.pair().tokens_for(quote.direction());
        self.settle(&[
            self.deposit(token_in, caller, quote.amount_in()),
            self.payout(token_out, caller, quote.amount_out()),
        ])?;
        SwapExecutor::commit(pool, plan)
    }

    /// Prices a swap without settling or committing it.
    ///
    /// # Errors
    ///
    /// Same as [`SwapExecutor::plan`], plus
    /// [`AmmError::PoolNotInitialized`].
    pub fn plan_swap(&self, token_in: &TokenId, spec: SwapSpec) -> Result<SwapPlan, AmmError> {
        self.read(|pool| SwapExecutor::plan(pool, token_in, spec))
    }

    /// Commits a plan whose movements the host has already settled.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`] or [`AmmError::StaleQuote`].
    pub fn commit_swap(&self, plan: SwapPlan) -> Result<SwapQuote, AmmError> {
        let mut slot = self.pool.lock();
        let pool = slot.as_mut().ok_or(AmmError::PoolNotInitialized)?;
        SwapExecutor::commit(pool, plan)
    }

    /// Deposits both tokens from `provider` and returns the shares minted.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if `provider` may not provide liquidity.
    /// - [`AmmError::PoolNotInitialized`].
    /// - Any error of [`LiquidityLedger::plan_add`].
    /// - [`AmmError::TransferFailed`] if the deposit does not settle.
    pub fn add_liquidity(
        &self,
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LpShares, AmmError> {
        self.ensure_provider(&provider)?;
        let mut slot = self.pool.lock();
        let pool = slot.as_mut().ok_or(AmmError::PoolNotInitialized)?;
        let plan = self.ledger.plan_add(pool, provider, amount_a, amount_b)?;
        let pair = *pool.pair();
        self.settle(&[
            self.deposit(pair.token_a(), provider, amount_a),
            self.deposit(pair.token_b(), provider, amount_b),
        ])?;
        let delta = self.ledger.commit(pool, plan)?;
        Ok(delta.lp_shares())
    }

    /// Burns `lp_amount` of `provider`'s shares and pays out both tokens.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotInitialized`].
    /// - Any error of [`LiquidityLedger::plan_remove`].
    /// - [`AmmError::TransferFailed`] if the payout does not settle.
    pub fn remove_liquidity(
        &self,
        provider: AccountId,
        lp_amount: LpShares,
    ) -> Result<(Amount, Amount), AmmError> {
        let mut slot = self.pool.lock();
        let pool = slot.as_mut().ok_or(AmmError::PoolNotInitialized)?;
        let plan = self.ledger.plan_remove(pool, provider, lp_amount)?;
        let pair = *pool.pair();
        let delta = plan.delta();
        self.settle(&[
            self.payout(pair.token_a(), provider, delta.amount_a()),
            self.payout(pair.token_b(), provider, delta.amount_b()),
        ])?;
        let delta = self.ledger.commit(pool, plan)?;
        Ok((delta.amount_a(), delta.amount_b()))
    }

    /// Prices a deposit by `provider` without settling or committing it.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if `provider` may not provide liquidity.
    /// - [`AmmError::PoolNotInitialized`].
    /// - Any error of [`LiquidityLedger::plan_add`].
    pub fn plan_add_liquidity(
        &self,
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityPlan, AmmError> {
        self.ensure_provider(&provider)?;
        self.read(|pool| self.ledger.plan_add(pool, provider, amount_a, amount_b))
    }

    /// Prices a withdrawal by `provider` without settling or committing it.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotInitialized`] or any error of
    /// [`LiquidityLedger::plan_remove`].
    pub fn plan_remove_liquidity(
        &self,
        provider: AccountId,
        lp_amount: LpShares,
    ) -> Result<LiquidityPlan, AmmError> {
        self.read(|pool| self.ledger.plan_remove(pool, provider, lp_amount))
    }

    /// Commits a liquidity plan whose movements the host has already
    /// settled.
    ///
    /// A deposit plan is re-checked against the authorizer, since the
    /// provider's permission may have been revoked since planning.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] for a deposit by a rejected provider.
    /// - [`AmmError::PoolNotInitialized`] or [`AmmError::StaleQuote`].
    pub fn commit_liquidity(&self, plan: LiquidityPlan) -> Result<LiquidityDelta, AmmError> {
        if plan.action() == LiquidityAction::Add {
            self.ensure_provider(&plan.provider())?;
        }
        let mut slot = self.pool.lock();
        let pool = slot.as_mut().ok_or(AmmError::PoolNotInitialized)?;
        self.ledger.commit(pool, plan)
    }

    /// Replaces the slippage tolerance if `caller` is allowed to.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if the authorizer denies `caller`.
    /// - [`AmmError::PoolNotInitialized`].
    /// - Any error of [`Pool::set_slippage_tolerance`].
    pub fn set_slippage(&self, caller: AccountId, tolerance: Ratio) -> Result<(), AmmError> {
        if !self.authorizer.can_set_slippage(&caller) {
            warn!(caller = %caller.short(), %tolerance, "slippage change denied");
            return Err(AmmError::Unauthorized("caller may not set the slippage tolerance"));
        }
        let mut slot = self.pool.lock();
        let pool = slot.as_mut().ok_or(AmmError::PoolNotInitialized)?;
        pool.set_slippage_tolerance(tolerance)
    }

    // -- internals ------------------------------------------------------

    fn install(&self, build: impl FnOnce() -> Result<Pool, AmmError>) -> Result<(), AmmError> {
        let mut slot = self.pool.lock();
        if slot.is_some() {
            return Err(AmmError::PoolAlreadyInitialized);
        }
        *slot = Some(build()?);
        info!(custody = %self.custody.short(), "pool installed");
        Ok(())
    }

    fn install_seeded(
        &self,
        provider: AccountId,
        build: impl FnOnce() -> Result<Pool, AmmError>,
    ) -> Result<LpShares, AmmError> {
        self.ensure_provider(&provider)?;
        let mut slot = self.pool.lock();
        if slot.is_some() {
            return Err(AmmError::PoolAlreadyInitialized);
        }
        let (pool, seed) = build()?.seeded_by(provider, self.ledger.strategy())?;
        let (reserve_a, reserve_b) = pool.reserves();
        let pair = *pool.pair();
        self.settle(&[
            self.deposit(pair.token_a(), provider, reserve_a),
            self.deposit(pair.token_b(), provider, reserve_b),
        ])?;
        *slot = Some(pool);
        info!(
            custody = %self.custody.short(),
            provider = %provider.short(),
            lp = %seed,
            "pool installed with seed liquidity"
        );
        Ok(seed)
    }

    fn ensure_provider(&self, provider: &AccountId) -> Result<(), AmmError> {
        if self.authorizer.is_valid_provider(provider) {
            return Ok(());
        }
        warn!(provider = %provider.short(), "liquidity provider rejected");
        Err(AmmError::Unauthorized("account may not provide liquidity"))
    }

    const fn deposit(&self, token: TokenId, from: AccountId, amount: Amount) -> Transfer {
        Transfer {
            token,
            from,
            to: self.custody,
            amount,
        }
    }

    const fn payout(&self, token: TokenId, to: AccountId, amount: Amount) -> Transfer {
        Transfer {
            token,
            from: self.custody,
            to,
            amount,
        }
    }

    fn settle(&self, batch: &[Transfer]) -> Result<(), AmmError> {
        let batch: Vec<Transfer> = batch.iter().copied().filter(|t| !t.amount.is_zero()).collect();
        if batch.is_empty() {
            return Ok(());
        }
        self.transfer.settle(&batch).map_err(|err| {
            warn!(
                code = err.code,
                reason = %err.reason,
                transfers = batch.len(),
                "settlement failed"
            );
            AmmError::from(err)
        })
    }
}
