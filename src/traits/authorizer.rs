//! The identity/authorization collaborator.

use crate::domain::AccountId;

/// Decides who may change pool parameters and who may provide liquidity.
pub trait Authorizer {
    /// Returns `true` if `caller` may change the slippage tolerance.
    fn can_set_slippage(&self, caller: &AccountId) -> bool;

    /// Returns `true` if `provider` may deposit liquidity.
    fn is_valid_provider(&self, provider: &AccountId) -> bool;
}

/// Permits everything.  Suitable for tests and single-tenant hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn can_set_slippage(&self, _caller: &AccountId) -> bool {
        true
    }

    fn is_valid_provider(&self, _provider: &AccountId) -> bool {
        true
    }
}

/// A single governor account controls parameters; any non-zero account
/// may provide liquidity.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::AccountId;
/// use pair_amm::traits::{Authorizer, Governed};
///
/// let governor = AccountId::from_bytes([7u8; 32]);
/// let auth = Governed::new(governor);
/// assert!(auth.can_set_slippage(&governor));
/// assert!(!auth.can_set_slippage(&AccountId::from_bytes([8u8; 32])));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Governed {
    governor: AccountId,
}

impl Governed {
    /// Creates an authorizer governed by `governor`.
    #[must_use]
    pub const fn new(governor: AccountId) -> Self {
        Self { governor }
    }

    /// Returns the governor account.
    #[must_use]
    pub const fn governor(&self) -> AccountId {
        self.governor
    }
}

impl Authorizer for Governed {
    fn can_set_slippage(&self, caller: &AccountId) -> bool {
        *caller == self.governor
    }

    fn is_valid_provider(&self, provider: &AccountId) -> bool {
        !provider.is_zero()
    }
}
