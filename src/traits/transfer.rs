//! The asset-transfer collaborator.
//!
//! The pool never moves tokens itself.  After a swap or liquidity change has
//! been priced, the handle hands the resulting movements to an
//! [`AssetTransfer`] implementation as a single batch and commits the new
//! pool state only if the batch settles.

use crate::domain::{AccountId, Amount, TokenId};
use crate::error::AmmError;

/// One token movement between two accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transfer {
    /// Asset being moved.
    pub token: TokenId,
    /// Debited account.
    pub from: AccountId,
    /// Credited account.
    pub to: AccountId,
    /// Raw quantity.
    pub amount: Amount,
}

/// Failure reported by a transfer back-end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transfer rejected (code {code}): {reason}")]
pub struct TransferError {
    /// Back-end specific status code.
    pub code: i32,
    /// Human-readable reason.
    pub reason: String,
}

impl TransferError {
    /// Creates a transfer error.
    #[must_use]
    pub fn new(code: i32, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

impl From<TransferError> for AmmError {
    fn from(err: TransferError) -> Self {
        Self::TransferFailed {
            code: err.code,
            reason: err.reason,
        }
    }
}

/// Moves balances between holders and the pool's custody account.
///
/// # Contract
///
/// `settle` is all-or-nothing: either every transfer in the batch is
/// applied, or none is and an error is returned.  The pool treats an
/// error as "nothing moved" and leaves its own state untouched.
pub trait AssetTransfer {
    /// Applies `batch` atomically.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if any transfer cannot be applied.
    fn settle(&self, batch: &[Transfer]) -> Result<(), TransferError>;
}

impl<T: AssetTransfer + ?Sized> AssetTransfer for &T {
    fn settle(&self, batch: &[Transfer]) -> Result<(), TransferError> {
        (**self).settle(batch)
    }
}

/// Accepts every batch without moving anything.
///
/// For hosts that only need the pricing and accounting, or that settle
/// token movements elsewhere after the fact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopTransfer;

impl AssetTransfer for NoopTransfer {
    fn settle(&self, _batch: &[Transfer]) -> Result<(), TransferError> {
        Ok(())
    }
}
