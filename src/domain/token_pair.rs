//! The two assets a pool trades, in their configured order.

use super::{SwapDirection, TokenId};
use crate::error::AmmError;

/// An ordered pair of distinct assets.
///
/// Unlike a canonically sorted pair, the order here is the order the pool
/// was created with: token A is always the first argument.  Reserve `a`,
/// spot price `a / b` and the token-A basis of LP minting all depend on
/// that order, so it is never rearranged.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{SwapDirection, TokenId, TokenPair};
///
/// let hbar = TokenId::from_bytes([9u8; 32]);
/// let usdc = TokenId::from_bytes([1u8; 32]);
/// let pair = TokenPair::new(hbar, usdc).expect("distinct tokens");
///
/// assert_eq!(pair.token_a(), hbar);
/// assert_eq!(pair.direction_for(&usdc).expect("member"), SwapDirection::BToA);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenPair {
    token_a: TokenId,
    token_b: TokenId,
}

impl TokenPair {
    /// Creates a pair, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both ids are equal.
    pub fn new(token_a: TokenId, token_b: TokenId) -> Result<Self, AmmError> {
        if token_a == token_b {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct assets",
            ));
        }
        Ok(Self { token_a, token_b })
    }

    /// Returns token A.
    #[must_use]
    pub const fn token_a(&self) -> TokenId {
        self.token_a
    }

    /// Returns token B.
    #[must_use]
    pub const fn token_b(&self) -> TokenId {
        self.token_b
    }

    /// Resolves which way a trade flows when `token_in` is sold.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    pub fn direction_for(&self, token_in: &TokenId) -> Result<SwapDirection, AmmError> {
        if *token_in == self.token_a {
            Ok(SwapDirection::AToB)
        } else if *token_in == self.token_b {
            Ok(SwapDirection::BToA)
        } else {
            Err(AmmError::InvalidToken("token_in is not part of the pool pair"))
        }
    }

    /// Returns `(token_in, token_out)` for a direction.
    #[must_use]
    pub const fn tokens_for(&self, direction: SwapDirection) -> (TokenId, TokenId) {
        match direction {
            SwapDirection::AToB => (self.token_a, self.token_b),
            SwapDirection::BToA => (self.token_b, self.token_a),
        }
    }
}
