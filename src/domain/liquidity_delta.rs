//! Result of a liquidity deposit or withdrawal.

use core::fmt;

use super::{Amount, LpShares};

/// Shares minted or burned together with the reserve amounts that moved.
///
/// For a deposit `lp_shares` is the minted amount and `amount_a` /
/// `amount_b` are what the provider paid in; for a withdrawal it is the
/// burned amount and the two amounts are what the provider receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityDelta {
    lp_shares: LpShares,
    amount_a: Amount,
    amount_b: Amount,
}

impl LiquidityDelta {
    /// Creates a delta.
    pub const fn new(lp_shares: LpShares, amount_a: Amount, amount_b: Amount) -> Self {
        Self {
            lp_shares,
            amount_a,
            amount_b,
        }
    }

    /// Shares minted or burned.
    #[must_use]
    pub const fn lp_shares(&self) -> LpShares {
        self.lp_shares
    }

    /// Token A moved.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Token B moved.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }
}

impl fmt::Display for LiquidityDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LiquidityDelta(lp={}, a={}, b={})",
            self.lp_shares, self.amount_a, self.amount_b
        )
    }
}
