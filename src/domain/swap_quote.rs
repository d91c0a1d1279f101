//! Realized amounts of a swap.

use core::fmt;

use super::{Amount, SwapDirection};

/// The amounts a swap moves, in the direction it moves them.
///
/// Returned by the swap path so the host's transfer collaborator can move
/// `amount_in` of the input token into custody and `amount_out` of the
/// output token back to the trader.  Carries no identity and is never
/// stored by the pool.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, SwapDirection, SwapQuote};
///
/// let quote = SwapQuote::new(SwapDirection::AToB, Amount::new(10), Amount::new(5));
/// assert_eq!(quote.amount_out(), Amount::new(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapQuote {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
}

impl SwapQuote {
    /// Bundles a direction with the realized amounts.
    pub const fn new(direction: SwapDirection, amount_in: Amount, amount_out: Amount) -> Self {
        Self {
            direction,
            amount_in,
            amount_out,
        }
    }

    /// Returns the trade direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the amount paid into the pool.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the amount paid out of the pool.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns `(amount_in, amount_out)`.
    #[must_use]
    pub const fn amounts(&self) -> (Amount, Amount) {
        (self.amount_in, self.amount_out)
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote({}, in={}, out={})",
            self.direction, self.amount_in, self.amount_out
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_and_display() {
        let q = SwapQuote::new(SwapDirection::BToA, Amount::new(52), Amount::new(11));
        assert_eq!(q.direction(), SwapDirection::BToA);
        assert_eq!(q.amounts(), (Amount::new(52), Amount::new(11)));
        assert_eq!(q.to_string(), "SwapQuote(b->a, in=52, out=11)");
    }
}
