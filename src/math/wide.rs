//! 256-bit intermediates for products of two `u128` quantities.
//!
//! Reserves are `u128`, so `reserve_a × reserve_b` or `amount × P` can need
//! up to 256 bits.  Every such product is formed in [`U256`] and divided
//! back down with an explicit [`Rounding`]; only the final quotient has to
//! fit in `u128`.
//!
//! # Examples
//!
//! ```
//! use pair_amm::domain::Rounding;
//! use pair_amm::math::mul_div;
//!
//! // floor(24 × 16 / 34) = 11, ceil = 12
//! assert_eq!(mul_div(24, 16, 34, Rounding::Down), Ok(11));
//! assert_eq!(mul_div(24, 16, 34, Rounding::Up), Ok(12));
//! ```

use uint::construct_uint;

use crate::domain::Rounding;
use crate::error::AmmError;

construct_uint! {
    /// Unsigned 256-bit integer for overflow-free intermediates.
    pub struct U256(4);
}

/// `a × b` without overflow.
#[must_use]
pub fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Narrows a 256-bit value back to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] if `value` exceeds `u128::MAX`.
pub fn narrow(value: U256, what: &'static str) -> Result<u128, AmmError> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::ArithmeticOverflow(what));
    }
    Ok(value.low_u128())
}

/// Divides a 256-bit numerator by `denominator` with explicit rounding.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::ArithmeticOverflow`] if the quotient exceeds `u128`.
pub fn div_wide(numerator: U256, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let (q, r) = numerator.div_mod(U256::from(denominator));
    let q = if rounding.is_up() && !r.is_zero() {
        q.checked_add(U256::one())
            .ok_or(AmmError::ArithmeticOverflow("ceiling division overflow"))?
    } else {
        q
    };
    narrow(q, "quotient exceeds u128")
}

/// `a × b / denominator` with a 256-bit intermediate.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::ArithmeticOverflow`] if the quotient exceeds `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    div_wide(product(a, b), denominator, rounding)
}

/// Integer square root (floor) of a 256-bit value, by Newton's method.
///
/// The root of any 256-bit value fits in 128 bits, so this never fails.
#[must_use]
pub fn isqrt(n: U256) -> u128 {
    if n.is_zero() {
        return 0;
    }
    // Start from a power of two at or above the root so the iteration
    // decreases monotonically.
    let mut x = U256::one() << n.bits().div_ceil(2);
    loop {
        let y = (x + n / x) / U256::from(2u8);
        if y >= x {
            break;
        }
        x = y;
    }
    x.low_u128()
}
