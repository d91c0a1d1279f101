//! Integer arithmetic for pool calculations.
//!
//! [`CheckedArithmetic`] covers additive updates of reserves and LP supply;
//! the wide helpers ([`mul_div`], [`div_wide`], [`isqrt`]) form products in
//! [`U256`] and divide back to `u128` with an explicit
//! [`Rounding`](crate::domain::Rounding).

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{div_wide, isqrt, mul_div, narrow, product, U256};
