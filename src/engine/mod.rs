//! Stateless pricing: constant-product quotes and the price-impact guard.
//!
//! Nothing here reads or writes a [`Pool`](crate::pool::Pool); callers pass
//! reserve snapshots in and get amounts or ratios back.

mod quote;
mod slippage;

pub use quote::QuoteEngine;
pub use slippage::{Assessment, SlippageGuard};
