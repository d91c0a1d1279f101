//! Host-facing surface: one lock-protected pool plus its collaborators.
//!
//! [`PoolHandle`] is what a host embeds.  It owns the [`Pool`](crate::pool::Pool),
//! serializes access to it and wires in the
//! [`AssetTransfer`](crate::traits::AssetTransfer) and
//! [`Authorizer`](crate::traits::Authorizer) collaborators.

mod pool_handle;

pub use pool_handle::PoolHandle;
