//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint a host loads or builds and
//! hands to [`Pool::from_config`](crate::pool::Pool) or
//! [`PoolHandle::initialize_from_config`](crate::handle::PoolHandle::initialize_from_config).

mod pool_config;

pub use pool_config::PoolConfig;
