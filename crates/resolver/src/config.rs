//! Resolver configuration.
//!
//! Sizing for the per-resolver resolution caches.

use stratapack_core::{Error, Result};

/// Resolution cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Entries to pre-allocate in the cache (default: 64).
    ///
    /// One entry per distinct type looked up through the resolver.
    pub initial_capacity: usize,

    /// Number of cache shards (default: 16).
    ///
    /// Must be a power of two greater than one. More shards means less
    /// contention between worker threads resolving different types.
    pub shard_amount: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            initial_capacity: 64,
            shard_amount: 16,
        }
    }
}

impl ResolverConfig {
    /// Create a new resolver configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set initial cache capacity (builder pattern).
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set cache shard amount (builder pattern).
    pub fn with_shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = shards;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.shard_amount < 2 || !self.shard_amount.is_power_of_two() {
            return Err(Error::invalid_argument(format!(
                "shard_amount must be a power of two greater than 1, got {}",
                self.shard_amount
            )));
        }
        Ok(())
    }

    /// Create a configuration for tests (tiny cache).
    pub fn for_testing() -> Self {
        ResolverConfig {
            initial_capacity: 4,
            shard_amount: 2,
        }
    }
}
