//! Resolution cache shared by both resolvers
//!
//! Maps a requested type to the formatter it resolved to, or to `None` when
//! nothing matched. Absence is cached like any other answer so a miss is not
//! rescanned on every call.
//!
//! Inserts are first-writer-wins: two threads that miss on the same type at
//! once both scan, and whichever inserts second gets the first one's answer
//! back. The scan is a pure function of a frozen registration set, so both
//! computed the same thing anyway.
//!
//! A scan runs user providers, and a provider may ask the same resolver for
//! the type being scanned. Each thread records the keys it is scanning so
//! that such a lookup answers absent instead of recursing.

use dashmap::DashMap;
use std::cell::RefCell;
use std::collections::HashSet;
use stratapack_core::{ErasedFormatter, TypeKey};

use crate::config::ResolverConfig;

thread_local! {
    /// (cache address, type) pairs this thread is scanning right now
    static SCANNING: RefCell<HashSet<(usize, TypeKey)>> = RefCell::new(HashSet::new());
}

/// Marks a key as being scanned on the current thread until dropped
pub(crate) struct ScanGuard {
    slot: (usize, TypeKey),
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        SCANNING.with(|scanning| {
            scanning.borrow_mut().remove(&self.slot);
        });
    }
}

pub(crate) struct ResolutionCache {
    entries: DashMap<TypeKey, Option<ErasedFormatter>>,
}

impl ResolutionCache {
    /// `config` must already be validated
    pub(crate) fn new(config: &ResolverConfig) -> Self {
        ResolutionCache {
            entries: DashMap::with_capacity_and_shard_amount(
                config.initial_capacity,
                config.shard_amount,
            ),
        }
    }

    /// Outer `None` is a cache miss; inner `None` is a cached absence
    pub(crate) fn lookup(&self, key: &TypeKey) -> Option<Option<ErasedFormatter>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `resolved` unless another thread got there first; return what is stored
    pub(crate) fn insert_first(
        &self,
        key: TypeKey,
        resolved: Option<ErasedFormatter>,
    ) -> Option<ErasedFormatter> {
        self.entries.entry(key).or_insert(resolved).value().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Start scanning `key` on this thread
    ///
    /// Returns `None` if this thread is already scanning `key` for this cache.
    /// The answer to such a nested lookup must not be cached.
    pub(crate) fn begin_scan(&self, key: &TypeKey) -> Option<ScanGuard> {
        let slot = (self as *const Self as usize, *key);
        let fresh = SCANNING.with(|scanning| scanning.borrow_mut().insert(slot));
        fresh.then(|| ScanGuard { slot })
    }
}
