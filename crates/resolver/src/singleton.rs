//! Process-wide singleton resolver
//!
//! There is exactly one [`SingletonResolver`] per process, reached through
//! [`SingletonResolver::global`]. Startup code registers formatters and
//! providers into it; serialization code then looks formatters up from any
//! thread.
//!
//! ## Lifecycle
//!
//! ```text
//! Unfrozen ──(first lookup of ANY type)──► Frozen
//!    │  ▲
//!    └──┘ register (replaces the set)      register → InvalidState
//! ```
//!
//! Registration stays open until the first lookup anywhere in the process,
//! not until some explicit finalize call. Bootstrap code that runs more than
//! once (reloadable hosts, re-entrant init) can therefore register again
//! without error, as long as nothing has been resolved yet. The first lookup
//! of any type closes registration for every type.
//!
//! Each type is resolved against the registration set in place at freeze
//! time and then cached for the life of the process.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use stratapack_core::{
    Error, ErasedFormatter, FormatterProvider, FormatterProviderExt, FormatterRef,
    RegistrableProvider, RegistrationSet, Result, TypeKey,
};

use crate::cache::ResolutionCache;
use crate::config::ResolverConfig;

/// The process-wide resolver, created on first access and never dropped
static GLOBAL_RESOLVER: Lazy<SingletonResolver> = Lazy::new(SingletonResolver::new);

/// Resolver with a one-time registration window
pub struct SingletonResolver {
    registrations: RwLock<RegistrationSet>,
    frozen: AtomicBool,
    cache: ResolutionCache,
}

impl SingletonResolver {
    pub(crate) fn new() -> Self {
        SingletonResolver {
            registrations: RwLock::new(RegistrationSet::empty()),
            frozen: AtomicBool::new(false),
            cache: ResolutionCache::new(&ResolverConfig::default()),
        }
    }

    /// The process-wide instance
    pub fn global() -> &'static SingletonResolver {
        &GLOBAL_RESOLVER
    }

    /// Formatter for `T`, or `None` if nothing registered can format it
    ///
    /// The first call for any type freezes registration.
    pub fn get_formatter<T: 'static>(&self) -> Option<FormatterRef<T>> {
        FormatterProviderExt::get_formatter::<T>(self)
    }

    /// Check whether registration has been closed by a lookup
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Number of types resolved so far (including cached absences)
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Freeze registration and snapshot the set lookups will use
    fn freeze(&self, key: &TypeKey) -> RegistrationSet {
        // Flip the flag under the read lock: a register() holding the write
        // lock either finished before this or sees the flag afterwards.
        let registrations = self.registrations.read();
        if !self.frozen.swap(true, Ordering::AcqRel) {
            info!(
                first_type = key.name(),
                formatters = registrations.formatter_count(),
                providers = registrations.provider_count(),
                "Formatter registration frozen"
            );
        }
        registrations.clone()
    }
}

impl FormatterProvider for SingletonResolver {
    fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter> {
        if let Some(cached) = self.cache.lookup(key) {
            return cached;
        }

        // A provider asking for the type it is being asked for sees absent
        let _scan = match self.cache.begin_scan(key) {
            Some(guard) => guard,
            None => {
                debug!(type_name = key.name(), "Re-entrant lookup during global scan");
                return None;
            }
        };

        // Scan outside the lock so providers may call back into this resolver
        let registrations = self.freeze(key);
        let resolved = registrations.resolve(key);
        debug!(
            type_name = key.name(),
            found = resolved.is_some(),
            "Global resolver cache miss"
        );
        self.cache.insert_first(*key, resolved)
    }
}

impl RegistrableProvider for SingletonResolver {
    /// Replace the registration set
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` once any lookup has happened.
    fn register(
        &self,
        formatters: &[ErasedFormatter],
        providers: &[Arc<dyn FormatterProvider>],
    ) -> Result<()> {
        let mut registrations = self.registrations.write();
        if self.frozen.load(Ordering::Acquire) {
            warn!(
                formatters = formatters.len(),
                providers = providers.len(),
                "Rejected registration into frozen global resolver"
            );
            return Err(Error::invalid_state(
                "global resolver is frozen: register before the first formatter lookup",
            ));
        }

        *registrations =
            RegistrationSet::new(formatters.iter().cloned(), providers.iter().cloned());
        info!(
            formatters = registrations.formatter_count(),
            providers = registrations.provider_count(),
            "Registered formatters in global resolver"
        );
        Ok(())
    }
}

impl fmt::Debug for SingletonResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonResolver")
            .field("frozen", &self.is_frozen())
            .field("registrations", &*self.registrations.read())
            .field("cached", &self.cache.len())
            .finish()
    }
}
