//! Dynamic composite resolver
//!
//! An immutable resolver built from an ordered formatter list and an ordered
//! provider list, with its own resolution cache. Any number can coexist, and
//! since a composite is itself a [`FormatterProvider`] they nest freely.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use stratapack_core::builtin::U32Formatter;
//! use stratapack_core::{BuiltinProvider, ErasedFormatter, FormatterProvider};
//! use stratapack_resolver::CompositeResolver;
//!
//! // Explicit formatters first, then fall back to the built-ins
//! let resolver = CompositeResolver::new(
//!     vec![ErasedFormatter::new(U32Formatter)],
//!     vec![Arc::new(BuiltinProvider::new()) as Arc<dyn FormatterProvider>],
//! );
//!
//! assert!(resolver.get_formatter::<u32>().is_some());
//! assert!(resolver.get_formatter::<String>().is_some());
//! assert!(resolver.get_formatter::<Vec<u8>>().is_none());
//! ```

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use stratapack_core::{
    ErasedFormatter, FormatterProvider, FormatterProviderExt, FormatterRef, RegistrationSet,
    Result, TypeKey,
};

use crate::cache::ResolutionCache;
use crate::config::ResolverConfig;

/// Provider composed from explicit formatters and child providers
///
/// Lookups never fail: a type nothing can format resolves to `None`, and
/// that answer is cached like any other.
pub struct CompositeResolver {
    registrations: RegistrationSet,
    cache: ResolutionCache,
}

impl CompositeResolver {
    /// Create a resolver from formatters and providers
    ///
    /// Both inputs are copied; the caller keeps no handle that can change
    /// what this resolver returns.
    pub fn new<F, P>(formatters: F, providers: P) -> Self
    where
        F: IntoIterator<Item = ErasedFormatter>,
        P: IntoIterator<Item = Arc<dyn FormatterProvider>>,
    {
        Self::from_registrations(RegistrationSet::new(formatters, providers))
    }

    /// Create a resolver from formatters only
    pub fn from_formatters<F>(formatters: F) -> Self
    where
        F: IntoIterator<Item = ErasedFormatter>,
    {
        Self::from_registrations(RegistrationSet::from_formatters(formatters))
    }

    /// Create a resolver from providers only
    pub fn from_providers<P>(providers: P) -> Self
    where
        P: IntoIterator<Item = Arc<dyn FormatterProvider>>,
    {
        Self::from_registrations(RegistrationSet::from_providers(providers))
    }

    /// Create a resolver over an existing registration set
    pub fn from_registrations(registrations: RegistrationSet) -> Self {
        CompositeResolver {
            registrations,
            cache: ResolutionCache::new(&ResolverConfig::default()),
        }
    }

    /// Create a resolver with explicit cache sizing
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `config` does not validate.
    pub fn with_config(registrations: RegistrationSet, config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(CompositeResolver {
            registrations,
            cache: ResolutionCache::new(&config),
        })
    }

    /// Formatter for `T`, or `None` if nothing registered can format it
    pub fn get_formatter<T: 'static>(&self) -> Option<FormatterRef<T>> {
        FormatterProviderExt::get_formatter::<T>(self)
    }

    /// The registration set this resolver scans
    pub fn registrations(&self) -> &RegistrationSet {
        &self.registrations
    }

    /// Number of types resolved so far (including cached absences)
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl FormatterProvider for CompositeResolver {
    fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter> {
        if let Some(cached) = self.cache.lookup(key) {
            return cached;
        }

        let _scan = match self.cache.begin_scan(key) {
            Some(guard) => guard,
            None => {
                debug!(type_name = key.name(), "Re-entrant lookup during composite scan");
                return None;
            }
        };

        let resolved = self.registrations.resolve(key);
        debug!(
            type_name = key.name(),
            found = resolved.is_some(),
            "Composite resolver cache miss"
        );
        self.cache.insert_first(*key, resolved)
    }
}

impl fmt::Debug for CompositeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeResolver")
            .field("registrations", &self.registrations)
            .field("cached", &self.cache.len())
            .finish()
    }
}
