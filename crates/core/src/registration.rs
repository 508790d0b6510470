//! Registration sets and the ordered scan
//!
//! A [`RegistrationSet`] is the frozen input every resolver works from: an
//! ordered list of explicit formatters and an ordered list of providers.
//!
//! ## Resolution order
//!
//! 1. Explicit formatters, in registration order; the first one bound to
//!    the requested type wins
//! 2. Providers, in registration order; the first non-`None` answer wins
//! 3. Otherwise `None`
//!
//! Explicit formatters always beat providers, even when a provider would
//! also answer. Registering a formatter explicitly is how callers override
//! a default that some provider would otherwise supply.

use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::formatter::ErasedFormatter;
use crate::provider::FormatterProvider;
use crate::types::TypeKey;

/// Ordered formatters and providers, immutable once built
///
/// Inputs are copied into shared slices at construction, so the caller's
/// collections can change afterwards without affecting resolution. Clones
/// share the same slices.
#[derive(Clone)]
pub struct RegistrationSet {
    formatters: Arc<[ErasedFormatter]>,
    providers: Arc<[Arc<dyn FormatterProvider>]>,
}

impl RegistrationSet {
    /// Create a set from formatters and providers
    pub fn new<F, P>(formatters: F, providers: P) -> Self
    where
        F: IntoIterator<Item = ErasedFormatter>,
        P: IntoIterator<Item = Arc<dyn FormatterProvider>>,
    {
        RegistrationSet {
            formatters: formatters.into_iter().collect(),
            providers: providers.into_iter().collect(),
        }
    }

    /// Create a set with formatters only
    pub fn from_formatters<F>(formatters: F) -> Self
    where
        F: IntoIterator<Item = ErasedFormatter>,
    {
        Self::new(formatters, Vec::new())
    }

    /// Create a set with providers only
    pub fn from_providers<P>(providers: P) -> Self
    where
        P: IntoIterator<Item = Arc<dyn FormatterProvider>>,
    {
        Self::new(Vec::new(), providers)
    }

    /// Create an empty set
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Explicit formatters, in registration order
    pub fn formatters(&self) -> &[ErasedFormatter] {
        &self.formatters
    }

    /// Providers, in registration order
    pub fn providers(&self) -> &[Arc<dyn FormatterProvider>] {
        &self.providers
    }

    /// Number of explicit formatters
    pub fn formatter_count(&self) -> usize {
        self.formatters.len()
    }

    /// Number of providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Check if the set has neither formatters nor providers
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty() && self.providers.is_empty()
    }

    /// Find the formatter for `key` by ordered scan
    ///
    /// Uncached: every call walks the lists again. Resolvers put a cache
    /// in front of this.
    pub fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter> {
        if let Some(formatter) = self.formatters.iter().find(|f| f.type_key() == *key) {
            return Some(formatter.clone());
        }

        self.providers.iter().find_map(|provider| {
            let found = provider.resolve(key)?;
            if found.type_key() == *key {
                Some(found)
            } else {
                // Skip and keep scanning; the contract was broken, not the lookup
                warn!(
                    requested = key.name(),
                    bound = found.type_name(),
                    "Provider returned a formatter for the wrong type"
                );
                None
            }
        })
    }
}

impl Default for RegistrationSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FormatterProvider for RegistrationSet {
    fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter> {
        RegistrationSet::resolve(self, key)
    }
}

impl fmt::Debug for RegistrationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&'static str> = self.formatters.iter().map(|f| f.type_name()).collect();
        f.debug_struct("RegistrationSet")
            .field("formatters", &types)
            .field("provider_count", &self.providers.len())
            .finish()
    }
}
