//! Provider contracts
//!
//! A provider answers "give me the formatter for this type, if you have
//! one". Resolvers are providers too, so they nest: a composite resolver can
//! list another composite resolver among its providers, to any depth.
//!
//! ## Contract
//!
//! - `resolve` may be called from many threads at once
//! - Repeated calls with the same key must give the same answer
//! - Absence (`None`) is a normal outcome, not an error

use std::sync::Arc;
use tracing::warn;

use crate::error::{Error, Result};
use crate::formatter::{ErasedFormatter, FormatterRef};
use crate::types::TypeKey;

/// Source of formatters keyed by type
pub trait FormatterProvider: Send + Sync {
    /// Return the formatter for `key`, or `None` if this provider has none
    ///
    /// The returned formatter must be bound to `key`. Answers bound to any
    /// other type are discarded by callers.
    fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter>;
}

impl<P: FormatterProvider + ?Sized> FormatterProvider for Arc<P> {
    fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter> {
        (**self).resolve(key)
    }
}

impl<P: FormatterProvider + ?Sized> FormatterProvider for &P {
    fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter> {
        (**self).resolve(key)
    }
}

/// Typed lookups on top of [`FormatterProvider`]
pub trait FormatterProviderExt: FormatterProvider {
    /// Formatter for `T`, or `None` if no formatter is available
    fn get_formatter<T: 'static>(&self) -> Option<FormatterRef<T>> {
        let key = TypeKey::of::<T>();
        let erased = self.resolve(&key)?;
        let formatter = erased.downcast::<T>();
        if formatter.is_none() {
            warn!(
                requested = key.name(),
                bound = erased.type_name(),
                "Provider returned a formatter for the wrong type"
            );
        }
        formatter
    }

    /// Formatter for `T`, failing with [`Error::FormatterNotFound`] if absent
    ///
    /// Use this at the point a value is actually encoded or decoded.
    fn require_formatter<T: 'static>(&self) -> Result<FormatterRef<T>> {
        self.get_formatter::<T>()
            .ok_or_else(|| Error::FormatterNotFound(TypeKey::of::<T>().name()))
    }
}

impl<P: FormatterProvider + ?Sized> FormatterProviderExt for P {}

/// Provider whose contents are supplied after construction
pub trait RegistrableProvider: FormatterProvider {
    /// Register formatters and providers
    ///
    /// Both slices are copied; later changes to the caller's collections
    /// have no effect on resolution.
    fn register(
        &self,
        formatters: &[ErasedFormatter],
        providers: &[Arc<dyn FormatterProvider>],
    ) -> Result<()>;
}

/// Convenience forms of [`RegistrableProvider::register`]
pub trait RegistrableProviderExt: RegistrableProvider {
    /// Register formatters only
    fn register_formatters(&self, formatters: &[ErasedFormatter]) -> Result<()> {
        self.register(formatters, &[])
    }

    /// Register providers only
    fn register_providers(&self, providers: &[Arc<dyn FormatterProvider>]) -> Result<()> {
        self.register(&[], providers)
    }
}

impl<P: RegistrableProvider + ?Sized> RegistrableProviderExt for P {}
