//! Formatter capability contract
//!
//! A formatter converts values of exactly one Rust type to and from bytes.
//! The resolution layer never looks inside a formatter: it only needs to
//! know which type a formatter is bound to, which is what the associated
//! `Value` type and [`ErasedFormatter`] provide.
//!
//! ## Example
//!
//! ```rust
//! use stratapack_core::{ErasedFormatter, Formatter, Result};
//!
//! struct UnitFormatter;
//!
//! impl Formatter for UnitFormatter {
//!     type Value = ();
//!
//!     fn serialize(&self, _value: &(), _out: &mut Vec<u8>) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn deserialize(&self, _input: &[u8]) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let erased = ErasedFormatter::new(UnitFormatter);
//! assert!(erased.is_for::<()>());
//! assert!(erased.downcast::<u32>().is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::types::TypeKey;

/// Converts values of one type to and from a binary representation
///
/// Implementations must be safe to share between worker threads; the same
/// formatter instance serves every concurrent serialize call for its type.
pub trait Formatter: Send + Sync {
    /// The one type this formatter is bound to
    type Value: 'static;

    /// Append the encoding of `value` to `out`
    fn serialize(&self, value: &Self::Value, out: &mut Vec<u8>) -> Result<()>;

    /// Decode a value from `input`
    fn deserialize(&self, input: &[u8]) -> Result<Self::Value>;
}

/// Shared handle to a formatter for `T`
pub type FormatterRef<T> = Arc<dyn Formatter<Value = T>>;

/// Type-erased formatter handle
///
/// This is what registration lists and resolution caches store. It carries
/// the [`TypeKey`] of the bound type so the capability check is a key
/// comparison, and recovers the typed [`FormatterRef`] on demand.
#[derive(Clone)]
pub struct ErasedFormatter {
    key: TypeKey,
    // Always holds a `FormatterRef<T>` for the `T` named by `key`
    inner: Arc<dyn Any + Send + Sync>,
}

impl ErasedFormatter {
    /// Erase a formatter value
    pub fn new<F>(formatter: F) -> Self
    where
        F: Formatter + 'static,
    {
        Self::from_arc::<F::Value>(Arc::new(formatter))
    }

    /// Erase an already shared formatter
    ///
    /// `downcast` hands back clones of this same `Arc`.
    pub fn from_arc<T: 'static>(formatter: FormatterRef<T>) -> Self {
        ErasedFormatter {
            key: TypeKey::of::<T>(),
            inner: Arc::new(formatter),
        }
    }

    /// Key of the type this formatter is bound to
    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    /// Name of the type this formatter is bound to
    pub fn type_name(&self) -> &'static str {
        self.key.name()
    }

    /// Check whether this formatter is bound to exactly `T`
    pub fn is_for<T: 'static>(&self) -> bool {
        self.key.is::<T>()
    }

    /// Recover the typed formatter, or `None` if bound to another type
    pub fn downcast<T: 'static>(&self) -> Option<FormatterRef<T>> {
        self.inner.downcast_ref::<FormatterRef<T>>().cloned()
    }

    /// Check whether both handles share the same underlying formatter
    pub fn ptr_eq(&self, other: &ErasedFormatter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ErasedFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedFormatter")
            .field("type", &self.key.name())
            .finish()
    }
}
