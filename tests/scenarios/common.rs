//! Shared helpers for the scenario suite.

#![allow(dead_code)]

use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stratapack::{ErasedFormatter, Error, Formatter, FormatterProvider, Result, TypeKey};

/// Formatter that writes a fixed tag, for telling registrations apart
pub struct Tagged<T> {
    pub tag: u8,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Formatter for Tagged<T> {
    type Value = T;

    fn serialize(&self, _value: &T, out: &mut Vec<u8>) -> Result<()> {
        out.push(self.tag);
        Ok(())
    }

    fn deserialize(&self, _input: &[u8]) -> Result<T> {
        Err(Error::serialization("tag-only formatter"))
    }
}

pub fn tagged<T: 'static>(tag: u8) -> ErasedFormatter {
    ErasedFormatter::new(Tagged::<T> {
        tag,
        _marker: PhantomData,
    })
}

/// Encode `value` with whatever formatter `provider` resolves for `T`
pub fn encode_with<T: 'static, P: FormatterProvider + ?Sized>(
    provider: &P,
    value: &T,
) -> Vec<u8> {
    use stratapack::FormatterProviderExt;
    let mut buf = Vec::new();
    provider
        .require_formatter::<T>()
        .unwrap()
        .serialize(value, &mut buf)
        .unwrap();
    buf
}

/// Provider serving a fixed list of formatters, counting lookups
pub struct ListProvider {
    formatters: Vec<ErasedFormatter>,
    pub lookups: AtomicUsize,
}

impl ListProvider {
    pub fn new(formatters: Vec<ErasedFormatter>) -> Arc<Self> {
        Arc::new(ListProvider {
            formatters,
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl FormatterProvider for ListProvider {
    fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.formatters.iter().find(|f| f.type_key() == *key).cloned()
    }
}
