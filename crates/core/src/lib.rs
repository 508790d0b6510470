//! Core types and traits for stratapack
//!
//! This crate defines the contracts the formatter resolvers are built on:
//! - TypeKey: Deterministic key for a Rust type
//! - Formatter: Binary encode/decode capability bound to one type
//! - ErasedFormatter: Type-erased formatter handle for lists and caches
//! - FormatterProvider: "Formatter for this type, if any" capability
//! - RegistrableProvider: Provider that accepts registrations after construction
//! - RegistrationSet: Ordered formatters + providers, and the ordered scan
//! - Built-in formatters for primitives, strings and serde types
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtin;
pub mod error;
pub mod formatter;
pub mod provider;
pub mod registration;
pub mod types;

pub use builtin::{builtin_formatters, BincodeFormatter, BuiltinProvider};
pub use error::{Error, Result};
pub use formatter::{ErasedFormatter, Formatter, FormatterRef};
pub use provider::{
    FormatterProvider, FormatterProviderExt, RegistrableProvider, RegistrableProviderExt,
};
pub use registration::RegistrationSet;
pub use types::TypeKey;
