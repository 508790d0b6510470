//! Formatter resolvers for stratapack
//!
//! This crate composes formatters and providers into the lookup service the
//! serialization engine calls before every encode/decode:
//! - CompositeResolver: immutable, independently constructible, nestable
//! - SingletonResolver: one per process, registration closes on first lookup
//! - ResolverConfig: resolution cache sizing
//!
//! Both resolvers scan in the same order (explicit formatters, then
//! providers, first match wins) and memoize every answer per type,
//! including "no formatter". Lookups are safe from any number of threads
//! and never block on each other beyond the cache's shard locks.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cache;
pub mod composite;
pub mod config;
pub mod singleton;

pub use composite::CompositeResolver;
pub use config::ResolverConfig;
pub use singleton::SingletonResolver;
