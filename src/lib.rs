//! stratapack - Formatter resolution for Strata's binary serialization
//!
//! Every encode/decode call starts by asking "which formatter handles this
//! type?". This crate answers that question by composing formatters and
//! providers contributed by user code, generated code and libraries.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use stratapack::{BuiltinProvider, CompositeResolver, Formatter, FormatterProvider};
//!
//! let resolver = CompositeResolver::from_providers(vec![
//!     Arc::new(BuiltinProvider::new()) as Arc<dyn FormatterProvider>,
//! ]);
//!
//! let formatter = resolver.get_formatter::<u32>().unwrap();
//! let mut buf = Vec::new();
//! formatter.serialize(&42, &mut buf).unwrap();
//! assert_eq!(buf, vec![42, 0, 0, 0]);
//! ```
//!
//! # Architecture
//!
//! - `stratapack-core`: formatter and provider contracts, registration sets,
//!   the ordered scan, built-in formatters
//! - `stratapack-resolver`: the composite resolver and the process-wide
//!   singleton resolver

pub use stratapack_core::*;
pub use stratapack_resolver::*;
