//! Resolution scenarios through the stratapack facade
//!
//! Exercises the composite resolver the way the serialization engine uses
//! it: formatters from user code, generated code and libraries composed
//! into one lookup, then used to encode and decode values.
//!
//! ## Running
//!
//! ```bash
//! cargo test --test scenarios
//! ```

mod common;

mod encode_decode;
mod ordering;
mod properties;
