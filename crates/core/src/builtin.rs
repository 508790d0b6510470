//! Built-in formatters
//!
//! Defaults for the primitive types plus a bincode-backed formatter for any
//! serde type. Resolvers list [`BuiltinProvider`] after user registrations,
//! so any of these can be replaced by registering an explicit formatter for
//! the same type.
//!
//! ## Encodings
//!
//! | Type | Encoding |
//! |------|----------|
//! | `bool` | 1 byte, `0` or `1` |
//! | `u8`/`i8` | 1 byte |
//! | `u16`..`u64`, `i16`..`i64`, `f32`, `f64` | little-endian, fixed width |
//! | `String` | `u32` little-endian byte length, then UTF-8 bytes |
//! | `BincodeFormatter<T>` | bincode 1.x default options |

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::formatter::{ErasedFormatter, Formatter};
use crate::provider::FormatterProvider;
use crate::registration::RegistrationSet;
use crate::types::TypeKey;

macro_rules! byte_formatter {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $write:ident, $read:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Formatter for $name {
            type Value = $ty;

            fn serialize(&self, value: &$ty, out: &mut Vec<u8>) -> Result<()> {
                out.$write(*value)?;
                Ok(())
            }

            fn deserialize(&self, mut input: &[u8]) -> Result<$ty> {
                Ok(input.$read()?)
            }
        }
    };
}

macro_rules! le_formatter {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $write:ident, $read:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Formatter for $name {
            type Value = $ty;

            fn serialize(&self, value: &$ty, out: &mut Vec<u8>) -> Result<()> {
                out.$write::<LittleEndian>(*value)?;
                Ok(())
            }

            fn deserialize(&self, mut input: &[u8]) -> Result<$ty> {
                Ok(input.$read::<LittleEndian>()?)
            }
        }
    };
}

byte_formatter!(
    /// `u8` as a single byte
    U8Formatter, u8, write_u8, read_u8
);
byte_formatter!(
    /// `i8` as a single byte
    I8Formatter, i8, write_i8, read_i8
);
le_formatter!(
    /// `u16`, little-endian
    U16Formatter, u16, write_u16, read_u16
);
le_formatter!(
    /// `i16`, little-endian
    I16Formatter, i16, write_i16, read_i16
);
le_formatter!(
    /// `u32`, little-endian
    U32Formatter, u32, write_u32, read_u32
);
le_formatter!(
    /// `i32`, little-endian
    I32Formatter, i32, write_i32, read_i32
);
le_formatter!(
    /// `u64`, little-endian
    U64Formatter, u64, write_u64, read_u64
);
le_formatter!(
    /// `i64`, little-endian
    I64Formatter, i64, write_i64, read_i64
);
le_formatter!(
    /// `f32`, little-endian IEEE 754
    F32Formatter, f32, write_f32, read_f32
);
le_formatter!(
    /// `f64`, little-endian IEEE 754
    F64Formatter, f64, write_f64, read_f64
);

/// `bool` as one byte
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolFormatter;

impl Formatter for BoolFormatter {
    type Value = bool;

    fn serialize(&self, value: &bool, out: &mut Vec<u8>) -> Result<()> {
        out.write_u8(u8::from(*value))?;
        Ok(())
    }

    fn deserialize(&self, mut input: &[u8]) -> Result<bool> {
        match input.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::serialization(format!(
                "invalid bool byte 0x{:02X}",
                other
            ))),
        }
    }
}

/// `String` as a length-prefixed UTF-8 byte run
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFormatter;

impl Formatter for StringFormatter {
    type Value = String;

    fn serialize(&self, value: &String, out: &mut Vec<u8>) -> Result<()> {
        let len = u32::try_from(value.len()).map_err(|_| {
            Error::serialization(format!("string of {} bytes exceeds u32 length", value.len()))
        })?;
        out.write_u32::<LittleEndian>(len)?;
        out.extend_from_slice(value.as_bytes());
        Ok(())
    }

    fn deserialize(&self, mut input: &[u8]) -> Result<String> {
        let len = input.read_u32::<LittleEndian>()? as usize;
        if input.len() < len {
            return Err(Error::serialization(format!(
                "string length {} exceeds remaining {} bytes",
                len,
                input.len()
            )));
        }
        String::from_utf8(input[..len].to_vec())
            .map_err(|e| Error::serialization(format!("invalid utf-8: {}", e)))
    }
}

/// Formatter for any serde type, encoded with bincode
pub struct BincodeFormatter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> BincodeFormatter<T> {
    /// Create a bincode formatter for `T`
    pub fn new() -> Self {
        BincodeFormatter {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for BincodeFormatter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BincodeFormatter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BincodeFormatter")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Formatter for BincodeFormatter<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    type Value = T;

    fn serialize(&self, value: &T, out: &mut Vec<u8>) -> Result<()> {
        bincode::serialize_into(out, value)?;
        Ok(())
    }

    fn deserialize(&self, input: &[u8]) -> Result<T> {
        Ok(bincode::deserialize(input)?)
    }
}

/// All built-in primitive formatters
pub fn builtin_formatters() -> Vec<ErasedFormatter> {
    vec![
        ErasedFormatter::new(BoolFormatter),
        ErasedFormatter::new(U8Formatter),
        ErasedFormatter::new(I8Formatter),
        ErasedFormatter::new(U16Formatter),
        ErasedFormatter::new(I16Formatter),
        ErasedFormatter::new(U32Formatter),
        ErasedFormatter::new(I32Formatter),
        ErasedFormatter::new(U64Formatter),
        ErasedFormatter::new(I64Formatter),
        ErasedFormatter::new(F32Formatter),
        ErasedFormatter::new(F64Formatter),
        ErasedFormatter::new(StringFormatter),
    ]
}

/// Provider serving the built-in primitive formatters
#[derive(Debug, Clone)]
pub struct BuiltinProvider {
    registrations: RegistrationSet,
}

impl BuiltinProvider {
    /// Create a provider over [`builtin_formatters`]
    pub fn new() -> Self {
        BuiltinProvider {
            registrations: RegistrationSet::from_formatters(builtin_formatters()),
        }
    }
}

impl Default for BuiltinProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterProvider for BuiltinProvider {
    fn resolve(&self, key: &TypeKey) -> Option<ErasedFormatter> {
        self.registrations.resolve(key)
    }
}
