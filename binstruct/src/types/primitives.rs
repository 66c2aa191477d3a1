//! Fixed-width integer and boolean readers.
//!
//! Every read here follows the same steps:
//! 1. fail with [Error::EndOfBuffer] if fewer than `W` bytes remain (nothing is consumed),
//! 2. compose the `W` bytes in the requested byte order,
//! 3. reinterpret the bit pattern as two's complement for signed types,
//! 4. consume the `W` bytes.
//!
//! Single-byte values have no byte order and are read directly as `u8`, `i8` and `bool`. Wider
//! values are read through [Be] or [Le], which name the byte order at the call site:
//!
//! ```
//! use binstruct::{Be, Le, ReadExt};
//!
//! let mut buf = &[0x81, 0x82, 0x81, 0x82][..];
//! assert_eq!(Be::<u16>::read(&mut buf).unwrap(), Be(0x8182));
//! assert_eq!(Le::<i16>::read(&mut buf).unwrap(), Le(-32127));
//! ```
//!
//! 64-bit values are returned as native `u64` (`0..=2^64-1`) and `i64` (`-2^63..=2^63-1`), so
//! no value is ever truncated or wrapped.

use crate::{util::at_least, Error, Read};
use bytes::Buf;

/// A value stored most-significant byte first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Be<T>(pub T);

/// A value stored least-significant byte first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Le<T>(pub T);

impl<T> Be<T> {
    /// Returns the wrapped value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Le<T> {
    /// Returns the wrapped value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

macro_rules! impl_single_byte {
    ($type:ty, $read_method:ident) => {
        impl Read for $type {
            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: ()) -> Result<Self, Error> {
                at_least(buf, 1)?;
                Ok(buf.$read_method())
            }
        }
    };
}

impl_single_byte!(u8, get_u8);
impl_single_byte!(i8, get_i8);

// Any nonzero byte is true.
impl Read for bool {
    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: ()) -> Result<Self, Error> {
        Ok(u8::read_cfg(buf, ())? != 0)
    }
}

macro_rules! impl_endian {
    ($type:ty, $be_method:ident, $le_method:ident) => {
        impl Read for Be<$type> {
            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: ()) -> Result<Self, Error> {
                at_least(buf, core::mem::size_of::<$type>())?;
                Ok(Be(buf.$be_method()))
            }
        }

        impl Read for Le<$type> {
            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: ()) -> Result<Self, Error> {
                at_least(buf, core::mem::size_of::<$type>())?;
                Ok(Le(buf.$le_method()))
            }
        }

        impl From<Be<$type>> for $type {
            fn from(value: Be<$type>) -> Self {
                value.0
            }
        }

        impl From<Le<$type>> for $type {
            fn from(value: Le<$type>) -> Self {
                value.0
            }
        }
    };
}

impl_endian!(u16, get_u16, get_u16_le);
impl_endian!(i16, get_i16, get_i16_le);
impl_endian!(u32, get_u32, get_u32_le);
impl_endian!(i32, get_i32, get_i32_le);
impl_endian!(u64, get_u64, get_u64_le);
impl_endian!(i64, get_i64, get_i64_le);
