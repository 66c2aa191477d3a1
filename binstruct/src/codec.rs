//! Core read traits

use crate::error::Error;
use bytes::Buf;

/// Trait for types that can be read (decoded) from the front of a buffer.
///
/// The `Cfg` type parameter carries anything the read needs beyond the bytes themselves, such as
/// which length prefix a block uses or the range of lengths to accept. Use `()` for types that
/// need nothing.
///
/// Implementations must check that enough bytes remain before consuming any of them. A read that
/// fails for lack of data leaves a fixed-width buffer untouched. Reads made of several steps (a
/// length prefix followed by its block, or a LEB128 sequence) keep whatever earlier steps
/// consumed.
pub trait Read<Cfg = ()>: Sized {
    /// Reads a value from the buffer using the provided configuration `cfg`, consuming the
    /// necessary bytes.
    fn read_cfg(buf: &mut impl Buf, cfg: Cfg) -> Result<Self, Error>;
}

/// Extension trait providing an ergonomic read method for types requiring no configuration.
pub trait ReadExt: Read<()> {
    /// Reads a value using the default `()` config.
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        <Self as Read<()>>::read_cfg(buf, ())
    }
}

// Automatically implement `ReadExt` for types that implement `Read` with no config.
impl<T: Read<()>> ReadExt for T {}
