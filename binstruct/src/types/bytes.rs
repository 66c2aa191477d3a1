//! Length-prefixed blocks.
//!
//! A block is a run of bytes preceded by its length. The length is read first (consuming the
//! prefix), checked against the configured [RangeCfg], and then exactly that many bytes are
//! returned as [Bytes].
//!
//! If the prefix is read but the block itself is short, the prefix stays consumed. Callers that
//! want all-or-nothing behavior can snapshot the buffer (e.g. clone a
//! [Decoder](crate::Decoder)) before reading.

use crate::{util::at_least, varint, Be, Error, Le, RangeCfg, Read, ReadExt};
use bytes::{Buf, Bytes};
use tracing::trace;

/// The encoding of a block's length prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    U8,
    Be16,
    Le16,
    Be32,
    Le32,
    Be64,
    Le64,
    ULeb128,
}

impl Prefix {
    /// Reads a declared length, consuming the prefix bytes.
    pub fn read_len(self, buf: &mut impl Buf) -> Result<u64, Error> {
        Ok(match self {
            Prefix::U8 => u8::read(buf)?.into(),
            Prefix::Be16 => Be::<u16>::read(buf)?.0.into(),
            Prefix::Le16 => Le::<u16>::read(buf)?.0.into(),
            Prefix::Be32 => Be::<u32>::read(buf)?.0.into(),
            Prefix::Le32 => Le::<u32>::read(buf)?.0.into(),
            Prefix::Be64 => Be::<u64>::read(buf)?.0,
            Prefix::Le64 => Le::<u64>::read(buf)?.0,
            Prefix::ULeb128 => varint::read_unsigned(buf)?,
        })
    }
}

impl Read<(Prefix, RangeCfg<usize>)> for Bytes {
    #[inline]
    fn read_cfg(
        buf: &mut impl Buf,
        (prefix, range): (Prefix, RangeCfg<usize>),
    ) -> Result<Self, Error> {
        let declared = prefix.read_len(buf)?;

        // A length that does not fit in usize cannot fit in memory either.
        let len = usize::try_from(declared).unwrap_or(usize::MAX);
        if !range.contains(&len) {
            trace!(?prefix, len, "rejected block length");
            return Err(Error::LengthExceeded(len));
        }
        at_least(buf, len)?;
        Ok(buf.copy_to_bytes(len))
    }
}
