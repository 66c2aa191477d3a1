//! A bounds-checked cursor over an immutable byte buffer.
//!
//! # Position
//!
//! The position is the offset of the next unread byte. It always satisfies
//! `0 <= position <= len`, before and after every call, successful or not.
//!
//! # Failure
//!
//! Every decode operation fails with an [Error] instead of reading past the end of the buffer.
//! How much a failed call consumes depends on its shape:
//!
//! - Fixed-width values, `decode_block`, and `decode_cstring` consume nothing on failure.
//! - LEB128 values keep every byte read before the buffer ran out.
//! - Length-prefixed blocks keep the prefix if the prefix decoded but the block was short.
//!
//! To make a multi-step decode all-or-nothing, clone the decoder first (cloning shares the
//! buffer) and restore the clone on failure:
//!
//! ```
//! use binstruct::Decoder;
//!
//! let mut decoder = Decoder::new(&b"\x05test"[..]);
//! let snapshot = decoder.clone();
//! assert!(decoder.decode_block_u8().is_err());
//! assert_eq!(decoder.position(), 1);
//!
//! decoder = snapshot;
//! assert_eq!(decoder.position(), 0);
//! ```
//!
//! # Concurrency
//!
//! Decoding mutates the position, so every operation takes `&mut self`. Sharing one decoder
//! across threads requires external synchronization; cloning gives each reader its own cursor.

use crate::{util::at_least, Be, Config, Error, Le, Prefix, Read, ReadExt, SLeb128, ULeb128};
use bytes::{Buf, Bytes};
use paste::paste;
use tracing::trace;

/// Sequential reader over an immutable byte buffer.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    data: Bytes,
    position: usize,
    cfg: Config,
}

// Generates one zero-argument method per fixed-width value.
macro_rules! decode_fixed {
    ($($(#[$doc:meta])* $method:ident => $type:ty: $read:ty),* $(,)?) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $method(&mut self) -> Result<$type, Error> {
                <$read>::read(self).map(Into::into)
            }
        )*
    };
}

// Generates `decode_block_<prefix>` for each length prefix.
macro_rules! decode_prefixed {
    ($($name:ident => $prefix:ident),* $(,)?) => {
        paste! {
            $(
                #[doc = concat!(
                    "Decodes a block preceded by a `", stringify!($name), "` length.\n\n",
                    "See [Decoder::decode_prefixed] for failure behavior."
                )]
                #[inline]
                pub fn [<decode_block_ $name>](&mut self) -> Result<Bytes, Error> {
                    self.decode_prefixed(Prefix::$prefix)
                }
            )*
        }
    };
}

impl Decoder {
    /// Creates a decoder positioned at the start of `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self::with_config(data, Config::default())
    }

    /// Creates a decoder that applies `cfg` to what it reads.
    pub fn with_config(data: impl Into<Bytes>, cfg: Config) -> Self {
        Self {
            data: data.into(),
            position: 0,
            cfg,
        }
    }

    /// Replaces the buffer and resets the position to `0`, keeping the configuration.
    pub fn reinit(&mut self, data: impl Into<Bytes>) {
        *self = Self::with_config(data, self.cfg);
        trace!(len = self.data.len(), "reinitialized decoder");
    }

    /// Returns the buffer being decoded.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the length of the whole buffer (not just what remains).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves to an absolute offset.
    ///
    /// Fails with [Error::PositionOutOfRange] if `position > len`, leaving the position
    /// unchanged. `position == len` is allowed (nothing left to read).
    pub fn set_position(&mut self, position: usize) -> Result<(), Error> {
        let len = self.data.len();
        if position > len {
            trace!(position, len, "rejected position");
            return Err(Error::PositionOutOfRange(position, len));
        }
        self.position = position;
        Ok(())
    }

    /// Moves forward by `count` bytes.
    ///
    /// Validated exactly like [Decoder::set_position]: moving past the end fails and leaves the
    /// position unchanged.
    pub fn skip(&mut self, count: usize) -> Result<(), Error> {
        self.set_position(self.position.saturating_add(count))
    }

    /// Reads any value implementing [Read] with no configuration.
    ///
    /// ```
    /// use binstruct::{Be, Decoder, ULeb128};
    ///
    /// let mut decoder = Decoder::new(&[0x01, 0x02, 0xE5, 0x8E, 0x26][..]);
    /// assert_eq!(decoder.read::<Be<u16>>().unwrap(), Be(0x0102));
    /// assert_eq!(decoder.read::<ULeb128>().unwrap(), ULeb128(624485));
    /// ```
    #[inline]
    pub fn read<T: Read>(&mut self) -> Result<T, Error> {
        T::read(self)
    }

    /// Reads any value implementing [Read] with the given configuration.
    #[inline]
    pub fn read_cfg<Cfg, T: Read<Cfg>>(&mut self, cfg: Cfg) -> Result<T, Error> {
        T::read_cfg(self, cfg)
    }

    decode_fixed! {
        /// Decodes one byte as a boolean (any nonzero byte is `true`).
        decode_bool => bool: bool,
        /// Decodes an unsigned byte.
        decode_u8 => u8: u8,
        /// Decodes a two's-complement signed byte.
        decode_i8 => i8: i8,
        /// Decodes a big-endian `u16`.
        decode_u16_be => u16: Be<u16>,
        /// Decodes a little-endian `u16`.
        decode_u16_le => u16: Le<u16>,
        /// Decodes a big-endian `i16`.
        decode_i16_be => i16: Be<i16>,
        /// Decodes a little-endian `i16`.
        decode_i16_le => i16: Le<i16>,
        /// Decodes a big-endian `u32`.
        decode_u32_be => u32: Be<u32>,
        /// Decodes a little-endian `u32`.
        decode_u32_le => u32: Le<u32>,
        /// Decodes a big-endian `i32`.
        decode_i32_be => i32: Be<i32>,
        /// Decodes a little-endian `i32`.
        decode_i32_le => i32: Le<i32>,
        /// Decodes a big-endian `u64` (`0..=2^64-1`).
        decode_u64_be => u64: Be<u64>,
        /// Decodes a little-endian `u64` (`0..=2^64-1`).
        decode_u64_le => u64: Le<u64>,
        /// Decodes a big-endian `i64` (`-2^63..=2^63-1`).
        decode_i64_be => i64: Be<i64>,
        /// Decodes a little-endian `i64` (`-2^63..=2^63-1`).
        decode_i64_le => i64: Le<i64>,
        /// Decodes an unsigned LEB128 value.
        ///
        /// Bytes read before a failure stay consumed.
        decode_uleb128 => u64: ULeb128,
        /// Decodes a signed LEB128 value.
        ///
        /// Bytes read before a failure stay consumed.
        decode_sleb128 => i64: SLeb128,
    }

    /// Decodes a null-terminated string.
    ///
    /// Returns the bytes up to (not including) the next zero byte and moves past the terminator.
    /// If no terminator is found, everything that remains is returned and the position moves to
    /// the end. The bytes are returned as-is: interpreting them as text (UTF-8, Latin-1, ...) is
    /// left to the caller.
    ///
    /// Fails with [Error::EndOfBuffer] if nothing remains.
    pub fn decode_cstring(&mut self) -> Result<Bytes, Error> {
        at_least(self, 1)?;
        let terminator = self.chunk().iter().position(|&b| b == 0);
        match terminator {
            Some(end) => {
                let text = self.copy_to_bytes(end);
                self.position += 1;
                Ok(text)
            }
            None => {
                let end = self.remaining();
                Ok(self.copy_to_bytes(end))
            }
        }
    }

    /// Decodes the next `len` bytes as a block.
    ///
    /// Fails with [Error::InvalidArgument] if `len` is negative (or does not fit in `usize`), and
    /// with [Error::EndOfBuffer] if fewer than `len` bytes remain. Either way nothing is consumed.
    /// `len == 0` always succeeds with an empty block.
    pub fn decode_block<N: TryInto<usize>>(&mut self, len: N) -> Result<Bytes, Error> {
        let len = len
            .try_into()
            .map_err(|_| Error::InvalidArgument("block length must be a non-negative integer"))?;
        at_least(self, len)?;
        Ok(self.copy_to_bytes(len))
    }

    /// Decodes a block preceded by a length in the `prefix` encoding.
    ///
    /// If the prefix cannot be read, fails with the prefix's own error. If the declared length is
    /// outside [Config::block_len], fails with [Error::LengthExceeded]. If fewer bytes remain than
    /// declared, fails with [Error::EndOfBuffer]. In the last two cases the prefix stays consumed.
    pub fn decode_prefixed(&mut self, prefix: Prefix) -> Result<Bytes, Error> {
        let range = self.cfg.block_len;
        self.read_cfg::<_, Bytes>((prefix, range))
    }

    decode_prefixed! {
        u8 => U8,
        be16 => Be16,
        le16 => Le16,
        be32 => Be32,
        le32 => Le32,
        be64 => Be64,
        le64 => Le64,
        uleb128 => ULeb128,
    }
}

impl Buf for Decoder {
    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.data[self.position..]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining(),
            "cannot advance past end of buffer: {} > {}",
            cnt,
            self.remaining()
        );
        self.position += cnt;
    }

    // Blocks share the decoder's buffer instead of copying.
    #[inline]
    fn copy_to_bytes(&mut self, len: usize) -> Bytes {
        assert!(
            len <= self.remaining(),
            "cannot copy past end of buffer: {} > {}",
            len,
            self.remaining()
        );
        let block = self.data.slice(self.position..self.position + len);
        self.position += len;
        block
    }
}
