//! Decode binary data with a bounds-checked cursor.
//!
//! # Overview
//!
//! A [Decoder] owns an immutable byte buffer and a position. Each `decode_*` call reads the next
//! value at the position, advances past it, and returns it. Nothing ever reads past the end of
//! the buffer: a call that would fails with an [Error] instead.
//!
//! # Supported Values
//!
//! - Booleans and 8-bit integers: `decode_bool`, `decode_u8`, `decode_i8`
//! - 16, 32 and 64-bit integers, signed or unsigned, in either byte order:
//!   `decode_u16_be`, `decode_i32_le`, `decode_u64_be`, ...
//! - LEB128 variable-length integers: `decode_uleb128`, `decode_sleb128`
//! - Null-terminated strings: `decode_cstring`
//! - Blocks of a given length: `decode_block(n)`
//! - Blocks with a length prefix: `decode_block_u8`, `decode_block_be16`, ..., `decode_block_uleb128`
//!
//! All 64-bit results are native `u64` (`0..=2^64-1`) or `i64` (`-2^63..=2^63-1`).
//!
//! # Errors
//!
//! Every [Error] belongs to one of two [ErrorKind]s:
//! - [ErrorKind::OutOfBounds]: the input is short (or declares something that cannot fit).
//!   This is the normal end-of-data signal, for example when iterating over records.
//! - [ErrorKind::InvalidArgument]: the caller passed a value that can never be valid (such as
//!   a negative block length).
//!
//! # Example
//!
//! ```
//! use binstruct::{Decoder, Error, ErrorKind};
//!
//! // A stream of records: a LEB128 id followed by a u8-prefixed name.
//! let mut decoder = Decoder::new(&b"\x01\x03foo\xE5\x8E\x26\x03bar\x07"[..]);
//!
//! let mut records = Vec::new();
//! loop {
//!     let start = decoder.position();
//!     let record = decoder
//!         .decode_uleb128()
//!         .and_then(|id| Ok((id, decoder.decode_block_u8()?)));
//!     match record {
//!         Ok(record) => records.push(record),
//!         Err(err) if err.kind() == ErrorKind::OutOfBounds => {
//!             decoder.set_position(start)?;
//!             break;
//!         }
//!         Err(err) => return Err(err),
//!     }
//! }
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].0, 624485);
//! assert_eq!(&records[1].1[..], b"bar");
//! assert_eq!(decoder.position(), 12);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Typed Reads
//!
//! Each `decode_*` method is a thin wrapper over the [Read] trait, which is implemented for any
//! [bytes::Buf]. The same readers therefore work on plain slices:
//!
//! ```
//! use binstruct::{Le, ReadExt, SLeb128};
//!
//! let mut buf = &[0x9B, 0xF1, 0x59, 0x34, 0x12][..];
//! assert_eq!(SLeb128::read(&mut buf).unwrap(), SLeb128(-624485));
//! assert_eq!(Le::<u16>::read(&mut buf).unwrap(), Le(0x1234));
//! ```

pub mod codec;
pub mod config;
pub mod decoder;
pub mod error;
pub mod types;
pub mod util;
pub mod varint;

// Re-export main types and traits
pub use codec::{Read, ReadExt};
pub use config::{Config, RangeCfg};
pub use decoder::Decoder;
pub use error::{Error, ErrorKind};
pub use types::{Be, Le, Prefix};
pub use varint::{SLeb128, ULeb128};
