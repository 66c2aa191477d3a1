//! LEB128 (Little-Endian Base 128) decoding.
//!
//! Each byte uses:
//! - 7 bits for the value
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! Byte `i` of a value contributes its 7 payload bits at bit offset `7 * i`. Decoding stops at the
//! first byte whose continuation bit is clear. For signed values, bit 6 of that final payload is
//! the sign bit and is extended through the remaining high bits.
//!
//! Results are held in native 64-bit integers. Redundant padding (extra continuation bytes whose
//! payload only repeats zero, or the sign for signed values) is accepted, so every encoding whose
//! value fits decodes exactly. Encodings whose value needs more than 64 bits fail with
//! [Error::InvalidVarint].
//!
//! Neither reader rolls back: on failure, the bytes read so far stay consumed.

use crate::{Error, Read};
use bytes::Buf;
use tracing::trace;

const DATA_BITS_PER_BYTE: u32 = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;
const SIGN_BIT_MASK: u8 = 0x40;

/// Offset of the byte that holds bit 63 (the ninth byte sits at bits 56..63).
const HIGH_SHIFT: u32 = 63;

/// Reads the next byte of a LEB128 sequence.
#[inline]
fn next_byte(buf: &mut impl Buf) -> Result<u8, Error> {
    if !buf.has_remaining() {
        trace!("unterminated LEB128");
        return Err(Error::UnterminatedVarint);
    }
    Ok(buf.get_u8())
}

#[inline]
fn overflow() -> Error {
    trace!("LEB128 value exceeds 64 bits");
    Error::InvalidVarint
}

/// Decodes an unsigned LEB128 value (`0..=2^64-1`).
pub fn read_unsigned(buf: &mut impl Buf) -> Result<u64, Error> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = next_byte(buf)?;
        let payload = byte & DATA_BITS_MASK;
        match shift {
            s if s < HIGH_SHIFT => result |= u64::from(payload) << s,
            // Only the lowest payload bit lands inside the 64-bit result.
            HIGH_SHIFT if payload <= 1 => result |= u64::from(payload) << HIGH_SHIFT,
            _ if payload == 0 => {}
            _ => return Err(overflow()),
        }

        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok(result);
        }
        shift = shift.saturating_add(DATA_BITS_PER_BYTE);
    }
}

/// Decodes a signed LEB128 value (`-2^63..=2^63-1`).
pub fn read_signed(buf: &mut impl Buf) -> Result<i64, Error> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    // Every bit at or above bit 63 must agree: they are all copies of the sign.
    let mut high: Option<u8> = None;
    loop {
        let byte = next_byte(buf)?;
        let payload = byte & DATA_BITS_MASK;
        if shift < HIGH_SHIFT {
            result |= u64::from(payload) << shift;
        } else {
            if payload != 0 && payload != DATA_BITS_MASK {
                return Err(overflow());
            }
            if high.is_some_and(|h| h != payload) {
                return Err(overflow());
            }
            high = Some(payload);
            result |= u64::from(payload & 1) << HIGH_SHIFT;
        }

        if byte & CONTINUATION_BIT_MASK == 0 {
            let end = shift.saturating_add(DATA_BITS_PER_BYTE);
            if end < 64 && byte & SIGN_BIT_MASK != 0 {
                result |= u64::MAX << end;
            }
            return Ok(result as i64);
        }
        shift = shift.saturating_add(DATA_BITS_PER_BYTE);
    }
}

/// An unsigned LEB128 value.
///
/// Wraps a `u64` so that it reads as a variable-length integer rather than fixed-width bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ULeb128(pub u64);

/// A signed LEB128 value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SLeb128(pub i64);

impl Read for ULeb128 {
    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: ()) -> Result<Self, Error> {
        read_unsigned(buf).map(ULeb128)
    }
}

impl Read for SLeb128 {
    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: ()) -> Result<Self, Error> {
        read_signed(buf).map(SLeb128)
    }
}

impl From<ULeb128> for u64 {
    fn from(value: ULeb128) -> Self {
        value.0
    }
}

impl From<SLeb128> for i64 {
    fn from(value: SLeb128) -> Self {
        value.0
    }
}
