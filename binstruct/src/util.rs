//! Shared bounds checks.

use crate::Error;
use bytes::Buf;
use tracing::trace;

/// Ensures the buffer has at least `len` bytes remaining.
///
/// Nothing is consumed, whether the check passes or not.
#[inline]
pub fn at_least(buf: &mut impl Buf, len: usize) -> Result<(), Error> {
    let remaining = buf.remaining();
    if remaining < len {
        trace!(needed = len, remaining, "insufficient data");
        return Err(Error::EndOfBuffer(len, remaining));
    }
    Ok(())
}
