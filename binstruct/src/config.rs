//! Decoder configuration.
//!
//! A [Decoder](crate::Decoder) needs no configuration to be correct: every read is bounds-checked
//! against the buffer. [Config] only narrows what a decoder accepts from its input, which is
//! useful when a format caps the size of length-prefixed blocks and the caller wants an
//! oversized declaration rejected before anything else happens.

use core::ops::{Bound, RangeBounds};

/// Limits applied by a [Decoder](crate::Decoder) to values read from its input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Config {
    /// Accepted lengths for length-prefixed blocks (`decode_block_u8`, `decode_block_be16`, ...).
    ///
    /// A declared length outside this range fails with
    /// [Error::LengthExceeded](crate::Error::LengthExceeded). Lengths passed directly to
    /// `decode_block` are not checked against it.
    pub block_len: RangeCfg<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_len: (..).into(),
        }
    }
}

impl Config {
    /// Returns a configuration that rejects length-prefixed blocks outside `range`.
    pub fn with_block_len(range: impl RangeBounds<usize>) -> Self {
        Self {
            block_len: RangeCfg::new(range),
        }
    }
}

/// An owned, copyable range used to bound a decoded value.
///
/// ```
/// use binstruct::RangeCfg;
///
/// let cfg = RangeCfg::new(0..=1024);
/// assert!(cfg.contains(&500));
/// assert!(!cfg.contains(&2000));
///
/// let at_least_one: RangeCfg<usize> = (1..).into();
/// assert!(!at_least_one.contains(&0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RangeCfg<T: Copy + PartialOrd> {
    start: Bound<T>,
    end: Bound<T>,
}

impl<T: Copy + PartialOrd> RangeCfg<T> {
    /// Creates a new `RangeCfg` from any type implementing `RangeBounds<T>`.
    pub fn new(r: impl RangeBounds<T>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a `RangeCfg` that only accepts exactly `value`.
    pub fn exact(value: T) -> Self {
        Self {
            start: Bound::Included(value),
            end: Bound::Included(value),
        }
    }

    /// Returns true if the value is within this range.
    pub fn contains(&self, value: &T) -> bool {
        let above_start = match &self.start {
            Bound::Included(s) => value >= s,
            Bound::Excluded(s) => value > s,
            Bound::Unbounded => true,
        };
        let below_end = match &self.end {
            Bound::Included(e) => value <= e,
            Bound::Excluded(e) => value < e,
            Bound::Unbounded => true,
        };
        above_start && below_end
    }
}

macro_rules! impl_from_range {
    ($($range:ty),* $(,)?) => {
        $(
            impl<T: Copy + PartialOrd> From<$range> for RangeCfg<T> {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_from_range!(
    core::ops::Range<T>,
    core::ops::RangeInclusive<T>,
    core::ops::RangeFrom<T>,
    core::ops::RangeTo<T>,
    core::ops::RangeToInclusive<T>,
);

impl<T: Copy + PartialOrd> From<core::ops::RangeFull> for RangeCfg<T> {
    fn from(_: core::ops::RangeFull) -> Self {
        Self::new(..)
    }
}

impl<T: Copy + PartialOrd> RangeBounds<T> for RangeCfg<T> {
    fn start_bound(&self) -> Bound<&T> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&T> {
        self.end.as_ref()
    }
}
