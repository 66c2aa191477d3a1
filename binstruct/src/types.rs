//! Readers for fixed-width values and length-prefixed blocks.

pub mod bytes;
pub mod primitives;

pub use self::bytes::Prefix;
pub use primitives::{Be, Le};
