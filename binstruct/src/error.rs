//! Error types for decode operations

use thiserror::Error;

/// Error type for decode operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("unpack requires data of length {0}, {1} remaining")]
    EndOfBuffer(usize, usize), // needed, remaining
    #[error("unpack requires more data for LEB128")]
    UnterminatedVarint,
    #[error("LEB128 value exceeds 64 bits")]
    InvalidVarint,
    #[error("position out of range: {0} > {1}")]
    PositionOutOfRange(usize, usize), // requested, len
    #[error("block length not allowed: {0}")]
    LengthExceeded(usize),
}

/// The two categories every [Error] falls into.
///
/// [ErrorKind::OutOfBounds] is an expected end-of-data signal (e.g. to stop iterating over a
/// stream of records). [ErrorKind::InvalidArgument] indicates caller misuse and does not occur
/// in correct client code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfBounds,
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::EndOfBuffer(..)
            | Error::UnterminatedVarint
            | Error::InvalidVarint
            | Error::PositionOutOfRange(..)
            | Error::LengthExceeded(_) => ErrorKind::OutOfBounds,
        }
    }

    /// Returns true if this error signals missing or out-of-range data.
    pub fn is_out_of_bounds(&self) -> bool {
        self.kind() == ErrorKind::OutOfBounds
    }
}
