//! Error types for the encoder.

use thiserror::Error;

/// Result type alias for encoder operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Encoder error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Input length does not fit in the 24-bit size field.
    #[error("input too large: {len} bytes, at most {max} can be encoded")]
    InputTooLarge { len: usize, max: usize },

    /// Output memory could not be obtained.
    #[error("allocation failed: could not allocate {requested_bytes} bytes")]
    AllocationFailed { requested_bytes: usize },

    /// An `Options` value is out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Create an invalid options error.
    pub fn options(message: impl Into<String>) -> Self {
        Error::InvalidOptions(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::InputTooLarge {
            len: 0x100_0000,
            max: 0xFF_FFFF,
        };
        assert_eq!(
            e.to_string(),
            "input too large: 16777216 bytes, at most 16777215 can be encoded"
        );
        let e = Error::AllocationFailed {
            requested_bytes: 12,
        };
        assert_eq!(e.to_string(), "allocation failed: could not allocate 12 bytes");
        assert_eq!(
            Error::options("bad").to_string(),
            "invalid options: bad"
        );
    }
}
