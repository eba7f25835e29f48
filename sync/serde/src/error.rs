use thiserror::Error;

/// Errors raised while decoding from a bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran past the end of the underlying buffer
    #[error("bit stream exhausted while reading")]
    OutOfBits,

    /// A decoded value does not fit the destination type
    #[error("decoded value does not fit the destination type")]
    InvalidValue,
}
