//! Error types shared by all cipher engines.

use thiserror::Error;

/// Broad category an [`Error`] belongs to.
///
/// Binding layers translate errors into their own convention by domain and
/// numeric [`code`](Error::code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorDomain {
    /// An argument passed to the call was rejected.
    Arguments,
    /// Allocation or memory primitive failure.
    Memory,
    /// The call was valid but the state it found was not.
    Runtime,
    /// A block transform failed after its own checks passed.
    Encryption,
}

/// Errors produced by the cipher engines.
///
/// Every variant carries a short name of the offending value, e.g. `"key"`
/// or `"initialization vector size"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid {0}")]
    InvalidArgument(&'static str),

    #[error("unsupported {0}")]
    UnsupportedValue(&'static str),

    #[error("invalid {0} value too small")]
    ValueTooSmall(&'static str),

    #[error("invalid {0} value out of bounds")]
    ValueOutOfBounds(&'static str),

    #[error("invalid {0} value already set")]
    AlreadySet(&'static str),

    #[error("invalid output data size: {output} smaller than input data size: {input}")]
    OutputTooSmall { input: usize, output: usize },
}

impl Error {
    /// The domain this error is reported under.
    pub fn domain(&self) -> ErrorDomain {
        match self {
            Error::InvalidArgument(_)
            | Error::UnsupportedValue(_)
            | Error::ValueTooSmall(_)
            | Error::ValueOutOfBounds(_) => ErrorDomain::Arguments,
            Error::AlreadySet(_) | Error::OutputTooSmall { .. } => ErrorDomain::Runtime,
        }
    }

    /// Numeric sub-code within [`domain`](Self::domain).
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidArgument(_) => 1,
            Error::ValueTooSmall(_) => 5,
            Error::ValueOutOfBounds(_) => 7,
            Error::UnsupportedValue(_) => 8,
            Error::AlreadySet(_) => 2,
            Error::OutputTooSmall { .. } => 12,
        }
    }
}
