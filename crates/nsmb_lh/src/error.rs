//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// input is not LH compressed
    #[error("input is not LH compressed: {0}")]
    Format(#[from] FormatError),

    /// LH stream is corrupt
    #[error("LH stream is corrupt: {0}")]
    CorruptInput(#[from] CorruptInputError),
}

impl Error {
    /// Whether the input was rejected because it is not in the LH format at all
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// Whether the input claimed to be LH compressed but could not be decoded
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::CorruptInput(_))
    }
}

/// Error type to provide further information when the input is not LH data
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// expected marker byte 0x40, found {0:#04x}
    #[error("expected marker byte 0x40, found {0:#04x}")]
    InvalidMarker(u8),
}

/// Error type to provide further information when an LH stream cannot be decoded
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CorruptInputError {
    /// header needs {needed} bytes, found {available}
    #[error("header needs {needed} bytes, found {available}")]
    TruncatedHeader { needed: usize, available: usize },

    /// code table needs {needed} bytes, {available} remain
    #[error("code table needs {needed} bytes, {available} remain")]
    TruncatedTable { needed: usize, available: usize },

    /// code trees cannot be {0} bits wide
    #[error("code trees cannot be {0} bits wide")]
    UnsupportedWidth(u32),

    /// bitstream ended after {position} bytes
    #[error("bitstream ended after {position} bytes")]
    UnexpectedEnd { position: usize },

    /// tree node {index} is outside a table of {capacity} entries
    #[error("tree node {index} is outside a table of {capacity} entries")]
    NodeOutOfRange { index: usize, capacity: usize },

    /// tree node {0} was never described by the table
    #[error("tree node {0} was never described by the table")]
    UnfilledNode(usize),

    /// back-reference distance {distance} reaches before the {position} bytes written
    #[error("back-reference distance {distance} reaches before the {position} bytes written")]
    DistanceOutOfRange { distance: usize, position: usize },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
