use std::path::PathBuf;

use crate::format::PrimitiveKind;
use crate::value::Value;

/// Result type used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for `BinaryWriter` and `FormatResolver`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The size specifier is not one of the recognized widths or names.
    #[error("invalid size specifier: {0}")]
    InvalidSpecifier(String),

    /// The value cannot be represented by the resolved primitive kind.
    #[error("value {value} does not fit in {kind}")]
    ValueOutOfRange {
        /// The value that was passed to the write call.
        value: Value,
        /// The kind the size specifier resolved to.
        kind: PrimitiveKind,
    },

    /// The path denotes a directory where a file was expected.
    #[error("{} is a directory, not a file", .0.display())]
    NotAFile(PathBuf),

    /// `save` was called on a writer that has no target path.
    #[error("the writer has no target path to save to")]
    NoTargetPath,

    /// `save` would replace an existing file, but overwriting was not allowed.
    #[error("{} already exists and overwriting was not requested", .0.display())]
    TargetExists(PathBuf),

    /// An endianness name other than `little` or `big`.
    #[error("invalid endianness {0:?}, expected \"little\" or \"big\"")]
    InvalidEndianness(String),

    /// The file system failed while saving.
    #[error("failed to save buffer: {0}")]
    Io(#[from] std::io::Error),
}
