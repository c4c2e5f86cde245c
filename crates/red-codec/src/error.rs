//! Codec error type.
//!
//! Every fallible operation in `red-codec` returns [`CodecError`]. Decode
//! failures are *not* represented here — decoding always succeeds via the
//! fallback chain (see [`crate::encoding::decode`]). The errors that remain
//! are the ones a caller can meaningfully act on: a missing file, an
//! encoding label nobody recognizes, content the target encoding cannot
//! represent, and plain I/O failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by file load/save and encoding operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The load target does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// An encoding label that `encoding_rs` does not recognize.
    #[error("unknown encoding label: {label:?}")]
    UnknownEncoding {
        /// The label as given by the caller.
        label: String,
    },

    /// The target encoding cannot represent a character in the content.
    /// The file on disk is left untouched when this occurs on save.
    #[error("cannot encode content as {encoding}")]
    Encode {
        /// Lowercase label of the encoding that rejected the content.
        encoding: String,
    },

    /// Any other I/O failure (permissions, disk full, ...).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the codec.
pub type Result<T> = std::result::Result<T, CodecError>;
