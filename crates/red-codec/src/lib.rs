//! # red-codec — File codec for red
//!
//! Everything that happens at the boundary between the buffer's in-memory
//! text and bytes on disk:
//!
//! - **[`encoding`]** — detection (`chardetng`), decoding with a fallback
//!   chain that never fails, and encoding that reports unrepresentable
//!   content (`encoding_rs`)
//! - **[`line_ending`]** — `CR` / `LF` / `CRLF` styles, detection, and
//!   normalization on save
//! - **[`fileio`]** — load/save with parent-directory creation
//! - **[`error`]** — [`CodecError`], the crate's error type

pub mod encoding;
pub mod error;
pub mod fileio;
pub mod line_ending;

pub use error::{CodecError, Result};
pub use line_ending::LineEnding;
