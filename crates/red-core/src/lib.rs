//! # red-core — Editor core for red
//!
//! The text engine behind the editor: everything about buffer content and
//! state, with no terminal or rendering concerns.
//!
//! - **[`buffer`]** — [`Buffer`]: rope-backed text with cursor, selection,
//!   editing operations, and encoding-aware file I/O
//! - **[`position`]** — [`Position`] and [`Range`], 0-indexed char
//!   coordinates
//! - **[`history`]** — bounded snapshot undo/redo
//! - **[`search`]** — literal find with wraparound
//! - **[`config`]** — [`EditorConfig`], persisted as JSON
//!
//! # Quick start
//!
//! ```
//! use red_core::{Buffer, EditMode};
//!
//! let mut buf = Buffer::from_text("hello world");
//! buf.set_cursor(0, 5);
//! buf.insert_char('!', EditMode::Insert);
//! assert_eq!(buf.line(0).unwrap(), "hello! world");
//! assert!(buf.undo());
//! assert_eq!(buf.line(0).unwrap(), "hello world");
//! ```

pub mod buffer;
pub mod config;
pub mod history;
pub mod position;
pub mod search;

pub use buffer::{Buffer, EditMode};
pub use config::EditorConfig;
pub use position::{Position, Range};
pub use red_codec::LineEnding;
