//! Literal text search.
//!
//! Matching is literal and case-sensitive, and a match never spans a line
//! break — patterns containing `\n` simply never match. Columns are char
//! offsets; matching runs on `&str` byte offsets internally and converts at
//! the boundary.
//!
//! [`find`] scans forward from a starting position and wraps around to the
//! top of the buffer, so repeated "find next" from the last hit cycles
//! through every occurrence. The replace entry points live on
//! [`Buffer`](crate::buffer::Buffer), which owns checkpointing; this module
//! only locates matches.

use crate::buffer::Buffer;
use crate::position::Position;

/// Find the first occurrence of `pattern` at or after `from`, in reading
/// order, wrapping past the end of the buffer.
///
/// The search is inclusive of `from` itself: a match starting exactly at
/// `from` is returned. The wrap pass covers only positions strictly before
/// `from`, so the scan visits each position exactly once. Returns `None`
/// for an empty pattern or when no occurrence exists. `from` is clamped to
/// buffer bounds first.
#[must_use]
pub fn find(buf: &Buffer, pattern: &str, from: Position) -> Option<Position> {
    if pattern.is_empty() {
        return None;
    }
    let from = buf.clamp_position(from);

    // Forward pass: from the starting position to the end of the buffer.
    for row in from.row..buf.line_count() {
        let line = buf.line(row).unwrap_or_default();
        let start_col = if row == from.row { from.col } else { 0 };
        if let Some(col) = find_in_line(&line, pattern, start_col) {
            return Some(Position::new(row, col));
        }
    }

    // Wrap pass: top of the buffer back to the starting position,
    // accepting on the starting row only matches strictly before `from`.
    for row in 0..=from.row {
        let line = buf.line(row).unwrap_or_default();
        if let Some(col) = find_in_line(&line, pattern, 0) {
            if row < from.row || col < from.col {
                return Some(Position::new(row, col));
            }
        }
    }

    None
}

/// Char columns of every non-overlapping occurrence of `pattern` in a
/// single line, leftmost first.
pub(crate) fn match_columns(line: &str, pattern: &str) -> Vec<usize> {
    if pattern.is_empty() {
        return Vec::new();
    }
    line.match_indices(pattern)
        .map(|(byte_off, _)| line[..byte_off].chars().count())
        .collect()
}

/// Leftmost occurrence of `pattern` in `line` at or after char column
/// `start_col`, as a char column.
fn find_in_line(line: &str, pattern: &str, start_col: usize) -> Option<usize> {
    let byte_start = line
        .char_indices()
        .map(|(byte, _)| byte)
        .nth(start_col)
        .unwrap_or(line.len());
    let tail = &line[byte_start..];
    let off = tail.find(pattern)?;
    Some(start_col + tail[..off].chars().count())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
