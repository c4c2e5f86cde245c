//! Text buffer — the fundamental unit of text storage.
//!
//! A `Buffer` wraps a [`ropey::Rope`] with cursor tracking, selection,
//! checkpointed mutations, and encoding-aware file I/O through `red-codec`.
//!
//! # The joined-lines model
//!
//! The rope holds the document's lines joined with bare `\n` and **no
//! trailing terminator**: rope text ending in `\n` means the last line is
//! empty. Under this model `rope.len_lines()` is exactly the logical line
//! count, an empty document is one empty line, and the buffer can never be
//! empty. Line-ending style (`CR`/`LF`/`CRLF`) is applied only at the file
//! boundary on save.
//!
//! # Design choices
//!
//! - **ropey** provides O(log n) insert/delete at any position, efficient
//!   line indexing, and battle-tested Unicode handling. Its persistent
//!   clones also make full-snapshot undo cheap: a checkpoint shares
//!   structure with the live rope instead of copying the text.
//!
//! - **Columns are char offsets**, not byte offsets. Column 3 of `"café"`
//!   is `'é'`. Byte offsets never leak into the public API.
//!
//! - **Every destructive operation checkpoints first**, so undo restores
//!   both the text and the cursor as they were before the edit.

use std::fmt;
use std::path::{Path, PathBuf};

use red_codec::{fileio, CodecError, LineEnding};
use ropey::Rope;

use crate::history::{History, Snapshot};
use crate::position::{Position, Range};
use crate::search;

// ---------------------------------------------------------------------------
// EditMode
// ---------------------------------------------------------------------------

/// How [`Buffer::insert_char`] treats the character under the cursor.
///
/// Passed explicitly per call so the buffer never reads ambient
/// configuration state. Derive it from [`crate::config::EditorConfig`] via
/// [`edit_mode`](crate::config::EditorConfig::edit_mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Shift the remainder of the line right.
    Insert,
    /// Replace the char under the cursor, or append at end of line.
    Overwrite,
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// A text buffer with cursor, selection, and undo history.
///
/// Tracks:
///
/// - the text (via `ropey::Rope`, joined-lines model)
/// - the cursor, always clamped to valid bounds
/// - an optional selection (raw anchor pair, normalized at use)
/// - the file path and encoding label, when backed by a file
/// - whether the content changed since the last save or load
pub struct Buffer {
    rope: Rope,
    cursor: Position,
    selection: Option<(Position, Position)>,
    history: History,
    modified: bool,
    path: Option<PathBuf>,
    encoding: String,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer: one empty line, unmodified, no path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: Position::ZERO,
            selection: None,
            history: History::new(),
            modified: false,
            path: None,
            encoding: "utf-8".to_string(),
        }
    }

    /// Create a buffer from text. Line breaks of any style become line
    /// boundaries; a trailing break does not produce an extra empty line,
    /// matching how the save path joins lines.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.rope = Rope::from_str(&join_lines(text));
        buf
    }

    /// Load a buffer from a file, detecting the encoding when `hint` is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NotFound`] when the path does not exist.
    /// Decoding itself never fails — see [`red_codec::encoding::decode`].
    pub fn from_file(path: &Path, hint: Option<&str>) -> Result<Self, CodecError> {
        let mut buf = Self::new();
        buf.load_file(path, hint)?;
        Ok(buf)
    }

    /// Replace this buffer's content with a file's.
    ///
    /// Resets the cursor to the origin, clears the selection and both
    /// history stacks, records the path and the encoding actually used,
    /// and clears the modified flag.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NotFound`] when the path does not exist.
    pub fn load_file(&mut self, path: &Path, hint: Option<&str>) -> Result<(), CodecError> {
        let (text, label) = fileio::load(path, hint)?;
        self.rope = Rope::from_str(&join_lines(&text));
        self.cursor = Position::ZERO;
        self.selection = None;
        self.history.clear();
        self.modified = false;
        self.path = Some(path.to_path_buf());
        self.encoding = label;
        Ok(())
    }

    // -- File I/O -----------------------------------------------------------

    /// Save to the associated path with the given line-ending style.
    ///
    /// # Errors
    ///
    /// Fails when no path is set, when the buffer's encoding cannot
    /// represent the content, or on a write error. The modified flag is
    /// cleared only on success.
    pub fn save(&mut self, line_ending: LineEnding) -> Result<(), CodecError> {
        let path = self.path.clone().ok_or_else(|| {
            CodecError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "buffer has no file path",
            ))
        })?;
        self.save_as(&path, line_ending)
    }

    /// Save to a specific path, updating the stored path on success.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] when the buffer's encoding cannot
    /// represent the content (the file on disk is left untouched), or
    /// [`CodecError::Io`] on a write failure.
    pub fn save_as(&mut self, path: &Path, line_ending: LineEnding) -> Result<(), CodecError> {
        let content = self.rope.to_string();
        fileio::save(path, &content, &self.encoding, line_ending)?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    // -- Metadata -----------------------------------------------------------

    /// The file path this buffer is associated with, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The lowercase label of the buffer's encoding (default `"utf-8"`).
    #[inline]
    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Set the encoding used for the next save.
    #[inline]
    pub fn set_encoding(&mut self, label: impl Into<String>) {
        self.encoding = label.into();
    }

    /// True if the content changed since the last save or load.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    // -- Text access --------------------------------------------------------

    /// Number of lines. Never zero — an empty buffer has one empty line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// A line's content by 0-indexed row, without any line break. Returns
    /// `None` if `row >= line_count()`.
    #[must_use]
    pub fn line(&self, row: usize) -> Option<String> {
        if row >= self.line_count() {
            return None;
        }
        let line = self.rope.line(row);
        let len = self.line_len(row).unwrap_or(0);
        Some(line.slice(..len).to_string())
    }

    /// A line's content length in chars, excluding the line break. Returns
    /// `None` if the row doesn't exist. The valid cursor columns for a row
    /// are `0..=line_len(row)`.
    #[must_use]
    pub fn line_len(&self, row: usize) -> Option<usize> {
        if row >= self.line_count() {
            return None;
        }
        let line = self.rope.line(row);
        let total = line.len_chars();
        if total > 0 && line.char(total - 1) == '\n' {
            Some(total - 1)
        } else {
            Some(total)
        }
    }

    /// The content of the line the cursor is on.
    #[must_use]
    pub fn current_line(&self) -> String {
        self.line(self.cursor.row).unwrap_or_default()
    }

    /// The full document text: lines joined with `\n`, no trailing break.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Cursor -------------------------------------------------------------

    /// The cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// Set the cursor absolutely, clamping to buffer bounds: row into
    /// `[0, line_count - 1]`, col into `[0, line_len(row)]`. Out-of-range
    /// input is never an error.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = self.clamp_position(Position::new(row, col));
    }

    /// Move the cursor by the given deltas with line-wrap semantics:
    ///
    /// - left past column 0 wraps to the end of the previous line (no-op
    ///   on row 0)
    /// - right past end of line wraps to column 0 of the next line
    ///   (clamps at line end on the last line)
    /// - a row above the buffer clamps to the origin; a row below clamps
    ///   to the end of the last line
    #[allow(clippy::cast_possible_wrap)]
    pub fn move_cursor(&mut self, d_row: i64, d_col: i64) {
        let line_count = self.line_count() as i64;
        let new_row = self.cursor.row as i64 + d_row;
        let new_col = self.cursor.col as i64 + d_col;

        let (row, col) = if new_row < 0 {
            (0, 0)
        } else if new_row >= line_count {
            let last = self.line_count() - 1;
            (last, self.line_len(last).unwrap_or(0))
        } else {
            let row = usize::try_from(new_row).unwrap_or(0);
            let len = self.line_len(row).unwrap_or(0);
            if new_col < 0 {
                if row > 0 {
                    (row - 1, self.line_len(row - 1).unwrap_or(0))
                } else {
                    (0, 0)
                }
            } else if usize::try_from(new_col).unwrap_or(usize::MAX) > len {
                if row + 1 < self.line_count() {
                    (row + 1, 0)
                } else {
                    (row, len)
                }
            } else {
                (row, usize::try_from(new_col).unwrap_or(0))
            }
        };

        self.cursor = Position::new(row, col);
    }

    /// Clamp a position to the nearest valid cursor position.
    #[must_use]
    pub fn clamp_position(&self, pos: Position) -> Position {
        let row = pos.row.min(self.line_count() - 1);
        let col = pos.col.min(self.line_len(row).unwrap_or(0));
        Position::new(row, col)
    }

    // -- Editing ------------------------------------------------------------

    /// Insert a character at the cursor and advance one column.
    ///
    /// `EditMode::Insert` shifts the remainder of the line right;
    /// `EditMode::Overwrite` replaces the char under the cursor, appending
    /// when the cursor sits past the last character.
    pub fn insert_char(&mut self, ch: char, mode: EditMode) {
        self.checkpoint();
        let idx = self.char_idx(self.cursor);
        if mode == EditMode::Overwrite
            && self.cursor.col < self.line_len(self.cursor.row).unwrap_or(0)
        {
            self.rope.remove(idx..idx + 1);
        }
        self.rope.insert_char(idx, ch);
        self.cursor.col += 1;
        self.modified = true;
    }

    /// Split the current line at the cursor. The cursor moves to column 0
    /// of the new line.
    pub fn insert_newline(&mut self) {
        self.checkpoint();
        let idx = self.char_idx(self.cursor);
        self.rope.insert_char(idx, '\n');
        self.cursor = Position::new(self.cursor.row + 1, 0);
        self.modified = true;
    }

    /// Forward delete: remove the char at the cursor, or merge the next
    /// line into this one when the cursor sits at end of line.
    ///
    /// At the true end of the buffer this changes nothing, but it still
    /// checkpoints and sets the modified flag — the behavior the undo
    /// tests pin down explicitly.
    pub fn delete_char(&mut self) {
        self.checkpoint();
        let row = self.cursor.row;
        let len = self.line_len(row).unwrap_or(0);
        let idx = self.char_idx(self.cursor);
        if self.cursor.col < len {
            self.rope.remove(idx..idx + 1);
        } else if row + 1 < self.line_count() {
            // Cursor at end of line: idx points at the separating '\n'.
            self.rope.remove(idx..idx + 1);
        }
        self.modified = true;
    }

    /// Remove the char before the cursor, or merge this line into the
    /// previous one at column 0. Moves the cursor one position left (with
    /// line wrap) and delegates to [`delete_char`](Self::delete_char).
    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            self.delete_char();
        } else if self.cursor.row > 0 {
            let prev = self.cursor.row - 1;
            self.cursor = Position::new(prev, self.line_len(prev).unwrap_or(0));
            self.delete_char();
        }
    }

    // -- Selection ----------------------------------------------------------

    /// Set the selection anchors. Order doesn't matter — normalization to
    /// reading order happens when the selection is read or deleted.
    pub fn set_selection(&mut self, a: Position, b: Position) {
        self.selection = Some((a, b));
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The raw selection anchors as the caller set them, if any.
    #[inline]
    #[must_use]
    pub const fn selection(&self) -> Option<(Position, Position)> {
        self.selection
    }

    /// The selected text, with multi-line selections joined by `\n`.
    /// Empty when no selection is active.
    #[must_use]
    pub fn selected_text(&self) -> String {
        let Some(range) = self.normalized_selection() else {
            return String::new();
        };
        let start = self.char_idx(range.start);
        let end = self.char_idx(range.end);
        self.rope.slice(start..end).to_string()
    }

    /// Delete the selected text, collapsing a multi-line selection into a
    /// single merged line. Positions the cursor at the normalized selection
    /// start and clears the selection. No-op when nothing is selected.
    pub fn delete_selection(&mut self) {
        let Some(range) = self.normalized_selection() else {
            return;
        };
        self.checkpoint();
        let start = self.char_idx(range.start);
        let end = self.char_idx(range.end);
        self.rope.remove(start..end);
        self.cursor = range.start;
        self.selection = None;
        self.modified = true;
    }

    /// The selection as a clamped, reading-ordered range.
    fn normalized_selection(&self) -> Option<Range> {
        self.selection
            .map(|(a, b)| Range::ordered(self.clamp_position(a), self.clamp_position(b)))
    }

    // -- Search / replace ---------------------------------------------------

    /// Find the first occurrence of `pattern` at or after `from` (default:
    /// the cursor), wrapping past the end of the buffer. `None` when the
    /// pattern is empty or absent. Matching is literal and case-sensitive.
    #[must_use]
    pub fn find_text(&self, pattern: &str, from: Option<Position>) -> Option<Position> {
        search::find(self, pattern, from.unwrap_or(self.cursor))
    }

    /// Replace occurrences of `pattern` with `replacement`.
    ///
    /// With `all` set, every non-overlapping occurrence across the buffer
    /// is replaced in one checkpointed step; otherwise only the next
    /// occurrence from the cursor. Returns the number of replacements. A
    /// checkpoint is taken only when at least one replacement occurs.
    pub fn replace_text(&mut self, pattern: &str, replacement: &str, all: bool) -> usize {
        if pattern.is_empty() {
            return 0;
        }
        if all {
            self.replace_all(pattern, replacement)
        } else {
            self.replace_next(pattern, replacement)
        }
    }

    fn replace_next(&mut self, pattern: &str, replacement: &str) -> usize {
        let Some(pos) = search::find(self, pattern, self.cursor) else {
            return 0;
        };
        self.checkpoint();
        let idx = self.char_idx(pos);
        self.rope.remove(idx..idx + pattern.chars().count());
        self.rope.insert(idx, replacement);
        self.cursor = self.clamp_position(self.cursor);
        self.modified = true;
        1
    }

    fn replace_all(&mut self, pattern: &str, replacement: &str) -> usize {
        // Collect every match first so the checkpoint captures the
        // pre-replacement state exactly once.
        let mut matches = Vec::new();
        for row in 0..self.line_count() {
            let line = self.line(row).unwrap_or_default();
            for col in search::match_columns(&line, pattern) {
                matches.push(Position::new(row, col));
            }
        }
        if matches.is_empty() {
            return 0;
        }

        self.checkpoint();
        let pat_chars = pattern.chars().count();
        // Apply back to front so earlier match positions stay valid.
        for pos in matches.iter().rev() {
            let idx = self.char_idx(*pos);
            self.rope.remove(idx..idx + pat_chars);
            self.rope.insert(idx, replacement);
        }
        self.cursor = self.clamp_position(self.cursor);
        self.modified = true;
        matches.len()
    }

    // -- Undo / redo --------------------------------------------------------

    /// Restore the most recent checkpoint. Returns `false` when there is
    /// nothing to undo. Always marks the buffer modified — reverting is
    /// itself a change from what was last saved.
    pub fn undo(&mut self) -> bool {
        let current = Snapshot::new(self.rope.clone(), self.cursor);
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone edit. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = Snapshot::new(self.rope.clone(), self.cursor);
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// True if an undo entry is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// True if a redo entry is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.rope = snapshot.rope;
        self.cursor = snapshot.cursor;
        self.modified = true;
    }

    // -- Internals ----------------------------------------------------------

    /// Push the current state onto the undo stack.
    fn checkpoint(&mut self) {
        self.history
            .checkpoint(Snapshot::new(self.rope.clone(), self.cursor));
    }

    /// Absolute char index of a valid position. `col == line_len(row)` maps
    /// to the separating `\n` (or the end of the rope on the last line).
    fn char_idx(&self, pos: Position) -> usize {
        self.rope.line_to_char(pos.row) + pos.col
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("cursor", &self.cursor)
            .field("modified", &self.modified)
            .field("encoding", &self.encoding)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert arbitrary text into the joined-lines form: every break becomes
/// `\n`, and one trailing break (if any) is dropped so that a final newline
/// in a file does not produce a phantom empty line.
fn join_lines(text: &str) -> String {
    let mut joined = LineEnding::Lf.apply(text);
    if joined.ends_with('\n') {
        joined.pop();
    }
    joined
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
