//! Line ending styles and conversion.
//!
//! The buffer stores lines joined with bare `\n`; the line-ending style only
//! matters at the file boundary. On save, [`LineEnding::apply`] first
//! normalizes every break (`\r\n`, `\r`, `\n`) to `\n` and then expands to
//! the configured style, so mixed-ending input always comes out uniform.
//!
//! The style serializes as the conventional `"CR"` / `"LF"` / `"CRLF"`
//! labels in the configuration sidecar.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Line ending style of a file.
///
/// Defaults to `CrLf`, matching the retro DOS-editor heritage of the
/// surrounding application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineEnding {
    /// `\r` — Classic Mac (pre-OS X). Rare but we handle it.
    #[serde(rename = "CR")]
    Cr,
    /// `\n` — Unix, macOS, Linux.
    #[serde(rename = "LF")]
    Lf,
    /// `\r\n` — Windows, DOS.
    #[default]
    #[serde(rename = "CRLF")]
    CrLf,
}

impl LineEnding {
    /// The string representation of this line ending.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cr => "\r",
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Detect the dominant line ending in a string by finding the first
    /// occurrence. Returns `Lf` if no line endings are found.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                // Check if preceded by \r → CrLf.
                if i > 0 && text.as_bytes()[i - 1] == b'\r' {
                    return Self::CrLf;
                }
                return Self::Lf;
            }
            if byte == b'\r' {
                // Check if followed by \n → CrLf.
                if text.as_bytes().get(i + 1) == Some(&b'\n') {
                    return Self::CrLf;
                }
                return Self::Cr;
            }
        }
        // No line endings found — default to Lf.
        Self::Lf
    }

    /// Convert every line break in `text` to this style.
    ///
    /// Handles `\r\n`, lone `\r`, and `\n` in any combination; a `\r\n` pair
    /// counts as one break, never two.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        let target = self.as_str();
        let mut result = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '\r' {
                result.push_str(target);
                // Skip \n after \r (it's one line ending, not two).
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            } else if ch == '\n' {
                result.push_str(target);
            } else {
                result.push(ch);
            }
        }

        result
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cr => f.write_str("CR"),
            Self::Lf => f.write_str("LF"),
            Self::CrLf => f.write_str("CRLF"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
