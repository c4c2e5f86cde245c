//! Editor configuration.
//!
//! A small serde struct persisted as a JSON sidecar file. Loading is
//! forgiving: a missing or corrupt file yields the defaults, and unknown
//! or missing fields fall back individually, so a config written by an
//! older version keeps working.

use std::fs;
use std::path::Path;

use log::warn;
use red_codec::LineEnding;
use serde::{Deserialize, Serialize};

use crate::buffer::EditMode;

/// User-visible editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Insert (true) vs. overwrite (false) typing.
    pub insert_mode: bool,
    /// Columns per indent step.
    pub tab_size: usize,
    /// Indent with spaces instead of a tab character.
    pub use_spaces: bool,
    /// Encoding label for newly created buffers (lowercase).
    pub encoding: String,
    /// Line-ending style applied on save.
    pub line_ending: LineEnding,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            insert_mode: true,
            tab_size: 4,
            use_spaces: true,
            encoding: "utf-8".to_string(),
            line_ending: LineEnding::default(),
        }
    }
}

impl EditorConfig {
    /// Load from a JSON file, falling back to defaults when the file is
    /// missing or unreadable. A corrupt file is reported and ignored
    /// rather than aborting startup.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("{}: ignoring corrupt config: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Persist as pretty-printed JSON, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] when the directory cannot be created
    /// or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, json)
    }

    /// The typing mode this config selects.
    #[inline]
    #[must_use]
    pub const fn edit_mode(&self) -> EditMode {
        if self.insert_mode {
            EditMode::Insert
        } else {
            EditMode::Overwrite
        }
    }

    /// One indent step: `tab_size` spaces, or a single tab when
    /// `use_spaces` is off.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        if self.use_spaces {
            " ".repeat(self.tab_size)
        } else {
            "\t".to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
