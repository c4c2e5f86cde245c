//! File load and save.
//!
//! The bridge between on-disk bytes and the buffer's in-memory text. Load
//! reads bytes and decodes through the fallback chain (never failing for
//! byte-level reasons); save applies the configured line-ending style,
//! encodes, and writes — creating parent directories as needed.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::encoding;
use crate::error::{CodecError, Result};
use crate::line_ending::LineEnding;

/// Load a file, returning its text and the lowercase label of the encoding
/// actually used to decode it.
///
/// `hint` is an optional encoding label; when absent (or when the hinted
/// decode fails) the encoding is detected from the bytes.
///
/// # Errors
///
/// Returns [`CodecError::NotFound`] when the path does not exist and
/// [`CodecError::Io`] for other read failures. Never fails to decode.
pub fn load(path: &Path, hint: Option<&str>) -> Result<(String, String)> {
    let bytes = fs::read(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            CodecError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            CodecError::Io(err)
        }
    })?;

    let (text, label) = encoding::decode(&bytes, hint);
    if let Some(hinted) = hint {
        if !hinted.eq_ignore_ascii_case(&label) {
            warn!("{}: hinted encoding {hinted:?} unusable, used {label:?}", path.display());
        }
    }
    debug!("loaded {} ({} bytes, {label})", path.display(), bytes.len());
    Ok((text, label))
}

/// Save text to a file with the given encoding and line-ending style.
///
/// Line breaks are normalized and expanded to `line_ending` before encoding.
/// Parent directories are created if missing. On an encode failure the file
/// on disk is left untouched.
///
/// # Errors
///
/// Returns [`CodecError::UnknownEncoding`] or [`CodecError::Encode`] from
/// the encoding step, and [`CodecError::Io`] for write failures.
pub fn save(path: &Path, text: &str, encoding_label: &str, line_ending: LineEnding) -> Result<()> {
    let styled = line_ending.apply(text);
    let bytes = encoding::encode(&styled, encoding_label)?;

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, &bytes)?;
    debug!(
        "saved {} ({} bytes, {encoding_label}, {line_ending})",
        path.display(),
        bytes.len()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_missing_file_is_not_found() {
        let err = load(Path::new("/no/such/dir/file.txt"), None).unwrap_err();
        assert!(matches!(err, CodecError::NotFound { .. }));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.txt");

        save(&path, "hello\nworld", "utf-8", LineEnding::Lf).unwrap();
        let (text, label) = load(&path, None).unwrap();

        assert_eq!(text, "hello\nworld");
        assert_eq!(label, "utf-8");
    }

    #[test]
    fn save_applies_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");

        save(&path, "hello\nworld\n", "utf-8", LineEnding::CrLf).unwrap();
        let raw = fs::read(&path).unwrap();

        assert_eq!(raw, b"hello\r\nworld\r\n");
    }

    #[test]
    fn save_applies_cr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cr.txt");

        save(&path, "a\nb", "utf-8", LineEnding::Cr).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"a\rb");
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/dirs/file.txt");

        save(&path, "content", "utf-8", LineEnding::Lf).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn save_unrepresentable_content_errors_and_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");

        let err = save(&path, "日本語", "windows-1252", LineEnding::Lf).unwrap_err();
        assert!(matches!(err, CodecError::Encode { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn load_with_hint_uses_hinted_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.txt");
        fs::write(&path, b"caf\xe9").unwrap();

        let (text, label) = load(&path, Some("windows-1252")).unwrap();
        assert_eq!(text, "café");
        assert_eq!(label, "windows-1252");
    }

    #[test]
    fn load_bad_hint_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf8.txt");
        fs::write(&path, "héllo".as_bytes()).unwrap();

        // windows-1252 decodes anything, so a wrong hint still yields text;
        // what matters is that load never fails for byte-level reasons.
        let (_, label) = load(&path, Some("windows-1252")).unwrap();
        assert_eq!(label, "windows-1252");
    }

    #[test]
    fn roundtrip_windows_1252_with_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.txt");

        save(&path, "très\nbien", "windows-1252", LineEnding::CrLf).unwrap();
        let (text, label) = load(&path, Some("windows-1252")).unwrap();

        assert_eq!(text, "très\r\nbien");
        assert_eq!(label, "windows-1252");
    }
}
