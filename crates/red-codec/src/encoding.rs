//! Text encoding detection, decoding, and encoding.
//!
//! Built on `encoding_rs` (the WHATWG encoding set) with `chardetng` for
//! statistical detection of unlabeled input.
//!
//! # Decode never fails
//!
//! [`decode`] runs a fallback chain — hinted/detected encoding, then UTF-8,
//! then windows-1252 — and reports which encoding actually produced the
//! text. windows-1252 maps every byte to a character, so the chain always
//! terminates with *some* decoded string. Callers never see a decode error
//! for byte-level reasons.
//!
//! # Encode can fail
//!
//! [`encode`] surfaces an error when the target encoding cannot represent a
//! character in the content (e.g. `é` in a pure-ASCII target). UTF-8 can
//! represent everything and never fails.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use log::debug;

use crate::error::{CodecError, Result};

/// Detect the most likely encoding of a byte stream.
///
/// Uses `chardetng`'s statistical detector. Empty input detects as UTF-8,
/// the default text encoding.
#[must_use]
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    if bytes.is_empty() {
        return UTF_8;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Resolve an encoding label (e.g. `"utf-8"`, `"windows-1252"`) to an
/// encoding. Labels are matched per the WHATWG registry, so common aliases
/// like `"latin1"` and `"cp1252"` resolve too.
///
/// # Errors
///
/// Returns [`CodecError::UnknownEncoding`] for an unrecognized label.
pub fn resolve_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| CodecError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// The lowercase label of an encoding, as stored in buffer metadata and the
/// configuration sidecar.
#[must_use]
pub fn label_of(encoding: &'static Encoding) -> String {
    encoding.name().to_ascii_lowercase()
}

/// Decode bytes to text, returning the text and the lowercase label of the
/// encoding that was actually used.
///
/// The chain is: the hinted encoding (if `hint` resolves to one), otherwise
/// the detected encoding; then UTF-8; then windows-1252. A decode that
/// produced replacement characters counts as failed and moves to the next
/// link. windows-1252 accepts any byte sequence, so the chain cannot run
/// out.
#[must_use]
pub fn decode(bytes: &[u8], hint: Option<&str>) -> (String, String) {
    let primary = hint
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or_else(|| detect(bytes));

    for candidate in [primary, UTF_8, WINDOWS_1252] {
        let (text, used, had_errors) = candidate.decode(bytes);
        if !had_errors {
            return (text.into_owned(), label_of(used));
        }
        debug!("decode as {} produced errors, falling back", used.name());
    }

    // windows-1252 never reports errors; reaching this point would mean the
    // invariant above is broken. Decode lossily rather than panic.
    let (text, used, _) = WINDOWS_1252.decode(bytes);
    (text.into_owned(), label_of(used))
}

/// Encode text as the encoding named by `label`.
///
/// # Errors
///
/// Returns [`CodecError::UnknownEncoding`] for an unrecognized label and
/// [`CodecError::Encode`] when the encoding cannot represent a character in
/// `text`.
pub fn encode(text: &str, label: &str) -> Result<Vec<u8>> {
    let encoding = resolve_label(label)?;
    let (bytes, used, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(CodecError::Encode {
            encoding: label_of(used),
        });
    }
    Ok(bytes.into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
