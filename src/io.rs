//! Encoding-aware page reading.
//!
//! Source trees written before the UTF-8 monoculture still turn up in
//! windows-1252 or shift_jis; the `encoding` knob lets a whole run decode
//! through any WHATWG label encoding_rs knows. Decoding is lossy by design:
//! a stray mojibake byte becomes U+FFFD and the run continues, because a
//! single bad byte in one page is not worth aborting a batch job over (an
//! unreadable *file* still is).

use crate::error::FlattenError;
use encoding_rs::Encoding;
use std::path::Path;
use tracing::warn;

/// Resolve a WHATWG encoding label, e.g. "utf-8" or "windows-1252".
pub(crate) fn resolve_encoding(label: &str) -> Result<&'static Encoding, FlattenError> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| FlattenError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Read a whole file and decode it into lines.
///
/// Lines are split on `\n` with trailing whitespace stripped (which also
/// disposes of `\r` on CRLF input), matching how every downstream filter
/// expects its input. The caller supplies the error constructor so page
/// reads and include reads report distinct variants.
pub(crate) fn read_lines<E>(
    path: &Path,
    encoding: &'static Encoding,
    mk_err: E,
) -> Result<Vec<String>, FlattenError>
where
    E: FnOnce(std::io::Error) -> FlattenError,
{
    let bytes = std::fs::read(path).map_err(mk_err)?;
    let (decoded, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(
            "Replacement characters while decoding {} as {}",
            path.display(),
            encoding.name()
        );
    }
    Ok(split_lines(&decoded))
}

/// Split decoded text into rstrip'd lines, dropping the artifact empty
/// element a trailing newline produces.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|l| l.trim_end().to_string())
        .collect();
    if lines.last().is_some_and(|l| l.is_empty()) && text.ends_with('\n') {
        lines.pop();
    }
    lines
}
