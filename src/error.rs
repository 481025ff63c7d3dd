//! Error types for the mdflatten library.
//!
//! Every variant here is **fatal**: the flattened document is assembled
//! complete-or-nothing, so an unreadable nav file, page, or include target
//! aborts the whole run. The one failure mode that is deliberately *not* an
//! error is a block that looks table-like but lacks a valid divider row —
//! the grid-table converter emits such blocks unchanged and at most logs a
//! debug event, because "not a table" is a definitional outcome, not a
//! recoverable fault.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the mdflatten library.
#[derive(Debug, Error)]
pub enum FlattenError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// Navigation config file was not found at the given path.
    #[error("Couldn't open {path} for reading\nCheck the path exists and is readable.")]
    NavNotFound { path: PathBuf },

    /// Navigation config exists but is not valid JSON (or has the wrong shape).
    #[error("Failed to parse nav config {path}: {source}")]
    NavParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configured encoding label is not recognised by encoding_rs.
    #[error("Unknown encoding label '{label}'\nUse a WHATWG label such as utf-8, windows-1252, or shift_jis.")]
    UnknownEncoding { label: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// A page listed in the nav config could not be read.
    #[error("Couldn't open {path} for reading: {source}")]
    PageUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include directive referenced a file that could not be read.
    #[error("Couldn't open include file {path} for reading: {source}")]
    IncludeUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Include expansion exceeded the nesting limit, most likely a cycle.
    #[error("Include nesting exceeded {depth} levels while expanding {path} (include cycle?)")]
    IncludeDepthExceeded { path: PathBuf, depth: usize },

    /// Could not create or write the output file.
    #[error("Couldn't open {path} for writing: {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
