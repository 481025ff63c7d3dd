//! Cross-reference rewriting.
//!
//! Site-relative links like `[Installation](install.md#prereqs)` dangle in
//! a flattened document: the target file no longer exists as a page. The
//! `titleonly` treatment keeps the label text and drops the link.

use crate::error::FlattenError;
use crate::pipeline::LineFilter;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_XREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)\s]*\.md(?:#[^)]*)?\)").expect("xref regex"));

/// Replaces `[label](page.md)` and `[label](page.md#anchor)` with `label`.
pub struct XrefFilter;

impl LineFilter for XrefFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        Ok(lines
            .into_iter()
            .map(|line| RE_XREF.replace_all(&line, "$1").into_owned())
            .collect())
    }
}
