//! Anchor-tag stripping.
//!
//! Docs sites drop `<a name="..."></a>` targets next to headings so deep
//! links resolve; a flat document has no use for them and most downstream
//! renderers print them literally.

use crate::error::FlattenError;
use crate::pipeline::LineFilter;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a\s+name=[^>]*>\s*</a>"#).expect("anchor regex"));

/// Removes `<a name=...></a>` tags, leaving surrounding text intact.
pub struct AnchorFilter;

impl LineFilter for AnchorFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        Ok(lines
            .into_iter()
            .map(|line| RE_ANCHOR.replace_all(&line, "").into_owned())
            .collect())
    }
}
