//! Chapter-heading insertion.
//!
//! Each page's title lives in the nav config, not in the page itself; this
//! filter materialises it as an Atx header at the page's nesting level,
//! followed by a blank line so the heading never butts up against the first
//! line of content.

use crate::error::FlattenError;
use crate::pipeline::LineFilter;

/// Prepends `"#" * level + " " + title` and a blank line to a page.
pub struct ChapterheadFilter {
    level: usize,
    title: String,
}

impl ChapterheadFilter {
    pub fn new(level: usize, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
        }
    }
}

impl LineFilter for ChapterheadFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        let mut out = Vec::with_capacity(lines.len() + 2);
        out.push(format!("{} {}", "#".repeat(self.level), self.title));
        out.push(String::new());
        out.extend(lines);
        Ok(out)
    }
}
