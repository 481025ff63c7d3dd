//! Header-level shifting for Atx-style (`#`) headers.
//!
//! When pages nest under sections, their chapter headings occupy the top
//! header levels, so every header the pages themselves contain must move
//! down by the maximum nesting depth to stay subordinate.

use crate::error::FlattenError;
use crate::nav::Page;
use crate::pipeline::LineFilter;

/// Shifts every Atx header down by a fixed offset.
///
/// Setext-style (underlined) headers are not recognised.
pub struct HeadlevelFilter {
    offset: usize,
}

impl HeadlevelFilter {
    /// Offset taken from the deepest nesting level across all pages.
    pub fn from_pages(pages: &[Page]) -> Self {
        Self {
            offset: crate::nav::max_level(pages),
        }
    }

    pub fn new(offset: usize) -> Self {
        Self { offset }
    }
}

impl LineFilter for HeadlevelFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        let extra = "#".repeat(self.offset);
        Ok(lines
            .into_iter()
            .map(|line| {
                if line.starts_with('#') {
                    format!("{extra}{line}")
                } else {
                    line
                }
            })
            .collect())
    }
}
