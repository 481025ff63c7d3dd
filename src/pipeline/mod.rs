//! Line filters for document flattening.
//!
//! Each submodule implements exactly one transformation over the document's
//! line sequence. Keeping stages separate makes each independently testable
//! and lets the orchestrator assemble exactly the set a given run needs.
//!
//! ## Data Flow
//!
//! ```text
//! per page:       exclude ──▶ include ──▶ headlevels ──▶ chapterhead ──▶ images
//! whole document: anchors ──▶ xref ──▶ toc ──▶ tables
//! ```
//!
//! The order is a contract, not an accident:
//!
//! * [`exclude`] must run before [`include`] so skipped directives are never
//!   expanded.
//! * [`headlevels`] must run before [`chapterhead`] so inserted chapter
//!   headings keep their intended level.
//! * [`tables`] runs last of all — earlier filters may rewrite line content
//!   the pipe-table grammar depends on (image paths inside cells, stripped
//!   anchors), and cell text must be final before column widths are
//!   measured.
//!
//! No filter may assume it is last in the pipeline; each must tolerate
//! already-transformed input from an upstream stage.

pub mod anchors;
pub mod chapterhead;
pub mod exclude;
pub mod headlevels;
pub mod images;
pub mod include;
pub mod tables;
pub mod toc;
pub mod xref;

use crate::error::FlattenError;

/// A transform from an ordered sequence of lines to an ordered sequence of
/// lines.
///
/// Filters hold per-invocation configuration supplied at construction and
/// no other state; running the same filter twice on the same input yields
/// the same output. Only [`include::IncludeFilter`] performs I/O and can
/// actually fail.
pub trait LineFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError>;
}

/// Fold a line sequence through an ordered list of filters.
pub fn apply_filters(
    filters: &[&dyn LineFilter],
    lines: Vec<String>,
) -> Result<Vec<String>, FlattenError> {
    filters
        .iter()
        .try_fold(lines, |lines, filter| filter.run(lines))
}

#[cfg(test)]
pub(crate) fn lines(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Suffix(&'static str);

    impl LineFilter for Suffix {
        fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
            Ok(lines.into_iter().map(|l| format!("{l}{}", self.0)).collect())
        }
    }

    #[test]
    fn apply_folds_in_order() {
        let a = Suffix("-a");
        let b = Suffix("-b");
        let out = apply_filters(&[&a, &b], lines(&["x"])).unwrap();
        assert_eq!(out, vec!["x-a-b"]);
    }

    #[test]
    fn empty_filter_list_is_identity() {
        let out = apply_filters(&[], lines(&["x", "y"])).unwrap();
        assert_eq!(out, vec!["x", "y"]);
    }
}
