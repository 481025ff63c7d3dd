//! Navigation configuration: which pages make up the document, in what
//! order, at what nesting depth.
//!
//! The nav file is JSON mirroring the familiar docs-site shape: a `pages`
//! tree of page entries and titled sections, plus `docs_dir`/`site_dir`
//! roots and a `markdown_extensions` list. Sections carry no content of
//! their own — they only deepen the nesting level of the pages inside them,
//! which in turn drives chapter-heading levels and the global header-shift
//! offset.

use crate::error::FlattenError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("site")
}

/// Top-level navigation config, deserialised from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct NavConfig {
    /// Directory the page paths are relative to. Default: `docs`.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Directory the rendered site's assets live in, used as the image-path
    /// root when `adjust_image_paths` is on. Default: `site`.
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,

    /// Enabled markdown extensions. `toc` turns on TOC generation;
    /// `markdown_include.include` turns on include expansion.
    #[serde(default)]
    pub markdown_extensions: Vec<String>,

    /// The page tree, in document order.
    pub pages: Vec<NavEntry>,
}

/// One entry in the `pages` tree: either a leaf page or a titled section.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NavEntry {
    /// A leaf page: a source file plus its chapter title.
    Page { file: String, title: String },
    /// A section: its pages nest one level deeper. The section title itself
    /// produces no chapter heading, matching the flattening rules this
    /// format descends from.
    Section { title: String, pages: Vec<NavEntry> },
}

/// A flattened page descriptor: source file, chapter title, nesting level
/// (1-based; top-level pages are level 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub file: String,
    pub title: String,
    pub level: usize,
}

impl NavConfig {
    /// Load and parse a nav config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlattenError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|_| FlattenError::NavNotFound {
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&text).map_err(|source| FlattenError::NavParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Recursively flatten the page tree into a one-dimensional list.
    pub fn flatten_pages(&self) -> Vec<Page> {
        let mut flattened = Vec::new();
        flatten_into(&self.pages, 1, &mut flattened);
        flattened
    }

    /// Whether a markdown extension is enabled in this nav config.
    pub fn has_extension(&self, name: &str) -> bool {
        self.markdown_extensions.iter().any(|e| e == name)
    }
}

fn flatten_into(entries: &[NavEntry], level: usize, out: &mut Vec<Page>) {
    for entry in entries {
        match entry {
            NavEntry::Page { file, title } => out.push(Page {
                file: file.clone(),
                title: title.clone(),
                level,
            }),
            NavEntry::Section { pages, .. } => flatten_into(pages, level + 1, out),
        }
    }
}

/// The maximum nesting level across all pages; the header-shift offset.
pub(crate) fn max_level(pages: &[Page]) -> usize {
    pages.iter().map(|p| p.level).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> NavConfig {
        serde_json::from_str(json).expect("valid nav json")
    }

    #[test]
    fn flat_pages_are_level_one() {
        let nav = parse(
            r#"{"pages": [
                {"file": "index.md", "title": "Overview"},
                {"file": "usage.md", "title": "Usage"}
            ]}"#,
        );
        let pages = nav.flatten_pages();
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.level == 1));
        assert_eq!(pages[0].file, "index.md");
        assert_eq!(pages[1].title, "Usage");
    }

    #[test]
    fn sections_deepen_level_and_emit_no_page() {
        let nav = parse(
            r#"{"pages": [
                {"file": "index.md", "title": "Overview"},
                {"title": "Guide", "pages": [
                    {"file": "guide/install.md", "title": "Installation"},
                    {"title": "Advanced", "pages": [
                        {"file": "guide/tuning.md", "title": "Tuning"}
                    ]}
                ]}
            ]}"#,
        );
        let pages = nav.flatten_pages();
        assert_eq!(
            pages,
            vec![
                Page {
                    file: "index.md".into(),
                    title: "Overview".into(),
                    level: 1
                },
                Page {
                    file: "guide/install.md".into(),
                    title: "Installation".into(),
                    level: 2
                },
                Page {
                    file: "guide/tuning.md".into(),
                    title: "Tuning".into(),
                    level: 3
                },
            ]
        );
        assert_eq!(max_level(&pages), 3);
    }

    #[test]
    fn defaults_for_dirs_and_extensions() {
        let nav = parse(r#"{"pages": []}"#);
        assert_eq!(nav.docs_dir, PathBuf::from("docs"));
        assert_eq!(nav.site_dir, PathBuf::from("site"));
        assert!(!nav.has_extension("toc"));
    }

    #[test]
    fn extensions_toggle_detection() {
        let nav = parse(
            r#"{"markdown_extensions": ["toc", "markdown_include.include"], "pages": []}"#,
        );
        assert!(nav.has_extension("toc"));
        assert!(nav.has_extension("markdown_include.include"));
        assert!(!nav.has_extension("tables"));
    }
}
