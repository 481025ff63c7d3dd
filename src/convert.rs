//! Top-level conversion entry points.
//!
//! Flattening happens in two phases, and the split is a contract (see
//! [`crate::pipeline`]): filters that need per-page context (chapter title,
//! nesting level, page-relative image paths) run on each page before
//! concatenation; filters that need to see the whole document (anchor and
//! cross-reference cleanup, TOC generation, table conversion) run once on
//! the assembled line sequence. A blank line goes between pages so text
//! from one file never butts up against a header in the next.

use crate::config::FlattenConfig;
use crate::error::FlattenError;
use crate::io;
use crate::nav::{NavConfig, Page};
use crate::output::{FlattenOutput, FlattenStats};
use crate::pipeline::{
    anchors::AnchorFilter, apply_filters, chapterhead::ChapterheadFilter, exclude::ExcludeFilter,
    headlevels::HeadlevelFilter, images::ImageFilter, include::IncludeFilter,
    tables::TableFilter, toc::TocFilter, xref::XrefFilter, LineFilter,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Flatten the documentation tree described by a nav config file.
///
/// This is the primary entry point for the library. The nav config's
/// `markdown_extensions` list can switch on include expansion and TOC
/// generation even when the passed `config` leaves them off, mirroring how
/// the site generator itself decides which syntax is live.
///
/// # Errors
/// All errors are fatal — the document is assembled complete-or-nothing.
/// See [`FlattenError`].
pub fn convert(
    nav_path: impl AsRef<Path>,
    config: &FlattenConfig,
) -> Result<FlattenOutput, FlattenError> {
    let start = Instant::now();
    let nav_path = nav_path.as_ref();

    let nav = NavConfig::load(nav_path)?;
    let pages = nav.flatten_pages();
    info!(
        "Flattening {} pages from {}",
        pages.len(),
        nav_path.display()
    );

    let mut effective = config.clone();
    effective.filter_toc |= nav.has_extension("toc");
    effective.filter_include |= nav.has_extension("markdown_include.include");

    let lines = flatten_document(&pages, &nav.docs_dir, &nav.site_dir, &effective)?;

    let stats = FlattenStats {
        pages: pages.len(),
        lines: lines.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Flattened {} pages into {} lines in {}ms",
        stats.pages, stats.lines, stats.duration_ms
    );

    Ok(FlattenOutput { lines, stats })
}

/// Flatten a documentation tree and write the result to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial output.
pub fn convert_to_file(
    nav_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &FlattenConfig,
) -> Result<FlattenStats, FlattenError> {
    let output = convert(nav_path, config)?;
    let path = output_path.as_ref();

    let write_err = |source: std::io::Error| FlattenError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp_path = path.with_extension("md.tmp");
    std::fs::write(&tmp_path, output.markdown()).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;

    Ok(output.stats)
}

/// Flatten a list of page descriptors into a single line sequence.
///
/// The lower-level entry point behind [`convert`], for callers that build
/// their page list without a nav config file. `docs_dir` anchors page and
/// include paths; `site_dir` anchors rewritten image paths.
pub fn flatten_document(
    pages: &[Page],
    docs_dir: &Path,
    site_dir: &Path,
    config: &FlattenConfig,
) -> Result<Vec<String>, FlattenError> {
    let encoding = io::resolve_encoding(&config.encoding)?;

    // Per-page filters that are identical for every page.
    let exclude = ExcludeFilter::new(&config.exclude);
    let include = IncludeFilter::new(docs_dir, encoding);
    let headlevels = HeadlevelFilter::from_pages(pages);

    let mut lines: Vec<String> = Vec::new();

    for page in pages {
        let path = docs_dir.join(&page.file);
        debug!("Reading {}", path.display());
        let page_lines = io::read_lines(&path, encoding, |source| FlattenError::PageUnreadable {
            path: path.clone(),
            source,
        })?;

        let chapterhead = ChapterheadFilter::new(page.level, &page.title);
        let images = ImageFilter::new(
            Some(PathBuf::from(&page.file)),
            Some(site_dir.to_path_buf()),
            config.image_ext.clone(),
            config.adjust_image_paths,
        );

        let mut stage: Vec<&dyn LineFilter> = Vec::new();
        if !config.exclude.is_empty() {
            stage.push(&exclude);
        }
        if config.filter_include {
            stage.push(&include);
        }
        stage.push(&headlevels);
        stage.push(&chapterhead);
        stage.push(&images);

        lines.extend(apply_filters(&stage, page_lines)?);
        // Keep a page's text from butting up against the next page's headers.
        lines.push(String::new());
    }

    // Document-wide filters; tables must come last (see the pipeline docs).
    let anchors = AnchorFilter;
    let xrefs = XrefFilter;
    let toc = TocFilter;
    let tables = TableFilter::new(config.target_width, config.rogue_width);

    let mut stage: Vec<&dyn LineFilter> = Vec::new();
    if config.strip_anchors {
        stage.push(&anchors);
    }
    if config.filter_xrefs {
        stage.push(&xrefs);
    }
    if config.filter_toc {
        stage.push(&toc);
    }
    if config.filter_tables {
        stage.push(&tables);
    }

    apply_filters(&stage, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn page(file: &str, title: &str, level: usize) -> Page {
        Page {
            file: file.into(),
            title: title.into(),
            level,
        }
    }

    #[test]
    fn missing_page_is_fatal_and_names_the_path() {
        let dir = TempDir::new().unwrap();
        let pages = vec![page("ghost.md", "Ghost", 1)];
        let err = flatten_document(
            &pages,
            dir.path(),
            Path::new("site"),
            &FlattenConfig::default(),
        )
        .unwrap_err();
        match err {
            FlattenError::PageUnreadable { path, .. } => {
                assert!(path.ends_with("ghost.md"));
            }
            other => panic!("expected PageUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn chapter_heads_and_shift_compose() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "# Local Header\nbody\n").unwrap();
        let pages = vec![page("a.md", "Chapter A", 2)];
        let out = flatten_document(
            &pages,
            dir.path(),
            Path::new("site"),
            &FlattenConfig::default(),
        )
        .unwrap();
        // Max level 2 → local headers shift by 2; chapter head at level 2.
        assert_eq!(out[0], "## Chapter A");
        assert_eq!(out[1], "");
        assert_eq!(out[2], "### Local Header");
        assert_eq!(out.last().map(String::as_str), Some(""));
    }

    #[test]
    fn pages_are_separated_by_a_blank_line() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "alpha\n").unwrap();
        fs::write(dir.path().join("b.md"), "beta\n").unwrap();
        let pages = vec![page("a.md", "A", 1), page("b.md", "B", 1)];
        let out = flatten_document(
            &pages,
            dir.path(),
            Path::new("site"),
            &FlattenConfig::default(),
        )
        .unwrap();
        let alpha = out.iter().position(|l| l == "alpha").unwrap();
        assert_eq!(out[alpha + 1], "");
        assert_eq!(out[alpha + 2], "# B");
    }
}
