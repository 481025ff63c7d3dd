//! # mdflatten
//!
//! Flatten multi-page Markdown documentation into a single Pandoc-ready
//! document.
//!
//! ## Why this crate?
//!
//! Documentation sites keep content in many small pages wired together by a
//! navigation config. Feeding that to pandoc (for a PDF manual, an EPUB, a
//! printable handout) needs one flat file — and the site dialect does not
//! survive the trip: pipe tables lose their layout the moment a cell
//! wraps, include directives and `[TOC]` markers are site-generator
//! syntax, and cross-page links dangle once pages stop existing. This
//! crate concatenates the pages in nav order and rewrites those constructs
//! into forms a downstream renderer understands, most notably reflowing
//! every pipe table into a fixed-width grid table.
//!
//! ## Pipeline Overview
//!
//! ```text
//! nav config
//!  │
//!  ├─ per page   exclude → include → headlevels → chapterhead → images
//!  │             (skip fragments, expand {!...!}, shift #-headers,
//!  │              insert chapter titles, re-anchor image paths)
//!  │
//!  └─ document   anchors → xref → toc → tables
//!                (strip <a name=>, unlink cross-refs, expand [TOC],
//!                 reflow pipe tables into bordered grid tables)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdflatten::{convert, FlattenConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FlattenConfig::builder().target_width(100).build()?;
//!     let output = convert("nav.json", &config)?;
//!     print!("{}", output.markdown());
//!     eprintln!("{} pages, {} lines", output.stats.pages, output.stats.lines);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mdflatten` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! mdflatten = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
mod io;
pub mod nav;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{FlattenConfig, FlattenConfigBuilder, DEFAULT_ROGUE_WIDTH, DEFAULT_TARGET_WIDTH};
pub use convert::{convert, convert_to_file, flatten_document};
pub use error::FlattenError;
pub use nav::{NavConfig, NavEntry, Page};
pub use output::{FlattenOutput, FlattenStats};
