//! Configuration types for documentation flattening.
//!
//! All flattening behaviour is controlled through [`FlattenConfig`], built
//! via its [`FlattenConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config across pages, serialise it for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The knob count keeps growing (width, encoding, per-filter toggles, image
//! handling); a positional constructor breaks on every new field. The
//! builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::FlattenError;
use serde::{Deserialize, Serialize};

/// Default total width of generated grid tables, in characters.
pub const DEFAULT_TARGET_WIDTH: usize = 100;

/// Default width of rogue columns — data-row cells beyond the header's
/// column count, which do not participate in proportional balancing.
pub const DEFAULT_ROGUE_WIDTH: usize = 20;

/// Configuration for flattening a documentation tree.
///
/// Built via [`FlattenConfig::builder()`] or using
/// [`FlattenConfig::default()`].
///
/// # Example
/// ```rust
/// use mdflatten::FlattenConfig;
///
/// let config = FlattenConfig::builder()
///     .target_width(80)
///     .image_ext("pdf")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlattenConfig {
    /// Total width of generated grid tables in characters. Default: 100.
    ///
    /// Shared by every table in the document. Column widths are assigned
    /// proportionally to the widest cell per column and always sum to
    /// exactly this value; see [`crate::pipeline::tables`].
    pub target_width: usize,

    /// Width of rogue columns (cells beyond the header's column count).
    /// Default: 20.
    ///
    /// Rogue cells cannot participate in proportional balancing — the
    /// header defines how many columns share `target_width` — so they get
    /// this fixed width instead.
    pub rogue_width: usize,

    /// WHATWG encoding label for reading source pages. Default: "utf-8".
    ///
    /// Resolved through encoding_rs; any label it knows works here
    /// (windows-1252, shift_jis, ...). Validated by the builder.
    pub encoding: String,

    /// Extension to substitute image extensions with, e.g. "pdf".
    /// Default: no replacement.
    ///
    /// Useful when the flattened document is fed to a renderer that cannot
    /// embed the web formats the site uses (pandoc + LaTeX wants PDF or PNG
    /// where the site has SVG).
    pub image_ext: Option<String>,

    /// Rewrite relative image paths to be resolvable from the output
    /// document's location. Default: false.
    pub adjust_image_paths: bool,

    /// Include-directive path patterns to skip during expansion
    /// (glob-style, `*` and `?`). Default: none.
    pub exclude: Vec<String>,

    /// Strip `<a name=...></a>` anchor tags. Default: true.
    pub strip_anchors: bool,

    /// Rewrite `[label](page.md#anchor)` cross-references to their label.
    /// Default: true.
    pub filter_xrefs: bool,

    /// Replace `[TOC]` markers with a generated table of contents.
    /// Default: false; OR-ed with the nav config's `toc` extension toggle.
    pub filter_toc: bool,

    /// Expand `{!file!}` include directives. Default: false; OR-ed with the
    /// nav config's `markdown_include.include` extension toggle.
    pub filter_include: bool,

    /// Convert pipe tables to grid tables. Default: true.
    pub filter_tables: bool,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            rogue_width: DEFAULT_ROGUE_WIDTH,
            encoding: "utf-8".to_string(),
            image_ext: None,
            adjust_image_paths: false,
            exclude: Vec::new(),
            strip_anchors: true,
            filter_xrefs: true,
            filter_toc: false,
            filter_include: false,
            filter_tables: true,
        }
    }
}

impl FlattenConfig {
    /// Create a new builder for `FlattenConfig`.
    pub fn builder() -> FlattenConfigBuilder {
        FlattenConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`FlattenConfig`].
#[derive(Debug)]
pub struct FlattenConfigBuilder {
    config: FlattenConfig,
}

impl FlattenConfigBuilder {
    pub fn target_width(mut self, width: usize) -> Self {
        self.config.target_width = width;
        self
    }

    pub fn rogue_width(mut self, width: usize) -> Self {
        self.config.rogue_width = width;
        self
    }

    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.config.encoding = label.into();
        self
    }

    pub fn image_ext(mut self, ext: impl Into<String>) -> Self {
        self.config.image_ext = Some(ext.into());
        self
    }

    pub fn adjust_image_paths(mut self, v: bool) -> Self {
        self.config.adjust_image_paths = v;
        self
    }

    pub fn exclude(mut self, patterns: Vec<String>) -> Self {
        self.config.exclude = patterns;
        self
    }

    pub fn strip_anchors(mut self, v: bool) -> Self {
        self.config.strip_anchors = v;
        self
    }

    pub fn filter_xrefs(mut self, v: bool) -> Self {
        self.config.filter_xrefs = v;
        self
    }

    pub fn filter_toc(mut self, v: bool) -> Self {
        self.config.filter_toc = v;
        self
    }

    pub fn filter_include(mut self, v: bool) -> Self {
        self.config.filter_include = v;
        self
    }

    pub fn filter_tables(mut self, v: bool) -> Self {
        self.config.filter_tables = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<FlattenConfig, FlattenError> {
        let c = &self.config;
        if c.target_width == 0 {
            return Err(FlattenError::InvalidConfig(
                "target_width must be ≥ 1".into(),
            ));
        }
        if c.rogue_width == 0 {
            return Err(FlattenError::InvalidConfig(
                "rogue_width must be ≥ 1".into(),
            ));
        }
        if encoding_rs::Encoding::for_label(c.encoding.as_bytes()).is_none() {
            return Err(FlattenError::UnknownEncoding {
                label: c.encoding.clone(),
            });
        }
        Ok(self.config)
    }
}
