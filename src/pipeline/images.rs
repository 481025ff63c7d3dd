//! Image-path rewriting.
//!
//! Image references in a page are relative to that page's location in the
//! docs tree. Once pages are concatenated into one document the base
//! directory changes, so relative paths must be re-anchored — either to an
//! explicit image root (the rendered site's asset directory) or to the
//! page's own directory. Independently, the extension can be swapped when
//! the downstream toolchain cannot embed the site's web formats.
//!
//! Only links at the start of a line are rewritten; inline images inside
//! body text keep their paths.

use crate::error::FlattenError;
use crate::pipeline::LineFilter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static RE_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[(?P<alt>[^\]]*)\]\((?P<src>[^)]*)\)").expect("image regex"));

static RE_EXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\w+$").expect("ext regex"));

/// Rewrites line-leading `![alt](src)` references.
pub struct ImageFilter {
    /// Page file path relative to the docs root; its directory anchors
    /// relative image paths when no explicit root is set.
    filename: Option<PathBuf>,
    /// Explicit image root; takes precedence over the page directory.
    image_path: Option<PathBuf>,
    /// Replacement extension, without the dot.
    image_ext: Option<String>,
    /// Whether to re-anchor relative paths at all.
    adjust_paths: bool,
}

impl ImageFilter {
    pub fn new(
        filename: Option<PathBuf>,
        image_path: Option<PathBuf>,
        image_ext: Option<String>,
        adjust_paths: bool,
    ) -> Self {
        Self {
            filename,
            image_path,
            image_ext,
            adjust_paths,
        }
    }

    fn rewrite_src(&self, src: &str) -> String {
        let mut name = src.to_string();

        if let Some(ref ext) = self.image_ext {
            name = RE_EXT.replace(&name, format!(".{ext}").as_str()).into_owned();
        }

        if self.adjust_paths && !is_absolute_ref(&name) {
            let base = match (&self.image_path, &self.filename) {
                (Some(root), _) => Some(root.clone()),
                (None, Some(file)) => file.parent().map(Path::to_path_buf),
                (None, None) => None,
            };
            if let Some(base) = base {
                name = base.join(&name).to_string_lossy().into_owned();
            }
        }

        name
    }
}

/// URLs and rooted paths are already resolvable from anywhere.
fn is_absolute_ref(src: &str) -> bool {
    src.starts_with('/') || src.starts_with("http://") || src.starts_with("https://")
}

impl LineFilter for ImageFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        if !self.adjust_paths && self.image_ext.is_none() {
            return Ok(lines);
        }
        Ok(lines
            .into_iter()
            .map(|line| {
                RE_IMAGE
                    .replace(&line, |caps: &regex::Captures<'_>| {
                        format!("![{}]({})", &caps["alt"], self.rewrite_src(&caps["src"]))
                    })
                    .into_owned()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::lines;

    fn filter(
        filename: Option<&str>,
        image_path: Option<&str>,
        image_ext: Option<&str>,
        adjust: bool,
    ) -> ImageFilter {
        ImageFilter::new(
            filename.map(PathBuf::from),
            image_path.map(PathBuf::from),
            image_ext.map(str::to_string),
            adjust,
        )
    }

    #[test]
    fn no_config_is_identity() {
        let f = filter(Some("guide/a.md"), Some("site"), None, false);
        let input = lines(&["![diagram](img/d.svg)"]);
        assert_eq!(f.run(input.clone()).unwrap(), input);
    }

    #[test]
    fn replaces_extension() {
        let f = filter(None, None, Some("pdf"), false);
        let out = f.run(lines(&["![d](img/d.svg)"])).unwrap();
        assert_eq!(out, vec!["![d](img/d.pdf)"]);
    }

    #[test]
    fn anchors_to_image_root_when_set() {
        let f = filter(Some("guide/a.md"), Some("site"), None, true);
        let out = f.run(lines(&["![d](img/d.png)"])).unwrap();
        assert_eq!(out, vec!["![d](site/img/d.png)"]);
    }

    #[test]
    fn anchors_to_page_dir_without_root() {
        let f = filter(Some("guide/a.md"), None, None, true);
        let out = f.run(lines(&["![d](img/d.png)"])).unwrap();
        assert_eq!(out, vec!["![d](guide/img/d.png)"]);
    }

    #[test]
    fn absolute_and_url_refs_not_reanchored() {
        let f = filter(Some("guide/a.md"), Some("site"), None, true);
        let input = lines(&[
            "![d](/srv/img/d.png)",
            "![d](https://example.org/d.png)",
        ]);
        assert_eq!(f.run(input.clone()).unwrap(), input);
    }

    #[test]
    fn mid_line_image_untouched() {
        let f = filter(None, None, Some("pdf"), false);
        let input = lines(&["intro ![d](img/d.svg) outro"]);
        assert_eq!(f.run(input.clone()).unwrap(), input);
    }

    #[test]
    fn trailing_text_survives_rewrite() {
        let f = filter(None, None, Some("pdf"), false);
        let out = f.run(lines(&["![d](d.svg) *caption*"])).unwrap();
        assert_eq!(out, vec!["![d](d.pdf) *caption*"]);
    }
}
