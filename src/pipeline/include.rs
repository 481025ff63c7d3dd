//! Include-directive expansion.
//!
//! Pages may pull in shared fragments with `{!path!}` directives, resolved
//! relative to a base directory. Expansion splices the fragment into the
//! directive's line: text before the directive prefixes the fragment's
//! first line, text after it suffixes the last. Fragments may themselves
//! contain directives; passes repeat until none remain, bounded by
//! [`MAX_INCLUDE_DEPTH`] so an include cycle surfaces as an error instead
//! of a hang.

use crate::error::FlattenError;
use crate::io;
use crate::pipeline::LineFilter;
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

/// Nesting limit for include expansion. Deeper than any sane docs tree;
/// shallower than a stack overflow.
pub const MAX_INCLUDE_DEPTH: usize = 64;

pub(crate) static RE_INCLUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{!\s*(.+?)\s*!\}").expect("include regex"));

/// Expands `{!path!}` directives relative to a base directory.
pub struct IncludeFilter {
    base_path: PathBuf,
    encoding: &'static Encoding,
}

impl IncludeFilter {
    pub fn new(base_path: impl Into<PathBuf>, encoding: &'static Encoding) -> Self {
        Self {
            base_path: base_path.into(),
            encoding,
        }
    }

    /// Expand the first directive on every line that has one.
    ///
    /// One pass is enough for sibling directives on separate lines; nested
    /// directives (inside fragments) and second directives on the same line
    /// are picked up by the caller's next pass.
    fn expand_once(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let Some(caps) = RE_INCLUDE.captures(&line) else {
                out.push(line);
                continue;
            };
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
            let target = self.base_path.join(&caps[1]);
            let fragment =
                io::read_lines(&target, self.encoding, |source| {
                    FlattenError::IncludeUnreadable {
                        path: target.clone(),
                        source,
                    }
                })?;

            let prefix = &line[..whole.0];
            let suffix = &line[whole.1..];
            match fragment.len() {
                0 => out.push(format!("{prefix}{suffix}")),
                1 => out.push(format!("{prefix}{}{suffix}", fragment[0])),
                n => {
                    out.push(format!("{prefix}{}", fragment[0]));
                    out.extend(fragment[1..n - 1].iter().cloned());
                    out.push(format!("{}{suffix}", fragment[n - 1]));
                }
            }
        }
        Ok(out)
    }
}

impl LineFilter for IncludeFilter {
    fn run(&self, mut lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        let mut depth = 0;
        loop {
            let Some(pending) = lines.iter().find_map(|l| {
                RE_INCLUDE
                    .captures(l)
                    .map(|c| self.base_path.join(&c[1]))
            }) else {
                return Ok(lines);
            };
            if depth >= MAX_INCLUDE_DEPTH {
                return Err(FlattenError::IncludeDepthExceeded {
                    path: pending,
                    depth: MAX_INCLUDE_DEPTH,
                });
            }
            lines = self.expand_once(lines)?;
            depth += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::lines;
    use std::fs;
    use tempfile::TempDir;

    fn utf8() -> &'static Encoding {
        encoding_rs::UTF_8
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("write fragment");
    }

    #[test]
    fn expands_multi_line_fragment() {
        let dir = TempDir::new().unwrap();
        write(&dir, "frag.md", "one\ntwo\nthree\n");
        let f = IncludeFilter::new(dir.path(), utf8());
        let out = f.run(lines(&["before", "{!frag.md!}", "after"])).unwrap();
        assert_eq!(out, vec!["before", "one", "two", "three", "after"]);
    }

    #[test]
    fn splices_prefix_and_suffix_text() {
        let dir = TempDir::new().unwrap();
        write(&dir, "frag.md", "one\ntwo\n");
        let f = IncludeFilter::new(dir.path(), utf8());
        let out = f.run(lines(&["pre {!frag.md!} post"])).unwrap();
        assert_eq!(out, vec!["pre one", "two post"]);
    }

    #[test]
    fn single_line_fragment_stays_inline() {
        let dir = TempDir::new().unwrap();
        write(&dir, "v.md", "1.2.3\n");
        let f = IncludeFilter::new(dir.path(), utf8());
        let out = f.run(lines(&["Version {!v.md!} released"])).unwrap();
        assert_eq!(out, vec!["Version 1.2.3 released"]);
    }

    #[test]
    fn nested_includes_expand() {
        let dir = TempDir::new().unwrap();
        write(&dir, "outer.md", "o1\n{!inner.md!}\no2\n");
        write(&dir, "inner.md", "i1\n");
        let f = IncludeFilter::new(dir.path(), utf8());
        let out = f.run(lines(&["{!outer.md!}"])).unwrap();
        assert_eq!(out, vec!["o1", "i1", "o2"]);
    }

    #[test]
    fn missing_fragment_is_fatal() {
        let dir = TempDir::new().unwrap();
        let f = IncludeFilter::new(dir.path(), utf8());
        let err = f.run(lines(&["{!nope.md!}"])).unwrap_err();
        assert!(matches!(err, FlattenError::IncludeUnreadable { .. }));
    }

    #[test]
    fn include_cycle_hits_depth_limit() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "{!b.md!}\n");
        write(&dir, "b.md", "{!a.md!}\n");
        let f = IncludeFilter::new(dir.path(), utf8());
        let err = f.run(lines(&["{!a.md!}"])).unwrap_err();
        assert!(matches!(err, FlattenError::IncludeDepthExceeded { .. }));
    }

    #[test]
    fn no_directives_is_identity() {
        let dir = TempDir::new().unwrap();
        let f = IncludeFilter::new(dir.path(), utf8());
        let input = lines(&["plain", "text"]);
        assert_eq!(f.run(input.clone()).unwrap(), input);
    }
}
