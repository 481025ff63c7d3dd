//! Table-of-contents generation.
//!
//! `[TOC]` marker lines are replaced by a nested bullet list linking to
//! every Atx header in the document. Headers inside fenced code blocks are
//! ignored — a shell prompt `# comment` in an example is not a chapter.
//!
//! Link targets are GitHub-style slugs of the header text. Duplicate
//! header titles produce duplicate slugs; resolving those is the
//! renderer's problem, not ours.

use crate::error::FlattenError;
use crate::pipeline::LineFilter;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)\s+(.*?)\s*$").expect("header regex"));

static RE_TOC_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[TOC\]\s*$").expect("toc marker regex"));

/// Replaces `[TOC]` markers with a generated table of contents.
pub struct TocFilter;

/// Generate a GitHub-style slug from header text.
///
/// Lowercases ASCII alphanumerics, folds whitespace/`-`/`_` runs into
/// single hyphens, drops everything else.
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn collect_toc(lines: &[String]) -> Vec<String> {
    let mut toc = Vec::new();
    let mut in_fence = false;
    for line in lines {
        if line.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = RE_HEADER.captures(line) {
            let level = caps[1].len();
            let title = &caps[2];
            toc.push(format!(
                "{}- [{}](#{})",
                "    ".repeat(level.saturating_sub(1)),
                title,
                slugify(title)
            ));
        }
    }
    toc
}

impl LineFilter for TocFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        if !lines.iter().any(|l| RE_TOC_MARKER.is_match(l)) {
            return Ok(lines);
        }
        let toc = collect_toc(&lines);
        let mut out = Vec::with_capacity(lines.len() + toc.len());
        for line in lines {
            if RE_TOC_MARKER.is_match(&line) {
                out.extend(toc.iter().cloned());
            } else {
                out.push(line);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::lines;

    #[test]
    fn slugify_basics() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("snake_case_name"), "snake-case-name");
        assert_eq!(slugify("Chapter 1"), "chapter-1");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn marker_replaced_by_header_list() {
        let f = TocFilter;
        let out = f
            .run(lines(&["[TOC]", "", "# One", "text", "## One Sub", "# Two"]))
            .unwrap();
        assert_eq!(
            out,
            vec![
                "- [One](#one)",
                "    - [One Sub](#one-sub)",
                "- [Two](#two)",
                "",
                "# One",
                "text",
                "## One Sub",
                "# Two",
            ]
        );
    }

    #[test]
    fn fenced_headers_excluded() {
        let f = TocFilter;
        let out = f
            .run(lines(&["[TOC]", "```sh", "# not a header", "```", "# Real"]))
            .unwrap();
        assert_eq!(out[0], "- [Real](#real)");
        assert!(!out.iter().any(|l| l.contains("not a header")));
    }

    #[test]
    fn no_marker_is_identity() {
        let f = TocFilter;
        let input = lines(&["# One", "text"]);
        assert_eq!(f.run(input.clone()).unwrap(), input);
    }

    #[test]
    fn indented_marker_recognised() {
        let f = TocFilter;
        let out = f.run(lines(&["  [TOC]  ", "# H"])).unwrap();
        assert_eq!(out, vec!["- [H](#h)", "# H"]);
    }
}
