//! Include-directive exclusion.
//!
//! Some fragments make sense on the website but not in a flat document
//! (download tables, interactive widgets, release feeds). Lines whose
//! include directive matches one of the configured glob patterns are
//! dropped before the expander ever sees them, so the fragment is neither
//! read nor inlined.

use crate::error::FlattenError;
use crate::pipeline::include::RE_INCLUDE;
use crate::pipeline::LineFilter;
use regex::Regex;

/// Drops lines whose `{!path!}` directive matches an exclude pattern.
pub struct ExcludeFilter {
    patterns: Vec<Regex>,
}

impl ExcludeFilter {
    /// Patterns use glob syntax: `*` matches any run of characters,
    /// `?` a single character; everything else is literal.
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| glob_to_regex(p)).collect(),
        }
    }

    fn is_excluded(&self, target: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(target))
    }
}

fn glob_to_regex(pattern: &str) -> Regex {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).expect("escaped glob pattern is a valid regex")
}

impl LineFilter for ExcludeFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        Ok(lines
            .into_iter()
            .filter(|line| {
                !RE_INCLUDE
                    .captures(line)
                    .is_some_and(|caps| self.is_excluded(&caps[1]))
            })
            .collect())
    }
}
