//! Pipe-table to grid-table conversion.
//!
//! Pandoc's grid tables are the only table form that survives word-wrap in
//! fixed-width output, so every pipe table in the document is reflowed into
//! one. The work splits into three stages, each in its own module:
//!
//! * [`blocks`] — partition the document into fenced-code and text blocks;
//!   only text blocks can hold tables.
//! * [`widths`] — balance the configured target width across columns from
//!   the measured cell and word maxima.
//! * [`wrap`] — wrap rows to the assigned widths and draw the borders.
//!
//! This module ties them together: detect pipe tables, split rows on `|`,
//! measure columns, drop the divider row, and render. Anything that is not
//! a pipe table — no divider row, fenced code, prose that merely contains
//! pipes — is emitted byte-for-byte unchanged.

pub mod blocks;
pub mod widths;
pub mod wrap;

use crate::config::{DEFAULT_ROGUE_WIDTH, DEFAULT_TARGET_WIDTH};
use crate::error::FlattenError;
use crate::pipeline::LineFilter;
use blocks::{segment, Block, BlockKind};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use widths::balance_widths;
use wrap::{ruler_line, wrap_row};

/// Markdown link whose label should stand in for the whole token when
/// measuring word width — long URLs must not inflate a column.
static RE_LINK_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]*)\]\([^)]*\)").expect("link regex"));

/// Converts pipe tables to fixed-width grid tables.
pub struct TableFilter {
    target_width: usize,
    rogue_width: usize,
}

impl Default for TableFilter {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_WIDTH, DEFAULT_ROGUE_WIDTH)
    }
}

impl TableFilter {
    pub fn new(target_width: usize, rogue_width: usize) -> Self {
        Self {
            target_width,
            rogue_width,
        }
    }

    fn convert_block(&self, block: Block) -> Vec<String> {
        if block.kind != BlockKind::Text || !is_pipe_table(&block.lines) {
            return block.lines;
        }
        self.convert_table(&block.lines)
    }

    /// Reflow one detected pipe table.
    fn convert_table(&self, lines: &[String]) -> Vec<String> {
        let bordered = lines
            .first()
            .is_some_and(|l| l.starts_with('|'));
        let header_cols = lines
            .first()
            .map(|l| split_row(l, bordered).len())
            .unwrap_or(0);

        let mut widest_cell = vec![0usize; header_cols];
        let mut widest_word = vec![0usize; header_cols];
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(lines.len());

        for line in lines {
            let row = split_row(line, bordered);
            for (i, cell) in row.iter().enumerate().take(header_cols) {
                let cell_width = cell.chars().count();
                if cell_width > widest_cell[i] {
                    widest_cell[i] = cell_width;
                }
                for word in cell.split_whitespace() {
                    let word_width = measured_word(word).chars().count();
                    if word_width > widest_word[i] {
                        widest_word[i] = word_width;
                    }
                }
            }
            rows.push(row);
        }

        // The divider carries no content; it was only measured so its
        // dashes count toward widest_cell, as they always have.
        rows.remove(1);

        let plan = balance_widths(&widest_cell, &widest_word, self.target_width);
        if plan.has_overflow() {
            debug!(
                "table column(s) narrower than their widest word: {:?}",
                plan.overflow
            );
        }

        let mut out = Vec::new();
        out.push(ruler_line(&plan.widths, '-'));

        let mut data = rows.into_iter();
        if let Some(header) = data.next() {
            if !row_is_blank(&header) {
                out.extend(wrap_row(&plan.widths, self.rogue_width, &header));
                out.push(ruler_line(&plan.widths, '='));
            }
        }

        for row in data {
            if row_is_blank(&row) {
                continue;
            }
            out.extend(wrap_row(&plan.widths, self.rogue_width, &row));
            out.push(ruler_line(&plan.widths, '-'));
        }

        out.push(String::new());
        out
    }
}

impl LineFilter for TableFilter {
    fn run(&self, lines: Vec<String>) -> Result<Vec<String>, FlattenError> {
        let mut out = Vec::with_capacity(lines.len());
        for block in segment(&lines) {
            out.extend(self.convert_block(block));
        }
        Ok(out)
    }
}

/// Whether a block's first two lines form a pipe-table header + divider.
///
/// This is the definitional check: the divider row must consist solely of
/// dashes, colons, pipes and whitespace, contain at least one of each of
/// `-` and `|`, and open with one of `|:-`. Nothing else about the block
/// is inspected; malformed later rows are tolerated, not rejected.
fn is_pipe_table(lines: &[String]) -> bool {
    let (Some(header), Some(divider)) = (lines.first(), lines.get(1)) else {
        return false;
    };
    header.contains('|')
        && divider.contains('|')
        && divider.contains('-')
        && matches!(divider.trim_start().chars().next(), Some('|' | ':' | '-'))
        && divider
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

/// Split a row on `|`, trimming cells. For bordered tables the outer
/// pipes are shed first so they do not produce empty edge cells.
fn split_row(line: &str, bordered: bool) -> Vec<String> {
    let mut content = line;
    if bordered {
        content = content.strip_prefix('|').unwrap_or(content);
        content = content.strip_suffix('|').unwrap_or(content);
    }
    content.split('|').map(|c| c.trim().to_string()).collect()
}

/// The measurable part of a token: a markdown link collapses to its label.
fn measured_word(word: &str) -> &str {
    match RE_LINK_WORD.captures(word) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(word),
        None => word,
    }
}

fn row_is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.is_empty())
}
