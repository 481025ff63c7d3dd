//! Block segmentation: partition a line sequence into fenced-code and
//! plain-text blocks.
//!
//! Blocks are the unit of table detection — a pipe character inside a
//! fenced code listing must never start a table. The automaton has three
//! states: `Start` (no block open), `Text`, and `Fence`. `Start` opens a
//! block on every line; `Text` closes on a blank line; `Fence` closes on a
//! fence-marker line. The closing line (blank or fence marker) belongs to
//! the block it closes, so the blocks partition the input exactly.

/// Marker that opens and closes a fenced code block, compared against the
/// first three characters of a line.
pub const FENCE_MARKER: &str = "```";

/// Whether a block holds plain text (table detection applies) or fenced
/// code (always passed through).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Text,
    Fenced,
}

/// A maximal run of lines in one segmentation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Start,
    Text,
    Fence,
}

/// Partition `lines` into blocks, preserving order and every line.
///
/// A fence opened but never closed extends to the end of input.
pub fn segment(lines: &[String]) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut state = State::Start;

    for line in lines {
        if let State::Start = state {
            let kind = if line.starts_with(FENCE_MARKER) {
                state = State::Fence;
                BlockKind::Fenced
            } else {
                state = State::Text;
                BlockKind::Text
            };
            blocks.push(Block {
                kind,
                lines: vec![line.clone()],
            });
            continue;
        }

        if let Some(block) = blocks.last_mut() {
            block.lines.push(line.clone());
        }
        match state {
            State::Fence if line.starts_with(FENCE_MARKER) => state = State::Start,
            State::Text if line.is_empty() => state = State::Start,
            _ => {}
        }
    }

    blocks
}
