//! Row wrapping and grid rendering primitives.
//!
//! Cells wrap greedily on whitespace; hyphens are not break points, so
//! `well-known` never splits across lines. A single token wider than its
//! column is hard-split at the column boundary — ugly, but the only option
//! once width balancing has given up on it. Widths count Unicode scalar
//! values throughout.

/// Greedy word-wrap of one cell to `width` characters.
///
/// Returns no lines for an all-whitespace cell. A zero column width is
/// treated as one to keep the hard-split loop moving.
pub fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        for piece in split_oversized(word, width) {
            let piece_len = piece.chars().count();
            if current_len == 0 {
                current.push_str(&piece);
                current_len = piece_len;
            } else if current_len + 1 + piece_len <= width {
                current.push(' ');
                current.push_str(&piece);
                current_len += 1 + piece_len;
            } else {
                out.push(std::mem::take(&mut current));
                current.push_str(&piece);
                current_len = piece_len;
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Split a token wider than `width` into `width`-sized chunks; shorter
/// tokens pass through whole.
fn split_oversized(word: &str, width: usize) -> Vec<String> {
    if word.chars().count() <= width {
        return vec![word.to_string()];
    }
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(width)
        .map(|c| c.iter().collect::<String>())
        .collect()
}

/// Left-justify `line` to exactly `width` characters.
pub fn pad(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width {
        line.to_string()
    } else {
        let mut s = String::with_capacity(line.len() + (width - len));
        s.push_str(line);
        s.extend(std::iter::repeat_n(' ', width - len));
        s
    }
}

/// A horizontal ruler: `+`, then `line_char`×(width+2) per column, `+`
/// between and after.
pub fn ruler_line(widths: &[usize], line_char: char) -> String {
    let mut s = String::with_capacity(widths.iter().sum::<usize>() + 3 * widths.len() + 1);
    s.push('+');
    for &w in widths {
        s.extend(std::iter::repeat_n(line_char, w + 2));
        s.push('+');
    }
    s
}

/// Wrap one table row into physical `| ... |` lines.
///
/// Cells at indices beyond `widths` are rogue columns rendered at
/// `rogue_width`. Every column is padded with blank lines up to the
/// tallest column in the row so the row forms a rectangle.
pub fn wrap_row(widths: &[usize], rogue_width: usize, cells: &[String]) -> Vec<String> {
    let col_width = |i: usize| widths.get(i).copied().unwrap_or(rogue_width);

    let mut columns: Vec<Vec<String>> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let w = col_width(i);
            wrap_cell(cell, w)
                .into_iter()
                .map(|l| pad(&l, w))
                .collect()
        })
        .collect();

    let tallest = columns.iter().map(Vec::len).max().unwrap_or(0);
    for (i, column) in columns.iter_mut().enumerate() {
        let blank = " ".repeat(col_width(i));
        while column.len() < tallest {
            column.push(blank.clone());
        }
    }

    (0..tallest)
        .map(|row| {
            let segments: Vec<&str> = columns.iter().map(|c| c[row].as_str()).collect();
            format!("| {} |", segments.join(" | "))
        })
        .collect()
}
