//! Result types returned by the conversion entry points.

use serde::{Deserialize, Serialize};

/// The flattened document plus run statistics.
#[derive(Debug, Clone, Serialize)]
pub struct FlattenOutput {
    /// The finished document as lines, no trailing newlines.
    pub lines: Vec<String>,
    pub stats: FlattenStats,
}

impl FlattenOutput {
    /// The document as a single string, newline-terminated.
    pub fn markdown(&self) -> String {
        let mut s = self.lines.join("\n");
        s.push('\n');
        s
    }
}

/// Statistics for a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlattenStats {
    /// Pages flattened into the document.
    pub pages: usize,
    /// Lines in the finished document.
    pub lines: usize,
    /// Wall-clock duration of the whole run.
    pub duration_ms: u64,
}
