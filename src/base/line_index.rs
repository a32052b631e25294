//! Byte offset ↔ row/column conversion.

use super::Position;

/// Line start table for a source snapshot.
///
/// Rows break on `\n` only, the same rule the grammar engine uses, so positions
/// computed here line up with node positions reported by parsed trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Number of rows (a trailing newline opens an empty last row).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let row = match self.line_starts.binary_search(&offset) {
            Ok(row) => row,
            Err(next) => next - 1,
        };
        Position::new(row, offset - self.line_starts[row])
    }

    /// Convert a position back to a byte offset, clamping columns to the row.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let start = *self.line_starts.get(position.row)?;
        let row_end = self
            .line_starts
            .get(position.row + 1)
            .map(|next| next - 1)
            .unwrap_or(self.len);
        Some((start + position.column).min(row_end))
    }

    /// Byte offset where `row` starts.
    pub fn line_start(&self, row: usize) -> Option<usize> {
        self.line_starts.get(row).copied()
    }
}

/// Position of `offset` in `text` computed by scanning line breaks.
pub(crate) fn position_at(text: &str, offset: usize) -> Position {
    let prefix = &text.as_bytes()[..offset.min(text.len())];
    let row = prefix.iter().filter(|&&b| b == b'\n').count();
    let line_start = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    Position::new(row, prefix.len() - line_start)
}
