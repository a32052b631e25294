//! Edit-diff engine.
//!
//! Turns two full-text snapshots into the single contiguous edit that maps one
//! onto the other, in the shape the grammar engine needs to reuse unchanged
//! subtrees during an incremental reparse.

use crate::base::{Position, position_at};
use crate::tree::Tree;

/// A text-patch descriptor: bytes `start_byte..old_end_byte` of the old text
/// were replaced by bytes `start_byte..new_end_byte` of the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextEdit {
    pub start_byte: usize,
    pub old_end_byte: usize,
    pub new_end_byte: usize,
    pub start_position: Position,
    pub old_end_position: Position,
    pub new_end_position: Position,
}

impl TextEdit {
    /// Rebuild the new text from the old text and the replacement region of the new one.
    pub fn splice(&self, old_text: &str, new_text: &str) -> String {
        let mut out = String::with_capacity(new_text.len());
        out.push_str(&old_text[..self.start_byte]);
        out.push_str(&new_text[self.start_byte..self.new_end_byte]);
        out.push_str(&old_text[self.old_end_byte..]);
        out
    }

    /// Net change in document length.
    pub fn delta(&self) -> isize {
        self.new_end_byte as isize - self.old_end_byte as isize
    }

    pub(crate) fn to_input_edit(self) -> tree_sitter::InputEdit {
        tree_sitter::InputEdit {
            start_byte: self.start_byte,
            old_end_byte: self.old_end_byte,
            new_end_byte: self.new_end_byte,
            start_position: self.start_position.into(),
            old_end_position: self.old_end_position.into(),
            new_end_position: self.new_end_position.into(),
        }
    }
}

/// Compute the minimal contiguous edit turning `old_text` into `new_text`.
///
/// Returns `None` when the texts are identical. The common prefix and suffix
/// never overlap beyond the shorter text, and both are trimmed back to UTF-8
/// character boundaries so every offset in the result slices cleanly.
pub fn compute_edit(old_text: &str, new_text: &str) -> Option<TextEdit> {
    if old_text == new_text {
        return None;
    }

    let old = old_text.as_bytes();
    let new = new_text.as_bytes();
    let shorter = old.len().min(new.len());

    let mut prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    while prefix > 0 && !(old_text.is_char_boundary(prefix) && new_text.is_char_boundary(prefix)) {
        prefix -= 1;
    }

    let max_suffix = shorter - prefix;
    let mut suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();
    while suffix > 0
        && !(old_text.is_char_boundary(old.len() - suffix)
            && new_text.is_char_boundary(new.len() - suffix))
    {
        suffix -= 1;
    }

    let start_byte = prefix;
    let old_end_byte = old.len() - suffix;
    let new_end_byte = new.len() - suffix;

    Some(TextEdit {
        start_byte,
        old_end_byte,
        new_end_byte,
        start_position: position_at(old_text, start_byte),
        old_end_position: position_at(old_text, old_end_byte),
        new_end_position: position_at(new_text, new_end_byte),
    })
}

/// Apply `edit` to `tree` in place so it can seed an incremental reparse.
///
/// Returns `false` when the tree cannot be edited; the caller then reparses
/// from scratch. Correctness never depends on this path.
pub fn apply_edit(tree: &mut Tree, edit: &TextEdit) -> bool {
    let applied = tree.edit(edit);
    if !applied {
        tracing::trace!("tree has no engine tree, edit not applied");
    }
    applied
}
