//! Foundation types for blade-syntax.
//!
//! This module provides the positional primitives used throughout the crate:
//! - [`Position`], [`Span`] - row/column locations (tree-sitter `Point` convention)
//! - [`LineIndex`] - byte offset to row/column conversion
//!
//! This module has NO dependencies on other blade-syntax modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub(crate) use line_index::position_at;
pub use position::{Position, Span};
