//! Arena construction for [`Tree`].
//!
//! The runtime converter feeds engine nodes through this builder, and tests use
//! it directly to describe grammar shapes without loading a grammar.

use std::ops::Range;
use std::sync::Arc;

use smol_str::SmolStr;

use super::{ERROR_KIND, NodeData, NodeId, Tree};
use crate::base::LineIndex;

/// Builds a [`Tree`] from nested open/close calls in document order.
///
/// ```
/// use blade_syntax::tree::TreeBuilder;
///
/// let mut b = TreeBuilder::new("@csrf");
/// b.open("document", 0);
/// b.leaf("directive", 0..5);
/// b.close(5);
/// let tree = b.finish();
/// assert_eq!(tree.to_sexp(), "(document (directive))");
/// ```
pub struct TreeBuilder {
    source: Arc<str>,
    index: LineIndex,
    nodes: Vec<NodeData>,
    /// Engine-reported `has_error`, when known. `None` means derive it.
    reported_errors: Vec<Option<bool>>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let index = LineIndex::new(&source);
        Self {
            source,
            index,
            nodes: Vec::new(),
            reported_errors: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Open a named node starting at `start`; children follow until [`close`](Self::close).
    pub fn open(&mut self, kind: &str, start: usize) -> NodeId {
        let id = self.push(kind, start..start, true, false, None);
        self.stack.push(id);
        id
    }

    /// Close the innermost open node at `end`.
    pub fn close(&mut self, end: usize) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let end = end.min(self.source.len());
        let position = self.index.position(end);
        let node = &mut self.nodes[id.index()];
        node.end_byte = end.max(node.start_byte);
        node.end = position.max(node.start);
        Some(id)
    }

    /// Add a named childless node.
    pub fn leaf(&mut self, kind: &str, range: Range<usize>) -> NodeId {
        self.push(kind, range, true, false, None)
    }

    /// Add an anonymous token such as `<` or `{{`.
    pub fn token(&mut self, kind: &str, range: Range<usize>) -> NodeId {
        self.push(kind, range, false, false, None)
    }

    /// Add a zero-width node for an expected-but-absent token.
    pub fn missing(&mut self, kind: &str, at: usize) -> NodeId {
        self.push(kind, at..at, true, true, None)
    }

    /// Open a node whose flags were reported by the engine.
    pub(crate) fn open_reported(
        &mut self,
        kind: &str,
        start: usize,
        named: bool,
        has_error: bool,
    ) -> NodeId {
        let id = self.push(kind, start..start, named, false, Some(has_error));
        self.stack.push(id);
        id
    }

    /// Add a childless node whose flags were reported by the engine.
    pub(crate) fn leaf_reported(
        &mut self,
        kind: &str,
        range: Range<usize>,
        named: bool,
        missing: bool,
        has_error: bool,
    ) -> NodeId {
        self.push(kind, range, named, missing, Some(has_error))
    }

    fn push(
        &mut self,
        kind: &str,
        range: Range<usize>,
        named: bool,
        missing: bool,
        reported_error: Option<bool>,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let start = range.start.min(self.source.len());
        let end = range.end.clamp(start, self.source.len());
        let parent = self.stack.last().copied();
        self.nodes.push(NodeData {
            kind: SmolStr::new(kind),
            start_byte: start,
            end_byte: end,
            start: self.index.position(start),
            end: self.index.position(end),
            parent,
            children: Vec::new(),
            named,
            missing,
            has_error: false,
        });
        self.reported_errors.push(reported_error);
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    /// Close anything still open at end-of-source and produce the tree.
    pub fn finish(mut self) -> Tree {
        while !self.stack.is_empty() {
            let end = self.source.len();
            self.close(end);
        }
        if self.nodes.is_empty() {
            let end = self.source.len();
            self.push("document", 0..end, true, false, None);
        }

        // Children always follow their parent in the arena, so a reverse sweep
        // sees every child before the node that owns it.
        for index in (0..self.nodes.len()).rev() {
            let derived = {
                let node = &self.nodes[index];
                node.kind == ERROR_KIND
                    || node.missing
                    || node.children.iter().any(|c| self.nodes[c.index()].has_error)
            };
            self.nodes[index].has_error = self.reported_errors[index].unwrap_or(derived);
        }

        Tree::from_parts(self.source, self.nodes)
    }
}
