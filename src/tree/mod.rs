//! Node/Tree contract — the structural view every backend produces.
//!
//! A [`Tree`] owns a flat arena of nodes for one document snapshot together with
//! the source text it was built from. [`Node`] is a borrowed, `Copy` view into
//! that arena; parent links are plain [`NodeId`] indices, so node lifetime is
//! owned entirely by the tree.
//!
//! Trees produced by a parser runtime also carry the engine tree, which is what
//! makes in-place editing and changed-range queries possible. Hand-built trees
//! (see [`TreeBuilder`]) have no engine tree and always require a full reparse.

mod builder;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{Position, Span};
use crate::edit::TextEdit;

pub use builder::TreeBuilder;

/// Kind reported for unparseable regions.
pub const ERROR_KIND: &str = "ERROR";

/// Index of a node inside its [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: SmolStr,
    pub(crate) start_byte: usize,
    pub(crate) end_byte: usize,
    pub(crate) start: Position,
    pub(crate) end: Position,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) named: bool,
    pub(crate) missing: bool,
    pub(crate) has_error: bool,
}

/// The engine tree a runtime produced, kept so the next parse can reuse it.
#[derive(Clone)]
pub(crate) struct EngineTree {
    pub(crate) tree: tree_sitter::Tree,
    /// Engine node id → arena id, valid until the tree is edited.
    pub(crate) ids: FxHashMap<usize, NodeId>,
    pub(crate) edited: bool,
}

/// A parsed document snapshot.
#[derive(Clone)]
pub struct Tree {
    source: Arc<str>,
    nodes: Vec<NodeData>,
    engine: Option<EngineTree>,
}

impl Tree {
    pub(crate) fn from_parts(source: Arc<str>, nodes: Vec<NodeData>) -> Self {
        Self {
            source,
            nodes,
            engine: None,
        }
    }

    pub(crate) fn with_engine(
        mut self,
        tree: tree_sitter::Tree,
        ids: FxHashMap<usize, NodeId>,
    ) -> Self {
        self.engine = Some(EngineTree {
            tree,
            ids,
            edited: false,
        });
        self
    }

    pub(crate) fn engine(&self) -> Option<&EngineTree> {
        self.engine.as_ref()
    }

    /// The root node. Every tree has one, even for empty sources.
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId::new(0),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// The source snapshot this tree was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn source_arc(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    /// Number of nodes, anonymous tokens included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether this tree can be edited in place and reused by an incremental parse.
    pub fn supports_edit(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether [`Tree::edit`] has been applied since the tree was produced.
    pub fn is_edited(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.edited)
    }

    /// Shift every range in the tree to account for `edit`.
    ///
    /// Returns `false` without touching anything when the tree has no engine tree.
    pub(crate) fn edit(&mut self, edit: &TextEdit) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        engine.tree.edit(&edit.to_input_edit());
        engine.edited = true;

        for node in &mut self.nodes {
            let (start_byte, start) = shift(node.start_byte, node.start, edit);
            let (end_byte, end) = shift(node.end_byte, node.end, edit);
            node.start_byte = start_byte;
            node.start = start;
            node.end_byte = end_byte;
            node.end = end;
        }
        true
    }

    /// Ranges whose syntactic structure differs between `self` (an edited old
    /// tree) and `new`. `None` when either tree lacks engine support.
    pub fn changed_ranges(&self, new: &Tree) -> Option<Vec<Span>> {
        let old = self.engine.as_ref()?;
        let new = new.engine.as_ref()?;
        Some(
            old.tree
                .changed_ranges(&new.tree)
                .map(|range| Span::new(range.start_point.into(), range.end_point.into()))
                .collect(),
        )
    }

    /// S-expression of the named nodes, in the engine's notation.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        write_sexp(self.root(), &mut out);
        out
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("source_len", &self.source.len())
            .field("engine", &self.engine.is_some())
            .finish()
    }
}

fn shift(byte: usize, point: Position, edit: &TextEdit) -> (usize, Position) {
    if byte >= edit.old_end_byte {
        let shifted = byte - edit.old_end_byte + edit.new_end_byte;
        let point = if point.row == edit.old_end_position.row {
            Position::new(
                edit.new_end_position.row,
                edit.new_end_position.column
                    + point.column.saturating_sub(edit.old_end_position.column),
            )
        } else {
            Position::new(
                point.row - edit.old_end_position.row + edit.new_end_position.row,
                point.column,
            )
        };
        (shifted, point)
    } else if byte > edit.start_byte {
        (byte.min(edit.new_end_byte), point.min(edit.new_end_position))
    } else {
        (byte, point)
    }
}

fn write_sexp(node: Node<'_>, out: &mut String) {
    if node.is_missing() {
        out.push_str("(MISSING ");
        out.push_str(node.kind());
        out.push(')');
        return;
    }
    out.push('(');
    out.push_str(node.kind());
    for child in node.children().filter(|c| c.is_named() || c.is_missing()) {
        out.push(' ');
        write_sexp(child, out);
    }
    out.push(')');
}

// ============================================================================
// NODE VIEW
// ============================================================================

/// A borrowed view of one node in a [`Tree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        self.tree.data(self.id)
    }

    fn wrap(&self, id: NodeId) -> Node<'t> {
        Node { tree: self.tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    /// Grammar tag, e.g. `"directive"` or `"ERROR"`.
    pub fn kind(&self) -> &'t str {
        &self.data().kind
    }

    /// Source slice covered by this node. Empty if the tree was edited past it.
    pub fn text(&self) -> &'t str {
        self.tree
            .source
            .get(self.data().start_byte..self.data().end_byte)
            .unwrap_or("")
    }

    pub fn start_byte(&self) -> usize {
        self.data().start_byte
    }

    pub fn end_byte(&self) -> usize {
        self.data().end_byte
    }

    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.data().start_byte..self.data().end_byte
    }

    pub fn start_position(&self) -> Position {
        self.data().start
    }

    pub fn end_position(&self) -> Position {
        self.data().end
    }

    pub fn span(&self) -> Span {
        Span::new(self.data().start, self.data().end)
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn child(&self, index: usize) -> Option<Node<'t>> {
        self.data().children.get(index).map(|&id| self.wrap(id))
    }

    pub fn first_child(&self) -> Option<Node<'t>> {
        self.child(0)
    }

    pub fn last_child(&self) -> Option<Node<'t>> {
        self.data().children.last().map(|&id| self.wrap(id))
    }

    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = Node<'t>> + ExactSizeIterator + use<'t> {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| Node { tree, id })
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.wrap(id))
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors<'t> {
        Ancestors { next: self.parent() }
    }

    /// This node followed by its ancestors.
    pub fn self_and_ancestors(&self) -> Ancestors<'t> {
        Ancestors { next: Some(*self) }
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'t> {
        Descendants { stack: vec![*self] }
    }

    pub fn prev_sibling(&self) -> Option<Node<'t>> {
        let parent = self.parent()?;
        let siblings = &parent.data().children;
        let index = siblings.iter().position(|&id| id == self.id)?;
        index.checked_sub(1).map(|i| self.wrap(siblings[i]))
    }

    pub fn next_sibling(&self) -> Option<Node<'t>> {
        let parent = self.parent()?;
        let siblings = &parent.data().children;
        let index = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(index + 1).map(|&id| self.wrap(id))
    }

    /// True if this node or any descendant is an error or missing node.
    pub fn has_error(&self) -> bool {
        self.data().has_error
    }

    /// True if the engine inserted this node for an expected-but-absent token.
    pub fn is_missing(&self) -> bool {
        self.data().missing
    }

    pub fn is_error(&self) -> bool {
        self.kind() == ERROR_KIND
    }

    pub fn is_named(&self) -> bool {
        self.data().named
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}:{} - {}:{}]",
            self.kind(),
            self.start_position().row,
            self.start_position().column,
            self.end_position().row,
            self.end_position().column
        )
    }
}

/// Iterator over parent links.
pub struct Ancestors<'t> {
    next: Option<Node<'t>>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'t> {
    stack: Vec<Node<'t>>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}
