//! AST query layer.
//!
//! Position lookup, ancestor walks and bounded subtree search over [`Tree`],
//! plus [`QueryEngine`] which runs the fixed query bank through the runtime
//! and falls back to manual walks when compiled queries are unavailable.

pub mod bank;
mod engine;

use tracing::trace;

use crate::base::Position;
use crate::tree::{Node, Tree};

pub use bank::{QueryName, query_for_type};
pub use engine::{QueryEngine, collect_kinds};

/// Deepest level below the starting node that [`subtree_contains`] inspects.
pub const MAX_SEARCH_DEPTH: usize = 64;
/// Most nodes [`subtree_contains`] visits before giving up.
pub const MAX_SEARCH_NODES: usize = 4096;

/// Deepest node whose span contains `(row, column)`, bounds inclusive.
///
/// Children are tried in order, so a point on the boundary between two
/// siblings resolves to the earlier one. `None` only when the point lies
/// outside the root.
pub fn find_node_at_position(tree: &Tree, row: usize, column: usize) -> Option<Node<'_>> {
    let point = Position::new(row, column);
    let root = tree.root();
    if !root.span().contains(point) {
        return None;
    }

    let mut current = root;
    while let Some(child) = current.children().find(|child| child.span().contains(point)) {
        current = child;
    }
    Some(current)
}

/// Whether any strict ancestor of `node` has kind `kind`.
pub fn has_ancestor_of_type(node: Node<'_>, kind: &str) -> bool {
    node.ancestors().any(|a| a.kind() == kind)
}

/// Nearest strict ancestor satisfying `pred`.
pub fn first_ancestor_matching<'t>(
    node: Node<'t>,
    mut pred: impl FnMut(Node<'t>) -> bool,
) -> Option<Node<'t>> {
    node.ancestors().find(|&a| pred(a))
}

/// Whether `node` or a descendant has kind `kind`. See [`subtree_contains`].
pub fn subtree_contains_type(node: Node<'_>, kind: &str) -> bool {
    subtree_contains(node, |n| n.kind() == kind)
}

/// Depth-first search over `node` and its descendants.
///
/// Stops below [`MAX_SEARCH_DEPTH`] and after [`MAX_SEARCH_NODES`] visits,
/// answering `false` for anything beyond those bounds.
pub fn subtree_contains<'t>(node: Node<'t>, mut pred: impl FnMut(Node<'t>) -> bool) -> bool {
    let mut stack = vec![(node, 0usize)];
    let mut visited = 0usize;

    while let Some((current, depth)) = stack.pop() {
        visited += 1;
        if visited > MAX_SEARCH_NODES {
            trace!(kind = node.kind(), "subtree search budget exhausted");
            return false;
        }
        if pred(current) {
            return true;
        }
        if depth < MAX_SEARCH_DEPTH {
            stack.extend(current.children().rev().map(|child| (child, depth + 1)));
        }
    }
    false
}
