//! Compiled structural queries.

use rustc_hash::FxHashSet;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor};

use crate::tree::{Node, Tree};

/// A pattern compiled against the loaded grammar.
pub struct CompiledQuery {
    query: Query,
}

impl CompiledQuery {
    pub(crate) fn new(query: Query) -> Self {
        Self { query }
    }

    pub fn capture_names(&self) -> &[&str] {
        self.query.capture_names()
    }

    pub fn pattern_count(&self) -> usize {
        self.query.pattern_count()
    }

    /// Every captured node, deduplicated, in match order.
    ///
    /// Returns `None` when `tree` has no engine tree or was edited since it was
    /// produced; callers then walk the arena instead.
    pub fn captures<'t>(&self, tree: &'t Tree) -> Option<Vec<Node<'t>>> {
        let engine = tree.engine().filter(|engine| !engine.edited)?;

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(
            &self.query,
            engine.tree.root_node(),
            tree.source().as_bytes(),
        );

        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let Some(&id) = engine.ids.get(&capture.node.id()) else {
                    continue;
                };
                if seen.insert(id)
                    && let Some(node) = tree.node(id)
                {
                    out.push(node);
                }
            }
        }
        Some(out)
    }
}

impl std::fmt::Debug for CompiledQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledQuery")
            .field("patterns", &self.query.pattern_count())
            .field("captures", &self.query.capture_names())
            .finish()
    }
}
