//! Engine tree → arena conversion.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::tree::{ERROR_KIND, Tree, TreeBuilder};

/// Copy every node of `ts_tree` (anonymous tokens included) into a [`Tree`].
///
/// Uses a single cursor walk, so deep documents never recurse.
pub(crate) fn convert(ts_tree: &tree_sitter::Tree, source: Arc<str>) -> Tree {
    let mut builder = TreeBuilder::new(source);
    let mut ids = FxHashMap::default();
    let mut cursor = ts_tree.walk();

    'walk: loop {
        let node = cursor.node();
        let kind = if node.is_error() { ERROR_KIND } else { node.kind() };

        if node.child_count() == 0 {
            let id = builder.leaf_reported(
                kind,
                node.byte_range(),
                node.is_named(),
                node.is_missing(),
                node.has_error(),
            );
            ids.insert(node.id(), id);
        } else {
            let id =
                builder.open_reported(kind, node.start_byte(), node.is_named(), node.has_error());
            ids.insert(node.id(), id);
            if cursor.goto_first_child() {
                continue;
            }
            builder.close(node.end_byte());
        }

        loop {
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
            builder.close(cursor.node().end_byte());
        }
    }

    builder.finish().with_engine(ts_tree.clone(), ids)
}
