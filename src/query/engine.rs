use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::bank::{QueryName, query_for_type};
use crate::runtime::{CompiledQuery, RuntimeHandle};
use crate::tree::{Node, Tree};

/// Runs bank queries, compiling each at most once per engine.
///
/// Compiled and manual paths return the same node set; only order may differ.
pub struct QueryEngine {
    runtime: RuntimeHandle,
    /// Query source → compiled query, or `None` once compilation failed.
    cache: Mutex<FxHashMap<String, Option<Arc<CompiledQuery>>>>,
}

impl QueryEngine {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            runtime,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn run<'t>(&self, name: QueryName, tree: &'t Tree) -> Vec<Node<'t>> {
        self.execute(name.source(), name.fallback_kinds(), tree)
    }

    /// All named nodes of `kind`, via [`query_for_type`].
    pub fn nodes_of_type<'t>(&self, kind: &str, tree: &'t Tree) -> Vec<Node<'t>> {
        self.execute(&query_for_type(kind), &[kind], tree)
    }

    fn execute<'t>(&self, source: &str, kinds: &[&str], tree: &'t Tree) -> Vec<Node<'t>> {
        if let Some(query) = self.compiled(source) {
            if let Some(nodes) = query.captures(tree) {
                return nodes;
            }
            debug!(query = source, "tree has no reusable engine tree, walking manually");
        }
        collect_kinds(tree, kinds)
    }

    fn compiled(&self, source: &str) -> Option<Arc<CompiledQuery>> {
        if let Some(cached) = self.cache.lock().get(source) {
            return cached.clone();
        }

        match self.runtime.compile_query(source) {
            Ok(query) => {
                let query = Arc::new(query);
                self.cache.lock().insert(source.to_string(), Some(Arc::clone(&query)));
                Some(query)
            }
            Err(err) if err.is_query_fallback() => {
                debug!(
                    query = source,
                    backend = self.runtime.name(),
                    error = %err,
                    "query unavailable, falling back to manual walk"
                );
                self.cache.lock().insert(source.to_string(), None);
                None
            }
            Err(err) => {
                // Runtime not ready yet; try compiling again next time.
                debug!(
                    query = source,
                    error = %err,
                    "query not compiled, falling back to manual walk"
                );
                None
            }
        }
    }
}

/// Named nodes whose kind is in `kinds`, in document order.
pub fn collect_kinds<'t>(tree: &'t Tree, kinds: &[&str]) -> Vec<Node<'t>> {
    tree.root()
        .descendants()
        .filter(|n| n.is_named() && kinds.contains(&n.kind()))
        .collect()
}
