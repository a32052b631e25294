//! AnalysisHost — per-document tree state for the IDE layer.
//!
//! The host owns the latest tree for every open document and reparses
//! incrementally on each change. Trees are handed out as `Arc<Tree>`
//! snapshots, so a caller holding one across an await keeps a consistent
//! (possibly outdated) view.
//!
//! ## Usage
//!
//! ```ignore
//! let runtime = build_runtime(&RuntimeConfig::from_env())?;
//! runtime.initialize().await?;
//!
//! let mut host = AnalysisHost::new(runtime);
//! host.set_document("file:///welcome.blade.php", 1, "@if($a)\n@endif")?;
//! let diagnostics = host.diagnostics("file:///welcome.blade.php");
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::edit::{apply_edit, compute_edit};
use crate::query::{QueryEngine, QueryName};
use crate::runtime::{RuntimeError, RuntimeHandle};
use crate::tree::{Node, Tree};

use super::context::{CompletionContext, completion_context};
use super::diagnostics::{DiagnosticInfo, get_diagnostics_with};
use super::directives::DirectiveRegistry;

struct Document {
    version: i32,
    tree: Arc<Tree>,
}

/// Owns the parsed documents and the runtime that parses them.
pub struct AnalysisHost {
    runtime: RuntimeHandle,
    queries: QueryEngine,
    registry: DirectiveRegistry,
    documents: FxHashMap<String, Document>,
}

impl AnalysisHost {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            queries: QueryEngine::new(Arc::clone(&runtime)),
            runtime,
            registry: DirectiveRegistry::builtin(),
            documents: FxHashMap::default(),
        }
    }

    /// Replace the directive registry used for diagnostics.
    pub fn set_registry(&mut self, registry: DirectiveRegistry) {
        self.registry = registry;
    }

    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    /// Store `text` as version `version` of `uri`.
    ///
    /// Returns `Ok(false)` when `version` is older than the stored one and the
    /// update was ignored. On a parse error the previous snapshot is kept.
    pub fn set_document(
        &mut self,
        uri: &str,
        version: i32,
        text: &str,
    ) -> Result<bool, RuntimeError> {
        let previous = self.documents.get(uri);
        if let Some(doc) = previous
            && version < doc.version
        {
            debug!(uri, version, current = doc.version, "ignoring stale document version");
            return Ok(false);
        }

        let seed = match previous {
            Some(doc) => match compute_edit(doc.tree.source(), text) {
                None => {
                    let tree = Arc::clone(&doc.tree);
                    self.documents.insert(uri.to_string(), Document { version, tree });
                    return Ok(true);
                }
                Some(edit) if doc.tree.supports_edit() => {
                    let mut tree = Tree::clone(&doc.tree);
                    apply_edit(&mut tree, &edit).then_some(tree)
                }
                Some(_) => None,
            },
            None => None,
        };

        let tree = self.runtime.parse(text, seed.as_ref())?;
        self.documents.insert(
            uri.to_string(),
            Document {
                version,
                tree: Arc::new(tree),
            },
        );
        Ok(true)
    }

    pub fn remove_document(&mut self, uri: &str) -> bool {
        self.documents.remove(uri).is_some()
    }

    pub fn has_document(&self, uri: &str) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn version(&self, uri: &str) -> Option<i32> {
        self.documents.get(uri).map(|doc| doc.version)
    }

    /// Snapshot of the current tree.
    pub fn tree(&self, uri: &str) -> Option<Arc<Tree>> {
        self.documents.get(uri).map(|doc| Arc::clone(&doc.tree))
    }

    pub fn diagnostics(&self, uri: &str) -> Option<Vec<DiagnosticInfo>> {
        self.documents
            .get(uri)
            .map(|doc| get_diagnostics_with(&doc.tree, &self.registry))
    }

    pub fn completion_context(
        &self,
        uri: &str,
        row: usize,
        column: usize,
    ) -> Option<CompletionContext<'_>> {
        self.documents
            .get(uri)
            .map(|doc| completion_context(&doc.tree, row, column))
    }

    /// Run a bank query over the current tree.
    pub fn query(&self, uri: &str, name: QueryName) -> Option<Vec<Node<'_>>> {
        self.documents.get(uri).map(|doc| self.queries.run(name, &doc.tree))
    }
}
