//! Error types for parser runtimes.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by a [`ParserRuntime`](super::ParserRuntime).
///
/// Initialization outcomes are cached per runtime instance and handed to every
/// caller, so the error is `Clone`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// No candidate path held the grammar artifact.
    #[error("grammar artifact `{artifact}` not found; searched: {}", join_paths(.candidates))]
    ArtifactNotFound {
        artifact: String,
        candidates: Vec<PathBuf>,
    },

    /// The artifact exists but could not be loaded.
    #[error("failed to load grammar from {}: {message}", .path.display())]
    GrammarLoad { path: PathBuf, message: String },

    /// The grammar was built for an ABI this engine does not accept.
    #[error("incompatible grammar: {0}")]
    IncompatibleLanguage(String),

    /// The backend was compiled out of this build.
    #[error("{0} backend is not available in this build")]
    BackendUnavailable(&'static str),

    /// `parse`/`compile_query` was called before `initialize()` completed.
    #[error("{backend} parser runtime used before initialize() completed")]
    NotInitialized { backend: &'static str },

    /// The engine returned no tree.
    #[error("{backend} parser produced no tree")]
    ParseFailed { backend: &'static str },

    /// Compiled queries are switched off or unsupported by this backend.
    #[error("{backend} runtime does not support compiled queries")]
    QueryUnsupported { backend: &'static str },

    /// The query source did not compile against the loaded grammar.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl RuntimeError {
    pub fn grammar_load(path: &Path, message: impl Into<String>) -> Self {
        Self::GrammarLoad {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Whether callers should fall back to a manual tree walk.
    pub fn is_query_fallback(&self) -> bool {
        matches!(self, Self::QueryUnsupported { .. } | Self::InvalidQuery(_))
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no candidates)".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
