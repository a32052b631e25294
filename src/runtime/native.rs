//! In-process grammar adapter.
//!
//! The grammar is either linked into the binary (a [`Language`] handed to
//! [`NativeRuntime::new`]) or loaded from a compiled shared library found on
//! the artifact search path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use libloading::{Library, Symbol};
use tokio::sync::OnceCell;
use tracing::{info, warn};
use tree_sitter::Language;
use tree_sitter_language::LanguageFn;

use super::artifact::{LANGUAGE_SYMBOL, library_file_name, resolve_artifact};
use super::engine::Engine;
use super::{CompiledQuery, ParserRuntime, RuntimeError};
use crate::tree::Tree;

const BACKEND: &str = "native";

enum GrammarSource {
    Linked(Language),
    Library {
        candidates: Vec<PathBuf>,
        symbol: String,
    },
}

/// Parser runtime backed by native grammar code.
pub struct NativeRuntime {
    source: GrammarSource,
    queries_enabled: bool,
    engine: OnceCell<Result<Engine, RuntimeError>>,
}

impl NativeRuntime {
    /// Use a grammar linked into the binary.
    pub fn new(language: Language) -> Self {
        Self {
            source: GrammarSource::Linked(language),
            queries_enabled: true,
            engine: OnceCell::new(),
        }
    }

    /// Load the grammar from the first existing shared library in `candidates`.
    pub fn from_library(candidates: Vec<PathBuf>) -> Self {
        Self {
            source: GrammarSource::Library {
                candidates,
                symbol: LANGUAGE_SYMBOL.to_string(),
            },
            queries_enabled: true,
            engine: OnceCell::new(),
        }
    }

    /// Override the exported entry symbol (default `tree_sitter_blade`).
    pub fn with_symbol(mut self, name: impl Into<String>) -> Self {
        if let GrammarSource::Library { symbol, .. } = &mut self.source {
            *symbol = name.into();
        }
        self
    }

    pub fn with_queries(mut self, enabled: bool) -> Self {
        self.queries_enabled = enabled;
        self
    }

    fn load(&self) -> Result<Engine, RuntimeError> {
        let language = match &self.source {
            GrammarSource::Linked(language) => language.clone(),
            GrammarSource::Library { candidates, symbol } => {
                let artifact = library_file_name("tree-sitter-blade");
                let path = resolve_artifact(&artifact, candidates)?;
                load_library_language(&path, symbol)?
            }
        };
        Engine::new(BACKEND, language, self.queries_enabled)
    }

    fn engine(&self) -> Result<&Engine, RuntimeError> {
        match self.engine.get() {
            Some(Ok(engine)) => Ok(engine),
            Some(Err(err)) => Err(err.clone()),
            None => Err(RuntimeError::NotInitialized { backend: BACKEND }),
        }
    }
}

fn load_library_language(path: &Path, symbol: &str) -> Result<Language, RuntimeError> {
    // SAFETY: loading runs the library's initializers; grammar artifacts are
    // plain C objects produced by the tree-sitter generator.
    let library = unsafe { Library::new(path) }
        .map_err(|e| RuntimeError::grammar_load(path, e.to_string()))?;

    // SAFETY: grammar libraries export `const TSLanguage *tree_sitter_<name>(void)`.
    let language_fn = unsafe {
        let entry: Symbol<unsafe extern "C" fn() -> *const ()> = library
            .get(symbol.as_bytes())
            .map_err(|e| RuntimeError::grammar_load(path, e.to_string()))?;
        LanguageFn::from_raw(*entry)
    };

    // Trees keep pointers into the grammar tables, so the library stays mapped.
    std::mem::forget(library);
    Ok(Language::from(language_fn))
}

#[async_trait]
impl ParserRuntime for NativeRuntime {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn initialize(&self) -> Result<(), RuntimeError> {
        let outcome = self
            .engine
            .get_or_init(|| async {
                let loaded = self.load();
                match &loaded {
                    Ok(_) => info!(backend = BACKEND, "parser runtime initialized"),
                    Err(err) => warn!(
                        backend = BACKEND,
                        error = %err,
                        "parser runtime failed to initialize"
                    ),
                }
                loaded
            })
            .await;
        outcome.as_ref().map(|_| ()).map_err(Clone::clone)
    }

    fn is_initialized(&self) -> bool {
        matches!(self.engine.get(), Some(Ok(_)))
    }

    fn parse(&self, source: &str, previous: Option<&Tree>) -> Result<Tree, RuntimeError> {
        self.engine()?.parse(source, previous)
    }

    fn compile_query(&self, source: &str) -> Result<CompiledQuery, RuntimeError> {
        self.engine()?.compile_query(source)
    }
}
