//! Sandboxed grammar adapter.
//!
//! Loads `tree-sitter-blade.wasm` into a wasmtime store owned by the parser,
//! so grammar code never runs natively in the host process.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use tree_sitter::{Parser, WasmStore, wasmtime};

use super::artifact::{WASM_ARTIFACT, resolve_artifact};
use super::engine::Engine;
use super::{CompiledQuery, ParserRuntime, RuntimeError};
use crate::tree::Tree;

const BACKEND: &str = "wasm";

/// Parser runtime backed by a WebAssembly grammar.
pub struct SandboxedRuntime {
    candidates: Vec<PathBuf>,
    language_name: String,
    queries_enabled: bool,
    engine: OnceCell<Result<Engine, RuntimeError>>,
}

impl SandboxedRuntime {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            language_name: "blade".to_string(),
            queries_enabled: true,
            engine: OnceCell::new(),
        }
    }

    pub fn with_queries(mut self, enabled: bool) -> Self {
        self.queries_enabled = enabled;
        self
    }

    fn load(&self) -> Result<Engine, RuntimeError> {
        let path = resolve_artifact(WASM_ARTIFACT, &self.candidates)?;
        let bytes =
            std::fs::read(&path).map_err(|e| RuntimeError::grammar_load(&path, e.to_string()))?;

        let wasm_engine = wasmtime::Engine::default();
        let mut store = WasmStore::new(&wasm_engine)
            .map_err(|e| RuntimeError::grammar_load(&path, format!("{e:?}")))?;
        let language = store
            .load_language(&self.language_name, &bytes)
            .map_err(|e| RuntimeError::grammar_load(&path, format!("{e:?}")))?;

        let mut parser = Parser::new();
        parser
            .set_wasm_store(store)
            .map_err(|e| RuntimeError::IncompatibleLanguage(e.to_string()))?;
        parser
            .set_language(&language)
            .map_err(|e| RuntimeError::IncompatibleLanguage(e.to_string()))?;

        Ok(Engine::from_parser(BACKEND, parser, language, self.queries_enabled))
    }

    fn engine(&self) -> Result<&Engine, RuntimeError> {
        match self.engine.get() {
            Some(Ok(engine)) => Ok(engine),
            Some(Err(err)) => Err(err.clone()),
            None => Err(RuntimeError::NotInitialized { backend: BACKEND }),
        }
    }
}

#[async_trait]
impl ParserRuntime for SandboxedRuntime {
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
