//! Parser runtimes: load a Blade grammar and turn source text into [`Tree`]s.
//!
//! Two adapters implement [`ParserRuntime`]:
//! - [`NativeRuntime`] - grammar code linked in or loaded from a shared library
//! - `SandboxedRuntime` - grammar compiled to WebAssembly (`wasm` feature)
//!
//! Both defer grammar loading to [`ParserRuntime::initialize`], which is
//! idempotent and safe to call concurrently; the first outcome (success or
//! failure) is cached for the lifetime of the runtime.

mod artifact;
mod compiled;
mod config;
mod convert;
mod engine;
mod error;
mod native;
#[cfg(feature = "wasm")]
mod wasm;

use std::sync::Arc;

use async_trait::async_trait;

use crate::tree::Tree;

pub use artifact::{
    LANGUAGE_SYMBOL, RUNTIME_DIR_ENV, WASM_ARTIFACT, default_candidates, library_file_name,
    resolve_artifact, search_dirs,
};
pub use compiled::CompiledQuery;
pub use config::{BACKEND_ENV, BackendKind, GRAMMAR_ENV, QUERIES_ENV, RuntimeConfig, build_runtime};
pub use error::RuntimeError;
pub use native::NativeRuntime;
#[cfg(feature = "wasm")]
pub use wasm::SandboxedRuntime;

/// A loaded grammar that can parse documents and compile queries.
#[async_trait]
pub trait ParserRuntime: Send + Sync {
    /// Short backend name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Locate and load the grammar. Subsequent calls return the cached outcome.
    async fn initialize(&self) -> Result<(), RuntimeError>;

    fn is_initialized(&self) -> bool;

    /// Parse `source`, reusing `previous` when it was edited to match.
    fn parse(&self, source: &str, previous: Option<&Tree>) -> Result<Tree, RuntimeError>;

    fn compile_query(&self, source: &str) -> Result<CompiledQuery, RuntimeError>;
}

/// Shared handle to a runtime. Cloning shares the loaded grammar.
pub type RuntimeHandle = Arc<dyn ParserRuntime>;
