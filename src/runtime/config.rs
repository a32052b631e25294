//! Runtime selection.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use super::artifact::{WASM_ARTIFACT, default_candidates, library_file_name};
use super::native::NativeRuntime;
use super::{RuntimeError, RuntimeHandle};

pub const BACKEND_ENV: &str = "BLADE_SYNTAX_BACKEND";
pub const GRAMMAR_ENV: &str = "BLADE_SYNTAX_GRAMMAR";
pub const QUERIES_ENV: &str = "BLADE_SYNTAX_QUERIES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackendKind {
    #[default]
    Native,
    Sandboxed,
}

impl BackendKind {
    /// File name of the grammar artifact this backend loads.
    pub fn artifact_name(self) -> String {
        match self {
            BackendKind::Native => library_file_name("tree-sitter-blade"),
            BackendKind::Sandboxed => WASM_ARTIFACT.to_string(),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(BackendKind::Native),
            "wasm" | "sandboxed" => Ok(BackendKind::Sandboxed),
            other => Err(format!("unknown parser backend `{other}`")),
        }
    }
}

/// Which backend to build and where its grammar lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub backend: BackendKind,
    /// Explicit artifact paths, probed before the default search directories.
    pub grammar_candidates: Vec<PathBuf>,
    pub queries_enabled: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Native,
            grammar_candidates: Vec::new(),
            queries_enabled: true,
        }
    }
}

impl RuntimeConfig {
    /// Read `BLADE_SYNTAX_BACKEND`, `BLADE_SYNTAX_GRAMMAR` and `BLADE_SYNTAX_QUERIES`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(BACKEND_ENV) {
            match value.parse() {
                Ok(backend) => config.backend = backend,
                Err(err) => tracing::warn!(%err, "ignoring {BACKEND_ENV}"),
            }
        }
        if let Some(path) = lookup(GRAMMAR_ENV).filter(|p| !p.is_empty()) {
            config.grammar_candidates.push(PathBuf::from(path));
        }
        if let Some(value) = lookup(QUERIES_ENV) {
            match value.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "off" | "no" => config.queries_enabled = false,
                "1" | "true" | "on" | "yes" => config.queries_enabled = true,
                other => tracing::warn!(value = other, "ignoring {QUERIES_ENV}"),
            }
        }
        config
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_grammar(mut self, path: impl Into<PathBuf>) -> Self {
        self.grammar_candidates.push(path.into());
        self
    }

    pub fn with_queries(mut self, enabled: bool) -> Self {
        self.queries_enabled = enabled;
        self
    }

    /// Explicit candidates followed by the default search path for this backend.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = self.grammar_candidates.clone();
        out.extend(default_candidates(&self.backend.artifact_name()));
        out
    }
}

/// Build an uninitialized runtime for `config`.
///
/// Fails only when the sandboxed backend is requested from a build without the
/// `wasm` feature. Grammar lookup happens later, in `initialize()`.
pub fn build_runtime(config: &RuntimeConfig) -> Result<RuntimeHandle, RuntimeError> {
    match config.backend {
        BackendKind::Native => Ok(Arc::new(
            NativeRuntime::from_library(config.candidates())
                .with_queries(config.queries_enabled),
        )),
        #[cfg(feature = "wasm")]
        BackendKind::Sandboxed => Ok(Arc::new(
            super::wasm::SandboxedRuntime::new(config.candidates())
                .with_queries(config.queries_enabled),
        )),
        #[cfg(not(feature = "wasm"))]
        BackendKind::Sandboxed => Err(RuntimeError::BackendUnavailable("wasm")),
    }
}
