//! Grammar artifact resolution.
//!
//! Grammars ship as a shared library (native backend) or a `.wasm` module
//! (sandboxed backend). Both are located by probing a short list of
//! install-relative candidate paths; this is the only filesystem access in
//! the crate.

use std::path::PathBuf;

use tracing::debug;

use super::RuntimeError;

/// Environment variable naming a runtime directory searched before the defaults.
pub const RUNTIME_DIR_ENV: &str = "BLADE_SYNTAX_RUNTIME";

/// File name of the sandboxed grammar artifact.
pub const WASM_ARTIFACT: &str = "tree-sitter-blade.wasm";

/// Entry symbol exported by the compiled grammar library.
pub const LANGUAGE_SYMBOL: &str = "tree_sitter_blade";

/// Platform-specific file name of the native grammar library.
pub fn library_file_name(name: &str) -> String {
    let safe_name = name.replace('-', "_");
    #[cfg(target_os = "macos")]
    {
        format!("lib{safe_name}.dylib")
    }
    #[cfg(target_os = "windows")]
    {
        format!("{safe_name}.dll")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        format!("lib{safe_name}.so")
    }
}

/// Directories searched for grammar artifacts, in priority order.
///
/// Order: `BLADE_SYNTAX_RUNTIME`, the executable's directory and its
/// `grammars/` child, `../share/blade-syntax` next to the executable, then
/// `./grammars` under the working directory.
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(runtime) = std::env::var_os(RUNTIME_DIR_ENV) {
        dirs.push(PathBuf::from(runtime));
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
    {
        dirs.push(exe_dir.to_path_buf());
        dirs.push(exe_dir.join("grammars"));
        dirs.push(exe_dir.join("..").join("share").join("blade-syntax"));
    }

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join("grammars"));
    }

    dirs
}

/// Candidate paths for `file_name` across [`search_dirs`].
pub fn default_candidates(file_name: &str) -> Vec<PathBuf> {
    search_dirs().into_iter().map(|dir| dir.join(file_name)).collect()
}

/// Return the first candidate that exists as a file.
///
/// Fails with every candidate listed when none exists.
pub fn resolve_artifact(artifact: &str, candidates: &[PathBuf]) -> Result<PathBuf, RuntimeError> {
    for candidate in candidates {
        if candidate.is_file() {
            debug!(artifact, path = %candidate.display(), "resolved grammar artifact");
            return Ok(candidate.clone());
        }
    }
    Err(RuntimeError::ArtifactNotFound {
        artifact: artifact.to_string(),
        candidates: candidates.to_vec(),
    })
}
