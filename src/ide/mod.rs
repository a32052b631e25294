//! IDE features — the primitives editor-facing providers build on.
//!
//! Completion, hover and definition providers live outside this crate; they
//! consume the cursor classification and diagnostics produced here.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: trees in, plain data out
//! 2. **No LSP types**: positions and severities convert at the protocol boundary
//! 3. **Isolated heuristics**: grammar false positives are handled in
//!    [`diagnostics::suppress`], never in the traversal

mod analysis;
mod context;
pub mod diagnostics;
pub mod directives;
pub mod text_utils;

pub use analysis::AnalysisHost;
pub use context::{CompletionContext, ContextKind, completion_context};
pub use diagnostics::{DiagnosticInfo, Severity, get_diagnostics, get_diagnostics_with};
pub use directives::DirectiveRegistry;
pub use text_utils::{directive_prefix, identifier_prefix};
