//! Syntax diagnostics.
//!
//! Reports missing nodes and `ERROR` regions, filtering out errors that the
//! Blade grammar is known to raise for valid templates (see [`suppress`]).

pub mod suppress;

use tracing::trace;

use crate::base::Position;
use crate::ide::directives::DirectiveRegistry;
use crate::tree::Tree;

use suppress::{SuppressionContext, suppressed_by};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// LSP `DiagnosticSeverity` code.
    pub fn to_lsp(self) -> u8 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
        }
    }
}

/// A diagnostic ready for the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticInfo {
    pub message: String,
    pub start: Position,
    pub end: Position,
    pub severity: Severity,
}

impl DiagnosticInfo {
    pub fn error(message: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            message: message.into(),
            start,
            end,
            severity: Severity::Error,
        }
    }
}

/// Diagnostics for `tree` against the built-in directive set.
pub fn get_diagnostics(tree: &Tree) -> Vec<DiagnosticInfo> {
    get_diagnostics_with(tree, &DirectiveRegistry::builtin())
}

/// Diagnostics for `tree`, treating every name in `registry` as a known directive.
///
/// Pre-order over the whole tree. Children of a suppressed `ERROR` are still
/// visited and checked on their own.
pub fn get_diagnostics_with(tree: &Tree, registry: &DirectiveRegistry) -> Vec<DiagnosticInfo> {
    let mut diagnostics = Vec::new();

    for node in tree.root().descendants() {
        if node.is_missing() {
            diagnostics.push(DiagnosticInfo::error(
                format!("Missing {}", node.kind()),
                node.start_position(),
                node.end_position(),
            ));
            continue;
        }
        if !node.is_error() {
            continue;
        }

        let ctx = SuppressionContext::new(node, registry);
        if let Some(rule) = suppressed_by(&ctx) {
            trace!(rule, text = node.text(), "suppressed syntax error");
            continue;
        }
        diagnostics.push(DiagnosticInfo::error(
            "Syntax error",
            node.start_position(),
            node.end_position(),
        ));
    }

    diagnostics
}
