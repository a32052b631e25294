//! # blade-syntax
//!
//! Incremental syntax analysis for Laravel Blade templates, built on
//! tree-sitter.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Completion context, diagnostics, per-document analysis host
//!   ↓
//! query     → Position lookup, ancestor walks, query bank with manual fallback
//!   ↓
//! runtime   → Native / sandboxed grammar adapters, artifact resolution
//!   ↓
//! edit      → Text snapshots → minimal edit descriptor
//!   ↓
//! tree      → Arena Node/Tree contract shared by every backend
//!   ↓
//! base      → Primitives (Position, Span, LineIndex)
//!
//! lexer     → Grammar-independent directive and PHP-range scanner
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → edit → runtime → query → ide)
// ============================================================================

/// Foundation types: Position, Span, LineIndex
pub mod base;

/// Node/Tree contract: arena trees and the builder that fills them
pub mod tree;

/// Edit-diff engine
pub mod edit;

/// Parser runtimes: grammar loading, parsing, compiled queries
pub mod runtime;

/// AST queries over trees
pub mod query;

/// Directive and embedded-PHP scanner
pub mod lexer;

/// IDE features: completion context, diagnostics, analysis host
pub mod ide;

// Re-export foundation types
pub use base::{LineIndex, Position, Span};
pub use edit::{TextEdit, apply_edit, compute_edit};
pub use tree::{Node, NodeId, Tree, TreeBuilder};

// Re-export the runtime contract
pub use runtime::{ParserRuntime, RuntimeConfig, RuntimeError, RuntimeHandle, build_runtime};
