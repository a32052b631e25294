//! AST query layer tests
//!
//! Tests for:
//! - Position lookup over real parse trees
//! - Compiled queries against the manual fallback

pub mod tests_query_engine;
