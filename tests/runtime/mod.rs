//! Parser runtime tests
//!
//! Tests for:
//! - Initialization (idempotence, concurrency, misuse)
//! - Error tolerance of parse
//! - Incremental reparse equivalence

pub mod tests_incremental;
pub mod tests_initialize;
pub mod tests_parse;
