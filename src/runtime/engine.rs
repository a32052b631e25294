//! The parser/grammar pair shared by both adapters once initialized.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::debug;
use tree_sitter::{Language, Parser, Query};

use super::convert::convert;
use super::{CompiledQuery, RuntimeError};
use crate::tree::Tree;

pub(crate) struct Engine {
    backend: &'static str,
    parser: Mutex<Parser>,
    language: Language,
    queries_enabled: bool,
}

impl Engine {
    /// Bind `language` to a fresh parser, rejecting grammars with a foreign ABI.
    pub(crate) fn new(
        backend: &'static str,
        language: Language,
        queries_enabled: bool,
    ) -> Result<Self, RuntimeError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| RuntimeError::IncompatibleLanguage(e.to_string()))?;
        Ok(Self::from_parser(backend, parser, language, queries_enabled))
    }

    /// Wrap a parser whose language is already set.
    pub(crate) fn from_parser(
        backend: &'static str,
        parser: Parser,
        language: Language,
        queries_enabled: bool,
    ) -> Self {
        Self {
            backend,
            parser: Mutex::new(parser),
            language,
            queries_enabled,
        }
    }

    pub(crate) fn parse(
        &self,
        source: &str,
        previous: Option<&Tree>,
    ) -> Result<Tree, RuntimeError> {
        let started = Instant::now();

        // An unedited old tree only matches its own text; reusing it for
        // different text would hand back stale nodes.
        let old = previous
            .filter(|prev| prev.is_edited() || prev.source() == source)
            .and_then(|prev| prev.engine())
            .map(|engine| &engine.tree);
        if previous.is_some() && old.is_none() {
            debug!(backend = self.backend, "previous tree not reusable, parsing from scratch");
        }

        let ts_tree = {
            let mut parser = self.parser.lock();
            parser.parse(source, old)
        }
        .ok_or(RuntimeError::ParseFailed { backend: self.backend })?;

        let tree = convert(&ts_tree, Arc::from(source));
        debug!(
            backend = self.backend,
            bytes = source.len(),
            nodes = tree.len(),
            incremental = old.is_some(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "parsed document"
        );
        Ok(tree)
    }

    pub(crate) fn compile_query(&self, source: &str) -> Result<CompiledQuery, RuntimeError> {
        if !self.queries_enabled {
            return Err(RuntimeError::QueryUnsupported { backend: self.backend });
        }
        Query::new(&self.language, source)
            .map(CompiledQuery::new)
            .map_err(|e| RuntimeError::InvalidQuery(e.to_string()))
    }
}
