#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use blade_syntax::ide::{AnalysisHost, ContextKind, DirectiveRegistry};
use blade_syntax::query::QueryName;
use blade_syntax::runtime::NativeRuntime;
use blade_syntax::{ParserRuntime, RuntimeError, RuntimeHandle};

use crate::helpers::runtime::{html_runtime, parse_html, shape};

const URI: &str = "file:///resources/views/welcome.blade.php";

#[test]
fn test_edits_reparse_incrementally() {
    let mut host = AnalysisHost::new(html_runtime());
    let versions = [
        "<ul>\n  <li>one</li>\n</ul>",
        "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>",
        "<ul>\n  <li>uno</li>\n  <li>two</li>\n</ul>",
        "<ol>\n  <li>uno</li>\n</ol>",
    ];

    for (version, text) in versions.iter().enumerate() {
        assert!(host.set_document(URI, version as i32 + 1, text).unwrap());
        let tree = host.tree(URI).unwrap();
        assert_eq!(tree.source(), *text);
        assert!(!tree.is_edited());
        assert_eq!(shape(&tree), shape(&parse_html(text)));
    }
    assert_eq!(host.version(URI), Some(4));

    let items = host.query(URI, QueryName::TagNames).unwrap();
    assert_eq!(items.len(), 4);
}

#[test]
fn test_documents_are_independent() {
    let mut host = AnalysisHost::new(html_runtime());
    host.set_document("a", 1, "<p>a</p>").unwrap();
    host.set_document("b", 7, "<div>b</div>").unwrap();

    assert!(host.has_document("a"));
    assert_eq!(host.version("b"), Some(7));
    assert!(host.remove_document("a"));
    assert!(!host.remove_document("a"));
    assert!(!host.has_document("a"));
    assert_eq!(host.tree("b").unwrap().source(), "<div>b</div>");
    assert!(host.diagnostics("a").is_none());
    assert!(host.completion_context("a", 0, 0).is_none());
}

#[test]
fn test_context_through_host() {
    let mut host = AnalysisHost::new(html_runtime());
    host.set_document(URI, 1, "<p>\n  @sec\n</p>").unwrap();
    let ctx = host.completion_context(URI, 1, 6).unwrap();
    assert_eq!(ctx.kind(), ContextKind::Directive);
    assert_eq!(ctx.prefix(), "@sec");
}

#[test]
fn test_custom_registry_is_used() {
    let mut host = AnalysisHost::new(html_runtime());
    assert!(host.registry().contains("foreach"));
    assert!(!host.registry().contains("datetime"));

    host.set_registry(DirectiveRegistry::builtin().with_custom(["@datetime"]));
    assert!(host.registry().contains("datetime"));
    assert!(host.registry().contains("foreach"));
}

#[tokio::test]
async fn test_parse_failure_keeps_previous_snapshot() {
    let runtime: RuntimeHandle = Arc::new(NativeRuntime::new(tree_sitter_html::LANGUAGE.into()));
    let mut host = AnalysisHost::new(Arc::clone(&runtime));

    assert!(matches!(
        host.set_document(URI, 1, "<p>x</p>"),
        Err(RuntimeError::NotInitialized { .. })
    ));
    assert!(!host.has_document(URI));

    runtime.initialize().await.unwrap();
    host.set_document(URI, 1, "<p>x</p>").unwrap();
    assert_eq!(host.version(URI), Some(1));
}
