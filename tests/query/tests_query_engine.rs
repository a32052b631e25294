#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;
use std::sync::Arc;

use rstest::rstest;

use blade_syntax::query::{QueryEngine, QueryName, collect_kinds};
use blade_syntax::runtime::NativeRuntime;
use blade_syntax::{Node, ParserRuntime, RuntimeHandle, apply_edit, compute_edit};

use crate::helpers::runtime::html_runtime;

const PAGE: &str = "<!-- top -->\n<form action=\"/go\" method=\"post\">\n  <input name=\"q\" disabled>\n  <p>text</div>\n</form>";

fn ranges(nodes: &[Node<'_>]) -> BTreeSet<(usize, usize, String)> {
    nodes
        .iter()
        .map(|n| (n.start_byte(), n.end_byte(), n.kind().to_string()))
        .collect()
}

#[rstest]
#[case(QueryName::Directives)]
#[case(QueryName::TagNames)]
#[case(QueryName::Parameters)]
#[case(QueryName::Comments)]
#[case(QueryName::AttributeNames)]
#[case(QueryName::Errors)]
fn test_query_matches_manual_walk(#[case] name: QueryName) {
    let runtime = html_runtime();
    let tree = runtime.parse(PAGE, None).unwrap();
    let engine = QueryEngine::new(Arc::clone(&runtime));

    let queried = engine.run(name, &tree);
    let walked = collect_kinds(&tree, name.fallback_kinds());
    assert_eq!(ranges(&queried), ranges(&walked), "{name}");

    // Second run goes through the cache.
    assert_eq!(ranges(&engine.run(name, &tree)), ranges(&walked));
}

#[test]
fn test_nodes_of_type() {
    let runtime = html_runtime();
    let tree = runtime.parse(PAGE, None).unwrap();
    let engine = QueryEngine::new(runtime);

    let attributes = engine.nodes_of_type("attribute_name", &tree);
    let names: Vec<_> = attributes.iter().map(|n| n.text()).collect();
    assert_eq!(names.len(), 4);
    for expected in ["action", "method", "name", "disabled"] {
        assert!(names.contains(&expected), "missing {expected}");
    }

    assert!(engine.nodes_of_type("no_such_kind", &tree).is_empty());
}

#[test]
fn test_edited_tree_falls_back_to_walk() {
    let runtime = html_runtime();
    let tree = runtime.parse("<p>a</p>", None).unwrap();
    let engine = QueryEngine::new(runtime);

    let mut edited = tree.clone();
    let edit = compute_edit("<p>a</p>", "<p>ab</p>").unwrap();
    assert!(apply_edit(&mut edited, &edit));

    let tags = engine.run(QueryName::TagNames, &edited);
    assert_eq!(ranges(&tags), ranges(&collect_kinds(&edited, &["tag_name"])));
    assert_eq!(tags.len(), 2);
}

#[tokio::test]
async fn test_disabled_queries_fall_back_to_walk() {
    let runtime: RuntimeHandle =
        Arc::new(NativeRuntime::new(tree_sitter_html::LANGUAGE.into()).with_queries(false));
    runtime.initialize().await.unwrap();
    let tree = runtime.parse(PAGE, None).unwrap();
    let engine = QueryEngine::new(runtime);

    let tags = engine.run(QueryName::TagNames, &tree);
    assert_eq!(ranges(&tags), ranges(&collect_kinds(&tree, &["tag_name"])));
    assert!(!tags.is_empty());
}

#[test]
fn test_uninitialized_runtime_still_answers() {
    let runtime: RuntimeHandle = Arc::new(NativeRuntime::new(tree_sitter_html::LANGUAGE.into()));
    let parsed = html_runtime().parse("<b>x</b>", None).unwrap();
    let engine = QueryEngine::new(runtime);
    assert_eq!(engine.run(QueryName::TagNames, &parsed).len(), 2);
}
