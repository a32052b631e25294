#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use blade_syntax::runtime::{BackendKind, NativeRuntime, RuntimeConfig, build_runtime};
use blade_syntax::{ParserRuntime, RuntimeError, RuntimeHandle};

use crate::helpers::runtime::html_runtime_uninit;

#[test]
fn test_parse_before_initialize_is_rejected() {
    let runtime = html_runtime_uninit();
    assert_eq!(
        runtime.parse("<p></p>", None).unwrap_err(),
        RuntimeError::NotInitialized { backend: "native" }
    );
    assert!(matches!(
        runtime.compile_query("(element) @e"),
        Err(RuntimeError::NotInitialized { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_initialize_shares_one_attempt() {
    let runtime: RuntimeHandle = Arc::new(html_runtime_uninit());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let runtime = Arc::clone(&runtime);
            tokio::spawn(async move { runtime.initialize().await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert!(runtime.is_initialized());
    assert!(runtime.parse("<p>ok</p>", None).is_ok());
}

#[tokio::test]
async fn test_failed_initialize_stays_failed() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::default()
        .with_backend(BackendKind::Native)
        .with_grammar(dir.path().join("libtree_sitter_blade.so"));
    let runtime = build_runtime(&config).unwrap();

    let first = runtime.initialize().await.unwrap_err();
    let second = runtime.initialize().await.unwrap_err();
    assert_eq!(first, second);
    assert!(first.to_string().contains("libtree_sitter_blade.so"));
    assert!(!runtime.is_initialized());
}

#[tokio::test]
async fn test_linked_grammar_with_queries_disabled() {
    let runtime = NativeRuntime::new(tree_sitter_html::LANGUAGE.into()).with_queries(false);
    runtime.initialize().await.unwrap();
    assert_eq!(runtime.name(), "native");
    assert!(matches!(
        runtime.compile_query("(element) @e"),
        Err(RuntimeError::QueryUnsupported { backend: "native" })
    ));
}
