use std::sync::Arc;

use blade_syntax::runtime::NativeRuntime;
use blade_syntax::{ParserRuntime, RuntimeHandle, Tree};

/// An uninitialized runtime over the HTML grammar.
pub fn html_runtime_uninit() -> NativeRuntime {
    NativeRuntime::new(tree_sitter_html::LANGUAGE.into())
}

/// An initialized runtime over the HTML grammar.
pub fn html_runtime() -> RuntimeHandle {
    let runtime: RuntimeHandle = Arc::new(html_runtime_uninit());
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(runtime.initialize())
        .unwrap();
    runtime
}

/// Full parse of `source`.
pub fn parse_html(source: &str) -> Tree {
    html_runtime().parse(source, None).unwrap()
}

/// Every node as `(kind, byte range, named)` in pre-order.
pub fn shape(tree: &Tree) -> Vec<(String, std::ops::Range<usize>, bool)> {
    tree.root()
        .descendants()
        .map(|n| (n.kind().to_string(), n.byte_range(), n.is_named()))
        .collect()
}
