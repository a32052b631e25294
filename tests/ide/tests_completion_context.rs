#![allow(clippy::unwrap_used)]

use rstest::rstest;

use blade_syntax::ide::{CompletionContext, ContextKind, completion_context};

use crate::helpers::blade_shapes;
use crate::helpers::runtime::parse_html;

#[test]
fn test_partial_directive() {
    let tree = blade_shapes::unknown_directive("@fo");
    let ctx = completion_context(&tree, 0, 3);
    assert_eq!(ctx.kind(), ContextKind::Directive);
    assert_eq!(ctx.prefix(), "@fo");
}

#[rstest]
#[case("{{")]
#[case("bracket_start")]
fn test_inside_echo(#[case] opener: &str) {
    let tree = blade_shapes::echo(opener);
    let ctx = completion_context(&tree, 0, 12);
    assert_eq!(ctx.kind(), ContextKind::Echo);
    assert_eq!(ctx.prefix(), "na");
    assert_eq!(ctx.node().unwrap().kind(), "php_only");
}

#[test]
fn test_inside_directive_parameter() {
    let tree = blade_shapes::include_parameter();
    let ctx = completion_context(&tree, 0, 12);
    assert!(matches!(
        &ctx,
        CompletionContext::Parameter { prefix, directive: Some(name), .. }
            if prefix == "vi" && name == "include"
    ));
    assert_eq!(ctx.directive(), Some("include"));
}

#[test]
fn test_inside_comment() {
    let tree = blade_shapes::comment();
    let ctx = completion_context(&tree, 0, 5);
    assert_eq!(ctx.kind(), ContextKind::Comment);
    assert_eq!(ctx.prefix(), "");
}

#[test]
fn test_inside_php_block() {
    let tree = blade_shapes::php_block();
    let ctx = completion_context(&tree, 1, 2);
    assert_eq!(ctx.kind(), ContextKind::Php);
    assert_eq!(ctx.prefix(), "$x");
}

#[test]
fn test_directive_prefix_beats_tree_shape() {
    // A directive being typed wins over the enclosing statement.
    let tree = blade_shapes::php_block();
    let ctx = completion_context(&tree, 2, 4);
    assert_eq!(ctx.kind(), ContextKind::Directive);
    assert_eq!(ctx.prefix(), "@end");
}

#[rstest]
#[case(0, 3, ContextKind::Html, "di")]
#[case(1, 8, ContextKind::Html, "hel")]
#[case(1, 14, ContextKind::Directive, "@us")]
#[case(9, 0, ContextKind::Html, "")]
fn test_plain_html(
    #[case] row: usize,
    #[case] column: usize,
    #[case] kind: ContextKind,
    #[case] prefix: &str,
) {
    let tree = parse_html("<div>\n  <p>hello @us</p>\n</div>");
    let ctx = completion_context(&tree, row, column);
    assert_eq!(ctx.kind(), kind);
    assert_eq!(ctx.prefix(), prefix);
}
