#![allow(clippy::unwrap_used)]

use rstest::rstest;

use blade_syntax::ide::{DirectiveRegistry, Severity, get_diagnostics, get_diagnostics_with};
use blade_syntax::tree::ERROR_KIND;
use blade_syntax::{Position, TreeBuilder};

use crate::helpers::blade_shapes;
use crate::helpers::runtime::parse_html;

#[test]
fn test_email_in_attribute_is_not_an_error() {
    let tree = blade_shapes::email_input();
    assert!(tree.root().descendants().any(|n| n.is_error()));
    assert_eq!(get_diagnostics(&tree), vec![]);
}

#[test]
fn test_conditional_attribute_is_not_an_error() {
    let tree = blade_shapes::conditional_html();
    assert_eq!(tree.root().descendants().filter(|n| n.is_error()).count(), 2);
    assert_eq!(get_diagnostics(&tree), vec![]);
}

#[test]
fn test_unknown_directive_is_left_to_directive_checks() {
    let tree = blade_shapes::unknown_directive("@datetime");
    assert!(get_diagnostics(&tree).is_empty());

    // Once registered, the grammar's complaint about it is real.
    let registry = DirectiveRegistry::builtin().with_custom(["datetime"]);
    let diagnostics = get_diagnostics_with(&tree, &registry);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Syntax error");
    assert_eq!(diagnostics[0].start, Position::new(0, 0));
    assert_eq!(diagnostics[0].end, Position::new(0, 9));
}

#[test]
fn test_stray_known_directive_is_reported() {
    let tree = blade_shapes::unknown_directive("@endif");
    let diagnostics = get_diagnostics(&tree);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].severity.to_lsp(), 1);
}

#[test]
fn test_missing_nodes_are_reported_by_kind() {
    let source = "@if($a)\n<p>";
    let mut b = TreeBuilder::new(source);
    b.open("document", 0);
    b.open("conditional", 0);
    b.leaf("directive_start", 0..3);
    b.leaf("parameter", 3..7);
    b.leaf("text", 8..11);
    b.missing("directive_end", source.len());
    b.close(source.len());
    let tree = b.finish();

    let diagnostics = get_diagnostics(&tree);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Missing directive_end");
    assert_eq!(diagnostics[0].start, Position::new(1, 3));
    assert_eq!(diagnostics[0].start, diagnostics[0].end);
}

#[test]
fn test_real_error_inside_suppressed_error_is_reported() {
    // `<div class="a" @click="go(">`: the Alpine attribute is suppressed, the
    // unbalanced call nested in its value is not.
    let source = "<div class=\"a\" @click=\"go(\">";
    let at = source.find('@').unwrap();
    let value = source.rfind("=\"").unwrap() + 1;
    let mut b = TreeBuilder::new(source);
    b.open("document", 0);
    b.open("start_tag", 0);
    b.token("<", 0..1);
    b.leaf("tag_name", 1..4);
    b.open("attribute", 5);
    b.leaf("attribute_name", 5..10);
    b.token("=", 10..11);
    b.leaf("quoted_attribute_value", 11..14);
    b.close(14);
    b.open(ERROR_KIND, at);
    b.leaf("text", at..value - 1);
    b.token("=", value - 1..value);
    b.open(ERROR_KIND, value);
    b.token("\"", value..value + 1);
    b.leaf("text", value + 1..value + 4);
    b.token("\"", value + 4..value + 5);
    b.close(value + 5);
    b.close(value + 5);
    b.token(">", source.len() - 1..source.len());
    b.close(source.len());
    let tree = b.finish();

    let diagnostics = get_diagnostics(&tree);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].start, Position::new(0, value));
    assert_eq!(diagnostics[0].end, Position::new(0, value + 5));
}

#[test]
fn test_stray_paren_after_unclosed_tag_is_reported() {
    // The recovered `<div` swallows the body, so its `@if` is not an attribute.
    let source = "<div\n@if($a)\n<p>x</p>\n(\n@endif";
    let paren = source.rfind('(').unwrap();
    let mut b = TreeBuilder::new(source);
    b.open("document", 0);
    b.open(ERROR_KIND, 0);
    b.token("<", 0..1);
    b.leaf("tag_name", 1..4);
    b.leaf("directive_start", 5..8);
    b.leaf(ERROR_KIND, paren..paren + 1);
    b.close(source.len());
    let tree = b.finish();

    let diagnostics = get_diagnostics(&tree);
    let starts: Vec<Position> = diagnostics.iter().map(|d| d.start).collect();
    assert!(starts.contains(&Position::new(3, 0)));
    assert!(diagnostics.iter().all(|d| d.message == "Syntax error"));
}

#[rstest]
#[case("<div <p>x</p>")]
#[case("<a href=>link")]
#[case("<div>\n  <span\n</div>")]
#[case("<p>a</p>>>")]
#[case("<ul><li></ul>")]
fn test_plain_html_errors_are_all_reported(#[case] source: &str) {
    let tree = parse_html(source);
    let expected = tree
        .root()
        .descendants()
        .filter(|n| n.is_error() || n.is_missing())
        .count();

    let diagnostics = get_diagnostics(&tree);
    assert_eq!(diagnostics.len(), expected, "{}", tree.to_sexp());
    for diagnostic in &diagnostics {
        assert!(diagnostic.start <= diagnostic.end);
    }
}
