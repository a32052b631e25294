#![allow(clippy::unwrap_used)]

use rstest::rstest;

use blade_syntax::{Position, Tree};

use crate::helpers::runtime::{html_runtime, parse_html};

fn assert_error_flags_consistent(tree: &Tree) {
    for node in tree.root().descendants() {
        if node.is_error() || node.is_missing() {
            assert!(node.has_error(), "{node:?} should report has_error");
            for ancestor in node.ancestors() {
                assert!(ancestor.has_error(), "{ancestor:?} contains an error");
            }
        }
        for child in node.children() {
            assert!(node.start_byte() <= child.start_byte(), "{node:?} starts after {child:?}");
            assert!(child.end_byte() <= node.end_byte(), "{node:?} ends before {child:?}");
            assert_eq!(child.parent(), Some(node));
        }
    }
}

#[test]
fn test_valid_document_has_no_errors() {
    let tree = parse_html("<div class=\"a\">\n  <p>hi</p>\n</div>\n");
    assert_eq!(tree.root().kind(), "document");
    assert!(!tree.root().has_error());
    assert!(tree.supports_edit());
    assert!(!tree.is_edited());

    let p = tree.root().descendants().find(|n| n.kind() == "tag_name" && n.text() == "p").unwrap();
    assert_eq!(p.start_position(), Position::new(1, 3));
}

#[rstest]
#[case("")]
#[case("<")]
#[case("<div")]
#[case("<div class=\"unterminated>")]
#[case("</p></p></p>")]
#[case("<a href=x @click=\"go\">@if($a < $b)</a>")]
#[case("<<<>>>\"'")]
#[case("{{ $user->name }} {!! $raw !!} @endforeach")]
#[case("<p>\u{FFFD}é</p>")]
fn test_parse_never_fails_on_bad_input(#[case] source: &str) {
    let tree = html_runtime().parse(source, None).unwrap();
    assert_eq!(tree.source(), source);
    assert!(tree.root().end_byte() <= source.len());
    assert_error_flags_consistent(&tree);
}

#[test]
fn test_sexp_omits_anonymous_tokens() {
    let tree = parse_html("<p>hi</p>");
    assert_eq!(
        tree.to_sexp(),
        "(document (element (start_tag (tag_name)) (text) (end_tag (tag_name))))"
    );
}
