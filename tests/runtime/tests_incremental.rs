#![allow(clippy::unwrap_used)]

use rstest::rstest;

use blade_syntax::{apply_edit, compute_edit};

use crate::helpers::runtime::{html_runtime, shape};

#[rstest]
#[case("<p>hi</p>", "<p>hello</p>")]
#[case("<div>\n  <p>a</p>\n</div>", "<div>\n  <p>a</p>\n  <span>b</span>\n</div>")]
#[case("<ul><li>1</li><li>2</li></ul>", "<ul><li>1</li></ul>")]
#[case("<a href=\"x\">go</a>", "<a href=\"xyz\" title=\"t\">go</a>")]
#[case("<p>é</p>", "<p>è and ü</p>")]
#[case("<p>x</p>", "")]
#[case("", "<p>x</p>")]
fn test_incremental_matches_full_parse(#[case] old: &str, #[case] new: &str) {
    let runtime = html_runtime();
    let previous = runtime.parse(old, None).unwrap();

    let edit = compute_edit(old, new).unwrap();
    assert_eq!(edit.splice(old, new), new);

    let mut seed = previous.clone();
    assert!(apply_edit(&mut seed, &edit));
    assert!(seed.is_edited());

    let incremental = runtime.parse(new, Some(&seed)).unwrap();
    let full = runtime.parse(new, None).unwrap();

    assert_eq!(incremental.to_sexp(), full.to_sexp());
    assert_eq!(shape(&incremental), shape(&full));
    assert!(seed.changed_ranges(&incremental).is_some());

    // The original snapshot is untouched by editing its clone.
    assert!(!previous.is_edited());
    assert_eq!(previous.source(), old);
}

#[test]
fn test_unedited_previous_tree_is_not_reused_for_new_text() {
    let runtime = html_runtime();
    let previous = runtime.parse("<p>one</p>", None).unwrap();
    let reparsed = runtime.parse("<div>two</div>", Some(&previous)).unwrap();
    let full = runtime.parse("<div>two</div>", None).unwrap();
    assert_eq!(shape(&reparsed), shape(&full));
}

#[rstest]
#[case("abc", "abXc")]
#[case("aaaa", "aa")]
#[case("line1\nline2", "line1\r\nline2\n")]
#[case("@if($a)", "@if($a)\n@endif")]
#[case("日本語", "日本人")]
fn test_edit_reconstructs_new_text(#[case] old: &str, #[case] new: &str) {
    let edit = compute_edit(old, new).unwrap();
    assert!(edit.start_byte <= edit.old_end_byte.min(edit.new_end_byte));
    assert_eq!(edit.splice(old, new), new);
}
