//! Text helpers for cursor-relative lookups.

/// Check if a character is part of an identifier.
///
/// Uses Unicode Standard Annex #31 rules, which also admits `_` and digits.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Identifier characters plus `$`, so PHP variables form one prefix.
#[inline]
pub fn is_prefix_character(c: char) -> bool {
    is_word_character(c) || c == '$'
}

/// Text of line `row` before byte column `column`.
///
/// Columns past the end of the line clamp to it; a column inside a multi-byte
/// character backs off to the character start. Rows past the end yield `""`.
pub fn line_before(source: &str, row: usize, column: usize) -> &str {
    let Some(line) = source.split('\n').nth(row) else {
        return "";
    };
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut end = column.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// The `@word` run ending `before`, if there is one.
///
/// ```
/// use blade_syntax::ide::text_utils::directive_prefix;
///
/// assert_eq!(directive_prefix("  @fo"), Some("@fo"));
/// assert_eq!(directive_prefix("<div @"), Some("@"));
/// assert_eq!(directive_prefix("@if($a) x"), None);
/// ```
pub fn directive_prefix(before: &str) -> Option<&str> {
    let word_start = word_start(before, is_word_character);
    before[..word_start]
        .strip_suffix('@')
        .map(|head| &before[head.len()..])
}

/// The identifier (or `$variable`) run ending `before`.
pub fn identifier_prefix(before: &str) -> &str {
    &before[word_start(before, is_prefix_character)..]
}

fn word_start(text: &str, pred: fn(char) -> bool) -> usize {
    text.char_indices()
        .rev()
        .take_while(|&(_, c)| pred(c))
        .last()
        .map_or(text.len(), |(i, _)| i)
}
