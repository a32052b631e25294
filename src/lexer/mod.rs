//! Grammar-independent Blade scanner.
//!
//! A single forward pass over a [`logos`] token stream that finds directive
//! tokens and embedded PHP byte ranges. It backs directive lookup when no tree
//! is available and provides the PHP mask used before running text patterns.
//!
//! The scanner keeps explicit state for HTML tags (with quote tracking), Blade
//! and HTML comments, `<?php ... ?>` tags (with string, escape and comment
//! tracking) and `@php ... @endphp` blocks. It never panics, whatever the input.

mod token;

use smol_str::SmolStr;

use crate::base::LineIndex;
use token::{Lexer, RawToken, Token};

/// An `@name` directive found outside comments, quoted attribute values and PHP.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectiveToken {
    /// Directive text including the `@`, e.g. `"@if"`.
    pub name: SmolStr,
    pub line: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub offset_start: usize,
    pub offset_end: usize,
}

/// Half-open byte range `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetRange {
    pub start: usize,
    pub end: usize,
}

impl OffsetRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Everything one scan produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedSource<'a> {
    pub directives: Vec<DirectiveToken>,
    /// Sorted, non-overlapping.
    pub php_ranges: Vec<OffsetRange>,
    /// Source lines without their terminators.
    pub lines: Vec<&'a str>,
}

impl LexedSource<'_> {
    pub fn directive_names(&self) -> Vec<&str> {
        self.directives.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn is_offset_in_php(&self, offset: usize) -> bool {
        is_offset_in_php(&self.php_ranges, offset)
    }
}

/// Scan `source` once for directives, PHP ranges and lines.
pub fn lex(source: &str) -> LexedSource<'_> {
    let mut scanner = Scanner::new(source);
    for token in Lexer::new(source) {
        scanner.step(token);
    }
    scanner.finish()
}

pub fn collect_directive_tokens(source: &str) -> Vec<DirectiveToken> {
    lex(source).directives
}

pub fn php_ranges(source: &str) -> Vec<OffsetRange> {
    lex(source).php_ranges
}

/// Whether `offset` falls inside one of the sorted `ranges`.
pub fn is_offset_in_php(ranges: &[OffsetRange], offset: usize) -> bool {
    let index = ranges.partition_point(|r| r.end <= offset);
    ranges.get(index).is_some_and(|r| r.contains(offset))
}

/// Blank out embedded PHP, keeping line breaks and byte offsets intact.
pub fn mask_php_content(source: &str) -> String {
    let ranges = php_ranges(source);
    if ranges.is_empty() {
        return source.to_string();
    }

    let mut bytes = source.as_bytes().to_vec();
    for range in ranges {
        for byte in &mut bytes[range.start..range.end] {
            if *byte != b'\n' && *byte != b'\r' {
                *byte = b' ';
            }
        }
    }
    // Ranges start and end on ASCII delimiters, so whole characters are blanked.
    String::from_utf8_lossy(&bytes).into_owned()
}

// ============================================================================
// SCANNER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Single,
    Double,
}

impl Quote {
    fn of(kind: RawToken) -> Option<Quote> {
        match kind {
            RawToken::SingleQuote => Some(Quote::Single),
            RawToken::DoubleQuote => Some(Quote::Double),
            _ => None,
        }
    }
}

/// State inside `<?php ... ?>` / `<?= ... ?>`.
#[derive(Debug, Default)]
struct PhpTag {
    start: usize,
    quote: Option<Quote>,
    escaped: bool,
    line_comment: bool,
    block_comment: bool,
}

struct Scanner<'a> {
    source: &'a str,
    index: LineIndex,
    directives: Vec<DirectiveToken>,
    php_ranges: Vec<OffsetRange>,

    in_tag: bool,
    tag_quote: Option<Quote>,
    blade_comment: bool,
    html_comment: bool,
    php_tag: Option<PhpTag>,
    /// Body start of an open `@php` block.
    php_block: Option<usize>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            index: LineIndex::new(source),
            directives: Vec::new(),
            php_ranges: Vec::new(),
            in_tag: false,
            tag_quote: None,
            blade_comment: false,
            html_comment: false,
            php_tag: None,
            php_block: None,
        }
    }

    fn step(&mut self, token: Token<'a>) {
        if self.blade_comment {
            if token.kind == RawToken::BladeCommentClose {
                self.blade_comment = false;
            }
            return;
        }
        if self.html_comment {
            if token.kind == RawToken::HtmlCommentClose {
                self.html_comment = false;
            }
            return;
        }
        if self.php_tag.is_some() {
            self.step_php_tag(token);
            return;
        }
        if let Some(body_start) = self.php_block {
            if token.kind == RawToken::Directive
                && token.text == "@endphp"
                && self.is_directive_boundary(token)
            {
                self.php_ranges.push(OffsetRange::new(body_start, token.offset));
                self.php_block = None;
                self.record(token);
            }
            return;
        }

        match token.kind {
            RawToken::BladeCommentOpen => self.blade_comment = true,
            // PHP tags open inside attribute values too.
            RawToken::PhpOpen => {
                self.php_tag = Some(PhpTag {
                    start: token.offset,
                    ..PhpTag::default()
                });
            }
            _ if self.tag_quote.is_some() => {
                if Quote::of(token.kind) == self.tag_quote {
                    self.tag_quote = None;
                }
            }
            RawToken::HtmlCommentOpen if !self.in_tag => self.html_comment = true,
            RawToken::TagOpen if !self.in_tag => self.in_tag = true,
            RawToken::Gt if self.in_tag => self.in_tag = false,
            RawToken::SingleQuote | RawToken::DoubleQuote
                if self.in_tag && self.opens_attribute_value(token) =>
            {
                self.tag_quote = Quote::of(token.kind);
            }
            RawToken::Directive => {
                if self.is_directive_boundary(token) && !self.is_alpine_attribute(token) {
                    self.directive(token);
                }
            }
            _ => {}
        }
    }

    fn step_php_tag(&mut self, token: Token<'a>) {
        let Some(php) = self.php_tag.as_mut() else {
            return;
        };

        if php.line_comment {
            match token.kind {
                RawToken::Newline => php.line_comment = false,
                // `?>` ends a line comment and the tag with it.
                RawToken::PhpClose => self.close_php_tag(token),
                _ => {}
            }
            return;
        }
        if php.block_comment {
            if token.kind == RawToken::BlockCommentClose {
                php.block_comment = false;
            }
            return;
        }
        if let Some(quote) = php.quote {
            if php.escaped {
                php.escaped = false;
            } else if token.kind == RawToken::Backslash {
                php.escaped = true;
            } else if Quote::of(token.kind) == Some(quote) {
                php.quote = None;
            }
            return;
        }

        match token.kind {
            RawToken::SingleQuote | RawToken::DoubleQuote => php.quote = Quote::of(token.kind),
            RawToken::LineComment | RawToken::Hash => php.line_comment = true,
            RawToken::BlockCommentOpen => php.block_comment = true,
            RawToken::PhpClose => self.close_php_tag(token),
            _ => {}
        }
    }

    fn close_php_tag(&mut self, token: Token<'a>) {
        if let Some(php) = self.php_tag.take() {
            self.php_ranges
                .push(OffsetRange::new(php.start, token.offset + token.text.len()));
        }
    }

    /// Only a quote right after `=` starts a value; `<p title=don't>` stays unquoted.
    fn opens_attribute_value(&self, token: Token<'a>) -> bool {
        self.source[..token.offset].trim_end().ends_with('=')
    }

    /// `@` must not continue a word (`name@example.com`) or follow another `@`.
    fn is_directive_boundary(&self, token: Token<'a>) -> bool {
        match self.source[..token.offset].chars().next_back() {
            Some(c) => !(c.is_alphanumeric() || c == '_' || c == '@'),
            None => true,
        }
    }

    /// `@click=`, `@submit.prevent=` and `@keyup:` inside a tag are attribute names.
    fn is_alpine_attribute(&self, token: Token<'a>) -> bool {
        self.in_tag && matches!(self.byte_after(token), Some(b'=' | b'.' | b':'))
    }

    fn byte_after(&self, token: Token<'a>) -> Option<u8> {
        self.source.as_bytes().get(token.offset + token.text.len()).copied()
    }

    fn directive(&mut self, token: Token<'a>) {
        self.record(token);
        if token.text == "@php" && !self.has_inline_arguments(token) {
            self.php_block = Some(token.offset + token.text.len());
        }
    }

    /// `@php($x = 1)` is a one-line statement rather than a block opener.
    fn has_inline_arguments(&self, token: Token<'a>) -> bool {
        let rest = &self.source.as_bytes()[token.offset + token.text.len()..];
        rest.iter()
            .find(|&&b| b != b' ' && b != b'\t')
            .is_some_and(|&b| b == b'(')
    }

    fn record(&mut self, token: Token<'a>) {
        let start = self.index.position(token.offset);
        let end = self.index.position(token.offset + token.text.len());
        self.directives.push(DirectiveToken {
            name: SmolStr::new(token.text),
            line: start.row,
            col_start: start.column,
            col_end: end.column,
            offset_start: token.offset,
            offset_end: token.offset + token.text.len(),
        });
    }

    fn finish(mut self) -> LexedSource<'a> {
        let len = self.source.len();
        if let Some(php) = self.php_tag.take() {
            self.php_ranges.push(OffsetRange::new(php.start, len));
        }
        if let Some(body_start) = self.php_block.take() {
            self.php_ranges.push(OffsetRange::new(body_start, len));
        }

        let lines = self
            .source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        LexedSource {
            directives: self.directives,
            php_ranges: self.php_ranges,
            lines,
        }
    }
}
