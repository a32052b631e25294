//! Raw token stream for the Blade lexer.
//!
//! The tokens only mark the delimiters the scanner's state machine reacts to;
//! everything else collapses into [`RawToken::Text`] runs.

use logos::Logos;

/// A token with its kind, text and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: RawToken,
    pub text: &'a str,
    pub offset: usize,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    // === Comments ===
    #[token("{{--")]
    BladeCommentOpen,
    #[token("--}}")]
    BladeCommentClose,
    #[token("<!--")]
    HtmlCommentOpen,
    #[token("-->")]
    HtmlCommentClose,

    // === Embedded PHP ===
    #[regex(r"<\?[pP][hH][pP]")]
    #[token("<?=")]
    PhpOpen,
    #[token("?>")]
    PhpClose,
    #[token("//")]
    LineComment,
    #[token("#")]
    Hash,
    #[token("/*")]
    BlockCommentOpen,
    #[token("*/")]
    BlockCommentClose,

    // === Markup ===
    /// `<` followed by something that can start a tag name.
    #[regex(r"<[A-Za-z/!?]")]
    TagOpen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,
    #[token("\\")]
    Backslash,

    // === Directives ===
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    Directive,
    #[token("@@")]
    EscapedAt,

    #[token("\n")]
    Newline,

    #[regex(r"[^@<>{}?/*#\\\n'\x22-]+", allow_greedy = true)]
    Text,

    /// A lone delimiter character that did not start a longer token.
    #[regex(r"[-{}?*/@]")]
    Punct,
}

/// Iterator over [`Token`]s. Unrecognized input is reported as [`RawToken::Text`].
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: RawToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?.unwrap_or(RawToken::Text);
        Some(Token {
            kind,
            text: self.inner.slice(),
            offset: self.inner.span().start,
        })
    }
}
