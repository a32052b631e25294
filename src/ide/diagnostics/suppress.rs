//! False-positive suppression for `ERROR` nodes.
//!
//! The Blade grammar reports errors for several valid template patterns. Each
//! rule here recognizes one of them. Rules are pure predicates evaluated in
//! [`SUPPRESSORS`] order; a missing parent, tag or child means the rule does
//! not apply.

use crate::ide::directives::{DirectiveRegistry, directive_name};
use crate::lexer::collect_directive_tokens;
use crate::query::subtree_contains;
use crate::tree::Node;

/// Attribute-name prefixes that look like directive starts: Alpine event
/// shorthands and Tailwind container variants.
pub const RESERVED_ATTRIBUTE_PREFIXES: &[&str] = &[
    "@click",
    "@submit",
    "@keydown",
    "@keyup",
    "@input",
    "@change",
    "@focus",
    "@blur",
    "@mouseenter",
    "@mouseleave",
    "@scroll",
    "@resize",
    "@container",
    "@sm:",
    "@md:",
    "@lg:",
    "@xl:",
    "@2xl:",
];

/// Block directives commonly used to wrap attributes inside a start tag.
pub const CONDITIONAL_ATTRIBUTE_OPENERS: &[&str] = &[
    "if",
    "unless",
    "isset",
    "empty",
    "auth",
    "guest",
    "env",
    "production",
    "can",
    "cannot",
    "canany",
    "error",
    "session",
];

const TAG_KINDS: &[&str] = &["start_tag", "self_closing_tag", "end_tag"];
const ATTRIBUTE_KINDS: &[&str] = &["quoted_attribute_value", "attribute_value", "attribute"];

/// What a suppression rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct SuppressionContext<'t, 'r> {
    /// The `ERROR` node under consideration.
    pub node: Node<'t>,
    /// Enclosing start/self-closing/end tag, or an `ERROR` that swallowed one.
    pub tag: Option<Node<'t>>,
    /// The element owning `tag`.
    pub element: Option<Node<'t>>,
    pub registry: &'r DirectiveRegistry,
}

impl<'t, 'r> SuppressionContext<'t, 'r> {
    pub fn new(node: Node<'t>, registry: &'r DirectiveRegistry) -> Self {
        let tag = node
            .self_and_ancestors()
            .find(|n| TAG_KINDS.contains(&n.kind()) || looks_like_tag(*n));
        let element = tag.and_then(|t| t.ancestors().find(|a| a.kind() == "element"));
        Self {
            node,
            tag,
            element,
            registry,
        }
    }

    fn for_node(&self, node: Node<'t>) -> Self {
        Self::new(node, self.registry)
    }
}

/// An `ERROR` that recovered over a whole tag still carries its name or attributes.
fn looks_like_tag(node: Node<'_>) -> bool {
    node.is_error()
        && node
            .children()
            .any(|c| matches!(c.kind(), "tag_name" | "attribute" | "attribute_name"))
}

pub type Suppressor = fn(&SuppressionContext<'_, '_>) -> bool;

/// Suppression rules, in evaluation order.
pub const SUPPRESSORS: &[(&str, Suppressor)] = &[
    ("quoted_attribute_at_sign", quoted_attribute_at_sign),
    ("ancestor_suppressed", ancestor_suppressed),
    ("attribute_name_collision", attribute_name_collision),
    ("inline_conditional_attribute", inline_conditional_attribute),
    ("unknown_single_token_directive", unknown_single_token_directive),
];

/// Name of the first rule that suppresses `ctx.node`.
pub fn suppressed_by(ctx: &SuppressionContext<'_, '_>) -> Option<&'static str> {
    SUPPRESSORS
        .iter()
        .find(|(_, rule)| rule(ctx))
        .map(|&(name, _)| name)
}

fn is_directive_token(node: Node<'_>) -> bool {
    matches!(node.kind(), "directive" | "directive_start")
}

/// `name@example.com` or `event@target` in an attribute parses as a directive.
///
/// The `ERROR` must lie within an attribute or within its tag's attribute
/// shape, and one of its directive tokens must sit there too. An `ERROR` that
/// swallowed a tag together with body content does not qualify.
pub fn quoted_attribute_at_sign(ctx: &SuppressionContext<'_, '_>) -> bool {
    let shape_end = ctx.tag.map(attribute_shape_end);
    let in_attribute_position = |node: Node<'_>| {
        node.self_and_ancestors()
            .any(|n| ATTRIBUTE_KINDS.contains(&n.kind()))
            || shape_end.is_some_and(|end| node.end_byte() <= end)
    };
    in_attribute_position(ctx.node)
        && subtree_contains(ctx.node, |n| is_directive_token(n) && in_attribute_position(n))
}

/// End of the region where `tag` can still hold attributes.
///
/// A parsed tag owns its whole span. For an `ERROR` that recovered over a tag,
/// the region stops after the first `>` outside quoted values, or before the
/// next `<`, whichever comes first.
fn attribute_shape_end(tag: Node<'_>) -> usize {
    if !tag.is_error() {
        return tag.end_byte();
    }

    let bytes = tag.text().as_bytes();
    let mut quote = None;
    let mut prev = b'<';
    for (i, &byte) in bytes.iter().enumerate().skip(1) {
        match quote {
            Some(q) if byte == q => quote = None,
            Some(_) => {}
            None => match byte {
                b'"' | b'\'' if prev == b'=' => quote = Some(byte),
                b'>' => return tag.start_byte() + i + 1,
                b'<' => return tag.start_byte() + i,
                _ => {}
            },
        }
        if !byte.is_ascii_whitespace() {
            prev = byte;
        }
    }
    tag.end_byte()
}

/// An enclosing `ERROR` already matched [`quoted_attribute_at_sign`].
pub fn ancestor_suppressed(ctx: &SuppressionContext<'_, '_>) -> bool {
    ctx.node
        .ancestors()
        .filter(|a| a.is_error())
        .any(|a| quoted_attribute_at_sign(&ctx.for_node(a)))
}

/// `@click`/`@md:` style attribute names next to a `class` attribute.
pub fn attribute_name_collision(ctx: &SuppressionContext<'_, '_>) -> bool {
    let text = ctx.node.text().trim_start();
    if !RESERVED_ATTRIBUTE_PREFIXES.iter().any(|p| text.starts_with(p)) {
        return false;
    }
    ctx.tag.is_some_and(|tag| {
        subtree_contains(tag, |n| n.kind() == "attribute_name" && n.text() == "class")
    })
}

/// `<html @if($a) data-x="y" @endif>` style conditional attributes.
///
/// The grammar leaves quote/paren debris as `ERROR`s when a block directive
/// opens in one tag and its closer follows in the same element.
pub fn inline_conditional_attribute(ctx: &SuppressionContext<'_, '_>) -> bool {
    let is_noise = ctx
        .node
        .text()
        .chars()
        .all(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '(' | ')'));
    if !is_noise {
        return false;
    }
    let Some(tag) = ctx.tag else {
        return false;
    };

    let tag_tokens = collect_directive_tokens(tag.text());
    let Some(scope) = ctx.element.or_else(|| tag.parent()) else {
        return false;
    };
    let tag_offset = tag.end_byte().saturating_sub(scope.start_byte());
    let Some(after_tag) = scope.text().get(tag_offset..) else {
        return false;
    };
    let later_tokens = collect_directive_tokens(after_tag);

    tag_tokens.iter().enumerate().any(|(i, token)| {
        let Some(name) = directive_name(&token.name) else {
            return false;
        };
        if !CONDITIONAL_ATTRIBUTE_OPENERS.contains(&name) {
            return false;
        }
        let Some(closer) = ctx.registry.block_closer(name) else {
            return false;
        };
        let closes = |t: &crate::lexer::DirectiveToken| directive_name(&t.name) == Some(closer);
        let closed_on_tag = tag_tokens[i + 1..].iter().any(closes);
        !closed_on_tag && later_tokens.iter().any(closes)
    })
}

/// A lone `@name` the grammar does not know; reported elsewhere as an unknown directive.
pub fn unknown_single_token_directive(ctx: &SuppressionContext<'_, '_>) -> bool {
    if ctx.node.child_count() != 1 {
        return false;
    }
    ctx.node
        .first_child()
        .filter(|&child| is_directive_token(child))
        .and_then(|child| directive_name(child.text()))
        .is_some_and(|name| !ctx.registry.contains(name))
}
