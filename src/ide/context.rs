//! Completion context classification.
//!
//! Maps a cursor position to the kind of code being edited, combining the
//! tree shape with the raw line text (incomplete input often has no directive
//! node yet, so directive detection looks at text first).

use crate::ide::directives::directive_name;
use crate::ide::text_utils::{directive_prefix, identifier_prefix, line_before};
use crate::query::{find_node_at_position, first_ancestor_matching};
use crate::tree::{Node, Tree};

/// Which completion context applies at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContextKind {
    Directive,
    Echo,
    Parameter,
    Comment,
    Php,
    Html,
}

/// The classified cursor context, with the text being completed and the node
/// under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext<'t> {
    /// `@name` being typed; the prefix includes the `@`.
    Directive { prefix: String, node: Option<Node<'t>> },
    /// Inside `{{ ... }}` or `{!! ... !!}`.
    Echo { prefix: String, node: Option<Node<'t>> },
    /// Inside a directive's argument list.
    Parameter {
        prefix: String,
        node: Option<Node<'t>>,
        /// Directive name without the `@`, when one encloses the cursor.
        directive: Option<String>,
    },
    Comment { prefix: String, node: Option<Node<'t>> },
    /// Inside an `@php ... @endphp` block.
    Php { prefix: String, node: Option<Node<'t>> },
    Html { prefix: String, node: Option<Node<'t>> },
}

impl<'t> CompletionContext<'t> {
    pub fn kind(&self) -> ContextKind {
        match self {
            CompletionContext::Directive { .. } => ContextKind::Directive,
            CompletionContext::Echo { .. } => ContextKind::Echo,
            CompletionContext::Parameter { .. } => ContextKind::Parameter,
            CompletionContext::Comment { .. } => ContextKind::Comment,
            CompletionContext::Php { .. } => ContextKind::Php,
            CompletionContext::Html { .. } => ContextKind::Html,
        }
    }

    pub fn prefix(&self) -> &str {
        match self {
            CompletionContext::Directive { prefix, .. }
            | CompletionContext::Echo { prefix, .. }
            | CompletionContext::Parameter { prefix, .. }
            | CompletionContext::Comment { prefix, .. }
            | CompletionContext::Php { prefix, .. }
            | CompletionContext::Html { prefix, .. } => prefix,
        }
    }

    pub fn node(&self) -> Option<Node<'t>> {
        match self {
            CompletionContext::Directive { node, .. }
            | CompletionContext::Echo { node, .. }
            | CompletionContext::Parameter { node, .. }
            | CompletionContext::Comment { node, .. }
            | CompletionContext::Php { node, .. }
            | CompletionContext::Html { node, .. } => *node,
        }
    }

    /// Enclosing directive name for [`CompletionContext::Parameter`].
    pub fn directive(&self) -> Option<&str> {
        match self {
            CompletionContext::Parameter { directive, .. } => directive.as_deref(),
            _ => None,
        }
    }
}

/// Classify the cursor at `(row, column)` in `tree`'s source.
///
/// Checks run in priority order: directive prefix, echo, parameter, comment,
/// `@php` block, then HTML.
pub fn completion_context(tree: &Tree, row: usize, column: usize) -> CompletionContext<'_> {
    let before = line_before(tree.source(), row, column);
    let node = find_node_at_position(tree, row, column);

    if let Some(prefix) = directive_prefix(before) {
        return CompletionContext::Directive {
            prefix: prefix.to_string(),
            node,
        };
    }

    let prefix = identifier_prefix(before).to_string();
    let Some(at) = node else {
        return CompletionContext::Html { prefix, node };
    };

    if at.self_and_ancestors().any(is_echo_statement) {
        return CompletionContext::Echo { prefix, node };
    }

    if at.self_and_ancestors().any(|n| n.kind() == "parameter") {
        let directive = first_ancestor_matching(at, |n| n.text().starts_with('@'))
            .and_then(|n| directive_name(n.text()))
            .map(str::to_string);
        return CompletionContext::Parameter {
            prefix,
            node,
            directive,
        };
    }

    if at.kind() == "comment" {
        return CompletionContext::Comment { prefix, node };
    }

    if at
        .self_and_ancestors()
        .any(|n| n.kind() == "php_only" && n.parent().is_some_and(is_php_block_statement))
    {
        return CompletionContext::Php { prefix, node };
    }

    CompletionContext::Html { prefix, node }
}

/// `{{ ... }}` / `{!! ... !!}` statement.
fn is_echo_statement(node: Node<'_>) -> bool {
    node.kind() == "php_statement" && node.first_child().is_some_and(is_echo_opener)
}

fn is_echo_opener(node: Node<'_>) -> bool {
    match node.kind() {
        "{{" | "{!!" | "{{{" => true,
        "bracket_start" => {
            let text = node.text();
            text.starts_with("{{") || text.starts_with("{!!")
        }
        _ => false,
    }
}

/// `@php ... @endphp` statement.
fn is_php_block_statement(node: Node<'_>) -> bool {
    node.kind() == "php_statement"
        && node
            .first_child()
            .is_some_and(|c| c.kind() == "directive_start")
}
