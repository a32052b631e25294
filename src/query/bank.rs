//! The fixed query bank.
//!
//! Each entry pairs a tree-sitter query source with the node kinds a manual
//! walk collects to produce the same result set.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryName {
    Directives,
    TagNames,
    Parameters,
    Comments,
    AttributeNames,
    Errors,
}

impl QueryName {
    pub const ALL: [QueryName; 6] = [
        QueryName::Directives,
        QueryName::TagNames,
        QueryName::Parameters,
        QueryName::Comments,
        QueryName::AttributeNames,
        QueryName::Errors,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryName::Directives => "directives",
            QueryName::TagNames => "tag_names",
            QueryName::Parameters => "parameters",
            QueryName::Comments => "comments",
            QueryName::AttributeNames => "attribute_names",
            QueryName::Errors => "errors",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            QueryName::Directives => "[(directive) (directive_start) (directive_end)] @directive",
            QueryName::TagNames => "(tag_name) @tag",
            QueryName::Parameters => "(parameter) @parameter",
            QueryName::Comments => "(comment) @comment",
            QueryName::AttributeNames => "(attribute_name) @attribute",
            QueryName::Errors => "(ERROR) @error",
        }
    }

    /// Named node kinds the manual fallback collects.
    pub fn fallback_kinds(self) -> &'static [&'static str] {
        match self {
            QueryName::Directives => &["directive", "directive_start", "directive_end"],
            QueryName::TagNames => &["tag_name"],
            QueryName::Parameters => &["parameter"],
            QueryName::Comments => &["comment"],
            QueryName::AttributeNames => &["attribute_name"],
            QueryName::Errors => &["ERROR"],
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query source capturing every named node of `kind` as `@node`.
pub fn query_for_type(kind: &str) -> String {
    format!("({kind}) @node")
}
