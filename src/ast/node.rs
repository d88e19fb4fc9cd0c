//! The externally-visible parse tree.
//!
//! Unlike the builder tree, which lives in the driver's arena, these nodes
//! are plain values: callers own the whole tree with no lifetime coupling
//! to the parse that produced it. Equality is structural over production,
//! token name, value, and children, in order; line, id, and the annotation
//! map deliberately do not participate.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::Serialize;

/// One node of the returned parse tree.
///
/// Exactly one of `production` (inner node) or `token_name` + `value`
/// (terminal node) is set. `id` is unique within one returned tree and
/// numbers the nodes in pre-order starting at 0.
#[derive(Debug, Clone, Serialize)]
pub struct ParseNode {
    /// Production name, when this is an inner node.
    pub production: Option<String>,
    /// Token name, when this is a terminal node.
    #[serde(rename = "type")]
    pub token_name: Option<String>,
    /// Token value, when this is a terminal node.
    pub value: Option<String>,
    /// 1-based source line; -1 when unspecified.
    pub line: i64,
    /// Pre-order id, unique within one tree.
    pub id: i64,
    /// Child nodes in order.
    pub children: Vec<ParseNode>,
    /// Free-form annotation slot for downstream passes; opaque to the
    /// runtime.
    pub attr: HashMap<String, String>,
}

impl ParseNode {
    /// An inner node for a production.
    pub fn production(name: &str) -> Self {
        Self {
            production: Some(name.to_string()),
            token_name: None,
            value: None,
            line: -1,
            id: -1,
            children: Vec::new(),
            attr: HashMap::new(),
        }
    }

    /// A terminal node for a token.
    pub fn terminal(token_name: &str, value: &str) -> Self {
        Self {
            production: None,
            token_name: Some(token_name.to_string()),
            value: Some(value.to_string()),
            line: -1,
            id: -1,
            children: Vec::new(),
            attr: HashMap::new(),
        }
    }

    pub fn with_line(mut self, line: i64) -> Self {
        self.line = line;
        self
    }

    pub fn with_children(mut self, children: Vec<ParseNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.token_name.is_some()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseNode> {
        self.children.iter()
    }

    /// Total number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ParseNode::node_count).sum::<usize>()
    }
}

impl PartialEq for ParseNode {
    fn eq(&self, other: &Self) -> bool {
        // Cheapest checks first; line, id, and attr are not identity.
        self.children.len() == other.children.len()
            && self.token_name == other.token_name
            && self.production == other.production
            && self.value == other.value
            && self.children == other.children
    }
}

impl Eq for ParseNode {}

impl Index<usize> for ParseNode {
    type Output = ParseNode;

    fn index(&self, index: usize) -> &ParseNode {
        &self.children[index]
    }
}

impl<'a> IntoIterator for &'a ParseNode {
    type Item = &'a ParseNode;
    type IntoIter = std::slice::Iter<'a, ParseNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.production, &self.token_name, &self.value) {
            (Some(production), _, _) => {
                write!(f, "{{{}}} [{}]", production, self.children.len())
            }
            (None, Some(name), Some(value)) => write!(f, "{} <{}>", name, value),
            _ => write!(f, "<empty node>"),
        }
    }
}
