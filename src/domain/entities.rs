//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered sequence of root-level nodes: a whole document or a subtree snapshot.
pub type Forest = Vec<Node>;

/// Cosmetic marker shown in front of a node's text.
///
/// Has no structural effect. Serialized in camelCase (`notEqual`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Symbol {
    #[default]
    Dot,
    Naraba,
    Therefore,
    Because,
    Equal,
    NotEqual,
}

impl Symbol {
    pub const ALL: [Symbol; 6] = [
        Symbol::Dot,
        Symbol::Naraba,
        Symbol::Therefore,
        Symbol::Because,
        Symbol::Equal,
        Symbol::NotEqual,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Dot => "dot",
            Symbol::Naraba => "naraba",
            Symbol::Therefore => "therefore",
            Symbol::Because => "because",
            Symbol::Equal => "equal",
            Symbol::NotEqual => "notEqual",
        }
    }

    /// Glyph used when rendering an outline in the terminal.
    pub fn glyph(&self) -> &'static str {
        match self {
            Symbol::Dot => "•",
            Symbol::Naraba => "⇒",
            Symbol::Therefore => "∴",
            Symbol::Because => "∵",
            Symbol::Equal => "=",
            Symbol::NotEqual => "≠",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a symbol name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolParseError {
    pub input: String,
}

impl fmt::Display for SymbolParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Symbol::ALL.iter().map(Symbol::as_str).collect();
        write!(
            f,
            "unknown symbol '{}' (expected one of: {})",
            self.input,
            names.join(", ")
        )
    }
}

impl std::error::Error for SymbolParseError {}

impl FromStr for Symbol {
    type Err = SymbolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::ALL
            .into_iter()
            .find(|symbol| symbol.as_str() == s)
            .ok_or_else(|| SymbolParseError {
                input: s.to_string(),
            })
    }
}

/// A single outline entry.
///
/// A node exclusively owns its children: there is no sharing between
/// subtrees and no parent back-reference. `is_expanded` only affects
/// visible-order traversal; lookups and edits see collapsed subtrees too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Caller-assigned, unique across the whole forest
    pub id: String,
    pub symbol: Symbol,
    pub text: String,
    pub children: Vec<Node>,
    pub is_expanded: bool,
}

impl Node {
    /// Fresh node: empty text, no children, expanded, `dot` marker.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: Symbol::Dot,
            text: String::new(),
            children: Vec::new(),
            is_expanded: true,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Shallow copy of this node's own fields with a replacement child list.
    pub(crate) fn with_children(&self, children: Vec<Node>) -> Self {
        Self {
            id: self.id.clone(),
            symbol: self.symbol,
            text: self.text.clone(),
            children,
            is_expanded: self.is_expanded,
        }
    }

    /// Full copy of the subtree carrying a different id.
    pub(crate) fn renamed(&self, id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..self.clone()
        }
    }
}

/// Convenience constructor used by callers that hand a single new node around.
pub fn new_node(id: impl Into<String>) -> Node {
    Node::new(id)
}

/// True when `node` has at least one child.
pub fn has_children(node: &Node) -> bool {
    node.has_children()
}
