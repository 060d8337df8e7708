use serde::{Deserialize, Serialize};

use crate::tags;

/// A single tagged word as handed over by the tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,
    pub tag: String,
}

impl Token {
    pub fn new(surface: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
        }
    }

    pub fn main_category(&self) -> &str {
        tags::main_category(&self.tag)
    }
}

impl From<(&str, &str)> for Token {
    fn from((surface, tag): (&str, &str)) -> Self {
        Token::new(surface, tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Leaf { surface: String, tag: String },
    Chunk { label: String, children: Vec<Node> },
}

impl Node {
    pub fn leaf(surface: impl Into<String>, tag: impl Into<String>) -> Self {
        Node::Leaf {
            surface: surface.into(),
            tag: tag.into(),
        }
    }

    pub fn chunk(label: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Chunk {
            label: label.into(),
            children,
        }
    }

    /// Chunk label for chunks, POS tag for leaves.
    pub fn label(&self) -> &str {
        match self {
            Node::Leaf { tag, .. } => tag,
            Node::Chunk { label, .. } => label,
        }
    }

    /// The POS tag, only for leaves.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } => Some(tag),
            Node::Chunk { .. } => None,
        }
    }

    pub fn is_chunk(&self) -> bool {
        matches!(self, Node::Chunk { .. })
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Chunk { children, .. } => children,
        }
    }

    /// Leaf tokens in left-to-right order.
    pub fn leaves(&self) -> Vec<Token> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Chunk { children, .. } => children.iter().map(Node::leaf_count).sum(),
        }
    }
}

fn collect_leaves(node: &Node, out: &mut Vec<Token>) {
    match node {
        Node::Leaf { surface, tag } => out.push(Token::new(surface.clone(), tag.clone())),
        Node::Chunk { children, .. } => {
            for child in children {
                collect_leaves(child, out);
            }
        }
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Leaf {
            surface: token.surface,
            tag: token.tag,
        }
    }
}

/// Leaf tokens of a whole node sequence, in order.
pub fn leaves_of(nodes: &[Node]) -> Vec<Token> {
    let mut out = Vec::new();
    for node in nodes {
        collect_leaves(node, &mut out);
    }
    out
}

/// Anything that reduces to a grammar label.
pub trait Labelled {
    fn grammar_label(&self) -> &str;
}

impl Labelled for str {
    fn grammar_label(&self) -> &str {
        self
    }
}

impl Labelled for &str {
    fn grammar_label(&self) -> &str {
        self
    }
}

impl Labelled for String {
    fn grammar_label(&self) -> &str {
        self
    }
}

impl Labelled for Node {
    fn grammar_label(&self) -> &str {
        self.label()
    }
}

impl Labelled for Token {
    fn grammar_label(&self) -> &str {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_follow_tree_order() {
        let tree = Node::chunk(
            "S",
            vec![
                Node::chunk("NP", vec![Node::leaf("Saya", "PRP")]),
                Node::chunk(
                    "PP",
                    vec![
                        Node::leaf("di", "IN-LOC"),
                        Node::chunk("NP", vec![Node::leaf("rumah", "NN-COM")]),
                    ],
                ),
            ],
        );

        let surfaces: Vec<String> = tree.leaves().into_iter().map(|t| t.surface).collect();
        assert_eq!(surfaces, vec!["Saya", "di", "rumah"]);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn node_serializes_as_tagged_object() {
        let node = Node::chunk("NP", vec![Node::leaf("nasi", "NN-COM")]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "chunk");
        assert_eq!(json["children"][0]["type"], "leaf");
        assert_eq!(json["children"][0]["tag"], "NN-COM");

        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn label_reduces_leaf_to_tag() {
        assert_eq!(Node::leaf("makan", "VB-ACT").label(), "VB-ACT");
        assert_eq!(Node::chunk("VP", vec![]).label(), "VP");
        assert_eq!(Node::chunk("VP", vec![]).tag(), None);
        assert_eq!(Token::new("di", "IN-LOC").main_category(), "IN");
    }
}
