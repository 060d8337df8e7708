use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ast::{Node, Token};

/// Half-open range `[start, end)` over the sequence given to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseBoundary {
    pub start: usize,
    pub end: usize,
}

impl ClauseBoundary {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A labeled span in leaf-index space, with the subtree it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub subtree: Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRecord {
    pub sentence: usize,
    pub depth: usize,
    pub label: String,
    pub parent: Option<String>,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntacticParse {
    pub tree: Node,
    pub clauses: Vec<ClauseBoundary>,
    pub constituents: Vec<Constituent>,
    pub leaf_count: usize,
    pub depth: Vec<DepthRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammatical: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceAnnotation {
    pub raw_text: String,
    pub token: Vec<String>,
    pub tagged: Vec<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_tree: Option<SyntacticParse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineError {
    pub line_no: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnnotationOutput {
    pub sentences: Vec<SentenceAnnotation>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<LineError>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub unknown_tags: BTreeMap<String, usize>,
}
