use crate::ast::Node;
use crate::tags;
use crate::types::ClauseBoundary;

/// Partition a chunk/token sequence into clause spans.
///
/// A new clause opens at every `VP` chunk and every connector leaf, except
/// at the very start of the current span. Indices are positions in `nodes`,
/// not leaf positions.
pub fn detect_clause_boundary(nodes: &[Node]) -> Vec<ClauseBoundary> {
    let mut boundaries = Vec::new();
    let mut start = 0;

    for (i, node) in nodes.iter().enumerate() {
        let opens_clause = match node {
            Node::Chunk { label, .. } => label == "VP",
            Node::Leaf { tag, .. } => tags::is_connector(tag),
        };
        if opens_clause && i > start {
            boundaries.push(ClauseBoundary::new(start, i));
            start = i;
        }
    }

    if start < nodes.len() {
        boundaries.push(ClauseBoundary::new(start, nodes.len()));
    }

    boundaries
}
