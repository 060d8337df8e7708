use crate::ast::Node;
use crate::types::Constituent;

/// Flatten a tree into labeled leaf spans.
///
/// Records are appended post-order, so every descendant's record precedes
/// its ancestors'. Bare leaves get no record of their own. Returns the
/// records and the total number of leaves.
pub fn get_constituents(tree: &Node) -> (Vec<Constituent>, usize) {
    let mut constituents = Vec::new();
    let (end, _) = traverse(tree, 0, &mut constituents);
    (constituents, end)
}

/// Returns the position after `node` and the rebuilt node.
fn traverse(node: &Node, pos: usize, out: &mut Vec<Constituent>) -> (usize, Node) {
    let (label, children) = match node {
        Node::Leaf { .. } => return (pos + 1, node.clone()),
        Node::Chunk { label, children } => (label, children),
    };

    let start = pos;
    let mut pos = pos;
    let mut collected = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Node::Leaf { .. } => {
                collected.push(child.clone());
                pos += 1;
            }
            Node::Chunk { .. } => {
                let (after, sub) = traverse(child, pos, out);
                pos = after;
                collected.push(sub);
            }
        }
    }

    let subtree = Node::chunk(label.clone(), collected);
    out.push(Constituent {
        label: label.clone(),
        start,
        end: pos,
        subtree: subtree.clone(),
    });
    (pos, subtree)
}
