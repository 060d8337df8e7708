use crate::ast::Node;
use crate::types::DepthRecord;

/// One record per chunk, pre-order, with its depth and parent label.
///
/// The `sentence` counter is bumped on every recursion step instead of once
/// per top-level sentence, so nested chunks report `sentence = depth + 1`.
/// Downstream consumers already read it that way; leave it alone.
pub fn annotate_depth_and_level(chunks: &[Node]) -> Vec<DepthRecord> {
    let mut out = Vec::new();
    annotate(chunks, 0, 1, None, &mut out);
    out
}

fn annotate(
    chunks: &[Node],
    depth: usize,
    sentence: usize,
    parent: Option<&str>,
    out: &mut Vec<DepthRecord>,
) {
    for chunk in chunks {
        let Node::Chunk { label, children } = chunk else {
            continue;
        };
        out.push(DepthRecord {
            sentence,
            depth,
            label: label.clone(),
            parent: parent.map(str::to_string),
            content: children.clone(),
        });
        annotate(children, depth + 1, sentence + 1, Some(label), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_depth_parent_and_sentence() {
        let chunks = vec![
            Node::chunk("NP", vec![Node::leaf("Saya", "PRP")]),
            Node::leaf("lah", "PART"),
            Node::chunk(
                "PP",
                vec![
                    Node::leaf("di", "IN-LOC"),
                    Node::chunk("NP", vec![Node::leaf("rumah", "NN-COM")]),
                ],
            ),
        ];

        let records = annotate_depth_and_level(&chunks);
        let summary: Vec<(usize, usize, &str, Option<&str>)> = records
            .iter()
            .map(|r| (r.sentence, r.depth, r.label.as_str(), r.parent.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, 0, "NP", None),
                (1, 0, "PP", None),
                (2, 1, "NP", Some("PP")),
            ]
        );
        assert_eq!(records[1].content.len(), 2);
    }

    #[test]
    fn leaves_only_yield_nothing() {
        let chunks = vec![Node::leaf("ya", "INT"), Node::leaf(".", "SYM-DOT")];
        assert!(annotate_depth_and_level(&chunks).is_empty());
    }
}
