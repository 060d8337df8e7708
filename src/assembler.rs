//! Segmentation and chunk assembly.
//!
//! Tokens are cut into clause-level segments at comma/period punctuation and
//! connectors, then each segment is walked left to right, dispatching to the
//! [`ChunkBuilder`] in a fixed precedence. Whatever happens inside a builder,
//! every input element ends up in the output exactly once and in order.

use crate::ast::{self, Node};
use crate::chunking::{BuildResult, ChunkBuilder};
use crate::error::ChunkError;
use crate::tags;

/// Aspect/temporal modifiers that open a VP when a verb follows.
const VERB_OPENING_MODIFIERS: &[&str] = &["MOD-TEMP", "MOD-ACT"];

pub fn segment(nodes: &[Node]) -> Vec<Vec<Node>> {
    let mut segments = Vec::new();
    let mut buffer = Vec::new();

    for node in nodes {
        buffer.push(node.clone());
        if let Some(tag) = node.tag() {
            if tags::is_clause_punctuation(tag) || tags::is_connector(tag) {
                segments.push(std::mem::take(&mut buffer));
            }
        }
    }
    if !buffer.is_empty() {
        segments.push(buffer);
    }

    segments
}

pub fn assemble<B: ChunkBuilder + ?Sized>(segments: &[Vec<Node>], builder: &B) -> Vec<Node> {
    let mut chunks = Vec::new();
    for segment in segments {
        assemble_segment(segment, builder, &mut chunks);
    }
    chunks
}

/// Segment then assemble.
pub fn pre_parse_chunking<B: ChunkBuilder + ?Sized>(nodes: &[Node], builder: &B) -> Vec<Node> {
    assemble(&segment(nodes), builder)
}

fn assemble_segment<B: ChunkBuilder + ?Sized>(
    segment: &[Node],
    builder: &B,
    out: &mut Vec<Node>,
) {
    let mut i = 0;
    while i < segment.len() {
        let Some(tag) = segment[i].tag() else {
            out.push(segment[i].clone());
            i += 1;
            continue;
        };

        match try_build(segment, i, tag, builder) {
            Ok(Some((chunk, next))) => {
                out.push(chunk);
                i = next;
            }
            Ok(None) => {
                out.push(wrap_unmatched(&segment[i], tag));
                i += 1;
            }
            Err(err) => {
                tracing::debug!(
                    index = i,
                    tag,
                    error = %err,
                    "chunk build failed, passing token through"
                );
                out.push(segment[i].clone());
                i += 1;
            }
        }
    }
}

fn try_build<B: ChunkBuilder + ?Sized>(
    segment: &[Node],
    i: usize,
    tag: &str,
    builder: &B,
) -> BuildResult {
    let built = dispatch(segment, i, tag, builder)?;
    let Some((chunk, next)) = built else {
        return Ok(None);
    };

    if next <= i || next > segment.len() {
        return Err(ChunkError::NoProgress { index: i, next });
    }
    if chunk.leaves() != ast::leaves_of(&segment[i..next]) {
        return Err(ChunkError::CoverageMismatch {
            label: chunk.label().to_string(),
            start: i,
            end: next,
        });
    }
    Ok(Some((chunk, next)))
}

fn dispatch<B: ChunkBuilder + ?Sized>(
    segment: &[Node],
    i: usize,
    tag: &str,
    builder: &B,
) -> BuildResult {
    let main = tags::main_category(tag);
    let prev_is_preposition = i > 0 && tags::is_preposition(segment[i - 1].label());
    let next_is_verb = segment
        .get(i + 1)
        .and_then(Node::tag)
        .is_some_and(tags::is_verb);

    if builder.is_np_token(tag) && !prev_is_preposition {
        builder.build_np(segment, i)
    } else if main == tags::VERB || (VERB_OPENING_MODIFIERS.contains(&tag) && next_is_verb) {
        builder.build_vp(segment, i)
    } else if tags::is_preposition(tag) {
        builder.build_pp(segment, i)
    } else if builder.is_adjp_token(tag) && !tags::is_modifier(tag) {
        builder.build_adjp(segment, i)
    } else if builder.is_advp_token(tag) {
        builder.build_advp(segment, i)
    } else if builder.is_wh_token(tag) {
        builder.build_interrog(segment, i)
    } else {
        Ok(None)
    }
}

fn wrap_unmatched(node: &Node, tag: &str) -> Node {
    let label = match tags::main_category(tag) {
        tags::CONNECTOR => "CONJ",
        tags::INTERJECTION => "INTJ",
        tags::SYMBOL => "PUNCT",
        _ => return node.clone(),
    };
    Node::chunk(label, vec![node.clone()])
}
