//! Bracketed tree dump and its reader.
//!
//! `(S (NP Saya/PRP) (VP makan/VB-ACT) (PUNCT ./SYM-DOT))`
//!
//! Whitespace, parentheses, `/` and `\` inside an atom are escaped with a
//! backslash, so any tree survives a render/read round trip. The indented
//! form from [`pretty`] reads back the same way.

use winnow::ascii::multispace0;
use winnow::combinator::{alt, delimited, preceded, repeat};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{any, none_of};

use crate::ast::Node;
use crate::error::PavitaError;

const INDENT: &str = "    ";

pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_compact(node, &mut out);
    out
}

pub fn pretty(node: &Node) -> String {
    let mut out = String::new();
    write_pretty(node, 0, &mut out);
    out
}

fn write_compact(node: &Node, out: &mut String) {
    match node {
        Node::Leaf { surface, tag } => write_leaf(surface, tag, out),
        Node::Chunk { label, children } => {
            out.push('(');
            escape_into(label, out);
            for child in children {
                out.push(' ');
                write_compact(child, out);
            }
            out.push(')');
        }
    }
}

fn write_pretty(node: &Node, indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push_str(INDENT);
    }
    match node {
        Node::Leaf { surface, tag } => write_leaf(surface, tag, out),
        Node::Chunk { label, children } => {
            // chunks holding only leaves stay on one line
            if children.iter().all(|c| !c.is_chunk()) {
                write_compact(node, out);
                return;
            }
            out.push('(');
            escape_into(label, out);
            for child in children {
                out.push('\n');
                write_pretty(child, indent + 1, out);
            }
            out.push(')');
        }
    }
}

fn write_leaf(surface: &str, tag: &str, out: &mut String) {
    escape_into(surface, out);
    out.push('/');
    escape_into(tag, out);
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '/' | '\\')
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        if is_delimiter(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Parse a rendering produced by [`render`] or [`pretty`].
pub fn read_tree(input: &str) -> Result<Node, PavitaError> {
    delimited(multispace0, node, multispace0)
        .parse(input)
        .map_err(|e| PavitaError::TreeSyntax {
            offset: e.offset(),
            message: e.inner().to_string(),
        })
}

fn node(input: &mut &str) -> ModalResult<Node> {
    preceded(multispace0, alt((chunk, leaf))).parse_next(input)
}

fn chunk(input: &mut &str) -> ModalResult<Node> {
    let (label, children): (String, Vec<Node>) = delimited(
        '(',
        (repeat(0.., atom_char), repeat(0.., node)),
        (multispace0, ')'),
    )
    .parse_next(input)?;
    Ok(Node::Chunk { label, children })
}

fn leaf(input: &mut &str) -> ModalResult<Node> {
    let (surface, _, tag): (String, char, String) =
        (repeat(0.., atom_char), '/', repeat(0.., atom_char)).parse_next(input)?;
    Ok(Node::Leaf { surface, tag })
}

fn atom_char(input: &mut &str) -> ModalResult<char> {
    alt((preceded('\\', any), none_of(is_delimiter))).parse_next(input)
}
