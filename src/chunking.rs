//! Chunk builder boundary.
//!
//! The assembler decides *which* kind of chunk to try at a position; a
//! [`ChunkBuilder`] decides how far that chunk reaches. Builders work on one
//! segment and return the built chunk plus the index to resume at, or `None`
//! when nothing can be built there.

use crate::ast::Node;
use crate::error::ChunkError;
use crate::tags;

pub type BuildResult = Result<Option<(Node, usize)>, ChunkError>;

pub trait ChunkBuilder {
    fn is_np_token(&self, tag: &str) -> bool;
    fn is_adjp_token(&self, tag: &str) -> bool;
    fn is_advp_token(&self, tag: &str) -> bool;
    fn is_wh_token(&self, tag: &str) -> bool;

    fn build_np(&self, segment: &[Node], index: usize) -> BuildResult;
    fn build_vp(&self, segment: &[Node], index: usize) -> BuildResult;
    fn build_pp(&self, segment: &[Node], index: usize) -> BuildResult;
    fn build_adjp(&self, segment: &[Node], index: usize) -> BuildResult;
    fn build_advp(&self, segment: &[Node], index: usize) -> BuildResult;
    fn build_interrog(&self, segment: &[Node], index: usize) -> BuildResult;
}

const NP_CORE: &[&str] = &["NN", "NNP", "PRP", "DT", "NUM"];

/// Greedy tag-run chunker used when no external builder is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleChunker;

impl RuleChunker {
    pub fn new() -> Self {
        Self
    }

    /// Length of the leaf run starting at `index` whose tags satisfy `pred`.
    fn run_len(segment: &[Node], index: usize, pred: impl Fn(&str) -> bool) -> usize {
        segment[index..]
            .iter()
            .take_while(|node| node.tag().is_some_and(&pred))
            .count()
    }

    fn leaf_run(segment: &[Node], start: usize, len: usize) -> Vec<Node> {
        segment[start..start + len].to_vec()
    }
}

fn check_index(segment: &[Node], index: usize) -> Result<(), ChunkError> {
    if index >= segment.len() {
        return Err(ChunkError::IndexOutOfRange {
            index,
            len: segment.len(),
        });
    }
    Ok(())
}

fn is_np_core(tag: &str) -> bool {
    NP_CORE.contains(&tags::main_category(tag))
}

impl ChunkBuilder for RuleChunker {
    fn is_np_token(&self, tag: &str) -> bool {
        is_np_core(tag)
    }

    fn is_adjp_token(&self, tag: &str) -> bool {
        tags::has_main(tag, tags::ADJECTIVE) || tags::has_main(tag, tags::MODIFIER)
    }

    fn is_advp_token(&self, tag: &str) -> bool {
        tags::has_main(tag, tags::ADVERB) || tags::has_main(tag, tags::MODIFIER)
    }

    fn is_wh_token(&self, tag: &str) -> bool {
        tags::has_main(tag, "WH") || tags::has_main(tag, "Q")
    }

    fn build_np(&self, segment: &[Node], index: usize) -> BuildResult {
        check_index(segment, index)?;
        let len = Self::run_len(segment, index, is_np_core);
        if len == 0 {
            return Ok(None);
        }
        let children = Self::leaf_run(segment, index, len);
        Ok(Some((Node::chunk("NP", children), index + len)))
    }

    fn build_vp(&self, segment: &[Node], index: usize) -> BuildResult {
        check_index(segment, index)?;
        let mods = Self::run_len(segment, index, tags::is_modifier);
        let verbs = if index + mods < segment.len() {
            Self::run_len(segment, index + mods, tags::is_verb)
        } else {
            0
        };
        if verbs == 0 {
            return Ok(None);
        }
        let len = mods + verbs;
        let children = Self::leaf_run(segment, index, len);
        Ok(Some((Node::chunk("VP", children), index + len)))
    }

    fn build_pp(&self, segment: &[Node], index: usize) -> BuildResult {
        check_index(segment, index)?;
        let Some(tag) = segment[index].tag() else {
            return Ok(None);
        };
        if !tags::is_preposition(tag) {
            return Ok(None);
        }

        let mut children = vec![segment[index].clone()];
        let mut next = index + 1;
        if next < segment.len() {
            if let Some((np, after)) = self.build_np(segment, next)? {
                children.push(np);
                next = after;
            }
        }
        Ok(Some((Node::chunk("PP", children), next)))
    }

    fn build_adjp(&self, segment: &[Node], index: usize) -> BuildResult {
        check_index(segment, index)?;
        let len = Self::run_len(segment, index, tags::is_adjective);
        if len == 0 {
            return Ok(None);
        }
        let children = Self::leaf_run(segment, index, len);
        Ok(Some((Node::chunk("ADJP", children), index + len)))
    }

    fn build_advp(&self, segment: &[Node], index: usize) -> BuildResult {
        check_index(segment, index)?;
        let len = Self::run_len(segment, index, |tag| self.is_advp_token(tag));
        if len == 0 {
            return Ok(None);
        }
        let children = Self::leaf_run(segment, index, len);
        Ok(Some((Node::chunk("ADVP", children), index + len)))
    }

    fn build_interrog(&self, segment: &[Node], index: usize) -> BuildResult {
        check_index(segment, index)?;
        if !segment[index].tag().is_some_and(|t| self.is_wh_token(t)) {
            return Ok(None);
        }

        let mut children = vec![segment[index].clone()];
        let mut next = index + 1;
        if next < segment.len() {
            if let Some((np, after)) = self.build_np(segment, next)? {
                children.push(np);
                next = after;
            }
        }
        Ok(Some((Node::chunk("WHP", children), next)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(items: &[(&str, &str)]) -> Vec<Node> {
        items.iter().map(|(s, t)| Node::leaf(*s, *t)).collect()
    }

    #[test]
    fn np_takes_nominal_run() {
        let segment = seg(&[("mobil", "NN-COM"), ("itu", "DT-DEF"), ("rusak", "JJ-QUALITY")]);
        let (np, next) = RuleChunker.build_np(&segment, 0).unwrap().unwrap();
        assert_eq!(next, 2);
        assert_eq!(np.label(), "NP");
        assert_eq!(np.leaf_count(), 2);
    }

    #[test]
    fn vp_needs_a_verb() {
        let segment = seg(&[("sudah", "MOD-TEMP"), ("makan", "VB-ACT"), ("nasi", "NN-COM")]);
        let (vp, next) = RuleChunker.build_vp(&segment, 0).unwrap().unwrap();
        assert_eq!(next, 2);
        assert_eq!(vp.children().len(), 2);

        let no_verb = seg(&[("sudah", "MOD-TEMP"), ("nasi", "NN-COM")]);
        assert_eq!(RuleChunker.build_vp(&no_verb, 0).unwrap(), None);
    }

    #[test]
    fn pp_wraps_following_np() {
        let segment = seg(&[("di", "IN-LOC"), ("rumah", "NN-COM"), ("saya", "PRP")]);
        let (pp, next) = RuleChunker.build_pp(&segment, 0).unwrap().unwrap();
        assert_eq!(next, 3);
        assert_eq!(pp.children()[1].label(), "NP");

        let bare = seg(&[("ke", "IN-DIR"), (".", "SYM-DOT")]);
        let (pp, next) = RuleChunker.build_pp(&bare, 0).unwrap().unwrap();
        assert_eq!(next, 1);
        assert_eq!(pp.children().len(), 1);
    }

    #[test]
    fn builders_stop_at_existing_chunks() {
        let mut segment = seg(&[("rumah", "NN-COM")]);
        segment.push(Node::chunk("NP", vec![Node::leaf("saya", "PRP")]));
        let (_, next) = RuleChunker.build_np(&segment, 0).unwrap().unwrap();
        assert_eq!(next, 1);
    }

    #[test]
    fn out_of_range_is_a_fault() {
        let segment = seg(&[("rumah", "NN-COM")]);
        assert_eq!(
            RuleChunker.build_np(&segment, 3),
            Err(ChunkError::IndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn classification() {
        let c = RuleChunker::new();
        assert!(c.is_np_token("PRP-DEM"));
        assert!(c.is_np_token("NNP"));
        assert!(!c.is_np_token("VB-ACT"));
        assert!(c.is_adjp_token("JJ-QUALITY"));
        assert!(c.is_advp_token("ADV-ATT"));
        assert!(c.is_wh_token("WH-PER"));
    }
}
