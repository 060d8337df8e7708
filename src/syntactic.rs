//! Sentence-level syntactic parse.
//!
//! Chunking and clause detection can be swapped out through a
//! [`ParseStrategy`]; a `None` slot means the built-in pass is used. An
//! override that fails never fails the sentence: chunking falls back to the
//! untouched tokens, clause detection to the built-in detector.

use crate::assembler;
use crate::ast::{Node, Token};
use crate::chunking::{ChunkBuilder, RuleChunker};
use crate::clause;
use crate::constituents;
use crate::depth;
use crate::error::PavitaError;
use crate::grammar::GrammarTable;
use crate::types::{ClauseBoundary, SyntacticParse};

pub const ROOT_LABEL: &str = "S";

pub type ChunkingFn = fn(&[Node]) -> Result<Vec<Node>, PavitaError>;
pub type ClauseFn = fn(&[Node]) -> Result<Vec<ClauseBoundary>, PavitaError>;

#[derive(Clone, Copy, Default)]
pub struct ParseStrategy {
    pub pre_chunking: Option<ChunkingFn>,
    pub clause_detection: Option<ClauseFn>,
}

pub struct SyntacticParser<B = RuleChunker> {
    grammar: GrammarTable,
    builder: B,
    strategy: ParseStrategy,
    validate_structure: bool,
}

impl SyntacticParser<RuleChunker> {
    pub fn new(grammar: GrammarTable) -> Self {
        Self::with_builder(grammar, RuleChunker)
    }
}

impl<B: ChunkBuilder> SyntacticParser<B> {
    pub fn with_builder(grammar: GrammarTable, builder: B) -> Self {
        Self {
            grammar,
            builder,
            strategy: ParseStrategy::default(),
            validate_structure: false,
        }
    }

    pub fn strategy(mut self, strategy: ParseStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Also check the root's children against the `S` productions.
    pub fn validate_structure(mut self, enabled: bool) -> Self {
        self.validate_structure = enabled;
        self
    }

    pub fn syntactic_parse(&self, tokens: &[Token]) -> SyntacticParse {
        let nodes: Vec<Node> = tokens.iter().cloned().map(Node::from).collect();

        let chunks = self.chunk(&nodes);
        let clauses = self.clauses(&chunks);
        let depth = depth::annotate_depth_and_level(&chunks);
        let grammatical = self
            .validate_structure
            .then(|| self.grammar.is_valid_structure(ROOT_LABEL, &chunks));

        let tree = Node::chunk(ROOT_LABEL, chunks);
        let (constituents, leaf_count) = constituents::get_constituents(&tree);

        SyntacticParse {
            tree,
            clauses,
            constituents,
            leaf_count,
            depth,
            grammatical,
        }
    }

    fn chunk(&self, nodes: &[Node]) -> Vec<Node> {
        let Some(pre_chunking) = self.strategy.pre_chunking else {
            return assembler::pre_parse_chunking(nodes, &self.builder);
        };
        match pre_chunking(nodes) {
            Ok(chunks) => chunks,
            Err(err) => {
                tracing::warn!(error = %err, "chunking override failed, keeping tokens as leaves");
                nodes.to_vec()
            }
        }
    }

    fn clauses(&self, chunks: &[Node]) -> Vec<ClauseBoundary> {
        let Some(detect) = self.strategy.clause_detection else {
            return clause::detect_clause_boundary(chunks);
        };
        match detect(chunks) {
            Ok(boundaries) => boundaries,
            Err(err) => {
                tracing::warn!(error = %err, "clause override failed, using built-in detector");
                clause::detect_clause_boundary(chunks)
            }
        }
    }
}
