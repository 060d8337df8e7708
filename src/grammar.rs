//! Context-free grammar table and the two structure validators.
//!
//! The table maps a nonterminal to its productions. Production order is rule
//! priority, but both validators only answer "is there any match", so order
//! matters only to callers walking the table themselves.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ast::Labelled;
use crate::error::PavitaError;
use crate::tags::CONNECTOR_MARKER;

const BUNDLED_GRAMMAR: &str = include_str!("../data/grammar.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct GrammarTable {
    rules: HashMap<String, Vec<Vec<String>>>,
}

impl GrammarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The grammar shipped with the crate.
    pub fn bundled() -> Result<Self, PavitaError> {
        Self::from_json(BUNDLED_GRAMMAR)
    }

    pub fn from_json(json: &str) -> Result<Self, PavitaError> {
        serde_json::from_str(json).map_err(PavitaError::Grammar)
    }

    pub fn with_rule<I, S>(mut self, lhs: impl Into<String>, production: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_rule(lhs, production);
        self
    }

    pub fn add_rule<I, S>(&mut self, lhs: impl Into<String>, production: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .entry(lhs.into())
            .or_default()
            .push(production.into_iter().map(Into::into).collect());
    }

    pub fn productions(&self, lhs: &str) -> Option<&[Vec<String>]> {
        self.rules.get(lhs).map(Vec::as_slice)
    }

    pub fn is_nonterminal(&self, label: &str) -> bool {
        self.rules.contains_key(label)
    }

    /// True iff some production of `lhs` matches `rhs` position by position.
    ///
    /// A position matches when the labels are equal, or when the expected
    /// label is itself a nonterminal one of whose productions starts with the
    /// actual label. The generalization goes one level deep only.
    pub fn match_rule<L: Labelled>(&self, lhs: &str, rhs: &[L]) -> bool {
        let Some(productions) = self.productions(lhs) else {
            return false;
        };

        productions.iter().any(|production| {
            production.len() == rhs.len()
                && production
                    .iter()
                    .zip(rhs)
                    .all(|(expected, actual)| self.symbol_matches(expected, actual.grammar_label()))
        })
    }

    fn symbol_matches(&self, expected: &str, actual: &str) -> bool {
        if expected == actual {
            return true;
        }
        match self.productions(expected) {
            Some(productions) => productions
                .iter()
                .any(|p| p.first().map(String::as_str) == Some(actual)),
            None => false,
        }
    }

    /// Tree well-formedness check.
    ///
    /// Connector entries (`CON-*`) are dropped before comparing arity; the
    /// remaining labels match a production when each one equals the expected
    /// label or belongs to its family (`NN-COM` under `NN`).
    pub fn is_valid_structure<L: Labelled>(&self, lhs: &str, rhs: &[L]) -> bool {
        let Some(productions) = self.productions(lhs) else {
            return false;
        };

        let clean: Vec<&str> = rhs
            .iter()
            .map(Labelled::grammar_label)
            .filter(|label| !label.starts_with(CONNECTOR_MARKER))
            .collect();

        productions.iter().any(|production| {
            production.len() == clean.len()
                && production
                    .iter()
                    .zip(&clean)
                    .all(|(expected, actual)| in_family(expected, actual))
        })
    }
}

fn in_family(expected: &str, actual: &str) -> bool {
    actual == expected
        || actual
            .strip_prefix(expected)
            .is_some_and(|rest| rest.starts_with('-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;

    #[test]
    fn match_rule_exact_and_arity() {
        let grammar = GrammarTable::new().with_rule("VP", ["VB-ACT", "NN-COM"]);

        assert!(grammar.match_rule("VP", &["VB-ACT", "NN-COM"]));
        assert!(!grammar.match_rule("VP", &["VB-ACT"]));
        assert!(!grammar.match_rule("VP", &["VB-ACT", "NN-MASS"]));
    }

    #[test]
    fn match_rule_unknown_lhs_is_false() {
        let grammar = GrammarTable::new().with_rule("VP", ["VB"]);
        assert!(!grammar.match_rule("NP", &["VB"]));
        assert!(!grammar.match_rule::<&str>("NP", &[]));
    }

    #[test]
    fn match_rule_generalizes_one_level() {
        let grammar = GrammarTable::new()
            .with_rule("VP", ["VB", "NP"])
            .with_rule("NP", ["NN", "DT"])
            .with_rule("NP", ["PRP"])
            .with_rule("DP", ["NP"]);

        assert!(grammar.match_rule("VP", &["VB", "NN"]));
        assert!(grammar.match_rule("VP", &["VB", "PRP"]));
        assert!(grammar.match_rule("VP", &["VB", "NP"]));
        // DT is in an NP production but not at its head
        assert!(!grammar.match_rule("VP", &["VB", "DT"]));

        // NP is expected and PRP heads one of its productions
        assert!(grammar.match_rule("DP", &["PRP"]));
    }

    #[test]
    fn match_rule_does_not_recurse() {
        let grammar = GrammarTable::new()
            .with_rule("DP", ["XP"])
            .with_rule("XP", ["NP"])
            .with_rule("NP", ["PRP"]);

        assert!(grammar.match_rule("DP", &["NP"]));
        assert!(!grammar.match_rule("DP", &["PRP"]));
    }

    #[test]
    fn is_valid_structure_uses_families_and_drops_connectors() {
        let grammar = GrammarTable::new()
            .with_rule("S", ["NP", "VP"])
            .with_rule("NP", ["NN"]);

        assert!(grammar.is_valid_structure("S", &["NP", "VP"]));
        assert!(grammar.is_valid_structure("S", &["NP", "CON-COO", "VP"]));
        assert!(grammar.is_valid_structure("NP", &["NN-COM"]));
        assert!(!grammar.is_valid_structure("NP", &["NNP"]));
        assert!(!grammar.is_valid_structure("S", &["NP"]));
        assert!(!grammar.is_valid_structure("X", &["NP"]));
    }

    #[test]
    fn is_valid_structure_reduces_nodes_to_labels() {
        let grammar = GrammarTable::bundled().unwrap();
        let children = vec![
            Node::chunk("NP", vec![Node::leaf("Saya", "PRP")]),
            Node::chunk("VP", vec![Node::leaf("makan", "VB-ACT")]),
            Node::chunk("NP", vec![Node::leaf("nasi", "NN-COM")]),
            Node::chunk("PUNCT", vec![Node::leaf(".", "SYM-DOT")]),
        ];
        assert!(grammar.is_valid_structure("S", &children));

        let leaves = vec![Node::leaf("nasi", "NN-COM"), Node::leaf("goreng", "NN-COM")];
        assert!(grammar.is_valid_structure("NP", &leaves));
    }

    #[test]
    fn bundled_grammar_loads() {
        let grammar = GrammarTable::bundled().unwrap();
        assert!(grammar.is_nonterminal("S"));
        assert_eq!(grammar.productions("PP").map(<[_]>::len), Some(2));
    }

    #[test]
    fn from_json_rejects_bad_shapes() {
        let err = GrammarTable::from_json(r#"{"S": "NP VP"}"#).unwrap_err();
        assert!(matches!(err, PavitaError::Grammar(_)));
    }

    #[test]
    fn validators_are_deterministic() {
        let grammar = GrammarTable::bundled().unwrap();
        let rhs = ["NP", "VP", "PP"];
        let first = (grammar.match_rule("S", &rhs), grammar.is_valid_structure("S", &rhs));
        for _ in 0..8 {
            assert_eq!(
                first,
                (grammar.match_rule("S", &rhs), grammar.is_valid_structure("S", &rhs))
            );
        }
    }
}
