use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ast::Token;
use crate::disambiguation::Disambiguator;
use crate::error::PavitaError;
use crate::grammar::GrammarTable;
use crate::parser;
use crate::syntactic::{ParseStrategy, SyntacticParser};
use crate::tags;
use crate::types::{AnnotationOutput, LineError, SentenceAnnotation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorOptions {
    pub use_disambiguation: bool,
    pub use_syntactic: bool,
    pub validate_structure: bool,
    pub collect_unknown_tags: bool,
}

impl Default for AnnotatorOptions {
    fn default() -> Self {
        Self {
            use_disambiguation: true,
            use_syntactic: true,
            validate_structure: false,
            collect_unknown_tags: true,
        }
    }
}

impl AnnotatorOptions {
    pub fn from_json(json: &str) -> Result<Self, PavitaError> {
        serde_json::from_str(json).map_err(PavitaError::Options)
    }
}

/// Runs disambiguation and syntactic parsing over tagged sentences.
pub struct Annotator {
    options: AnnotatorOptions,
    disambiguator: Disambiguator,
    parser: SyntacticParser,
}

impl Annotator {
    pub fn new(options: AnnotatorOptions, grammar: GrammarTable) -> Self {
        let parser = SyntacticParser::new(grammar).validate_structure(options.validate_structure);
        Self {
            options,
            disambiguator: Disambiguator::new(),
            parser,
        }
    }

    pub fn with_bundled_grammar(options: AnnotatorOptions) -> Result<Self, PavitaError> {
        Ok(Self::new(options, GrammarTable::bundled()?))
    }

    pub fn with_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.parser = self.parser.strategy(strategy);
        self
    }

    pub fn annotate_sentence(&self, raw_text: &str, tokens: &[Token]) -> SentenceAnnotation {
        let tagged = if self.options.use_disambiguation {
            self.disambiguator.handle(tokens)
        } else {
            tokens.to_vec()
        };

        let syntax_tree = (self.options.use_syntactic && !tagged.is_empty())
            .then(|| self.parser.syntactic_parse(&tagged));

        SentenceAnnotation {
            raw_text: raw_text.to_string(),
            token: tagged.iter().map(|t| t.surface.clone()).collect(),
            tagged,
            syntax_tree,
        }
    }

    /// Annotate pre-tagged text, one sentence per line.
    ///
    /// Lines that fail to read are reported in `errors`; every other line
    /// still gets an annotation.
    pub fn annotate_text(&self, input: &str) -> AnnotationOutput {
        let mut output = AnnotationOutput::default();

        for line in parser::parse(input) {
            let sentence = match line {
                Ok(sentence) => sentence,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable line");
                    output.errors.push(line_error(err));
                    continue;
                }
            };

            let annotation = self.annotate_sentence(&sentence.raw_text, &sentence.tokens);
            if self.options.collect_unknown_tags {
                count_unknown_tags(&annotation.tagged, &mut output.unknown_tags);
            }
            output.sentences.push(annotation);
        }

        tracing::debug!(
            sentences = output.sentences.len(),
            errors = output.errors.len(),
            "annotated batch"
        );
        output
    }
}

fn line_error(err: PavitaError) -> LineError {
    match err {
        PavitaError::TaggedInput { line_no, message } => LineError { line_no, message },
        other => LineError {
            line_no: 0,
            message: other.to_string(),
        },
    }
}

fn count_unknown_tags(tokens: &[Token], counts: &mut BTreeMap<String, usize>) {
    for token in tokens {
        if !tags::is_known_tag(&token.tag) {
            *counts.entry(token.tag.clone()).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotator(options: AnnotatorOptions) -> Annotator {
        Annotator::with_bundled_grammar(options).unwrap()
    }

    #[test]
    fn options_fill_in_defaults() {
        let options = AnnotatorOptions::from_json(r#"{"validate_structure": true}"#).unwrap();
        assert!(options.use_disambiguation);
        assert!(options.use_syntactic);
        assert!(options.validate_structure);

        assert!(matches!(
            AnnotatorOptions::from_json(r#"{"use_syntactic": "ya"}"#),
            Err(PavitaError::Options(_))
        ));
    }

    #[test]
    fn disambiguation_runs_before_parsing() {
        let annotator = annotator(AnnotatorOptions::default());
        let tokens = vec![
            Token::new("itu", "PRP-DEM"),
            Token::new("mobil", "NN-COM"),
            Token::new("rusak", "VB-STAT"),
        ];
        let out = annotator.annotate_sentence("itu mobil rusak", &tokens);

        assert_eq!(out.tagged[0].tag, "DT-DEF");
        assert_eq!(out.token, vec!["itu", "mobil", "rusak"]);
        let tree = out.syntax_tree.unwrap().tree;
        // DT-DEF joins the noun in one NP
        assert_eq!(tree.children()[0].leaf_count(), 2);
    }

    #[test]
    fn stages_can_be_disabled() {
        let annotator = annotator(AnnotatorOptions {
            use_disambiguation: false,
            use_syntactic: false,
            ..AnnotatorOptions::default()
        });
        let tokens = vec![Token::new("itu", "PRP-DEM"), Token::new("mobil", "NN-COM")];
        let out = annotator.annotate_sentence("itu mobil", &tokens);
        assert_eq!(out.tagged, tokens);
        assert!(out.syntax_tree.is_none());
    }

    #[test]
    fn batch_continues_past_bad_lines() {
        let annotator = annotator(AnnotatorOptions::default());
        let out = annotator.annotate_text(
            "Saya/PRP makan/VB-ACT nasi/NN-COM ./SYM-DOT\nrusak\nDia/PRP XYZ/FOO-BAR ./SYM-DOT\n",
        );

        assert_eq!(out.sentences.len(), 2);
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].line_no, 2);
        assert_eq!(out.unknown_tags.get("FOO-BAR"), Some(&1));
        assert_eq!(out.sentences[0].raw_text, "Saya makan nasi .");
    }

    #[test]
    fn output_field_names_are_stable() {
        let annotator = annotator(AnnotatorOptions::default());
        let out = annotator.annotate_text("Dia/PRP tidur/VB-STAT");
        let json = serde_json::to_value(&out).unwrap();

        let sentence = &json["sentences"][0];
        assert_eq!(sentence["raw_text"], "Dia tidur");
        assert_eq!(sentence["token"][1], "tidur");
        assert_eq!(sentence["syntax_tree"]["tree"]["label"], "S");
        assert!(json.get("errors").is_none());
    }
}
