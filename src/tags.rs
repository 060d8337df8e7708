//! Tag taxonomy helpers.
//!
//! Tags are either `MAIN` or `MAIN-SUB`. Everything that needs to reason about
//! tag families goes through the prefix helpers here rather than comparing
//! strings ad hoc.

pub const SEPARATOR: char = '-';

pub const NOUN: &str = "NN";
pub const VERB: &str = "VB";
pub const ADJECTIVE: &str = "JJ";
pub const ADVERB: &str = "ADV";
pub const DETERMINER: &str = "DT";
pub const PREPOSITION: &str = "IN";
pub const MODIFIER: &str = "MOD";
pub const CONNECTOR: &str = "CON";
pub const INTERJECTION: &str = "INT";
pub const SYMBOL: &str = "SYM";

/// Connector marker prefix used when stripping connectors from a production.
pub const CONNECTOR_MARKER: &str = "CON-";

/// Closed inventory of main categories the tagger is expected to emit.
pub const KNOWN_MAIN_CATEGORIES: &[&str] = &[
    "NN", "NNP", "PRP", "DT", "NUM", "VB", "JJ", "ADV", "MOD", "IN", "CON", "INT", "SYM", "WH",
    "Q", "PART",
];

/// Substring before the first separator.
pub fn main_category(tag: &str) -> &str {
    match tag.split_once(SEPARATOR) {
        Some((main, _)) => main,
        None => tag,
    }
}

pub fn has_main(tag: &str, main: &str) -> bool {
    main_category(tag) == main
}

pub fn is_known_tag(tag: &str) -> bool {
    !tag.is_empty() && KNOWN_MAIN_CATEGORIES.contains(&main_category(tag))
}

// Most family checks below are prefix checks, so `NNP` counts as nominal
// and the empty out-of-range sentinel matches nothing.

pub fn is_nominal(tag: &str) -> bool {
    tag.starts_with(NOUN)
}

pub fn is_verb(tag: &str) -> bool {
    tag.starts_with(VERB)
}

pub fn is_adjective(tag: &str) -> bool {
    tag.starts_with(ADJECTIVE)
}

pub fn is_determiner(tag: &str) -> bool {
    tag.starts_with(DETERMINER)
}

/// Main-category check: a plain prefix would also catch `INT`.
pub fn is_preposition(tag: &str) -> bool {
    has_main(tag, PREPOSITION)
}

pub fn is_modifier(tag: &str) -> bool {
    tag.starts_with(MODIFIER)
}

pub fn is_connector(tag: &str) -> bool {
    has_main(tag, CONNECTOR)
}

/// Comma or period punctuation, the clause-level segment terminators.
pub fn is_clause_punctuation(tag: &str) -> bool {
    tag.starts_with("SYM-COM") || tag.starts_with("SYM-DOT")
}
