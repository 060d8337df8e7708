//! Context-window repair of known POS ambiguities.
//!
//! One left-to-right pass walks the tokens; at each unresolved position the
//! triggers are tried in order and the first one that actually changes the
//! tag wins. Handlers only see the previous tag and the next two tags
//! (empty string when out of range). A closing pass then settles the
//! demonstratives `ini`/`itu`/`tersebut` unconditionally.

use std::collections::BTreeSet;

use crate::ast::Token;
use crate::tags;

pub const PRP_DEM: &str = "PRP-DEM";
pub const DT_DEF: &str = "DT-DEF";
pub const DT_INDEF: &str = "DT-INDEF";
pub const NN_MASS: &str = "NN-MASS";
pub const NN_COM: &str = "NN-COM";
pub const MOD_EMPH: &str = "MOD-EMPH";
pub const MOD_ASP: &str = "MOD-ASP";
pub const IN_COM: &str = "IN-COM";
pub const IN_TEMP: &str = "IN-TEMP";
pub const JJ_QUALITY: &str = "JJ-QUALITY";
pub const CON_COR: &str = "CON-COR";
pub const ADV_ATT: &str = "ADV-ATT";

/// Fallback for the degree words. Downstream consumers match on this exact
/// (misspelled) string.
pub const DEGREE_FALLBACK: &str = "AVD-ATT";

const DEMONSTRATIVE_TRIGGERS: &[&str] = &["itu", "ini", "tersebut", "demikian"];
const MASS_NOUNS: &[&str] = &["air", "tepung", "gula", "beras"];
const TEMPORAL_SUBORDINATORS: &[&str] = &["sejak", "hingga", "selama", "sewaktu"];
const EMPHASIS_WORDS: &[&str] = &["malah", "justru"];
const DEGREE_WORDS: &[&str] = &["sedikit", "lumayan"];
const FINAL_DEMONSTRATIVES: &[&str] = &["ini", "itu", "tersebut"];

const TEMPORAL_INDICATORS: &[&str] = &[
    "VB-ACT", "VB-STAT", "VB-CAUS", "VB-MODL", "VB-TENSE", "MOD-TEMP", "DT-ORD", "DT-CARD",
    "Q-TEMP", "IN-TEMP",
];

/// Working state of a single disambiguation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBuffer {
    surfaces: Vec<String>,
    lowered: Vec<String>,
    tags: Vec<String>,
    resolved: BTreeSet<usize>,
}

impl TagBuffer {
    pub fn new(tokens: &[Token]) -> Self {
        Self {
            surfaces: tokens.iter().map(|t| t.surface.clone()).collect(),
            lowered: tokens.iter().map(|t| t.surface.to_lowercase()).collect(),
            tags: tokens.iter().map(|t| t.tag.clone()).collect(),
            resolved: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tag at `idx`, or `""` when out of range.
    pub fn tag(&self, idx: usize) -> &str {
        self.tags.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn prev(&self, idx: usize) -> &str {
        match idx.checked_sub(1) {
            Some(i) => self.tag(i),
            None => "",
        }
    }

    pub fn next(&self, idx: usize) -> &str {
        self.tag(idx + 1)
    }

    pub fn next_next(&self, idx: usize) -> &str {
        self.tag(idx + 2)
    }

    pub fn word(&self, idx: usize) -> &str {
        self.lowered.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn is_resolved(&self, idx: usize) -> bool {
        self.resolved.contains(&idx)
    }

    pub fn resolved(&self) -> &BTreeSet<usize> {
        &self.resolved
    }

    fn resolve(&mut self, idx: usize, tag: &str) {
        self.tags[idx] = tag.to_string();
        self.resolved.insert(idx);
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.surfaces
            .into_iter()
            .zip(self.tags)
            .map(|(surface, tag)| Token { surface, tag })
            .collect()
    }
}

/// What a trigger keys on.
#[derive(Debug, Clone, Copy)]
enum Key {
    /// Exact current tag plus a lexical set.
    Tag(&'static str, &'static [&'static str]),
    /// Tag family prefix plus a lexical set.
    Family(&'static str, &'static [&'static str]),
    /// Lowercased surface form only.
    Words(&'static [&'static str]),
}

impl Key {
    fn matches(&self, buf: &TagBuffer, idx: usize) -> bool {
        let word = buf.word(idx);
        match *self {
            Key::Tag(tag, words) => buf.tag(idx) == tag && words.contains(&word),
            Key::Family(prefix, words) => {
                buf.tag(idx).starts_with(prefix) && words.contains(&word)
            }
            Key::Words(words) => words.contains(&word),
        }
    }
}

type Handler = fn(&TagBuffer, usize) -> Option<&'static str>;

struct Trigger {
    name: &'static str,
    key: Key,
    handler: Handler,
}

const TRIGGERS: &[Trigger] = &[
    Trigger {
        name: "demonstrative",
        key: Key::Tag(PRP_DEM, DEMONSTRATIVE_TRIGGERS),
        handler: demonstrative_vs_determiner,
    },
    Trigger {
        name: "mass_noun",
        key: Key::Family(tags::NOUN, MASS_NOUNS),
        handler: mass_vs_common,
    },
    Trigger {
        name: "sama",
        key: Key::Words(&["sama"]),
        handler: sama,
    },
    Trigger {
        name: "baik",
        key: Key::Words(&["baik"]),
        handler: quality_vs_correlative,
    },
    Trigger {
        name: "temporal_subordinator",
        key: Key::Words(TEMPORAL_SUBORDINATORS),
        handler: subordinator_vs_temporal,
    },
    Trigger {
        name: "emphasis",
        key: Key::Words(EMPHASIS_WORDS),
        handler: emphasis_vs_aspect,
    },
    Trigger {
        name: "degree",
        key: Key::Words(DEGREE_WORDS),
        handler: degree_word,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Disambiguator;

impl Disambiguator {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, tokens: &[Token]) -> Vec<Token> {
        let mut buf = TagBuffer::new(tokens);
        self.resolve_pass(&mut buf);
        self.finalize_demonstratives(&mut buf);
        buf.into_tokens()
    }

    /// The trigger pass. Each index is visited once; resolved indices are
    /// never rewritten by a later trigger in the same pass.
    pub fn resolve_pass(&self, buf: &mut TagBuffer) {
        for idx in 0..buf.len() {
            self.resolve_at(buf, idx);
        }
    }

    /// Run the trigger table on one index. Returns true when a trigger
    /// retagged it; an already resolved index is left alone.
    pub fn resolve_at(&self, buf: &mut TagBuffer, idx: usize) -> bool {
        if buf.is_resolved(idx) {
            return false;
        }
        for trigger in TRIGGERS {
            if !trigger.key.matches(buf, idx) {
                continue;
            }
            let Some(new_tag) = (trigger.handler)(buf, idx) else {
                continue;
            };
            if new_tag != buf.tag(idx) {
                tracing::trace!(
                    idx,
                    trigger = trigger.name,
                    from = buf.tag(idx),
                    to = new_tag,
                    "retagged"
                );
                buf.resolve(idx, new_tag);
                return true;
            }
        }
        false
    }

    /// Settle `ini`/`itu`/`tersebut` regardless of earlier resolution.
    pub fn finalize_demonstratives(&self, buf: &mut TagBuffer) {
        for idx in 0..buf.len() {
            if !FINAL_DEMONSTRATIVES.contains(&buf.word(idx)) {
                continue;
            }

            let mut tag = PRP_DEM;
            let next = buf.next(idx);
            if tags::is_nominal(next) || tags::is_adjective(next) {
                tag = DT_DEF;
            }
            let prev = buf.prev(idx);
            if tags::is_verb(prev) || tags::is_preposition(prev) {
                tag = PRP_DEM;
            }
            buf.tags[idx] = tag.to_string();
        }
    }
}

fn demonstrative_vs_determiner(buf: &TagBuffer, idx: usize) -> Option<&'static str> {
    if tags::is_nominal(buf.next(idx)) || tags::is_nominal(buf.prev(idx)) {
        return Some(DT_DEF);
    }
    Some(PRP_DEM)
}

fn mass_vs_common(buf: &TagBuffer, idx: usize) -> Option<&'static str> {
    let (prev, next, next_next) = (buf.prev(idx), buf.next(idx), buf.next_next(idx));

    if tags::is_verb(prev) {
        return Some(NN_MASS);
    }
    if tags::is_adjective(next) || tags::is_adjective(next_next) {
        return Some(NN_MASS);
    }
    if tags::is_determiner(next) {
        return Some(NN_COM);
    }
    None
}

fn sama(buf: &TagBuffer, idx: usize) -> Option<&'static str> {
    let next = buf.next(idx);
    if tags::is_modifier(next) || next == ADV_ATT {
        return Some(MOD_EMPH);
    }
    if tags::is_verb(buf.prev(idx)) {
        return Some(IN_COM);
    }
    Some(JJ_QUALITY)
}

fn quality_vs_correlative(buf: &TagBuffer, idx: usize) -> Option<&'static str> {
    if buf.tag(idx) == JJ_QUALITY && (buf.prev(idx) == CON_COR || buf.next(idx) == CON_COR) {
        return Some(CON_COR);
    }
    None
}

fn subordinator_vs_temporal(buf: &TagBuffer, idx: usize) -> Option<&'static str> {
    let temporal = [buf.next(idx), buf.next_next(idx)]
        .into_iter()
        .any(|tag| TEMPORAL_INDICATORS.iter().any(|ind| tag.starts_with(ind)));
    temporal.then_some(IN_TEMP)
}

fn emphasis_vs_aspect(buf: &TagBuffer, idx: usize) -> Option<&'static str> {
    if !matches!(buf.tag(idx), MOD_EMPH | MOD_ASP) {
        return None;
    }
    let (prev, next) = (buf.prev(idx), buf.next(idx));
    if tags::is_verb(prev) || tags::is_verb(next) {
        return Some(MOD_ASP);
    }
    Some(MOD_EMPH)
}

fn degree_word(buf: &TagBuffer, idx: usize) -> Option<&'static str> {
    if tags::is_nominal(buf.tag(idx)) {
        return None;
    }
    let (prev, next) = (buf.prev(idx), buf.next(idx));

    if tags::is_determiner(prev) && tags::is_nominal(next) {
        return Some(JJ_QUALITY);
    }
    if tags::is_adjective(next) {
        return Some(ADV_ATT);
    }
    if tags::is_verb(prev) {
        return Some(JJ_QUALITY);
    }
    if tags::is_nominal(next) {
        return Some(DT_INDEF);
    }
    Some(DEGREE_FALLBACK)
}
