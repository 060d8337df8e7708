use crate::ast::Token;
use crate::error::PavitaError;

/// One sentence read from pre-tagged text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSentence {
    pub line_no: usize,
    pub raw_text: String,
    pub tokens: Vec<Token>,
}

/// Read pre-tagged text, one sentence per line: `Saya/PRP makan/VB-ACT`.
///
/// Blank lines and `//` comment lines are skipped. A malformed line yields an
/// error in its slot and does not stop the remaining lines.
pub fn parse(input: &str) -> Vec<Result<TaggedSentence, PavitaError>> {
    let mut sentences = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let mut raw = line;
        if idx == 0 {
            raw = raw.trim_start_matches('\u{feff}');
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        sentences.push(parse_line(trimmed, line_no));
    }

    sentences
}

fn parse_line(line: &str, line_no: usize) -> Result<TaggedSentence, PavitaError> {
    let mut tokens = Vec::new();
    for item in line.split_whitespace() {
        let token =
            parse_item(item).map_err(|message| PavitaError::TaggedInput { line_no, message })?;
        tokens.push(token);
    }

    let raw_text = tokens
        .iter()
        .map(|t| t.surface.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(TaggedSentence {
        line_no,
        raw_text,
        tokens,
    })
}

/// `surface/TAG`, split at the last slash so `dan/atau/CON-COO` keeps its
/// slash in the surface.
fn parse_item(item: &str) -> Result<Token, String> {
    let Some((surface, tag)) = item.rsplit_once('/') else {
        return Err(format!("missing tag in {:?}", item));
    };
    if surface.is_empty() {
        return Err(format!("missing surface in {:?}", item));
    }
    if tag.is_empty() {
        return Err(format!("empty tag in {:?}", item));
    }
    Ok(Token::new(surface, tag))
}
