use thiserror::Error;

#[derive(Debug, Error)]
pub enum PavitaError {
    #[error("invalid grammar table: {0}")]
    Grammar(#[source] serde_json::Error),

    #[error("invalid annotator options: {0}")]
    Options(#[source] serde_json::Error),

    #[error("failed to serialize output: {0}")]
    Output(#[source] serde_json::Error),

    #[error("line {line_no}: {message}")]
    TaggedInput { line_no: usize, message: String },

    #[error("malformed tree at offset {offset}: {message}")]
    TreeSyntax { offset: usize, message: String },

    #[error("strategy override failed: {0}")]
    Strategy(String),
}

/// Faults raised while building a single chunk. These never leave the
/// assembler; the offending element is passed through instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("index {index} out of range for segment of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("builder resumed at {next} after starting at {index}")]
    NoProgress { index: usize, next: usize },

    #[error("chunk {label} does not cover input span {start}..{end}")]
    CoverageMismatch {
        label: String,
        start: usize,
        end: usize,
    },

    #[error("{0}")]
    Builder(String),
}
