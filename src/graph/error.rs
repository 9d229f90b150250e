use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for graph text parsing.
/// A single malformed line aborts the whole parse; no partial graph is
/// usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Line does not follow the `word/TAG//word/TAG/PROBABILITY` layout.
    #[error("line {line}: expected 'word/TAG//word/TAG/PROBABILITY', got '{content}'")]
    MalformedLine { line: usize, content: String },

    /// Probability field is not a decimal literal.
    #[error("line {line}: invalid probability '{value}'")]
    InvalidProbability { line: usize, value: String },

    /// Probability field parsed but is negative.
    #[error("line {line}: probability must be non-negative, got {value}")]
    NegativeProbability { line: usize, value: f64 },
}
