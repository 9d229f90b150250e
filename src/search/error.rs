use thiserror::Error;

// Error type for search operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The sentence spec has no positions, so no sequence can exist.
    #[error("Sentence spec is empty, cannot search.")]
    EmptySpec,

    /// The starting word never appears in the graph text.
    #[error("Starting word '{0}' does not appear in the graph.")]
    UnknownStartWord(String),

    /// No completed sequence satisfies the spec from the starting word.
    #[error("No sequence matching the sentence spec found from '{0}'.")]
    NotFound(String),
}
