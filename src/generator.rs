//! The one-call operation surface: graph text in, best sentence out.
//!
//! Each `generate` call parses the graph text into a fresh `GraphStore`
//! keyed to the sentence spec it was handed, runs the requested strategy,
//! and drops the store on the way out. Nothing is shared between calls, so
//! independent invocations with different specs never see each other's
//! tag buckets.

use std::fmt;

use thiserror::Error;

use crate::graph::{GraphParser, ParseError, SentenceSpec};
use crate::search::{SearchEngine, SearchError, Strategy};

/// Error type for a whole generation request. Parse failures and search
/// failures stay distinguishable for the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("Graph parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

/// The result of one generation request.
#[derive(Clone, Debug)]
pub struct Generation {
    pub sentence: String,
    pub probability: f64,
    pub nodes_considered: u64,
}

impl fmt::Display for Generation {
    /// Renders the program's output line. `f64`'s `Display` is already
    /// non-scientific and non-grouped, at full precision.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" with probability {}\nTotal nodes considered: {}",
            self.sentence, self.probability, self.nodes_considered
        )
    }
}

/// Builds the transition graph from `graph_text` under `spec`, then searches
/// it from `starting_word` with the given strategy.
///
/// # Errors
/// - `GenerateError::Parse` on any malformed graph line (the whole request
///   aborts; no partial graph is used).
/// - `GenerateError::Search` when the spec is empty, the starting word never
///   appears in the graph, or no completed sequence exists.
pub fn generate(
    starting_word: &str,
    spec: &SentenceSpec,
    strategy: Strategy,
    graph_text: &str,
) -> Result<Generation, GenerateError> {
    let store = GraphParser::parse(graph_text, spec)?;
    let engine = SearchEngine::new(&store, spec);
    let outcome = engine.run(starting_word, strategy)?;

    Ok(Generation {
        sentence: outcome.sequence.sentence(),
        probability: outcome.sequence.total_probability(),
        nodes_considered: outcome.nodes_considered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(tags: &[&str]) -> SentenceSpec {
        tags.iter().copied().collect()
    }

    #[test]
    fn end_to_end_single_edge() {
        let spec = spec(&["NN", "VBD"]);
        let generation =
            generate("a", &spec, Strategy::BreadthFirst, "a/NN//b/VBD/0.5").unwrap();
        assert_eq!(generation.sentence, "a b");
        assert_eq!(generation.probability, 0.5);
        assert_eq!(generation.nodes_considered, 1);
    }

    #[test]
    fn rendering_matches_output_line_format() {
        let generation = Generation {
            sentence: "a b".to_string(),
            probability: 0.5,
            nodes_considered: 1,
        };
        assert_eq!(
            generation.to_string(),
            "\"a b\" with probability 0.5\nTotal nodes considered: 1"
        );
    }

    #[test]
    fn small_probabilities_render_without_exponent() {
        let generation = Generation {
            sentence: "a b".to_string(),
            probability: 0.5f64.powi(30),
            nodes_considered: 7,
        };
        let rendered = generation.to_string();
        assert!(
            !rendered.contains("e-") && !rendered.contains("E-"),
            "{rendered}"
        );
        assert!(rendered.contains("0.000000000931322574615478"), "{rendered}");
    }

    #[test]
    fn parse_failure_is_distinguishable() {
        let spec = spec(&["NN", "VBD"]);
        let err = generate("a", &spec, Strategy::BreadthFirst, "a/NN//b/VBD").unwrap_err();
        assert!(matches!(err, GenerateError::Parse(_)));
    }

    #[test]
    fn search_failure_is_distinguishable() {
        let spec = spec(&["NN", "VBD"]);
        let err = generate("b", &spec, Strategy::BreadthFirst, "a/NN//b/VBD/0.5").unwrap_err();
        assert_eq!(
            err,
            GenerateError::Search(SearchError::NotFound("b".to_string()))
        );
    }
}
