use super::error::ParseError;
use super::store::{GraphStore, SentenceSpec};

//─────────────────────────────────────────────────────────────────────────────

/// `GraphParser` builds a `GraphStore` from line-oriented graph text.
///
/// Each line encodes one observed transition:
///
/// ```text
/// word1/TAG1//word2/TAG2/PROBABILITY
/// ```
///
/// Both endpoints' nodes are created (with spec-wide tag buckets) for every
/// line, but the edge itself is registered only when both tags appear
/// somewhere in the active spec's tag set. Edges whose tags fall outside the
/// spec vocabulary are silently dropped.
pub struct GraphParser;

impl GraphParser {
    /// Parses `graph_text` against the given spec.
    ///
    /// # Errors
    /// Returns `ParseError` on the first malformed line (wrong field count,
    /// unparseable or negative probability). The parse is all-or-nothing.
    pub fn parse(graph_text: &str, spec: &SentenceSpec) -> Result<GraphStore, ParseError> {
        let mut store = GraphStore::new(spec);

        for (index, line) in graph_text.lines().enumerate() {
            let line_no = index + 1;
            let (source_word, source_tag, dest_word, dest_tag, probability) =
                Self::parse_line(line, line_no)?;

            // Node creation happens regardless of whether the edge survives
            // the vocabulary check, matching bucket pre-allocation order.
            store.resolve(source_word);
            store.resolve(dest_word);

            if spec.contains(source_tag) && spec.contains(dest_tag) {
                store.add_edge(source_word, source_tag, dest_word, dest_tag, probability);
            }
        }

        Ok(store)
    }

    /// Splits one line into its five fields.
    fn parse_line(line: &str, line_no: usize) -> Result<(&str, &str, &str, &str, f64), ParseError> {
        let malformed = || ParseError::MalformedLine {
            line: line_no,
            content: line.to_string(),
        };

        let (source, rest) = line.split_once("//").ok_or_else(malformed)?;

        let mut source_fields = source.split('/');
        let source_word = source_fields.next().ok_or_else(malformed)?;
        let source_tag = source_fields.next().ok_or_else(malformed)?;
        if source_fields.next().is_some() {
            return Err(malformed());
        }

        let mut rest_fields = rest.split('/');
        let dest_word = rest_fields.next().ok_or_else(malformed)?;
        let dest_tag = rest_fields.next().ok_or_else(malformed)?;
        let probability_field = rest_fields.next().ok_or_else(malformed)?;
        if rest_fields.next().is_some() {
            return Err(malformed());
        }

        let probability: f64 =
            probability_field
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidProbability {
                    line: line_no,
                    value: probability_field.to_string(),
                })?;
        if probability < 0.0 || probability.is_nan() {
            return Err(ParseError::NegativeProbability {
                line: line_no,
                value: probability,
            });
        }

        Ok((source_word, source_tag, dest_word, dest_tag, probability))
    }
}
