use crate::graph::SentenceSpec;

//─────────────────────────────────────────────────────────────────────────────

/// A word as it appears in a candidate sentence: its text, the tag it bears
/// at its position, and the probability of the transition that produced it.
/// The root word of a sequence always carries probability 1, since no
/// transition produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    text: String,
    tag: String,
    probability: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, tag: impl Into<String>, probability: f64) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
            probability,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// A partial or complete candidate sentence whose positional tags match a
/// prefix of the sentence spec.
///
/// Sequences grow by copy-extension only: `extended` returns an independent
/// snapshot, so branching search frontiers never alias each other.
#[derive(Clone, Debug)]
pub struct Sequence {
    words: Vec<Word>,
}

impl Sequence {
    /// Seeds a one-word sequence for a search root. The root transition
    /// carries probability 1.
    pub fn seed(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            words: vec![Word::new(text, tag, 1.0)],
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn last_word(&self) -> Option<&Word> {
        self.words.last()
    }

    /// A sequence is complete only when it has filled every spec position.
    pub fn is_complete(&self, spec: &SentenceSpec) -> bool {
        self.words.len() == spec.len()
    }

    /// The single gate for growth: appends `word` only while the sequence is
    /// shorter than the spec and the word's tag matches the spec tag at the
    /// current position. Returns whether the word was accepted.
    pub fn push(&mut self, word: Word, spec: &SentenceSpec) -> bool {
        match spec.tag(self.words.len()) {
            Some(required) if required == word.tag() => {
                self.words.push(word);
                true
            }
            _ => false,
        }
    }

    /// Copy-extension: a new sequence with `word` appended, or `None` if the
    /// gate rejects it. `self` is never mutated.
    pub fn extended(&self, word: Word, spec: &SentenceSpec) -> Option<Sequence> {
        let mut next = self.clone();
        if next.push(word, spec) {
            Some(next)
        } else {
            None
        }
    }

    /// Space-joined sentence text.
    pub fn sentence(&self) -> String {
        self.words
            .iter()
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Product of the constituent words' carried probabilities.
    pub fn total_probability(&self) -> f64 {
        self.words.iter().map(Word::probability).product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(tags: &[&str]) -> SentenceSpec {
        tags.iter().copied().collect()
    }

    #[test]
    fn root_only_probability_is_one() {
        let seq = Sequence::seed("hans", "NNP");
        assert_eq!(seq.total_probability(), 1.0);
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn push_rejects_tag_mismatch() {
        let spec = spec(&["NNP", "VBD"]);
        let mut seq = Sequence::seed("hans", "NNP");
        assert!(!seq.push(Word::new("dog", "NN", 0.5), &spec));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn push_rejects_when_full() {
        let spec = spec(&["NNP", "VBD"]);
        let mut seq = Sequence::seed("hans", "NNP");
        assert!(seq.push(Word::new("ran", "VBD", 0.5), &spec));
        assert!(seq.is_complete(&spec));
        assert!(!seq.push(Word::new("ran", "VBD", 0.5), &spec));
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn extended_leaves_original_untouched() {
        let spec = spec(&["NNP", "VBD"]);
        let seq = Sequence::seed("hans", "NNP");
        let grown = seq.extended(Word::new("ran", "VBD", 0.5), &spec).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(grown.len(), 2);
        assert_eq!(grown.sentence(), "hans ran");
        assert_eq!(grown.total_probability(), 0.5);
    }

    #[test]
    fn extended_returns_none_on_rejection() {
        let spec = spec(&["NNP"]);
        let seq = Sequence::seed("hans", "NNP");
        assert!(seq.extended(Word::new("ran", "VBD", 0.5), &spec).is_none());
    }
}
