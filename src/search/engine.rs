// engine.rs
// ──────────────────────────────────────────────────────────────────────────────
// The three interchangeable search strategies over a word-transition graph.
// All of them grow sequences by the same match rule: an edge out of the
// sequence's last word is usable only when its before-tag equals that word's
// tag AND its bucket tag equals the spec tag at the sequence's current
// length.  Breadth-first and depth-first exhaust the reachable space and
// return the true maximum-probability completion; greedy commits to the
// first complete sequence that reaches the top of its priority frontier.
// ──────────────────────────────────────────────────────────────────────────────
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

use super::error::SearchError;
use super::sequence::{Sequence, Word};
use crate::graph::{GraphStore, SentenceSpec};

/// Which traversal the engine runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
    Greedy,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::BreadthFirst => "BREADTH_FIRST",
            Strategy::DepthFirst => "DEPTH_FIRST",
            Strategy::Greedy => "GREEDY",
        };
        write!(f, "{}", name)
    }
}

/// A completed search: the winning sequence and the number of edge
/// candidates examined along the way. The counter is a diagnostic, never a
/// control value.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub sequence: Sequence,
    pub nodes_considered: u64,
}

/// Lazy child expansion state for one depth-first stack frame.
enum Expansion {
    Unexpanded,
    Expanded { children: Vec<Word>, cursor: usize },
}

struct Frame {
    seq: Sequence,
    expansion: Expansion,
}

impl Frame {
    fn new(seq: Sequence) -> Self {
        Self {
            seq,
            expansion: Expansion::Unexpanded,
        }
    }

    /// The next not-yet-visited child, advancing the cursor past it.
    fn next_child(&mut self) -> Option<Word> {
        match &mut self.expansion {
            Expansion::Unexpanded => None,
            Expansion::Expanded { children, cursor } => {
                let word = children.get(*cursor).cloned();
                if word.is_some() {
                    *cursor += 1;
                }
                word
            }
        }
    }
}

/// Greedy frontier entry: a sequence keyed by its optimistic score, with
/// insertion order breaking score ties (earlier insertion wins the pop).
struct Scored {
    score: f64,
    order: u64,
    sequence: Sequence,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Runs one of the three strategies against a store and a spec. Borrows
/// both; a store is only ever paired with the spec it was built from.
pub struct SearchEngine<'a> {
    store: &'a GraphStore,
    spec: &'a SentenceSpec,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a GraphStore, spec: &'a SentenceSpec) -> Self {
        Self { store, spec }
    }

    /// Searches for the best completed sequence starting at `start_word`.
    ///
    /// # Errors
    /// - `SearchError::EmptySpec` when the spec has no positions.
    /// - `SearchError::UnknownStartWord` when the graph text never mentioned
    ///   the starting word.
    /// - `SearchError::NotFound` when no completed sequence exists.
    pub fn run(&self, start_word: &str, strategy: Strategy) -> Result<SearchOutcome, SearchError> {
        let first_tag = self.spec.tag(0).ok_or(SearchError::EmptySpec)?;
        if !self.store.contains_word(start_word) {
            return Err(SearchError::UnknownStartWord(start_word.to_string()));
        }

        // The root word is seeded at the spec's first tag with probability 1.
        let root = Sequence::seed(start_word, first_tag);
        let (best, nodes_considered) = match strategy {
            Strategy::BreadthFirst => self.breadth_first(root),
            Strategy::DepthFirst => self.depth_first(root),
            Strategy::Greedy => self.greedy(root),
        };

        match best {
            Some(sequence) => Ok(SearchOutcome {
                sequence,
                nodes_considered,
            }),
            None => Err(SearchError::NotFound(start_word.to_string())),
        }
    }

    /// Every usable next word out of `seq`'s last word. Each edge in the
    /// positional bucket counts as one candidate examined, match or not.
    fn candidates(&self, seq: &Sequence, nodes_considered: &mut u64) -> Vec<Word> {
        let mut out = Vec::new();
        let (Some(last), Some(next_tag)) = (seq.last_word(), self.spec.tag(seq.len())) else {
            return out;
        };
        let Some(node) = self.store.node(last.text()) else {
            return out;
        };
        for edge in node.edges(next_tag) {
            *nodes_considered += 1;
            if edge.before_tag() == last.tag() {
                out.push(Word::new(edge.word(), next_tag, edge.probability()));
            }
        }
        out
    }

    /// First-found-wins selection under a strict greater-than comparison:
    /// a later sequence with equal probability never replaces the incumbent.
    /// Completions carrying probability 0 are never selected.
    fn select_best(completed: Vec<Sequence>) -> Option<Sequence> {
        let mut max_probability = 0.0;
        let mut best = None;
        for seq in completed {
            let probability = seq.total_probability();
            if probability > max_probability {
                max_probability = probability;
                best = Some(seq);
            }
        }
        best
    }

    /// Exhaustive search over a FIFO frontier.
    fn breadth_first(&self, root: Sequence) -> (Option<Sequence>, u64) {
        let mut completed = Vec::new();
        let mut nodes_considered = 0;
        let mut queue = VecDeque::new();
        queue.push_back(root);

        while let Some(seq) = queue.pop_front() {
            if seq.is_complete(self.spec) {
                completed.push(seq);
                continue;
            }
            for word in self.candidates(&seq, &mut nodes_considered) {
                if let Some(next) = seq.extended(word, self.spec) {
                    queue.push_back(next);
                }
            }
        }

        (Self::select_best(completed), nodes_considered)
    }

    /// Exhaustive search over an explicit stack. Each frame computes its
    /// candidate children once, on first visit, then walks a cursor over
    /// them; an exhausted frame is popped (backtrack). Visits the same
    /// completions as breadth-first in a different order, with stack depth
    /// bounded by the spec length.
    fn depth_first(&self, root: Sequence) -> (Option<Sequence>, u64) {
        let mut completed = Vec::new();
        let mut nodes_considered = 0;
        let mut stack = vec![Frame::new(root)];

        while !stack.is_empty() {
            let is_complete = stack
                .last()
                .map(|frame| frame.seq.is_complete(self.spec))
                .unwrap_or(false);
            if is_complete {
                if let Some(frame) = stack.pop() {
                    completed.push(frame.seq);
                }
                continue;
            }

            let next_word = match stack.last_mut() {
                Some(frame) => {
                    if matches!(frame.expansion, Expansion::Unexpanded) {
                        let children = self.candidates(&frame.seq, &mut nodes_considered);
                        frame.expansion = Expansion::Expanded {
                            children,
                            cursor: 0,
                        };
                    }
                    frame.next_child()
                }
                None => break,
            };

            match next_word {
                Some(word) => {
                    let extended = stack
                        .last()
                        .and_then(|frame| frame.seq.extended(word, self.spec));
                    if let Some(next) = extended {
                        stack.push(Frame::new(next));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        (Self::select_best(completed), nodes_considered)
    }

    /// Greedy best-first search over a max-priority frontier. Terminates the
    /// moment the popped top-priority sequence is complete, without
    /// comparing it against anything still enqueued, so the result is a
    /// greedy approximation rather than the guaranteed global optimum.
    fn greedy(&self, root: Sequence) -> (Option<Sequence>, u64) {
        let mut nodes_considered = 0;
        let mut order = 0;
        let mut heap = BinaryHeap::new();
        heap.push(Scored {
            score: root.total_probability(),
            order,
            sequence: root,
        });

        while let Some(Scored { sequence, .. }) = heap.pop() {
            if sequence.is_complete(self.spec) {
                return (Some(sequence), nodes_considered);
            }
            for word in self.candidates(&sequence, &mut nodes_considered) {
                if let Some(next) = sequence.extended(word.clone(), self.spec) {
                    let score = self.estimate(word.text(), next.len(), next.total_probability());
                    order += 1;
                    heap.push(Scored {
                        score,
                        order,
                        sequence: next,
                    });
                }
            }
        }

        (None, nodes_considered)
    }

    /// Optimistic lookahead used to score greedy frontier entries: the
    /// accumulated probability multiplied through a recursive fan-out over
    /// the remaining positions.
    ///
    /// The lookahead keys edge compatibility on the slot tag itself (not the
    /// preceding word's tag), multiplies across every compatible edge
    /// instead of taking the best one, and flattens to 1 at the end of the
    /// spec. The resulting scores can over- or under-shoot the attainable
    /// probability; the estimator is not admissible and is kept exactly as
    /// the defined Greedy behavior.
    fn estimate(&self, word: &str, index: usize, probability: f64) -> f64 {
        let Some(slot_tag) = self.spec.tag(index) else {
            return 1.0;
        };
        let mut estimated = probability;
        if let Some(node) = self.store.node(word) {
            for edge in node.edges(slot_tag) {
                if edge.before_tag() == slot_tag {
                    estimated *= self.estimate(edge.word(), index + 1, edge.probability());
                }
            }
        }
        estimated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphParser;

    const STRATEGIES: [Strategy; 3] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::Greedy,
    ];

    fn spec(tags: &[&str]) -> SentenceSpec {
        tags.iter().copied().collect()
    }

    fn store(text: &str, spec: &SentenceSpec) -> GraphStore {
        GraphParser::parse(text, spec).unwrap()
    }

    #[test]
    fn single_edge_round_trip_breadth_first() {
        let spec = spec(&["NN", "VBD"]);
        let store = store("a/NN//b/VBD/0.5", &spec);
        let engine = SearchEngine::new(&store, &spec);

        let outcome = engine.run("a", Strategy::BreadthFirst).unwrap();
        assert_eq!(outcome.sequence.sentence(), "a b");
        assert_eq!(outcome.sequence.total_probability(), 0.5);
        assert_eq!(outcome.nodes_considered, 1);
    }

    #[test]
    fn exhaustive_strategies_agree_on_unique_optimum() {
        let spec = spec(&["NNP", "VBD", "NN"]);
        let text = "hans/NNP//ran/VBD/0.4\n\
                    hans/NNP//walked/VBD/0.6\n\
                    ran/VBD//home/NN/0.5\n\
                    walked/VBD//home/NN/0.5";
        let store = store(text, &spec);
        let engine = SearchEngine::new(&store, &spec);

        let bfs = engine.run("hans", Strategy::BreadthFirst).unwrap();
        let dfs = engine.run("hans", Strategy::DepthFirst).unwrap();
        assert_eq!(bfs.sequence.sentence(), "hans walked home");
        assert_eq!(dfs.sequence.sentence(), bfs.sequence.sentence());
        assert_eq!(
            dfs.sequence.total_probability(),
            bfs.sequence.total_probability()
        );

        // Greedy is only held to producing a complete, non-trivial answer.
        let greedy = engine.run("hans", Strategy::Greedy).unwrap();
        assert!(greedy.sequence.is_complete(&spec));
        assert!(greedy.sequence.total_probability() > 0.0);
    }

    #[test]
    fn breadth_and_depth_first_examine_the_same_candidates() {
        let spec = spec(&["NNP", "VBD", "NN"]);
        let text = "hans/NNP//ran/VBD/0.4\n\
                    hans/NNP//walked/VBD/0.6\n\
                    ran/VBD//home/NN/0.5\n\
                    walked/VBD//home/NN/0.5";
        let store = store(text, &spec);
        let engine = SearchEngine::new(&store, &spec);

        let bfs = engine.run("hans", Strategy::BreadthFirst).unwrap();
        let dfs = engine.run("hans", Strategy::DepthFirst).unwrap();
        assert_eq!(bfs.nodes_considered, 4);
        assert_eq!(dfs.nodes_considered, bfs.nodes_considered);
    }

    #[test]
    fn equal_probability_keeps_first_found() {
        let spec = spec(&["NNP", "VBD"]);
        let text = "hans/NNP//ran/VBD/0.6\nhans/NNP//walked/VBD/0.6";
        let store = store(text, &spec);
        let engine = SearchEngine::new(&store, &spec);

        // Edges are appended in line order, so "hans ran" completes first in
        // both exhaustive enumerations and must not be displaced.
        for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
            let outcome = engine.run("hans", strategy).unwrap();
            assert_eq!(outcome.sequence.sentence(), "hans ran");
            assert_eq!(outcome.sequence.total_probability(), 0.6);
        }
    }

    #[test]
    fn missing_position_one_tag_is_not_found() {
        // The only edge's destination tag is outside the spec, so the edge
        // is dropped at parse time and nothing can fill position 1.
        let spec = spec(&["NN", "JJS"]);
        let store = store("a/NN//b/VBD/0.5", &spec);
        let engine = SearchEngine::new(&store, &spec);

        for strategy in STRATEGIES {
            assert_eq!(
                engine.run("a", strategy).unwrap_err(),
                SearchError::NotFound("a".to_string()),
                "strategy {strategy}"
            );
        }
    }

    #[test]
    fn zero_probability_completions_are_not_found() {
        let spec = spec(&["NN", "VBD"]);
        let store = store("a/NN//b/VBD/0", &spec);
        let engine = SearchEngine::new(&store, &spec);

        for strategy in [Strategy::BreadthFirst, Strategy::DepthFirst] {
            assert_eq!(
                engine.run("a", strategy).unwrap_err(),
                SearchError::NotFound("a".to_string())
            );
        }
    }

    #[test]
    fn empty_spec_is_rejected() {
        let spec = spec(&[]);
        let store = store("", &spec);
        let engine = SearchEngine::new(&store, &spec);
        for strategy in STRATEGIES {
            assert_eq!(engine.run("a", strategy).unwrap_err(), SearchError::EmptySpec);
        }
    }

    #[test]
    fn unknown_start_word_is_rejected() {
        let spec = spec(&["NN", "VBD"]);
        let store = store("a/NN//b/VBD/0.5", &spec);
        let engine = SearchEngine::new(&store, &spec);
        for strategy in STRATEGIES {
            assert_eq!(
                engine.run("zebra", strategy).unwrap_err(),
                SearchError::UnknownStartWord("zebra".to_string())
            );
        }
    }

    #[test]
    fn depth_first_backtracks_through_branching() {
        let spec = spec(&["DT", "NN", "VBD"]);
        let text = "a/DT//dog/NN/0.3\n\
                    a/DT//cat/NN/0.7\n\
                    dog/NN//ran/VBD/0.9\n\
                    cat/NN//slept/VBD/0.2";
        let store = store(text, &spec);
        let engine = SearchEngine::new(&store, &spec);

        let outcome = engine.run("a", Strategy::DepthFirst).unwrap();
        // 0.3 * 0.9 = 0.27 beats 0.7 * 0.2 = 0.14.
        assert_eq!(outcome.sequence.sentence(), "a dog ran");
    }
}
