// store.rs
// ──────────────────────────────────────────────────────────────────────────────
// The word-transition graph: one node per distinct word text, each node owning
// ordered edge lists bucketed by the part-of-speech tag a following word would
// bear.  Buckets are pre-allocated from the sentence spec active when the node
// is created, so a store is only valid for the spec it was built with and is
// rebuilt for every generation request.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::HashMap;
use std::io::Write;

/// Ordered list of required part-of-speech tags. Defines both the exact
/// length of a valid output sentence and, positionally, which tag each word
/// must bear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceSpec {
    tags: Vec<String>,
}

impl SentenceSpec {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the tag required at `position`, if the spec is that long.
    pub fn tag(&self, position: usize) -> Option<&str> {
        self.tags.get(position).map(|s| s.as_str())
    }

    /// Membership test against the whole tag set, not positional match.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl<S: Into<String>> FromIterator<S> for SentenceSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A directed transition out of a node. Holds the destination word's text
/// rather than a reference into the graph; traversal re-resolves nodes by
/// text through the store.
#[derive(Clone, Debug)]
pub struct GraphEdge {
    before_tag: String,
    word: String,
    probability: f64,
}

impl GraphEdge {
    /// The part-of-speech the *source* word had when this transition was
    /// observed.
    pub fn before_tag(&self) -> &str {
        &self.before_tag
    }

    /// Destination word text.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// A word in the graph together with its outgoing edges, bucketed by the tag
/// the destination word bears.
#[derive(Clone, Debug)]
pub struct GraphNode {
    word: String,
    buckets: HashMap<String, Vec<GraphEdge>>,
}

impl GraphNode {
    fn new(word: String, spec: &SentenceSpec) -> Self {
        let mut buckets = HashMap::new();
        // Every tag in the active spec gets a bucket up front, even tags no
        // edge of this node will ever use.
        for tag in spec.tags() {
            buckets.entry(tag.clone()).or_insert_with(Vec::new);
        }
        Self { word, buckets }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Outgoing edges whose destination bears `tag`, in insertion order.
    /// Empty for tags outside the spec the node was built with.
    pub fn edges(&self, tag: &str) -> &[GraphEdge] {
        self.buckets.get(tag).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn add_edge(&mut self, before_tag: &str, dest_tag: &str, word: &str, probability: f64) {
        if let Some(bucket) = self.buckets.get_mut(dest_tag) {
            bucket.push(GraphEdge {
                before_tag: before_tag.to_string(),
                word: word.to_string(),
                probability,
            });
        }
    }
}

/// The master word → node map for one generation request.
#[derive(Clone, Debug)]
pub struct GraphStore {
    nodes: HashMap<String, GraphNode>,
    spec: SentenceSpec,
}

impl GraphStore {
    pub fn new(spec: &SentenceSpec) -> Self {
        Self {
            nodes: HashMap::new(),
            spec: spec.clone(),
        }
    }

    /// Returns the node for `word`, if the graph text ever mentioned it.
    pub fn node(&self, word: &str) -> Option<&GraphNode> {
        self.nodes.get(word)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.nodes.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolves `word` to its node, creating it (with spec-wide tag buckets)
    /// on first sight. Construction-time only; search never creates nodes.
    pub(crate) fn resolve(&mut self, word: &str) -> &mut GraphNode {
        let spec = &self.spec;
        self.nodes
            .entry(word.to_string())
            .or_insert_with(|| GraphNode::new(word.to_string(), spec))
    }

    /// Registers an edge from `source` to `dest`: appended to the source
    /// node's bucket for the destination tag, annotated with the source tag.
    pub(crate) fn add_edge(
        &mut self,
        source: &str,
        source_tag: &str,
        dest: &str,
        dest_tag: &str,
        probability: f64,
    ) {
        self.resolve(source)
            .add_edge(source_tag, dest_tag, dest, probability);
    }

    /// Dumps every node and its edge lists to the given writer, in a
    /// consistent order.
    pub fn write_details(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "=== TRANSITION GRAPH NODES ===")?;
        writeln!(writer, "Total nodes: {}", self.nodes.len())?;
        writeln!(writer)?;

        let mut nodes: Vec<&GraphNode> = self.nodes.values().collect();
        nodes.sort_by_key(|node| node.word());

        for node in nodes {
            writeln!(writer, "Node: {}", node.word())?;
            let mut seen: Vec<&String> = Vec::new();
            for tag in self.spec.tags() {
                if seen.contains(&tag) {
                    continue;
                }
                seen.push(tag);
                let edges = node.edges(tag);
                if edges.is_empty() {
                    continue;
                }
                writeln!(writer, "  Edges into {}:", tag)?;
                for edge in edges {
                    writeln!(
                        writer,
                        "    ({} - {} - {})",
                        edge.before_tag(),
                        edge.probability(),
                        edge.word()
                    )?;
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(tags: &[&str]) -> SentenceSpec {
        tags.iter().copied().collect()
    }

    #[test]
    fn buckets_preallocated_from_spec() {
        let spec = spec(&["NN", "VBD"]);
        let mut store = GraphStore::new(&spec);
        let node = store.resolve("a");
        assert!(node.edges("NN").is_empty());
        assert!(node.edges("VBD").is_empty());
        // Tags outside the spec never get a bucket.
        assert!(node.edges("JJS").is_empty());
    }

    #[test]
    fn nodes_shared_by_word_text() {
        let spec = spec(&["NN", "VBD"]);
        let mut store = GraphStore::new(&spec);
        store.resolve("a");
        store.resolve("b");
        store.add_edge("a", "NN", "b", "VBD", 0.5);
        store.add_edge("a", "VBD", "c", "NN", 0.25);
        // "a" is resolved again by add_edge, not duplicated.
        assert_eq!(store.len(), 2);
        let a = store.node("a").unwrap();
        assert_eq!(a.edges("VBD").len(), 1);
        assert_eq!(a.edges("NN").len(), 1);
        assert_eq!(a.edges("VBD")[0].word(), "b");
        assert_eq!(a.edges("NN")[0].before_tag(), "VBD");
    }

    #[test]
    fn edge_outside_prealloc_is_dropped() {
        let spec = spec(&["NN"]);
        let mut store = GraphStore::new(&spec);
        store.add_edge("a", "NN", "b", "VBD", 0.5);
        assert!(store.node("a").unwrap().edges("VBD").is_empty());
    }

    #[test]
    fn node_reports_its_own_word() {
        let spec = spec(&["NN"]);
        let mut store = GraphStore::new(&spec);
        store.resolve("walk");
        assert_eq!(store.node("walk").unwrap().word(), "walk");
    }

    #[test]
    fn details_dump_lists_nodes_and_edges() {
        let spec = spec(&["NN", "VBD"]);
        let mut store = GraphStore::new(&spec);
        store.resolve("b");
        store.add_edge("a", "NN", "b", "VBD", 0.5);

        let mut out: Vec<u8> = Vec::new();
        store.write_details(&mut out).unwrap();
        let dump = String::from_utf8(out).unwrap();

        assert!(dump.contains("Total nodes: 2"), "{dump}");
        assert!(dump.contains("Node: a"), "{dump}");
        assert!(dump.contains("Node: b"), "{dump}");
        assert!(dump.contains("  Edges into VBD:"), "{dump}");
        assert!(dump.contains("    (NN - 0.5 - b)"), "{dump}");
    }

    #[test]
    fn empty_spec_is_empty() {
        assert!(spec(&[]).is_empty());
        assert!(!spec(&["NN"]).is_empty());
    }
}
