//! Query-driven base-set extraction for focused HITS.
//!
//! # Pipeline
//!
//! ```text
//! query tokens + InvertedIndex
//!        ↓  root_set()          union of posting sets
//! root membership (FixedBitSet over 0..n)
//!        ↓  base_set()          + one hop in and out over the edge log
//! base membership
//!        ↓  induced_subgraph()  edges with both endpoints in the base set
//! Graph of the same order (ids preserved)
//! ```
//!
//! Unmatched query tokens are reported, not fatal. An empty root set gives
//! an empty base set and an edgeless subgraph.

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument, warn};

use crate::error::RankError;
use crate::graph::Graph;
use crate::index::InvertedIndex;

/// Root set plus the query tokens that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSet {
    pub members: FixedBitSet,
    pub unmatched: Vec<String>,
}

/// Everything produced by [`extract_base_set`].
#[derive(Debug, Clone)]
pub struct BaseSetExtraction {
    /// Induced base-set subgraph, same order as the source graph.
    pub subgraph: Graph,
    /// Nodes matched directly by the query.
    pub root: FixedBitSet,
    /// Root set plus direct in/out neighbors of root nodes.
    pub base: FixedBitSet,
    /// Query tokens absent from the index.
    pub unmatched: Vec<String>,
}

impl BaseSetExtraction {
    /// Node ids in the root set, ascending.
    #[must_use]
    pub fn root_nodes(&self) -> Vec<usize> {
        self.root.ones().collect()
    }

    /// Node ids in the base set, ascending.
    #[must_use]
    pub fn base_nodes(&self) -> Vec<usize> {
        self.base.ones().collect()
    }
}

/// Union the posting sets of every query token present in `index`.
///
/// # Errors
///
/// Returns [`RankError::OutOfBounds`] if a posting refers to a node id
/// outside the graph, i.e. the documents and the graph disagree.
pub fn root_set<T: AsRef<str>>(
    graph: &Graph,
    index: &InvertedIndex,
    query: &[T],
) -> Result<RootSet, RankError> {
    let n = graph.order();
    let mut members = FixedBitSet::with_capacity(n);
    let mut unmatched = Vec::new();

    for token in query {
        let token = token.as_ref();
        let postings = index.lookup(token);
        if postings.is_empty() {
            unmatched.push(token.to_string());
            continue;
        }
        for &node in postings {
            if node >= n {
                return Err(RankError::OutOfBounds { node, order: n });
            }
            members.insert(node);
        }
    }

    Ok(RootSet { members, unmatched })
}

/// Expand `root` by one hop in both directions over the edge log.
#[must_use]
pub fn base_set(graph: &Graph, root: &FixedBitSet) -> FixedBitSet {
    let mut base = root.clone();
    base.grow(graph.order());

    for &(u, v) in graph.edges() {
        if root.contains(u) {
            base.insert(v);
        }
        if root.contains(v) {
            base.insert(u);
        }
    }

    base
}

/// Graph of the same order holding every logged edge inside `base`.
#[must_use]
pub fn induced_subgraph(graph: &Graph, base: &FixedBitSet) -> Graph {
    let mut sub = Graph::new(graph.order());
    for &(u, v) in graph.edges() {
        if base.contains(u) && base.contains(v) {
            // Endpoints come from a graph of the same order.
            if let Err(err) = sub.add_edge(u, v) {
                warn!(%err, "skipping edge outside induced subgraph");
            }
        }
    }
    sub
}

/// Run the full query → root set → base set → subgraph pipeline.
///
/// # Errors
///
/// Propagates [`RankError::OutOfBounds`] from [`root_set`].
#[instrument(skip(graph, index, query), fields(order = graph.order(), tokens = query.len()))]
pub fn extract_base_set<T: AsRef<str>>(
    graph: &Graph,
    index: &InvertedIndex,
    query: &[T],
) -> Result<BaseSetExtraction, RankError> {
    let RootSet {
        members: root,
        unmatched,
    } = root_set(graph, index, query)?;

    if !unmatched.is_empty() {
        warn!(tokens = ?unmatched, "query tokens not found in any document");
    }

    let base = base_set(graph, &root);
    let subgraph = induced_subgraph(graph, &base);

    debug!(
        root = root.count_ones(..),
        base = base.count_ones(..),
        edges = subgraph.size(),
        "extracted base set"
    );

    Ok(BaseSetExtraction {
        subgraph,
        root,
        base,
        unmatched,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
