//! Summary statistics for a [`Graph`].
//!
//! # Statistics Provided
//!
//! - **order** / **size**: node count and edge-log length.
//! - **distinct_edges**: number of distinct `(u, v)` pairs.
//! - **density**: `distinct_edges / (order * (order - 1))`, zero for graphs
//!   with fewer than two nodes. Self-loops can push this above 1.0.
//! - **dangling_count**: nodes with no outgoing edge. PageRank spreads their
//!   mass uniformly.
//! - **isolated_count**: nodes with neither in- nor out-edges.
//! - **self_loop_count**: nodes with an edge to themselves.
//! - **weak_components**: weakly connected components.
//! - **scc_count**: strongly connected components of the link graph.
//! - **terminal_class_count**: closed classes of the zero-teleport PageRank
//!   walk. Dangling nodes jump uniformly to every node, so they are never
//!   absorbing: the classes are the exit-free SCCs other than dangling
//!   singletons, or one class (the whole graph) when every exit-free SCC is
//!   a dangling singleton. More than one class means the stationary
//!   distribution is not unique.

use petgraph::{
    algo::{connected_components, kosaraju_scc},
    visit::EdgeRef,
};

use super::store::Graph;

/// Summary statistics for a graph.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphStats {
    pub order: usize,
    pub size: usize,
    pub distinct_edges: usize,
    pub density: f64,
    pub dangling_count: usize,
    pub isolated_count: usize,
    pub self_loop_count: usize,
    pub weak_components: usize,
    pub scc_count: usize,
    pub terminal_class_count: usize,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let order = graph.order();
        let distinct_edges = graph.distinct_edge_count();

        let dangling_count = (0..order).filter(|&u| graph.out_degree(u) == 0).count();
        let isolated_count = (0..order)
            .filter(|&u| graph.out_degree(u) == 0 && graph.in_degree(u) == 0)
            .count();
        let self_loop_count = (0..order).filter(|&u| graph.has_edge(u, u)).count();

        let pg = graph.to_petgraph();
        let weak_components = connected_components(&pg);

        let sccs = kosaraju_scc(&pg);
        let mut component_of = vec![0usize; order];
        for (c, members) in sccs.iter().enumerate() {
            for idx in members {
                component_of[idx.index()] = c;
            }
        }
        let mut has_exit = vec![false; sccs.len()];
        for edge in pg.edge_references() {
            let from = component_of[edge.source().index()];
            let to = component_of[edge.target().index()];
            if from != to {
                has_exit[from] = true;
            }
        }
        let closed_classes = sccs
            .iter()
            .zip(&has_exit)
            .filter(|(members, exit)| {
                let dangling_singleton =
                    members.len() == 1 && graph.out_degree(members[0].index()) == 0;
                !**exit && !dangling_singleton
            })
            .count();
        let terminal_class_count = if closed_classes == 0 && dangling_count > 0 {
            1
        } else {
            closed_classes
        };

        Self {
            order,
            size: graph.size(),
            distinct_edges,
            density: compute_density(order, distinct_edges),
            dangling_count,
            isolated_count,
            self_loop_count,
            weak_components,
            scc_count: sccs.len(),
            terminal_class_count,
        }
    }

    /// Whether a zero-teleport random walk on this graph has a unique
    /// stationary distribution (exactly one closed class).
    #[must_use]
    pub const fn has_unique_terminal_class(&self) -> bool {
        self.terminal_class_count == 1
    }
}

fn compute_density(order: usize, edges: usize) -> f64 {
    if order < 2 {
        return 0.0;
    }
    edges as f64 / (order as f64 * (order - 1) as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
