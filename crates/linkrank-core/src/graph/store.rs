//! Dense directed graph with an append-only edge log.
//!
//! # Representation
//!
//! A [`Graph`] of order `n` keeps two views of the same edges:
//!
//! - **Adjacency**: an `n × n` boolean matrix stored row-major in a single
//!   [`FixedBitSet`]. Bit `u * n + v` is set iff `u → v` was ever added.
//! - **Edge log**: every `add_edge(u, v)` call in order, duplicates included.
//!
//! The size `m` is the length of the log, not the number of distinct pairs.
//! Adding `(u, v)` twice grows the log twice while the adjacency bit is
//! idempotent; out-degrees are always derived from the adjacency so
//! transition probabilities are unaffected by duplicates.
//!
//! There is no removal. Ranking engines borrow the graph immutably.

use std::fmt;

use fixedbitset::FixedBitSet;
use nalgebra::DMatrix;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::RankError;

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Largest order accepted from untrusted input. The adjacency alone needs
/// `n * n` bits, and the dense engines need `n * n` floats.
pub const MAX_ORDER: usize = 1 << 14;

/// A directed graph over node ids `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    order: usize,
    adjacency: FixedBitSet,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Create an edgeless graph of order `n`.
    ///
    /// Use [`Graph::try_new`] when `n` comes from a file or other input.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            order: n,
            adjacency: FixedBitSet::with_capacity(n.saturating_mul(n)),
            edges: Vec::new(),
        }
    }

    /// Create an edgeless graph of order `n`, rejecting orders above
    /// [`MAX_ORDER`].
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidArgument`] if `n > MAX_ORDER`.
    pub fn try_new(n: usize) -> Result<Self, RankError> {
        if n > MAX_ORDER {
            return Err(RankError::invalid(format!(
                "graph order {n} exceeds the supported maximum {MAX_ORDER}"
            )));
        }
        Ok(Self::new(n))
    }

    /// Build a graph from a declared order, declared size and edge list.
    ///
    /// # Errors
    ///
    /// - [`RankError::InvalidArgument`] if `n > MAX_ORDER`.
    /// - [`RankError::SizeMismatch`] if `m != edges.len()`.
    /// - [`RankError::OutOfBounds`] if any endpoint is not in `0..n`.
    pub fn from_edge_list(n: usize, m: usize, edges: &[(usize, usize)]) -> Result<Self, RankError> {
        if m != edges.len() {
            return Err(RankError::SizeMismatch {
                declared: m,
                actual: edges.len(),
            });
        }

        let mut graph = Self::try_new(n)?;
        graph.edges.reserve_exact(m);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Append the directed edge `u → v`.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::OutOfBounds`] if `u` or `v` is not in `0..n`.
    /// The graph is left unchanged on error.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), RankError> {
        self.check_node(u)?;
        self.check_node(v)?;

        self.adjacency.insert(u * self.order + v);
        self.edges.push((u, v));
        Ok(())
    }

    /// Number of nodes.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Number of logged edges (duplicates counted).
    #[must_use]
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// The edge log in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Whether the adjacency cell `(u, v)` is set. Out-of-range ids are
    /// simply absent.
    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.order && v < self.order && self.adjacency.contains(u * self.order + v)
    }

    /// Count of adjacency marks in row `u` (distinct out-neighbors).
    #[must_use]
    pub fn out_degree(&self, u: usize) -> usize {
        if u >= self.order {
            return 0;
        }
        let start = u * self.order;
        self.adjacency.count_ones(start..start + self.order)
    }

    /// Count of adjacency marks in column `v` (distinct in-neighbors).
    #[must_use]
    pub fn in_degree(&self, v: usize) -> usize {
        if v >= self.order {
            return 0;
        }
        (0..self.order)
            .filter(|&u| self.adjacency.contains(u * self.order + v))
            .count()
    }

    /// Distinct out-neighbors of `u`, ascending.
    pub fn out_neighbors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.order;
        let row = if u < n { 0..n } else { 0..0 };
        row.filter(move |&v| self.adjacency.contains(u * n + v))
    }

    /// Number of distinct `(u, v)` pairs present in the adjacency.
    #[must_use]
    pub fn distinct_edge_count(&self) -> usize {
        self.adjacency.count_ones(..)
    }

    /// Dense `n × n` view of the adjacency with entries `0.0` / `1.0`.
    #[must_use]
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.order, self.order, |i, j| {
            if self.adjacency.contains(i * self.order + j) {
                1.0
            } else {
                0.0
            }
        })
    }

    /// Petgraph view with one node per id and one edge per distinct pair.
    ///
    /// Node weights are the node ids, so `NodeIndex::new(i)` is node `i`.
    #[must_use]
    pub fn to_petgraph(&self) -> DiGraph<usize, ()> {
        let mut graph = DiGraph::with_capacity(self.order, self.distinct_edge_count());
        for id in 0..self.order {
            graph.add_node(id);
        }
        for u in 0..self.order {
            for v in self.out_neighbors(u) {
                graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
            }
        }
        graph
    }

    /// BLAKE3 fingerprint of the order and the edge log.
    ///
    /// Two graphs with the same order and the same edges appended in the
    /// same order share a fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.order as u64).to_le_bytes());
        for &(u, v) in &self.edges {
            hasher.update(&(u as u64).to_le_bytes());
            hasher.update(&(v as u64).to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize().to_hex())
    }

    fn check_node(&self, node: usize) -> Result<(), RankError> {
        if node < self.order {
            Ok(())
        } else {
            Err(RankError::OutOfBounds {
                node,
                order: self.order,
            })
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "n = {}, m = {}", self.order, self.size())?;
        writeln!(f, "edge_list:")?;
        let edges: Vec<String> = self
            .edges
            .iter()
            .map(|(u, v)| format!("({u}, {v})"))
            .collect();
        writeln!(f, "[{}]", edges.join(", "))?;
        writeln!(f, "adjacency:")?;
        for u in 0..self.order {
            let row: Vec<&str> = (0..self.order)
                .map(|v| if self.has_edge(u, v) { "1" } else { "0" })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
