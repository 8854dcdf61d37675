//! Graph store for link analysis.
//!
//! # Overview
//!
//! [`Graph`] holds a dense boolean adjacency over node ids `0..n` together
//! with the append-only log of edges that produced it. Every other module
//! reads graphs through this type:
//!
//! ```text
//! Graph::new(n) / Graph::from_edge_list(n, m, edges)
//!        ↓  add_edge(u, v)            (append only)
//! Graph
//!   ├─ adjacency_matrix()  dense nalgebra view for PageRank / HITS
//!   ├─ edges()             log scanned by base-set extraction
//!   └─ stats::GraphStats   order, size, dangling nodes, components
//! ```

pub mod stats;
pub mod store;

pub use stats::GraphStats;
pub use store::{Graph, MAX_ORDER};
