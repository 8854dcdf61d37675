#![forbid(unsafe_code)]
//! linkrank-core library.
//!
//! Link analysis over directed graphs: PageRank and HITS, plus the
//! query-driven pipeline that restricts HITS to a topic-relevant base set.
//!
//! ```text
//! edge list / serialized graph
//!        ↓  load::load_graph()
//! Graph (+ optional per-node documents)
//!        ↓  index::build_inverted_index()        (documents only)
//! InvertedIndex
//!        ↓  subgraph::extract_base_set()         (query tokens)
//! induced base-set Graph
//!        ↓  metrics::pagerank / metrics::hits
//! score vectors
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Engine and graph operations return [`error::RankError`];
//!   I/O-facing code (loaders, config) uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod index;
pub mod linalg;
pub mod load;
pub mod metrics;
pub mod subgraph;
pub mod tokenize;

pub use error::RankError;
pub use graph::{Graph, GraphStats};
pub use index::{InvertedIndex, build_inverted_index};
pub use metrics::hits::{HitsConfig, HitsResult, HitsUpdate, compute_hits, hits};
pub use metrics::pagerank::{
    PageRankConfig, PageRankMethod, PageRankResult, compute_pagerank, pagerank,
};
pub use subgraph::{BaseSetExtraction, extract_base_set};
