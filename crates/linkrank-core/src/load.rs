//! Graph loaders.
//!
//! # Formats
//!
//! **Edge list** (any extension other than `.json`):
//!
//! ```text
//! n m
//! u_1 v_1
//! ...
//! u_m v_m
//! ```
//!
//! Node ids are 0-indexed. Blank lines are ignored. The header's `m` must
//! match the number of edge lines.
//!
//! **Serialized graph** (`.json`):
//!
//! ```json
//! { "order": 3, "edges": [[0, 1], [1, 2]], "documents": ["...", "...", "..."] }
//! ```
//!
//! `documents` is optional. When present it holds one text per node.

#![allow(clippy::module_name_repetitions)]

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::index::InvertedIndex;
use crate::tokenize::tokenize;

/// On-disk graph format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    EdgeList,
    Json,
}

impl GraphFormat {
    /// Pick the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::EdgeList,
        }
    }
}

/// A loaded graph plus its per-node documents, if the format carries any.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub documents: Option<Vec<String>>,
}

impl LoadedGraph {
    /// Tokenize the documents and build an inverted index over them.
    ///
    /// `None` when the graph has no documents.
    #[must_use]
    pub fn inverted_index(&self) -> Option<InvertedIndex> {
        let documents = self.documents.as_ref()?;
        InvertedIndex::build(documents.iter().map(|doc| tokenize(doc)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedGraph {
    order: usize,
    #[serde(default)]
    edges: Vec<(usize, usize)>,
    #[serde(default)]
    documents: Option<Vec<String>>,
}

/// Load a graph from `path`, choosing the parser by extension.
#[instrument]
pub fn load_graph(path: &Path) -> Result<LoadedGraph> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let loaded = match GraphFormat::from_path(path) {
        GraphFormat::EdgeList => LoadedGraph {
            graph: parse_edge_list(&text)
                .with_context(|| format!("Failed to load edge list {}", path.display()))?,
            documents: None,
        },
        GraphFormat::Json => parse_serialized(&text)
            .with_context(|| format!("Failed to load serialized graph {}", path.display()))?,
    };

    debug!(
        order = loaded.graph.order(),
        size = loaded.graph.size(),
        documents = loaded.documents.is_some(),
        "loaded graph"
    );
    Ok(loaded)
}

/// Parse the plain edge-list format.
pub fn parse_edge_list(text: &str) -> Result<Graph> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((header_no, header)) = lines.next() else {
        bail!("missing `n m` header");
    };
    let (n, m) = parse_pair(header).with_context(|| format!("line {header_no}: bad header"))?;

    let mut edges = Vec::with_capacity(m.min(1 << 20));
    for (line_no, line) in lines {
        let edge = parse_pair(line).with_context(|| format!("line {line_no}: bad edge"))?;
        edges.push(edge);
    }

    Ok(Graph::from_edge_list(n, m, &edges)?)
}

/// Parse the JSON serialized-graph format.
pub fn parse_serialized(text: &str) -> Result<LoadedGraph> {
    let raw: SerializedGraph = serde_json::from_str(text).context("invalid JSON graph")?;

    let graph = Graph::from_edge_list(raw.order, raw.edges.len(), &raw.edges)?;

    let documents = match raw.documents {
        Some(docs) if docs.len() != raw.order => bail!(
            "graph has {} nodes but {} documents",
            raw.order,
            docs.len()
        ),
        Some(docs) if docs.is_empty() => None,
        other => other,
    };

    Ok(LoadedGraph { graph, documents })
}

/// Serialize a graph (and optional documents) in the JSON format.
pub fn to_serialized(graph: &Graph, documents: Option<&[String]>) -> Result<String> {
    let raw = SerializedGraph {
        order: graph.order(),
        edges: graph.edges().to_vec(),
        documents: documents.map(<[String]>::to_vec),
    };
    serde_json::to_string_pretty(&raw).context("failed to serialize graph")
}

fn parse_pair(line: &str) -> Result<(usize, usize)> {
    let mut fields = line.split_whitespace();
    let (Some(a), Some(b), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("expected two integers, found {line:?}");
    };
    let a = a.parse().with_context(|| format!("not a node id: {a:?}"))?;
    let b = b.parse().with_context(|| format!("not a node id: {b:?}"))?;
    Ok((a, b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
