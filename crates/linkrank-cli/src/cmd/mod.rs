pub mod hits;
pub mod info;
pub mod pagerank;

use std::path::{Path, PathBuf};

use linkrank_core::config::RankConfig;
use linkrank_core::load::{LoadedGraph, load_graph};
use tracing::info;

/// Resolve `file` against the configured data directory and load it.
pub(crate) fn load_input(file: &Path, config: &RankConfig) -> anyhow::Result<(PathBuf, LoadedGraph)> {
    let path = config.input.resolve(file);
    let loaded = load_graph(&path)?;
    info!(
        path = %path.display(),
        order = loaded.graph.order(),
        size = loaded.graph.size(),
        "graph loaded"
    );
    Ok((path, loaded))
}
