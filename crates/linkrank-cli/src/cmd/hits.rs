//! `linkrank hits`: hub and authority scores, optionally query-driven.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use linkrank_core::config::RankConfig;
use linkrank_core::tokenize::tokenize;
use linkrank_core::{HitsConfig, HitsUpdate, extract_base_set, hits};
use serde::Serialize;
use tracing::warn;

use crate::output::{
    CliError, OutputMode, RankedNode, pretty_kv, pretty_section, ranked_rows, render_mode,
    write_rows_pretty,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UpdateArg {
    /// Both vectors from the previous step (AAᵀ / AᵀA).
    Coupled,
    /// Hubs first, then authorities from the new hubs.
    Alternating,
}

impl From<UpdateArg> for HitsUpdate {
    fn from(arg: UpdateArg) -> Self {
        match arg {
            UpdateArg::Coupled => Self::Coupled,
            UpdateArg::Alternating => Self::Alternating,
        }
    }
}

/// Arguments for `linkrank hits`.
#[derive(Args, Debug)]
pub struct HitsArgs {
    /// Graph file (edge list, or `.json` serialized graph).
    #[arg(short, long)]
    pub file: PathBuf,

    /// Number of HITS steps.
    #[arg(short = 'k', long, value_name = "K")]
    pub iterations: Option<usize>,

    /// Restrict HITS to the base set of this query (needs documents).
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Hub/authority update rule.
    #[arg(long, value_enum)]
    pub update: Option<UpdateArg>,

    /// Only show the N highest-scored nodes per list.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

impl HitsArgs {
    fn engine_config(&self, base: &HitsConfig) -> HitsConfig {
        HitsConfig {
            iterations: self.iterations.unwrap_or(base.iterations),
            update: self.update.map_or(base.update, HitsUpdate::from),
        }
    }
}

#[derive(Debug, Serialize)]
struct QuerySummary {
    text: String,
    tokens: Vec<String>,
    unmatched: Vec<String>,
    root: Vec<usize>,
    base: Vec<usize>,
    subgraph_edges: usize,
}

#[derive(Debug, Serialize)]
struct HitsReport {
    file: String,
    order: usize,
    size: usize,
    update: HitsUpdate,
    iterations: usize,
    last_delta: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<QuerySummary>,
    authorities: Vec<RankedNode>,
    hubs: Vec<RankedNode>,
}

/// Execute `linkrank hits`.
pub fn run_hits(args: &HitsArgs, output: OutputMode, config: &RankConfig) -> anyhow::Result<()> {
    let (path, loaded) = super::load_input(&args.file, config)?;
    let engine = args.engine_config(&config.hits);

    let (scored, query) = match args.query.as_deref() {
        None => (loaded.graph.clone(), None),
        Some(text) => {
            let Some(index) = loaded.inverted_index() else {
                return Err(CliError::with_details(
                    format!("{} has no node documents to match a query against", path.display()),
                    "use a .json graph with a `documents` array, or drop --query",
                    "no_documents",
                )
                .into());
            };
            let tokens = tokenize(text);
            if tokens.is_empty() {
                warn!(query = text, "query has no searchable tokens");
            }
            let extraction = extract_base_set(&loaded.graph, &index, &tokens)?;
            let summary = QuerySummary {
                text: text.to_string(),
                root: extraction.root_nodes(),
                base: extraction.base_nodes(),
                unmatched: extraction.unmatched.clone(),
                subgraph_edges: extraction.subgraph.size(),
                tokens,
            };
            (extraction.subgraph, Some(summary))
        }
    };

    let result = hits(&scored, &engine)?;

    let report = HitsReport {
        file: path.display().to_string(),
        order: loaded.graph.order(),
        size: loaded.graph.size(),
        update: engine.update,
        iterations: result.iterations,
        last_delta: result.last_delta,
        query,
        authorities: ranked_rows(&result.authorities, args.top),
        hubs: ranked_rows(&result.hubs, args.top),
    };

    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &HitsReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.authorities {
        writeln!(w, "authority {} {} {:.10}", row.rank, row.node, row.score)?;
    }
    for row in &report.hubs {
        writeln!(w, "hub {} {} {:.10}", row.rank, row.node, row.score)?;
    }
    Ok(())
}

fn join_ids(ids: &[usize]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn render_pretty(report: &HitsReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "HITS")?;
    pretty_kv(w, "File", &report.file)?;
    pretty_kv(w, "Nodes", report.order.to_string())?;
    pretty_kv(w, "Edges", report.size.to_string())?;
    let update = match report.update {
        HitsUpdate::Coupled => "coupled",
        HitsUpdate::Alternating => "alternating",
    };
    pretty_kv(w, "Update", update)?;
    pretty_kv(w, "Iterations", report.iterations.to_string())?;
    pretty_kv(w, "Last delta", format!("{:.3e}", report.last_delta))?;

    if let Some(query) = &report.query {
        writeln!(w)?;
        pretty_section(w, "Query")?;
        pretty_kv(w, "Text", &query.text)?;
        pretty_kv(w, "Tokens", query.tokens.join(" "))?;
        if !query.unmatched.is_empty() {
            pretty_kv(w, "Unmatched", query.unmatched.join(" "))?;
        }
        pretty_kv(w, "Root set", join_ids(&query.root))?;
        pretty_kv(w, "Base set", join_ids(&query.base))?;
        pretty_kv(w, "Subgraph edges", query.subgraph_edges.to_string())?;
    }

    writeln!(w)?;
    write_rows_pretty(w, "Authorities", &report.authorities)?;
    writeln!(w)?;
    write_rows_pretty(w, "Hubs", &report.hubs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = HitsArgs {
            file: PathBuf::from("g.txt"),
            iterations: Some(5),
            query: None,
            update: Some(UpdateArg::Alternating),
            top: None,
        };
        let engine = args.engine_config(&HitsConfig::default());
        assert_eq!(engine.iterations, 5);
        assert_eq!(engine.update, HitsUpdate::Alternating);
    }

    #[test]
    fn config_used_when_flags_absent() {
        let args = HitsArgs {
            file: PathBuf::from("g.txt"),
            iterations: None,
            query: None,
            update: None,
            top: None,
        };
        let base = HitsConfig {
            iterations: 9,
            update: HitsUpdate::Alternating,
        };
        assert_eq!(args.engine_config(&base), base);
    }

    #[test]
    fn text_rows_are_labelled() {
        let report = HitsReport {
            file: "g.txt".into(),
            order: 2,
            size: 1,
            update: HitsUpdate::Coupled,
            iterations: 1,
            last_delta: 0.0,
            query: None,
            authorities: ranked_rows(&[0.0, 1.0], None),
            hubs: ranked_rows(&[1.0, 0.0], Some(1)),
        };
        let mut buf = Vec::new();
        render_text(&report, &mut buf).expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "authority 1 1 1.0000000000\nauthority 2 0 0.0000000000\nhub 1 0 1.0000000000\n"
        );
    }
}
