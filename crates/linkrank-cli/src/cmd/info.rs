//! `linkrank info`: graph summary and structure statistics.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use linkrank_core::config::RankConfig;
use linkrank_core::{Graph, GraphStats};
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `linkrank info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Graph file (edge list, or `.json` serialized graph).
    #[arg(short, long)]
    pub file: PathBuf,

    /// Also print the edge log and adjacency matrix.
    #[arg(long)]
    pub show_graph: bool,
}

#[derive(Debug, Serialize)]
struct InfoReport {
    file: String,
    fingerprint: String,
    documents: Option<usize>,
    #[serde(flatten)]
    stats: GraphStats,
    #[serde(skip)]
    graph: Option<Graph>,
}

/// Execute `linkrank info`.
pub fn run_info(args: &InfoArgs, output: OutputMode, config: &RankConfig) -> anyhow::Result<()> {
    let (path, loaded) = super::load_input(&args.file, config)?;

    let report = InfoReport {
        file: path.display().to_string(),
        fingerprint: loaded.graph.fingerprint(),
        documents: loaded.documents.as_ref().map(Vec::len),
        stats: GraphStats::from_graph(&loaded.graph),
        graph: args.show_graph.then_some(loaded.graph),
    };

    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &InfoReport, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &report.stats;
    writeln!(w, "file {}", report.file)?;
    writeln!(w, "fingerprint {}", report.fingerprint)?;
    writeln!(w, "order {}", s.order)?;
    writeln!(w, "size {}", s.size)?;
    writeln!(w, "distinct_edges {}", s.distinct_edges)?;
    writeln!(w, "density {:.6}", s.density)?;
    writeln!(w, "dangling {}", s.dangling_count)?;
    writeln!(w, "isolated {}", s.isolated_count)?;
    writeln!(w, "self_loops {}", s.self_loop_count)?;
    writeln!(w, "weak_components {}", s.weak_components)?;
    writeln!(w, "scc {}", s.scc_count)?;
    writeln!(w, "terminal_classes {}", s.terminal_class_count)?;
    if let Some(docs) = report.documents {
        writeln!(w, "documents {docs}")?;
    }
    if let Some(graph) = &report.graph {
        write!(w, "{graph}")?;
    }
    Ok(())
}

fn render_pretty(report: &InfoReport, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &report.stats;
    pretty_section(w, "Graph")?;
    pretty_kv(w, "File", &report.file)?;
    pretty_kv(w, "Fingerprint", &report.fingerprint)?;
    pretty_kv(w, "Nodes", s.order.to_string())?;
    pretty_kv(w, "Edges", format!("{} ({} distinct)", s.size, s.distinct_edges))?;
    pretty_kv(w, "Density", format!("{:.4}", s.density))?;
    pretty_kv(
        w,
        "Documents",
        report
            .documents
            .map_or_else(|| "none".to_string(), |n| n.to_string()),
    )?;
    writeln!(w)?;
    pretty_section(w, "Structure")?;
    pretty_kv(w, "Dangling", s.dangling_count.to_string())?;
    pretty_kv(w, "Isolated", s.isolated_count.to_string())?;
    pretty_kv(w, "Self loops", s.self_loop_count.to_string())?;
    pretty_kv(w, "Weak components", s.weak_components.to_string())?;
    pretty_kv(w, "SCCs", s.scc_count.to_string())?;
    pretty_kv(w, "Terminal classes", s.terminal_class_count.to_string())?;
    if !s.has_unique_terminal_class() {
        writeln!(
            w,
            "note: without teleports the PageRank stationary vector is not unique"
        )?;
    }
    if let Some(graph) = &report.graph {
        writeln!(w)?;
        pretty_rule(w)?;
        write!(w, "{graph}")?;
    }
    Ok(())
}
