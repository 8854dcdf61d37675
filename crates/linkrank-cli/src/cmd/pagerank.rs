//! `linkrank pagerank`: rank nodes by stationary random-surfer probability.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use linkrank_core::config::RankConfig;
use linkrank_core::{PageRankConfig, PageRankMethod, pagerank};
use serde::Serialize;

use crate::output::{
    OutputMode, RankedNode, pretty_kv, pretty_section, ranked_rows, render_mode,
    write_rows_pretty, write_rows_text,
};

/// Arguments for `linkrank pagerank`.
#[derive(Args, Debug)]
pub struct PagerankArgs {
    /// Graph file (edge list, or `.json` serialized graph).
    #[arg(short, long)]
    pub file: PathBuf,

    /// Teleport probability in [0, 1].
    #[arg(long, value_name = "P", conflicts_with = "no_teleports")]
    pub teleport_prob: Option<f64>,

    /// Disable teleports (teleport probability 0).
    #[arg(long)]
    pub no_teleports: bool,

    /// Power-iteration steps; omit to solve directly.
    #[arg(short = 'k', long, value_name = "K")]
    pub iterations: Option<usize>,

    /// Only show the N highest-ranked nodes.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

impl PagerankArgs {
    /// Apply flag overrides on top of the configured engine settings.
    fn engine_config(&self, base: &PageRankConfig) -> PageRankConfig {
        let mut config = base.clone();
        if self.no_teleports {
            config.teleport_prob = 0.0;
        } else if let Some(p) = self.teleport_prob {
            config.teleport_prob = p;
        }
        if self.iterations.is_some() {
            config.iterations = self.iterations;
        }
        config
    }
}

#[derive(Debug, Serialize)]
struct PageRankReport {
    file: String,
    fingerprint: String,
    order: usize,
    size: usize,
    teleport_prob: f64,
    method: PageRankMethod,
    iterations: usize,
    residual: f64,
    ranking: Vec<RankedNode>,
}

/// Execute `linkrank pagerank`.
pub fn run_pagerank(
    args: &PagerankArgs,
    output: OutputMode,
    config: &RankConfig,
) -> anyhow::Result<()> {
    let (path, loaded) = super::load_input(&args.file, config)?;
    let engine = args.engine_config(&config.pagerank);
    let result = pagerank(&loaded.graph, &engine)?;

    let report = PageRankReport {
        file: path.display().to_string(),
        fingerprint: loaded.graph.fingerprint(),
        order: loaded.graph.order(),
        size: loaded.graph.size(),
        teleport_prob: engine.teleport_prob,
        method: result.method,
        iterations: result.iterations,
        residual: result.residual,
        ranking: ranked_rows(&result.scores, args.top),
    };

    render_mode(
        output,
        &report,
        |r, w| write_rows_text(w, &r.ranking),
        |r, w| render_pretty(r, w),
    )
}

fn method_label(method: PageRankMethod) -> &'static str {
    match method {
        PageRankMethod::PowerIteration => "power iteration",
        PageRankMethod::Direct => "direct",
        PageRankMethod::DirectFallback => "direct (fell back to power iteration)",
    }
}

fn render_pretty(report: &PageRankReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "PageRank")?;
    pretty_kv(w, "File", &report.file)?;
    pretty_kv(w, "Fingerprint", &report.fingerprint)?;
    pretty_kv(w, "Nodes", report.order.to_string())?;
    pretty_kv(w, "Edges", report.size.to_string())?;
    pretty_kv(w, "Teleport prob", format!("{}", report.teleport_prob))?;
    pretty_kv(w, "Method", method_label(report.method))?;
    pretty_kv(w, "Iterations", report.iterations.to_string())?;
    pretty_kv(w, "Residual", format!("{:.3e}", report.residual))?;
    writeln!(w)?;
    write_rows_pretty(w, "Ranking", &report.ranking)
}
