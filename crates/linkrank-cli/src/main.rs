#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "linkrank: PageRank and HITS over directed graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Configuration file (default: ./linkrank.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Rank nodes with PageRank",
        long_about = "Rank nodes with PageRank. Without --iterations the stationary vector is solved directly.",
        after_help = "EXAMPLES:\n    # Direct solve with the default teleport probability\n    linkrank pagerank -f web.txt\n\n    # 20 power steps, no teleports, top 5 nodes\n    linkrank pagerank -f web.txt --no-teleports --iterations 20 --top 5"
    )]
    Pagerank(cmd::pagerank::PagerankArgs),

    #[command(
        about = "Score hubs and authorities with HITS",
        long_about = "Score hubs and authorities with HITS, optionally restricted to the base set of a text query.",
        after_help = "EXAMPLES:\n    # Whole-graph HITS\n    linkrank hits -f web.txt --iterations 100\n\n    # Query-driven HITS over a graph with documents\n    linkrank hits -f web.json --query \"rust book\""
    )]
    Hits(cmd::hits::HitsArgs),

    #[command(about = "Show graph summary and structure statistics")]
    Info(cmd::info::InfoArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LINKRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "linkrank=debug,info"
        } else {
            "linkrank=info,warn"
        })
    });

    let format = env::var("LINKRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let project_root = env::current_dir()?;

    let command_result = linkrank_core::config::load_config(&project_root, cli.config.as_deref())
        .and_then(|config| {
            debug!(?config, "resolved configuration");
            match cli.command {
                Commands::Pagerank(ref args) => cmd::pagerank::run_pagerank(args, output, &config),
                Commands::Hits(ref args) => cmd::hits::run_hits(args, output, &config),
                Commands::Info(ref args) => cmd::info::run_info(args, output, &config),
            }
        });

    if let Err(err) = command_result {
        render_error(output, &CliError::from_anyhow(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
