//! Linkstate CLI — link-state shortest paths and forwarding tables.
//!
//! Usage: `linkstate <input> <source> <show-steps: 0|1> [options]`

mod config;
mod render;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use linkstate_core::{load_edge_list, MissingEdgePolicy};
use linkstate_routing::{ForwardingResolver, LinkStateEngine};
use tracing_subscriber::EnvFilter;

use config::{LinkstateConfig, LogFormat, LoggingConfig, OutputFormat};
use render::Report;

/// Compute the link-state shortest-path table and forwarding table of one
/// node in a weighted directed network.
#[derive(Parser, Debug)]
#[command(name = "linkstate", version, about, long_about = None)]
struct Args {
    /// Edge-list file: node count on the first line, then `from to weight` lines.
    #[arg(required_unless_present = "init_config")]
    input: Option<PathBuf>,

    /// Source node id (1..=N).
    #[arg(required_unless_present = "init_config")]
    source: Option<u32>,

    /// Print the step-by-step N', D(v), p(v) table (1) or not (0).
    #[arg(
        required_unless_present = "init_config",
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    show_steps: Option<u8>,

    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "linkstate.toml")]
    config: PathBuf,

    /// Override the output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Override how pairs without an edge are costed.
    #[arg(long, value_enum)]
    missing_edge: Option<MissingEdge>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    init_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissingEdge {
    /// No edge, no link.
    Unreachable,
    /// No edge costs zero.
    Zero,
}

impl From<MissingEdge> for MissingEdgePolicy {
    fn from(value: MissingEdge) -> Self {
        match value {
            MissingEdge::Unreachable => MissingEdgePolicy::Unreachable,
            MissingEdge::Zero => MissingEdgePolicy::Zero,
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = LinkstateConfig::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(missing_edge) = args.missing_edge {
        config.engine.missing_edge = missing_edge.into();
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging);

    if args.init_config {
        config.save(&args.config)?;
        tracing::info!(path = %args.config.display(), "wrote config");
        return Ok(());
    }

    let (Some(input), Some(source), Some(show_steps)) = (args.input, args.source, args.show_steps)
    else {
        anyhow::bail!("expected <input> <source> <show-steps>");
    };

    let started = Instant::now();

    let graph = load_edge_list(&input)
        .with_context(|| format!("failed to load network from {}", input.display()))?;
    let source = LinkStateEngine::validate_source(&graph, source)?;

    let engine = LinkStateEngine::new(config.engine);
    let tree = engine.run(&graph, source)?;
    let table = ForwardingResolver::new(&tree).resolve();

    let elapsed = started.elapsed();
    tracing::info!(
        %source,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        elapsed_us = elapsed.as_micros() as u64,
        "computation complete"
    );

    let report = Report {
        tree: &tree,
        table: &table,
        show_steps: show_steps == 1,
        elapsed,
    };

    match config.output.format {
        OutputFormat::Text => print!("{}", render::text(&report)),
        OutputFormat::Json => println!("{}", render::json(&report)?),
    }

    Ok(())
}
