// crates/herdtrace-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use herdtrace_core::{
    extract::read_deltas,
    stats::RunSummary,
    walk::WalkSynthesizer,
    writer::{write_summary_json, Ns2Writer, RecordSink, SplitWriter},
    SynthConfig,
};
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "herdtrace",
    about = "Synthesize an ns-2 movement trace for N nodes from one recorded track",
    long_about = "Synthesize an ns-2 movement trace for N nodes from one recorded track.\n\n\
        Step distances and turning angles are taken from the input track (fields 9 and 10, \
        divided by 6) and resampled to drive one independent random walk per node inside a \
        1000x1000 area. All nodes are written to a single trace (default `input.txt`) that the \
        ONE simulator can read.\n\n\
        Example: to create a group of 10 nodes, run `herdtrace baseoutUTM1.txt 10`.",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Raw track file (whitespace-separated, x/y in fields 9/10)
    input: Option<PathBuf>,

    /// Number of nodes to synthesize
    nodes: Option<u32>,

    /// Output trace path
    #[arg(long, default_value = "input.txt")]
    out: PathBuf,

    /// Seed for reproducible runs (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding area, horizon, offsets and field layout
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write one trace per node next to the input (`<name>.n<id>`)
    #[arg(long, default_value_t = false)]
    per_node: bool,

    /// Write the run summary as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let (Some(input), Some(nodes)) = (cli.input.clone(), cli.nodes) else {
        Cli::command().print_long_help().context("print usage")?;
        return Ok(());
    };

    let mut cfg = match &cli.config {
        Some(p) => SynthConfig::load(p)?,
        None => SynthConfig::default(),
    };
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }

    let summary = synthesize(&input, nodes, &cfg, &cli.out, cli.per_node)?;
    print_summary(&summary);

    if let Some(p) = &cli.summary_json {
        write_summary_json(p, &summary)
            .with_context(|| format!("writing summary to {}", p.display()))?;
    }
    Ok(())
}

/// Initialize tracing with an env-driven filter (default INFO), on stderr.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

fn synthesize(
    input: &Path,
    nodes: u32,
    cfg: &SynthConfig,
    out: &Path,
    per_node: bool,
) -> Result<RunSummary> {
    info!(input=%input.display(), nodes, out=%out.display(), seed=?cfg.seed, "starting run");

    let deltas = read_deltas(input, &cfg.layout)?;
    let synth = WalkSynthesizer::new(&deltas, cfg)
        .with_context(|| format!("building walk model from {}", input.display()))?;

    let mut rng = match cfg.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    ensure_parent_dir(out)?;
    let writer = Ns2Writer::create(out)?;
    let mut sink: Box<dyn RecordSink> = if per_node {
        Box::new(SplitWriter::new(writer, input))
    } else {
        Box::new(writer)
    };

    let summary = synth
        .run(&mut rng, nodes, sink.as_mut())
        .with_context(|| format!("writing trace to {}", out.display()))?;

    info!(records = summary.records, offset = summary.offset, "run complete");
    Ok(summary)
}

fn print_summary(s: &RunSummary) {
    let opt = |v: Option<f64>| v.map_or_else(|| "(none)".to_string(), |v| v.to_string());
    println!("{}", opt(s.speed.max));
    println!("{}", opt(s.speed.min));
    println!("X:  {}", s.ranges.x);
    println!("Y:  {}", s.ranges.y);
    println!("Z:  {}", s.ranges.z);
    println!("Time:  {}", s.ranges.time);
}
