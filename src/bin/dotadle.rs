// https://dotadle.net/

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dotadle::{present, DisjointRule, OutputFormat, Roster, Schema, SimulationConfig, Simulator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dotadle")]
#[command(version)]
#[command(about = "Calculates things about https://dotadle.net/")]
struct Cli {
    output_format: OutputFormat,

    /// Describe the output before printing it
    #[arg(long)]
    header: bool,

    #[arg(long, alias = "input_file", default_value = "dotadle.json")]
    input_file: PathBuf,

    /// JSON simulation settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// First possible release year [default: 2004]
    #[arg(long)]
    earliest_year: Option<i32>,

    /// One past the last possible release year [default: 2025]
    #[arg(long)]
    latest_year: Option<i32>,

    /// Make a disjoint tag clue rule out heroes sharing a tag with the guess
    #[arg(long)]
    strict_disjoint: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = simulation_config(&cli)?;

    let roster = Roster::load(&cli.input_file, Schema::dotadle(), &config.years)
        .with_context(|| format!("loading roster from {}", cli.input_file.display()))?;
    info!(heroes = roster.len(), "roster ready");

    let reports = Simulator::new(&roster, config)?.run()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    present(&mut out, cli.output_format, cli.header, &reports)?;
    out.flush()?;

    Ok(())
}

fn simulation_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(year) = cli.earliest_year {
        config.years.earliest = year;
    }
    if let Some(year) = cli.latest_year {
        config.years.latest_exclusive = year;
    }
    if cli.strict_disjoint {
        config.disjoint = DisjointRule::RequireDisjoint;
    }

    config.validate()?;
    Ok(config)
}
