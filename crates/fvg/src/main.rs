//! Command‑line entry point for the `fvg` tool.
//!
//! Builds one-dimensional finite-volume grids, prints their coordinates, and
//! reports mesh quality statistics.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    process,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fvgrid::{CenteringTag, CheckPolicy, DistributionRegistry, tags::BUILTIN_DISTRIBUTIONS};
use tracing_subscriber::EnvFilter;

/// CLI command implementations.
mod cmd;

/// Domain bounds parsed from `--domain A:B`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Domain {
    /// Lower bound A.
    lower: f64,
    /// Upper bound B.
    upper: f64,
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (lower, upper) = value
            .split_once(':')
            .ok_or_else(|| "domain must be in A:B form".to_string())?;

        let parse_bound = |label: &str, bound: &str| -> Result<f64, String> {
            bound
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid {label} bound '{bound}': expected a number"))
        };

        Ok(Self {
            lower: parse_bound("lower", lower)?,
            upper: parse_bound("upper", upper)?,
        })
    }
}

/// Validate a distribution name against the built-in set.
fn parse_distribution_name(s: &str) -> Result<String, String> {
    if BUILTIN_DISTRIBUTIONS.iter().any(|row| row.name == s) {
        Ok(s.to_string())
    } else {
        let names: Vec<&str> = BUILTIN_DISTRIBUTIONS.iter().map(|row| row.name).collect();
        Err(format!(
            "Invalid distribution name '{}'. Valid options: {}",
            s,
            names.join(", ")
        ))
    }
}

/// Invariant check policy as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Checks {
    /// Fail on the first violation.
    Enforce,
    /// Log violations and continue.
    Warn,
    /// Do not check.
    Skip,
}

impl From<Checks> for CheckPolicy {
    fn from(value: Checks) -> Self {
        match value {
            Checks::Enforce => Self::Enforce,
            Checks::Warn => Self::Warn,
            Checks::Skip => Self::Skip,
        }
    }
}

/// Grid parameters shared by every subcommand that builds a grid.
#[derive(Args, Clone, Debug)]
struct GridArgs {
    /// Number of cells.
    #[arg(short = 'n', long = "cells", help = "Number of cells (N > 0)")]
    cells: usize,

    /// Domain bounds.
    #[arg(
        short = 'd',
        long = "domain",
        value_name = "A:B",
        default_value = "0:1",
        allow_hyphen_values = true,
        help = "Domain bounds as A:B (B > A)"
    )]
    domain: Domain,

    /// Distribution name.
    #[arg(
        short = 'D',
        long = "distribution",
        default_value = "uniform",
        value_parser = parse_distribution_name,
        help = "Spacing distribution"
    )]
    distribution: String,

    /// Which array the distribution generates.
    #[arg(
        short = 'c',
        long = "centering",
        default_value = "face",
        help = "Centering: face or cell"
    )]
    centering: CenteringTag,

    /// Smallest random width as a multiple of the uniform width.
    #[arg(long = "low", default_value_t = 0.5, help = "Random: minimum width factor")]
    low: f64,

    /// Largest random width as a multiple of the uniform width.
    #[arg(long = "high", default_value_t = 1.5, help = "Random: maximum width factor")]
    high: f64,

    /// Fixed RNG seed.
    #[arg(long = "seed", conflicts_with = "clock_seed", help = "Random: fixed seed")]
    seed: Option<u64>,

    /// Seed the RNG from the clock.
    #[arg(long = "clock-seed", help = "Random: seed from the system clock")]
    clock_seed: bool,

    /// Invariant check policy.
    #[arg(long = "checks", value_enum, default_value = "enforce")]
    checks: Checks,
}

#[derive(Parser)]
#[command(name = "fvg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = clap::ArgAction::Count, help = "Sets the level of verbosity")]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Subcommands supported by the `fvg` tool.
enum Commands {
    #[command(about = "Build a grid and print its coordinates")]
    /// Build a grid and print its coordinates.
    Build {
        /// Grid parameters.
        #[command(flatten)]
        grid: GridArgs,

        #[arg(short = 'o', long = "output", help = "Write CSV to this file instead of stdout")]
        /// Optional output path.
        output: Option<PathBuf>,
    },

    #[command(about = "Build a grid and report quality statistics")]
    /// Build a grid and report quality statistics.
    Stats {
        /// Grid parameters.
        #[command(flatten)]
        grid: GridArgs,

        #[arg(long = "bins", default_value_t = 10, help = "Histogram bins")]
        /// Number of histogram bins.
        bins: usize,

        #[arg(
            long = "region",
            value_name = "X0:X1",
            allow_hyphen_values = true,
            help = "Also report cells whose centers lie in X0:X1"
        )]
        /// Optional region query.
        region: Option<Domain>,
    },

    #[command(about = "List registered distributions")]
    /// List registered distributions.
    ListDistributions,
}

/// Install a stderr subscriber filtered by `RUST_LOG` or the `-v` count.
fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Handle the `build` subcommand.
fn handle_build(
    registry: &DistributionRegistry,
    args: &GridArgs,
    output: Option<&Path>,
) -> Result<()> {
    let grid = cmd::build_grid(registry, args)?;
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = io::BufWriter::new(file);
            cmd::write_csv(&grid, &mut out)?;
            tracing::info!(path = %path.display(), cells = grid.cell_count(), "wrote grid");
        }
        None => cmd::write_csv(&grid, &mut io::stdout().lock())?,
    }
    Ok(())
}

/// Handle the `stats` subcommand.
fn handle_stats(
    registry: &DistributionRegistry,
    args: &GridArgs,
    bins: usize,
    region: Option<Domain>,
) -> Result<()> {
    let grid = cmd::build_grid(registry, args)?;
    let mut out = io::stdout().lock();
    cmd::write_report(&grid, bins, &mut out)?;
    if let Some(r) = region {
        cmd::write_region(&grid, r.lower, r.upper, &mut out)?;
    }
    Ok(())
}

/// Dispatch the selected subcommand.
fn run(cli: Cli) -> Result<()> {
    let registry = DistributionRegistry::with_builtins();
    match cli.command {
        Commands::Build { grid, output } => handle_build(&registry, &grid, output.as_deref()),
        Commands::Stats {
            grid,
            bins,
            region,
        } => handle_stats(&registry, &grid, bins, region),
        Commands::ListDistributions => cmd::list_distributions(&registry, &mut io::stdout().lock()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.v);

    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_parses_negative_and_fractional_bounds() {
        assert_eq!(
            "-1.5:2".parse::<Domain>(),
            Ok(Domain {
                lower: -1.5,
                upper: 2.0
            })
        );
        assert!("1".parse::<Domain>().is_err());
        assert!("a:1".parse::<Domain>().is_err());
    }

    #[test]
    fn distribution_names_are_validated() {
        assert_eq!(parse_distribution_name("random"), Ok("random".to_string()));
        let err = parse_distribution_name("tanh").unwrap_err();
        assert!(err.contains("uniform"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
