//! Project automation tasks.
//!
//! Run via `cargo xtask <command>`. Every command runs from the workspace
//! root, whatever the caller's working directory.

use std::{
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use xshell::{Shell, cmd};

/// Command line interface for the `xtask` helper.
#[derive(Debug, Parser)]
#[command(name = "xtask")]
struct Cli {
    /// Task to run.
    #[command(subcommand)]
    command: Task,
}

/// Supported automation commands.
#[derive(Debug, Subcommand)]
enum Task {
    /// Format the workspace and apply clippy fixes.
    Tidy,
    /// Run the test suite with and without the `parallel` feature.
    Test,
    /// Run the criterion benches for `fvgrid`.
    Bench {
        /// Only run benches whose name contains this filter.
        filter: Option<String>,
    },
    /// Build the API docs for `fvgrid` with every feature enabled.
    Doc {
        /// Open the docs in a browser when done.
        #[arg(long)]
        open: bool,
    },
}

/// Feature sets the test suite is run under.
const TEST_FEATURES: &[&str] = &["", "fvgrid/parallel"];

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

/// Open a shell at the workspace root and dispatch the task.
fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = workspace_root()?;
    let sh = Shell::new()?;
    sh.change_dir(&root);

    match cli.command {
        Task::Tidy => tidy(&sh, &root),
        Task::Test => test(&sh),
        Task::Bench { filter } => bench(&sh, filter.as_deref()),
        Task::Doc { open } => doc(&sh, open),
    }
}

/// The directory above the `xtask` crate.
fn workspace_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(PathBuf::from)
        .context("xtask crate must live at <repo>/xtask")
}

/// Format, apply clippy fixes, then format whatever clippy rewrote.
fn tidy(sh: &Shell, root: &Path) -> Result<()> {
    let rustfmt_config = root.join("rustfmt-nightly.toml");
    let fmt = || {
        if rustfmt_config.is_file() {
            cmd!(sh, "cargo +nightly fmt --all -- --config-path {rustfmt_config}").run()
        } else {
            cmd!(sh, "cargo +nightly fmt --all").run()
        }
    };

    fmt()?;
    cmd!(
        sh,
        "cargo clippy -q --fix --all --all-targets --all-features --allow-dirty"
    )
    .run()?;
    fmt()?;
    Ok(())
}

/// Run nextest once per feature set, then the doctests nextest skips.
fn test(sh: &Shell) -> Result<()> {
    for &features in TEST_FEATURES {
        let feature_args: Vec<&str> = if features.is_empty() {
            Vec::new()
        } else {
            vec!["--features", features]
        };
        cmd!(sh, "cargo nextest run --workspace {feature_args...}").run()?;
    }
    cmd!(sh, "cargo test --doc -p fvgrid --all-features").run()?;
    Ok(())
}

/// Run the `fvgrid` benches, optionally filtered by name.
fn bench(sh: &Shell, filter: Option<&str>) -> Result<()> {
    let filter: Vec<&str> = filter.into_iter().collect();
    cmd!(sh, "cargo bench -p fvgrid -- {filter...}").run()?;
    Ok(())
}

/// Build the library docs.
fn doc(sh: &Shell, open: bool) -> Result<()> {
    let open = open.then_some("--open");
    cmd!(sh, "cargo doc -p fvgrid --no-deps --all-features {open...}").run()?;
    Ok(())
}
