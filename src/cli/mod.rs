//! Command-line parsing for the standings predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the grouping/fitting code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::{ClampPolicy, SourceKind, UnknownPolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "standings",
    version,
    about = "Division standings and touchdown-based win predictions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print current and predicted standings, and optionally plot/export.
    Show(RunArgs),
    /// Print predicted standings only (useful for scripting).
    Predict(RunArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `standings show`, but renders results
    /// in a terminal UI using Ratatui.
    Tui(RunArgs),
}

/// Common options for every subcommand.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Where team records come from.
    #[arg(short = 's', long, value_enum, default_value_t = SourceKind::Api)]
    pub source: SourceKind,

    /// Standings JSON payload (for `--source file`).
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Season to fetch or generate.
    #[arg(long, default_value_t = 2025)]
    pub season: u16,

    /// Random seed for the sample league.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Games per team for the sample league.
    #[arg(long, default_value_t = 17)]
    pub games: u32,

    /// Records whose conference/division is not recognized: drop them or fail the run.
    #[arg(long, value_enum, default_value_t = UnknownPolicy::Drop)]
    pub unknown: UnknownPolicy,

    /// Bound projected wins by games played.
    #[arg(long, value_enum, default_value_t = ClampPolicy::None)]
    pub clamp: ClampPolicy,

    /// Render an ASCII plot of touchdowns vs wins.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export tables, model and diagnostics to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export per-team projections to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    /// Save the raw payload so it can be replayed with `--source file`.
    #[arg(long = "save-raw")]
    pub save_raw: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}
