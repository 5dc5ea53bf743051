//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads team records (API, file or sample league)
//! - runs grouping, regression and ranking
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, RunArgs};
use crate::domain::{PipelineConfig, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `standings` binary.
pub fn run() -> Result<(), AppError> {
    // `standings` and `standings --source sample` behave like `standings tui ...`.
    // Clap requires a subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args, OutputMode::Full),
        Command::Predict(args) => handle_show(args, OutputMode::PredictedOnly),
        Command::Tui(args) => handle_tui(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    PredictedOnly,
}

fn handle_show(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    crate::logging::init(args.verbose);

    let config = run_config_from_args(&args);
    let run = pipeline::run_standings(&config)?;
    let tables = run.output.display_tables();
    let fit = run.output.predicted.as_ref().map(|p| &p.fit);

    if mode == OutputMode::Full {
        print!("{}", crate::report::format_run_summary(&run));
        print!("{}", crate::report::format_current(&tables));
    }
    print!(
        "{}",
        crate::report::format_predicted(&tables, fit, config.pipeline.clamp)
    );

    if mode == OutputMode::Full && config.plot {
        match fit {
            Ok(fit) => {
                let plot = crate::plot::render_fit_plot(
                    &run.ingest.records,
                    &fit.model,
                    config.plot_width,
                    config.plot_height,
                );
                println!();
                println!("{plot}");
            }
            Err(_) => tracing::warn!("no fitted line; skipping plot"),
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_json {
        crate::io::export::write_results_json(path, &run)?;
    }
    if let Some(path) = &config.export_csv {
        crate::io::export::write_predictions_csv(path, &run)?;
    }

    Ok(())
}

fn handle_tui(args: RunArgs) -> Result<(), AppError> {
    crate::logging::init_quiet();
    crate::tui::run(args)
}

pub fn run_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        source: args.source,
        input: args.input.clone(),
        season: args.season,
        seed: args.seed,
        games: args.games,
        pipeline: PipelineConfig {
            unknown: args.unknown,
            clamp: args.clamp,
        },
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_json: args.export.clone(),
        export_csv: args.export_csv.clone(),
        save_raw: args.save_raw.clone(),
    }
}

/// Rewrite argv so `standings` defaults to `standings tui`.
///
/// Rules:
/// - `standings`                        -> `standings tui`
/// - `standings --source sample ...`    -> `standings tui --source sample ...`
/// - `standings --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "predict" | "tui");
    if is_subcommand {
        return argv;
    }

    // A leading flag is treated as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClampPolicy, SourceKind, UnknownPolicy};

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_the_tui() {
        assert_eq!(rewrite_args(argv(&["standings"])), argv(&["standings", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["standings", "--source", "sample"])),
            argv(&["standings", "tui", "--source", "sample"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            &["standings", "show", "-v"][..],
            &["standings", "predict"],
            &["standings", "--help"],
            &["standings", "-V"],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn flags_map_onto_run_config() {
        let cli = crate::cli::Cli::parse_from(argv(&[
            "standings",
            "show",
            "--source",
            "file",
            "--input",
            "standings.json",
            "--unknown",
            "reject",
            "--clamp",
            "season",
            "--plot",
            "--export-csv",
            "out.csv",
            "-vv",
        ]));
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.verbose, 2);

        let config = run_config_from_args(&args);
        assert_eq!(config.source, SourceKind::File);
        assert_eq!(config.input.as_deref(), Some(std::path::Path::new("standings.json")));
        assert_eq!(config.season, 2025);
        assert_eq!(config.games, 17);
        assert_eq!(config.pipeline.unknown, UnknownPolicy::Reject);
        assert_eq!(config.pipeline.clamp, ClampPolicy::Season);
        assert!(config.plot);
        assert!(config.export_json.is_none());
        assert!(config.export_csv.is_some());
    }

    #[test]
    fn defaults_use_the_api_with_drop_and_no_clamp() {
        let cli = crate::cli::Cli::parse_from(argv(&["standings", "predict"]));
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        let config = run_config_from_args(&args);
        assert_eq!(config.source, SourceKind::Api);
        assert_eq!(config.pipeline, PipelineConfig::default());
    }
}
