//! graphml-slim CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use graphml_slim::SlimError;
use graphml_slim_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match graphml_slim_cli::run(&args) {
        Ok(report) => info!(
            removed_entries = report.entries_removed,
            removed_ports = report.ports_removed,
            output = args.output;
            "Completed successfully"
        ),
        Err(err) => {
            report_error(&err);
            process::exit(1);
        }
    }
}

/// Initialize `env_logger` at `level`, falling back to `warn` for unknown levels.
fn init_logger(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting graphml-slim");
}

/// Render every diagnostic of `err` through miette and log it.
fn report_error(err: &SlimError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        reporter
            .render_report(&mut rendered, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{rendered}");
    }
}
