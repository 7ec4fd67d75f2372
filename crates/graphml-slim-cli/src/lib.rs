//! CLI logic for the graphml-slim tool.
//!
//! This module wires the command-line arguments and configuration file into
//! a [`Simplifier`] run over a single input file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use graphml_slim::{SimplifyReport, Simplifier, SlimError};

/// Run the graphml-slim CLI application
///
/// This function loads the configuration, simplifies the input file and
/// writes the result to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SlimError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Malformed XML
/// - Documents that are not GraphML
pub fn run(args: &Args) -> Result<SimplifyReport, SlimError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Simplifying GraphML"
    );

    let app_config = config::load_config(args)?;

    let simplifier = Simplifier::new(app_config);
    let report = simplifier.simplify_file(&args.input, &args.output)?;

    info!(
        nodes = report.nodes,
        node_labels = report.node_labels,
        edges = report.edges,
        edge_labels = report.edge_labels;
        "Labels kept"
    );

    Ok(report)
}
