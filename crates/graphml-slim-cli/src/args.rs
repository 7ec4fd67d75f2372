//! Command-line argument definitions for the graphml-slim CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, key code overrides, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the graphml-slim tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input GraphML file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the simplified GraphML file
    #[arg(short, long, default_value = "out.graphml")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Data key of node labels (overrides the configuration file)
    #[arg(long)]
    pub node_label_key: Option<String>,

    /// Data key of edge labels (overrides the configuration file)
    #[arg(long)]
    pub edge_label_key: Option<String>,

    /// Data key of shared style data (overrides the configuration file)
    #[arg(long)]
    pub shared_key: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
