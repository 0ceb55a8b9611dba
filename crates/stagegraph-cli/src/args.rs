//! Command-line argument definitions for the stagegraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, layout mode and logging verbosity.

use clap::Parser;

use stagegraph::config::LayoutMode;

/// Command-line arguments for the stagegraph pipeline layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input pipeline file (TOML)
    #[arg(help = "Path to the input pipeline file")]
    pub input: String,

    /// Path to the output layout file (JSON)
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Layout mode (read-only, editable); defaults to the configured mode
    #[arg(short, long)]
    pub mode: Option<LayoutMode>,

    /// Only check that the pipeline has a source and a destination
    #[arg(long)]
    pub check: bool,
}
