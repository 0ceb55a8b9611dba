//! CLI logic for the stagegraph pipeline layout tool.
//!
//! This module contains the core CLI logic: load the configuration, replay
//! a pipeline file through the editor, and write the render payload as JSON.

pub mod error_adapter;
pub mod pipeline;

mod args;
mod config;

pub use args::Args;

use std::{fs, io};

use log::{info, warn};

use stagegraph::{GraphBuilder, StagegraphError};

use pipeline::PipelineFile;

/// Run the stagegraph CLI application
///
/// This function loads the pipeline file, lays it out and writes the
/// resulting nodes and edges to the output file. With `--check` it only
/// validates that the pipeline has both endpoint stages.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StagegraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Pipeline file errors
/// - An incomplete pipeline when `--check` is given
pub fn run(args: &Args) -> Result<(), StagegraphError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing pipeline"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let mode = args.mode.unwrap_or(app_config.layout().mode());

    // Read the pipeline and replay it as editor operations
    let model = PipelineFile::load(&args.input)?.into_model()?;

    let builder = GraphBuilder::new(app_config);
    let validation = builder.validate(&model);

    if args.check {
        validation.into_result()?;
        info!("Pipeline has a source and a destination");
        return Ok(());
    }

    if !validation.can_proceed() {
        warn!(missing:? = validation.missing(); "Pipeline is incomplete, rendering placeholders");
    }

    let payload = builder.render_with_mode(&model, mode)?;
    let json = serde_json::to_string_pretty(&payload).map_err(io::Error::from)?;

    // Write output file
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
