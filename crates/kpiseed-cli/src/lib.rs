//! CLI logic for the kpiseed tool.
//!
//! This module contains the core CLI logic: load the configuration, plan the
//! input manifest, and write the rendered plan to a file or stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use kpiseed::{KpiseedError, SeedBuilder, export::ExportFormat};

/// Run the kpiseed CLI application
///
/// This function processes the input manifest through the kpiseed pipeline
/// and writes the rendered plan to the output file, or to stdout when no
/// output file is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `KpiseedError` for:
/// - File I/O errors
/// - Configuration loading errors and unknown output formats
/// - Manifest errors
/// - Planning errors (duplicate aliases, unresolved references, cycles)
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), KpiseedError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing manifest"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let format = match &args.format {
        Some(name) => name
            .parse::<ExportFormat>()
            .map_err(|err| KpiseedError::Config(format!("{err}: `{name}`")))?,
        None => app_config.export().format(),
    };

    let source = fs::read_to_string(&args.input)?;

    let builder = SeedBuilder::new(app_config);
    let plan = builder.plan(&source)?;
    let output = builder.render(&plan, format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path, objects = plan.len(); "Plan exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
