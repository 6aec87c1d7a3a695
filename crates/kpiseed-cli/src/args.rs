//! Command-line argument definitions for the kpiseed CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the kpiseed tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input manifest
    #[arg(help = "Path to the input manifest (TOML)")]
    pub input: String,

    /// Path to the output file; the plan is written to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (plan, script, json); overrides the configured format
    #[arg(short, long)]
    pub format: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
