//! kpiseed CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use miette::{GraphicalReportHandler, Severity};

use kpiseed_cli::{Args, error_adapter::render_reports};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(args:?; "Parsed arguments");

    let Err(err) = kpiseed_cli::run(&args) else {
        info!(input = args.input; "Seed plan written");
        return;
    };

    let handler = GraphicalReportHandler::new();
    for (severity, report) in render_reports(&err, &handler) {
        match severity {
            Severity::Error => error!("{report}"),
            Severity::Warning => warn!("{report}"),
            Severity::Advice => info!("{report}"),
        }
    }
    process::exit(1);
}
