//! Flowseq CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{Level, LevelFilter, debug, error, info, log_enabled};

use flowseq_cli::{Args, error_adapter::render_report};

fn main() {
    miette::set_panic_hook();

    // Variables from .env must be visible before anything reads the environment
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting flowseq");
    debug!(args:?; "Parsed arguments");
    if let Ok(path) = dotenv {
        debug!(path = path.display().to_string(); "Loaded environment file");
    }

    if let Err(err) = flowseq_cli::run(&args) {
        let report = render_report(&err);

        // The report must reach the user even with logging switched off
        if log_enabled!(Level::Error) {
            error!("{report}");
        } else {
            eprintln!("{report}");
        }
        process::exit(1);
    }

    info!("Completed successfully");
}
