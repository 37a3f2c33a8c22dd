//! Command-line argument definitions for the flowseq CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the flow, the output location, optional
//! image conversion, configuration file selection and logging verbosity.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use flowseq::export::ImageFormat;

/// Export a landscape flow as a mermaid sequence diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the flow to create the sequence diagram for
    #[arg(long)]
    pub flow_name: String,

    /// Image format produced when converting
    #[arg(long, value_enum, default_value_t = ExportType::Png)]
    pub export_type: ExportType,

    /// Convert the generated sequence to the export type. Requires the
    /// MMDC_CMD environment variable to point at the mermaid renderer
    #[arg(short, long)]
    pub convert: bool,

    /// Directory where the generated sequence diagram is stored
    #[arg(short, long, default_value = "data/")]
    pub data_dir: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Image formats selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportType {
    Svg,
    Png,
}

impl From<ExportType> for ImageFormat {
    fn from(export_type: ExportType) -> Self {
        match export_type {
            ExportType::Svg => ImageFormat::Svg,
            ExportType::Png => ImageFormat::Png,
        }
    }
}
