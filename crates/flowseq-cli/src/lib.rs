//! CLI logic for the flowseq tool.
//!
//! This module contains the core CLI logic: it wires configuration, the
//! landscape API client, flow resolution and export together.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, ExportType};
pub use config::{apply_env_overrides, load_config};

use std::{env, path::PathBuf};

use log::info;

use flowseq::{
    FlowResolver, FlowseqError, HttpLandscapeApi, LandscapeApi,
    config::{AppConfig, Credentials},
    export::{Exporter, Renderer},
    sequence::SequenceDiagram,
};

/// Files produced by one export.
#[derive(Debug)]
pub struct ExportOutcome {
    /// The resolved diagram.
    pub diagram: SequenceDiagram,
    /// Path of the written diagram source.
    pub source_path: PathBuf,
    /// Path of the rendered image, if conversion was requested and the
    /// renderer succeeded.
    pub image_path: Option<PathBuf>,
}

/// Run the flowseq CLI application
///
/// Loads configuration and credentials, resolves the requested flow through
/// the landscape API, writes the diagram source and optionally renders it.
/// The generated diagram text is printed to stdout.
///
/// # Errors
///
/// Returns `FlowseqError` for:
/// - Missing or invalid configuration
/// - API failures
/// - Unknown flow names
/// - File I/O errors
/// - Renderer launch failures
pub fn run(args: &Args) -> Result<(), FlowseqError> {
    info!(flow_name = args.flow_name.as_str(), data_dir = args.data_dir.display().to_string(); "Exporting flow");

    let mut app_config = config::load_config(args.config.as_ref())?;
    config::apply_env_overrides(&mut app_config, |key| env::var(key).ok());

    // Fail on missing settings before the first request goes out
    let credentials = Credentials::from_env()?;
    let renderer = renderer_for(args, &app_config)?;

    let api = HttpLandscapeApi::new(app_config.api(), &credentials)?;
    let outcome = export(args, &api, renderer.as_ref())?;

    print!("{}", outcome.diagram.generate());

    Ok(())
}

/// Returns the renderer to use, or `None` when no conversion was requested.
///
/// # Errors
///
/// Returns a configuration error if conversion was requested but no renderer
/// command is configured.
pub fn renderer_for(args: &Args, config: &AppConfig) -> Result<Option<Renderer>, FlowseqError> {
    if !args.convert {
        return Ok(None);
    }
    Ok(Some(Renderer::from_config(config.renderer())?))
}

/// Resolve the requested flow and write it below the data directory.
///
/// Nothing is written unless the whole flow resolves.
pub fn export<A>(
    args: &Args,
    api: &A,
    renderer: Option<&Renderer>,
) -> Result<ExportOutcome, FlowseqError>
where
    A: LandscapeApi + ?Sized,
{
    let diagram = FlowResolver::new(api).resolve(&args.flow_name)?;

    let exporter = Exporter::new(&args.data_dir);
    let source_path = exporter.write_source(&args.flow_name, &diagram)?;

    let image_path = match renderer {
        Some(renderer) => exporter.render(renderer, &args.flow_name, args.export_type.into())?,
        None => None,
    };

    Ok(ExportOutcome {
        diagram,
        source_path,
        image_path,
    })
}
