//! Error adapter for converting FlowseqError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic;

use flowseq::{
    ApiError, FlowseqError,
    config::{API_KEY_VAR, ConfigError},
};

/// Render `err` as a full miette report.
pub fn render_report(err: &FlowseqError) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, &ErrorAdapter(err))
        .expect("Writing to String buffer is infallible");
    writer
}

/// Adapter that renders a [`FlowseqError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a FlowseqError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl Diagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FlowseqError::Io(_) => "flowseq::io",
            FlowseqError::Config(_) => "flowseq::config",
            FlowseqError::FlowNotFound { .. } => "flowseq::not_found",
            FlowseqError::FlowFetch { .. } => "flowseq::flow_fetch",
            FlowseqError::Api(_) => "flowseq::api",
            FlowseqError::MissingDiagramObject { .. }
            | FlowseqError::MalformedDiagramObject { .. } => "flowseq::diagram",
            FlowseqError::Render { .. } => "flowseq::render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            FlowseqError::FlowNotFound { .. } => {
                "flow names are matched exactly, including case".to_string()
            }
            FlowseqError::Config(ConfigError::MissingVar(_)) => {
                "set the variable in the environment or in a .env file".to_string()
            }
            FlowseqError::Config(ConfigError::MissingRenderer) => {
                "point MMDC_CMD at the mermaid CLI (mmdc) or set [renderer] command".to_string()
            }
            FlowseqError::FlowFetch {
                source: ApiError::Status { status: 401 | 403, .. },
                ..
            }
            | FlowseqError::Api(ApiError::Status {
                status: 401 | 403, ..
            }) => format!("check that {API_KEY_VAR} grants access to the landscape"),
            _ => return None,
        };
        Some(Box::new(help))
    }
}
