//! Error types for flowseq operations.
//!
//! This module provides the main error type [`FlowseqError`] which wraps
//! the error conditions of every stage: configuration, API calls, flow
//! resolution and export.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{api::ApiError, config::ConfigError};

/// The main error type for flowseq operations.
#[derive(Debug, Error)]
pub enum FlowseqError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to find flow [{name}]")]
    FlowNotFound { name: String },

    #[error("Unable to fetch flow [{flow_id}]: {source}")]
    FlowFetch {
        flow_id: String,
        #[source]
        source: ApiError,
    },

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Object [{object_id}] is not placed on diagram [{diagram_id}]")]
    MissingDiagramObject {
        diagram_id: String,
        object_id: String,
    },

    #[error("Object [{object_id}] on diagram [{diagram_id}] does not show a model object")]
    MalformedDiagramObject {
        diagram_id: String,
        object_id: String,
    },

    #[error("Failed to launch renderer {}: {source}", command.display())]
    Render {
        command: PathBuf,
        #[source]
        source: io::Error,
    },
}
