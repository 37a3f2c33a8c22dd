//! Flowseq - export architecture flows as sequence diagrams.
//!
//! Flows are read from the landscape modeling API, their steps are resolved to
//! the model objects they connect, and the result is written as mermaid
//! sequence diagram text. The text can optionally be converted to an image by
//! the external mermaid renderer.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowseq::{
//!     FlowResolver, HttpLandscapeApi,
//!     config::{AppConfig, Credentials},
//!     export::Exporter,
//! };
//!
//! let config = AppConfig::default();
//! let credentials = Credentials::from_env().expect("Missing credentials");
//! let api = HttpLandscapeApi::new(config.api(), &credentials).expect("Failed to build client");
//!
//! let diagram = FlowResolver::new(&api)
//!     .resolve("Checkout")
//!     .expect("Failed to resolve flow");
//!
//! Exporter::new("data")
//!     .write_source("Checkout", &diagram)
//!     .expect("Failed to write diagram");
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod export;

mod error;
mod resolver;

pub use flowseq_core::{model, sequence};

pub use api::{ApiError, HttpLandscapeApi, LandscapeApi};
pub use cache::LookupCache;
pub use error::FlowseqError;
pub use resolver::FlowResolver;
