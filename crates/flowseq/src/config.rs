//! Configuration types for flowseq.
//!
//! This module provides the structures that control how the landscape API is
//! reached and how diagrams are rendered. Settings come from two places:
//!
//! - [`Credentials`] - Required identity of the landscape, read from the environment.
//! - [`AppConfig`] - Optional settings file, deserialized with [`serde`].
//!
//! Both are built once at startup and passed down by parameter.
//!
//! # Example
//!
//! ```
//! # use flowseq::config::{AppConfig, Credentials};
//! let config = AppConfig::default();
//! assert_eq!(config.api().base_url(), "https://api.icepanel.io/v1");
//!
//! let credentials = Credentials::from_lookup(|key| match key {
//!     "API_KEY" => Some("secret".to_string()),
//!     "LANDSCAPE_ID" => Some("landscape".to_string()),
//!     "LANDSCAPE_VERSION" => Some("latest".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//! assert_eq!(credentials.landscape_id(), "landscape");
//! ```

use std::{env, fmt, path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;

/// Base URL of the public landscape API.
pub const DEFAULT_BASE_URL: &str = "https://api.icepanel.io/v1";

/// Puppeteer settings file handed to the renderer.
pub const DEFAULT_PUPPETEER_CONFIG: &str = "puppeteer-config.json";

pub const API_KEY_VAR: &str = "API_KEY";
pub const LANDSCAPE_ID_VAR: &str = "LANDSCAPE_ID";
pub const LANDSCAPE_VERSION_VAR: &str = "LANDSCAPE_VERSION";
pub const RENDERER_COMMAND_VAR: &str = "MMDC_CMD";

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Conversion requested but no renderer command is configured (set MMDC_CMD)")]
    MissingRenderer,
}

/// Identity of the landscape version to read from.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    landscape_id: String,
    version_id: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        landscape_id: impl Into<String>,
        version_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            landscape_id: landscape_id.into(),
            version_id: version_id.into(),
        }
    }

    /// Reads credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] for the first required variable that
    /// is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads credentials through an arbitrary variable lookup.
    ///
    /// Empty values are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        Ok(Self {
            api_key: require(API_KEY_VAR)?,
            landscape_id: require(LANDSCAPE_ID_VAR)?,
            version_id: require(LANDSCAPE_VERSION_VAR)?,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn landscape_id(&self) -> &str {
        &self.landscape_id
    }

    pub fn version_id(&self) -> &str {
        &self.version_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("landscape_id", &self.landscape_id)
            .field("version_id", &self.version_id)
            .finish()
    }
}

/// Top-level settings file combining API and renderer sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// API configuration section.
    #[serde(default)]
    api: ApiConfig,

    /// Renderer configuration section.
    #[serde(default)]
    renderer: RendererConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(api: ApiConfig, renderer: RendererConfig) -> Self {
        Self { api, renderer }
    }

    /// Returns the API configuration.
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Returns the renderer configuration.
    pub fn renderer(&self) -> &RendererConfig {
        &self.renderer
    }

    /// Returns the renderer configuration for in-place overrides.
    pub fn renderer_mut(&mut self) -> &mut RendererConfig {
        &mut self.renderer
    }
}

/// Where and how the landscape API is reached.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Request timeout in seconds. Requests wait indefinitely when unset.
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, timeout_secs: Option<u64>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// External renderer settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Path of the renderer executable.
    #[serde(default)]
    command: Option<PathBuf>,

    #[serde(default = "default_puppeteer_config")]
    puppeteer_config: Option<PathBuf>,

    /// Background color passed to the renderer, e.g. `transparent`.
    #[serde(default)]
    background: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: None,
            puppeteer_config: default_puppeteer_config(),
            background: None,
        }
    }
}

impl RendererConfig {
    pub fn command(&self) -> Option<&PathBuf> {
        self.command.as_ref()
    }

    pub fn set_command(&mut self, command: impl Into<PathBuf>) {
        self.command = Some(command.into());
    }

    pub fn puppeteer_config(&self) -> Option<&PathBuf> {
        self.puppeteer_config.as_ref()
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_puppeteer_config() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_PUPPETEER_CONFIG))
}
