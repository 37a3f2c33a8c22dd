//! Writing diagram text to disk and converting it to images.
//!
//! The [`Exporter`] owns the output directory and the file naming rules. The
//! [`Renderer`] wraps the external mermaid renderer, which is always started
//! with a discrete argument list and never through a shell.

use std::{
    fmt,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use log::{debug, info, warn};

use flowseq_core::sequence::SequenceDiagram;

use crate::{
    FlowseqError,
    config::{ConfigError, RendererConfig},
};

/// Extension of the diagram source file.
pub const SOURCE_EXTENSION: &str = "mmd";

/// Image formats the renderer can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    #[default]
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Builds a file name that is safe on common file systems.
///
/// Keeps alphanumeric characters, spaces, periods and underscores, drops
/// everything else, trims trailing whitespace and appends `extension`.
///
/// # Examples
///
/// ```
/// use flowseq::export::safe_file_name;
///
/// assert_eq!(safe_file_name("Order / Payment Flow?", "mmd"), "Order  Payment Flow.mmd");
/// ```
pub fn safe_file_name(name: &str, extension: &str) -> String {
    let stem: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_'))
        .collect();
    format!("{}.{extension}", stem.trim_end())
}

/// Writes diagrams below a data directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    data_dir: PathBuf,
}

impl Exporter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the diagram source file for a flow.
    pub fn source_path(&self, flow_name: &str) -> PathBuf {
        self.data_dir
            .join(safe_file_name(flow_name, SOURCE_EXTENSION))
    }

    /// Path of the rendered image for a flow.
    pub fn image_path(&self, flow_name: &str, format: ImageFormat) -> PathBuf {
        self.data_dir
            .join(safe_file_name(flow_name, format.extension()))
    }

    /// Write the diagram text for `flow_name`, replacing any existing file.
    ///
    /// The data directory is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`FlowseqError::Io`] if the directory or file cannot be written.
    pub fn write_source(
        &self,
        flow_name: &str,
        diagram: &SequenceDiagram,
    ) -> Result<PathBuf, FlowseqError> {
        fs::create_dir_all(&self.data_dir)?;

        let path = self.source_path(flow_name);
        let mut file = File::create(&path)?;
        file.write_all(diagram.generate().as_bytes())?;
        file.flush()?;

        info!(path = path.display().to_string(); "Diagram source written");
        Ok(path)
    }

    /// Convert the previously written source for `flow_name` into an image.
    ///
    /// Returns the image path, or `None` if the renderer exited with a
    /// non-zero status. That status is logged but not treated as an error.
    ///
    /// # Errors
    ///
    /// Returns [`FlowseqError::Render`] if the renderer cannot be started.
    pub fn render(
        &self,
        renderer: &Renderer,
        flow_name: &str,
        format: ImageFormat,
    ) -> Result<Option<PathBuf>, FlowseqError> {
        let input = self.source_path(flow_name);
        let output = self.image_path(flow_name, format);

        let status = renderer.run(&input, &output)?;
        if !status.success() {
            warn!(status:% = status, output = output.display().to_string(); "Renderer reported failure");
            return Ok(None);
        }

        info!(path = output.display().to_string(); "Diagram rendered");
        Ok(Some(output))
    }
}

/// The external mermaid renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    command: PathBuf,
    puppeteer_config: Option<PathBuf>,
    background: Option<String>,
}

impl Renderer {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            puppeteer_config: None,
            background: None,
        }
    }

    /// Create a renderer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRenderer`] if no command is configured.
    pub fn from_config(config: &RendererConfig) -> Result<Self, ConfigError> {
        let command = config.command().ok_or(ConfigError::MissingRenderer)?;
        Ok(Self {
            command: command.clone(),
            puppeteer_config: config.puppeteer_config().cloned(),
            background: config.background().map(str::to_string),
        })
    }

    pub fn with_puppeteer_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.puppeteer_config = Some(path.into());
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Build the renderer invocation for converting `input` into `output`.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.command);
        if let Some(puppeteer_config) = &self.puppeteer_config {
            command.arg("-p").arg(puppeteer_config);
        }
        command.arg("-i").arg(input).arg("-o").arg(output);
        if let Some(background) = &self.background {
            command.arg("-b").arg(background);
        }
        command
    }

    /// Run the renderer and wait for it to exit.
    pub fn run(&self, input: &Path, output: &Path) -> Result<ExitStatus, FlowseqError> {
        let mut command = self.command(input, output);
        debug!(command:? = command; "Starting renderer");

        command.status().map_err(|source| FlowseqError::Render {
            command: self.command.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use proptest::prelude::*;
    use tempfile::tempdir;

    use flowseq_core::sequence::{SequenceInteraction, SequenceParticipant};

    use super::*;

    #[test]
    fn test_safe_file_name() {
        assert_eq!(
            safe_file_name("Order / Payment Flow?", "mmd"),
            "Order  Payment Flow.mmd"
        );
        assert_eq!(safe_file_name("v1.2_final", "png"), "v1.2_final.png");
        assert_eq!(safe_file_name("rm -rf $(HOME)", "svg"), "rm rf HOME.svg");
        assert_eq!(safe_file_name("Zürich Flow", "mmd"), "Zürich Flow.mmd");
    }

    #[test]
    fn test_paths_use_data_dir() {
        let exporter = Exporter::new("out");
        assert_eq!(exporter.data_dir(), Path::new("out"));
        assert_eq!(
            exporter.source_path("Checkout"),
            Path::new("out").join("Checkout.mmd")
        );
        assert_eq!(
            exporter.image_path("Checkout", ImageFormat::Svg),
            Path::new("out").join("Checkout.svg")
        );
    }

    #[test]
    fn test_write_source_creates_dir_and_overwrites() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("nested"));

        let mut diagram = SequenceDiagram::new("Checkout");
        diagram.add_participant(SequenceParticipant::new("c1", "Cart"));
        diagram.add_interaction(SequenceInteraction::new("s", "self-action", "Recalc", "c1", None));

        let path = exporter.write_source("Checkout", &diagram).unwrap();
        fs::write(&path, "stale").unwrap();
        let path = exporter.write_source("Checkout", &diagram).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), diagram.generate());
    }

    #[test]
    fn test_renderer_arguments() {
        let renderer = Renderer::new("/opt/mmdc")
            .with_puppeteer_config("puppeteer-config.json")
            .with_background("transparent");
        let command = renderer.command(Path::new("data/a; rm.mmd"), Path::new("data/a; rm.png"));

        assert_eq!(command.get_program(), OsStr::new("/opt/mmdc"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(
            args,
            [
                "-p",
                "puppeteer-config.json",
                "-i",
                "data/a; rm.mmd",
                "-o",
                "data/a; rm.png",
                "-b",
                "transparent"
            ]
            .map(OsStr::new)
        );
    }

    #[test]
    fn test_renderer_from_config_requires_command() {
        let mut config = RendererConfig::default();
        assert!(matches!(
            Renderer::from_config(&config),
            Err(ConfigError::MissingRenderer)
        ));

        config.set_command("mmdc");
        let renderer = Renderer::from_config(&config).unwrap();
        let command = renderer.command(Path::new("in.mmd"), Path::new("out.png"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(
            args,
            ["-p", "puppeteer-config.json", "-i", "in.mmd", "-o", "out.png"].map(OsStr::new)
        );
    }

    #[test]
    fn test_missing_renderer_executable_is_render_error() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let renderer = Renderer::new(dir.path().join("no-such-renderer"));

        let err = exporter
            .render(&renderer, "Checkout", ImageFormat::Png)
            .unwrap_err();
        assert!(matches!(err, FlowseqError::Render { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_render_reports_image_only_on_success() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path());

        let failed = exporter
            .render(&Renderer::new("false"), "Checkout", ImageFormat::Png)
            .unwrap();
        assert!(failed.is_none());

        let rendered = exporter
            .render(&Renderer::new("true"), "Checkout", ImageFormat::Svg)
            .unwrap();
        assert_eq!(rendered, Some(dir.path().join("Checkout.svg")));
    }

    proptest! {
        #[test]
        fn prop_safe_file_name_has_only_allowed_chars(name in ".*") {
            let file_name = safe_file_name(&name, "mmd");
            let stem = file_name.strip_suffix(".mmd").unwrap();
            prop_assert!(stem.chars().all(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '_')));
            prop_assert!(!stem.ends_with(char::is_whitespace));
        }
    }
}
