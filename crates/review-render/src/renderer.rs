//! HTML to image conversion.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::RenderOptions;

/// Conversion errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("converter `{0}` not found")]
    ConverterMissing(String),

    #[error("converter timed out after {0}ms")]
    Timeout(u64),

    #[error("converter exited with {status}: {stderr}")]
    ConverterFailed { status: String, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Kind of file a renderer produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Image,
    /// The HTML document itself, when no converter is available.
    Html,
}

/// Reference to a rendered artifact on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub path: PathBuf,
    pub kind: ImageKind,
}

impl ImageRef {
    /// Path as a string, the way chat hosts take image references.
    pub fn to_url(&self) -> String {
        self.path.display().to_string()
    }
}

/// Turns an HTML document into a deliverable image.
#[async_trait]
pub trait ImageRenderer: Send + Sync {
    async fn render(&self, html: &str, options: &RenderOptions) -> Result<ImageRef, RenderError>;
}

/// Runs an external HTML-to-image converter such as `wkhtmltoimage`.
#[derive(Debug, Clone)]
pub struct CommandImageRenderer {
    program: String,
    output: PathBuf,
}

impl CommandImageRenderer {
    /// Converter `program`, writing the image to `output`.
    ///
    /// The intermediate HTML is written next to it as `<stem>.input.html`.
    pub fn new(program: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            output: output.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Path of the intermediate HTML handed to the converter.
    ///
    /// Always differs from the output, even when the output is itself `.html`.
    pub fn input_path(&self) -> PathBuf {
        let stem = self
            .output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        self.output.with_file_name(format!("{}.input.html", stem))
    }

    /// Converter arguments for one conversion.
    pub fn args(&self, input: &Path, options: &RenderOptions) -> Vec<String> {
        let clip = options.clip;
        vec![
            "--quiet".to_string(),
            "--enable-local-file-access".to_string(),
            "--quality".to_string(),
            options.quality.to_string(),
            "--width".to_string(),
            clip.width.to_string(),
            "--crop-x".to_string(),
            clip.x.to_string(),
            "--crop-y".to_string(),
            clip.y.to_string(),
            "--crop-w".to_string(),
            clip.width.to_string(),
            "--crop-h".to_string(),
            clip.height.to_string(),
            input.display().to_string(),
            self.output.display().to_string(),
        ]
    }
}

#[async_trait]
impl ImageRenderer for CommandImageRenderer {
    async fn render(&self, html: &str, options: &RenderOptions) -> Result<ImageRef, RenderError> {
        let input = self.input_path();
        write_file(&input, html).await?;

        let child = Command::new(&self.program)
            .args(self.args(&input, options))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => RenderError::ConverterMissing(self.program.clone()),
                _ => RenderError::Io(e),
            })?;

        let output = tokio::time::timeout(options.timeout(), child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout(options.timeout_ms))??;

        if !output.status.success() {
            return Err(RenderError::ConverterFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::debug!(program = %self.program, output = %self.output.display(), "report image rendered");

        Ok(ImageRef {
            path: self.output.clone(),
            kind: ImageKind::Image,
        })
    }
}

/// Writes the HTML document itself; used when no converter is configured.
#[derive(Debug, Clone)]
pub struct HtmlFileRenderer {
    output: PathBuf,
}

impl HtmlFileRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

#[async_trait]
impl ImageRenderer for HtmlFileRenderer {
    async fn render(&self, html: &str, _options: &RenderOptions) -> Result<ImageRef, RenderError> {
        write_file(&self.output, html).await?;
        Ok(ImageRef {
            path: self.output.clone(),
            kind: ImageKind::Html,
        })
    }
}

async fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
}
