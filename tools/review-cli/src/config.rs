//! CLI configuration.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use review_sdk::prelude::*;
use serde::{Deserialize, Serialize};

/// Config file names searched from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["reviews.toml", ".reviews.toml", "reviews.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Endpoint and timeout settings.
    #[serde(default)]
    pub fetch: PipelineConfig,

    /// Report rendering.
    #[serde(default)]
    pub render: RenderConfig,

    /// Chat command settings.
    #[serde(default)]
    pub plugin: PluginConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; `.json` paths are JSON, everything else TOML.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Options handed to the image renderer.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_quality(self.render.quality)
            .with_clip(Clip {
                x: 0,
                y: 0,
                width: self.render.clip_width,
                height: self.render.clip_height,
            })
            .with_timeout(std::time::Duration::from_millis(self.render.timeout_ms))
    }

    /// Renderer writing to `output`: the configured converter, or the HTML
    /// document itself when none is set.
    pub fn renderer(&self, output: &Path) -> Arc<dyn ImageRenderer> {
        match &self.render.converter {
            Some(program) => Arc::new(CommandImageRenderer::new(program.clone(), output)),
            None => Arc::new(HtmlFileRenderer::new(output.with_extension("html"))),
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// HTML-to-image converter (e.g. `wkhtmltoimage`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,

    /// Output path, relative to the working directory.
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_quality")]
    pub quality: u8,

    #[serde(default = "default_clip_width")]
    pub clip_width: u32,

    #[serde(default = "default_clip_height")]
    pub clip_height: u32,

    #[serde(default = "default_render_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_output() -> String {
    "reviews.png".to_string()
}

fn default_quality() -> u8 {
    RenderOptions::default().quality
}

fn default_clip_width() -> u32 {
    Clip::default().width
}

fn default_clip_height() -> u32 {
    Clip::default().height
}

fn default_render_timeout_ms() -> u64 {
    RenderOptions::default().timeout_ms
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            converter: None,
            output: default_output(),
            quality: default_quality(),
            clip_width: default_clip_width(),
            clip_height: default_clip_height(),
            timeout_ms: default_render_timeout_ms(),
        }
    }
}

/// Chat command configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default = "default_trigger")]
    pub trigger: String,
}

fn default_trigger() -> String {
    DEFAULT_TRIGGER.to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
        }
    }
}

/// Generate a default reviews.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Review board configuration

[fetch]
base_url = "{base_url}"
timeout_secs = {timeout_secs}

[render]
# converter = "wkhtmltoimage"
output = "reviews.png"
quality = 90
clip_width = 2500
clip_height = 10000
timeout_ms = 10000

[plugin]
trigger = "{trigger}"
"#,
        base_url = DEFAULT_BASE_URL,
        timeout_secs = DEFAULT_TIMEOUT_SECS,
        trigger = DEFAULT_TRIGGER
    )
}
