//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use review_sdk::prelude::*;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    pub output: Output,
    pub cwd: PathBuf,
    /// File the config was loaded from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Find a config file in the directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(path = %config_path.display(), "ignoring config: {:#}", e),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Pipeline over a fresh pooled session, with an optional timeout override.
    pub fn pipeline(&self, timeout_secs: Option<u64>) -> Result<ReviewsPipeline> {
        let mut config = self.config.fetch.clone();
        if let Some(secs) = timeout_secs {
            config = config.with_timeout_secs(secs);
        }
        config.validate().context("Invalid [fetch] configuration")?;

        let session = ReqwestSession::new(&config.user_agent).context("Failed to create HTTP session")?;
        Ok(ReviewsPipeline::new(Arc::new(session), config))
    }

    /// Chat plugin wired to the configured renderer.
    pub fn plugin(&self, output: &Path) -> Result<ReviewsPlugin> {
        Ok(ReviewsPlugin::new(self.pipeline(None)?, self.config.renderer(output))
            .with_options(self.config.render_options())
            .with_trigger(self.config.plugin.trigger.clone()))
    }
}
