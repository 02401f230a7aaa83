//! CLI command implementations.

pub mod chat;
pub mod config;
pub mod fetch;
pub mod render;

use clap::{Args, Subcommand};

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Per-request timeout in seconds (overrides config).
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Show per-language request timings.
    #[arg(long)]
    pub metrics: bool,
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Output path (overrides config).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the HTML document only, skipping image conversion.
    #[arg(long)]
    pub html_only: bool,

    /// Per-request timeout in seconds (overrides config).
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Chat message, e.g. "好评".
    pub message: String,

    /// Output path for the rendered report (overrides config).
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Initialize a new config file.
    Init {
        /// Overwrite an existing config without asking.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}
