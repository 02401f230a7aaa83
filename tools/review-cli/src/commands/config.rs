//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;
    ctx.output.info("[fetch]");
    ctx.output.kv("base_url", &config.fetch.base_url);
    ctx.output.kv("timeout_secs", &config.fetch.timeout_secs.to_string());
    ctx.output.kv("user_agent", &config.fetch.user_agent);

    ctx.output.info("[render]");
    ctx.output.kv(
        "converter",
        config.render.converter.as_deref().unwrap_or("(none, HTML output)"),
    );
    ctx.output.kv("output", &config.render.output);
    ctx.output.kv("quality", &config.render.quality.to_string());
    ctx.output.kv(
        "clip",
        &format!("{}x{}", config.render.clip_width, config.render.clip_height),
    );
    ctx.output.kv("timeout_ms", &config.render.timeout_ms.to_string());

    ctx.output.info("[plugin]");
    ctx.output.kv("trigger", &config.plugin.trigger);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.warn("Config init cancelled");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");
    Ok(())
}

/// Errors and warnings for a configuration.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Err(e) = config.fetch.validate() {
        errors.push(format!("fetch: {}", e));
    }
    if config.fetch.timeout_secs > 60 {
        warnings.push(format!(
            "fetch.timeout_secs = {} delays the chat reply for that long on a stalled request",
            config.fetch.timeout_secs
        ));
    }
    if config.render.quality > 100 {
        errors.push("render.quality must be 0-100".to_string());
    }
    if config.render.clip_width == 0 || config.render.clip_height == 0 {
        errors.push("render.clip_width and render.clip_height must be non-zero".to_string());
    }
    if config.render.timeout_ms == 0 {
        errors.push("render.timeout_ms must be greater than zero".to_string());
    }
    if config.render.output.trim().is_empty() {
        errors.push("render.output is required".to_string());
    }
    if config.render.converter.is_none() {
        warnings.push("render.converter is not set; reports are written as HTML".to_string());
    }
    if config.plugin.trigger.trim().is_empty() {
        errors.push("plugin.trigger is required".to_string());
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["fetch", "base_url"] => Ok(config.fetch.base_url.clone()),
        ["fetch", "timeout_secs"] => Ok(config.fetch.timeout_secs.to_string()),
        ["fetch", "user_agent"] => Ok(config.fetch.user_agent.clone()),
        ["render", "converter"] => Ok(config.render.converter.clone().unwrap_or_default()),
        ["render", "output"] => Ok(config.render.output.clone()),
        ["render", "quality"] => Ok(config.render.quality.to_string()),
        ["render", "clip_width"] => Ok(config.render.clip_width.to_string()),
        ["render", "clip_height"] => Ok(config.render.clip_height.to_string()),
        ["render", "timeout_ms"] => Ok(config.render.timeout_ms.to_string()),
        ["plugin", "trigger"] => Ok(config.plugin.trigger.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_errors() {
        let (errors, warnings) = check_config(&CliConfig::default());
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_check_config_reports_errors() {
        let mut config = CliConfig::default();
        config.fetch.base_url = "ftp://example.com".to_string();
        config.render.clip_width = 0;
        config.plugin.trigger = " ".to_string();

        let (errors, _) = check_config(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_get_config_value() {
        let config = CliConfig::default();
        assert_eq!(get_config_value(&config, "render.quality").unwrap(), "90");
        assert_eq!(get_config_value(&config, "plugin.trigger").unwrap(), "好评");
        assert!(get_config_value(&config, "render.nope").is_err());
    }
}
