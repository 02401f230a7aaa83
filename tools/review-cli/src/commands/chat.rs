//! Dispatch a chat message through the plugin.

use anyhow::Result;
use review_sdk::prelude::*;

use super::ChatArgs;
use crate::context::Context;

/// Run the chat command.
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let output = ctx.resolve_path(args.output.as_deref().unwrap_or(&ctx.config.render.output));
    let plugin = ctx.plugin(&output)?;

    let spinner = ctx.output.spinner("Handling message...");
    let reply = plugin.handle(&args.message).await;
    spinner.finish_and_clear();

    match reply {
        None => {
            ctx.output.info(&format!(
                "Message not handled (trigger is \"{}\")",
                plugin.trigger()
            ));
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "handled": false }));
            }
        }
        Some(PluginReply::Image(image)) => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&serde_json::json!({ "handled": true, "image": image.to_url() }));
            } else {
                ctx.output.success(&format!("[image] {}", image.to_url()));
            }
        }
        Some(PluginReply::Plain(text)) => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&serde_json::json!({ "handled": true, "text": text }));
            } else {
                println!("{}", text);
            }
        }
    }

    Ok(())
}
