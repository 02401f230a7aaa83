//! Render the review report to a file.

use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use review_sdk::prelude::*;

use super::RenderArgs;
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let output = ctx.resolve_path(args.output.as_deref().unwrap_or(&ctx.config.render.output));
    let renderer: Arc<dyn ImageRenderer> = if args.html_only {
        Arc::new(HtmlFileRenderer::new(output.with_extension("html")))
    } else {
        ctx.config.renderer(&output)
    };

    let pipeline = ctx.pipeline(args.timeout)?;
    let spinner = ctx.output.spinner("Fetching review summaries...");
    let report = pipeline.run().await;
    spinner.finish_and_clear();
    let report = report.map_err(|err| anyhow!(ReviewsOutcome::failure_message(&err)))?;

    let html = render_report_html(&report, &last_update_now());
    let image = renderer
        .render(&html, &ctx.config.render_options())
        .await
        .context("Failed to render report")?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "path": image.to_url(),
            "kind": match image.kind {
                ImageKind::Image => "image",
                ImageKind::Html => "html",
            },
            "languages": report.ranked.len(),
        }));
        return Ok(());
    }

    if image.kind == ImageKind::Html && !args.html_only {
        ctx.output
            .warn("No converter configured; wrote the HTML report instead (set render.converter)");
    }
    ctx.output.success(&format!("Wrote {}", image.path.display()));

    Ok(())
}
