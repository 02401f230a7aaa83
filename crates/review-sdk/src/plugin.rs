//! Chat-command surface.

use std::sync::Arc;

use review_core::{LifecyclePhase, RequestId};
use review_observability::StructuredLogger;
use review_render::{last_update_now, render_report_html, ImageRef, ImageRenderer, RenderOptions};

use crate::{ReviewsOutcome, ReviewsPipeline};

/// Keyword that triggers the command.
pub const DEFAULT_TRIGGER: &str = "好评";

/// Prefix of the reply sent when rendering or delivery fails.
pub const HANDLER_ERROR_PREFIX: &str = "处理评价命令时出错";

/// What the host should send back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginReply {
    Image(ImageRef),
    Plain(String),
}

/// Answers the trigger keyword with a rendered review report.
pub struct ReviewsPlugin {
    pipeline: ReviewsPipeline,
    renderer: Arc<dyn ImageRenderer>,
    options: RenderOptions,
    trigger: String,
}

impl ReviewsPlugin {
    pub fn new(pipeline: ReviewsPipeline, renderer: Arc<dyn ImageRenderer>) -> Self {
        Self {
            pipeline,
            renderer,
            options: RenderOptions::default(),
            trigger: DEFAULT_TRIGGER.to_string(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = trigger.into();
        self
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Whether a chat message invokes the command.
    ///
    /// Surrounding whitespace and one leading `/` are ignored.
    pub fn matches(&self, message: &str) -> bool {
        let message = message.trim();
        let message = message.strip_prefix('/').unwrap_or(message);
        message == self.trigger
    }

    /// Handle a chat message; `None` when it is not for this plugin.
    pub async fn handle(&self, message: &str) -> Option<PluginReply> {
        if !self.matches(message) {
            return None;
        }
        Some(self.respond().await)
    }

    /// Run the command unconditionally.
    pub async fn respond(&self) -> PluginReply {
        let logger = StructuredLogger::new(RequestId::generate()).with_component("plugin");
        logger.info("Reviews command received");

        let mut run = match self.pipeline.run_logged(&logger.child("pipeline")).await {
            Ok(run) => run,
            Err(err) => return PluginReply::Plain(ReviewsOutcome::failure_message(&err)),
        };

        let html = render_report_html(&run.report, &last_update_now());
        match self.renderer.render(&html, &self.options).await {
            Ok(image) => {
                run.timing.mark_phase(&LifecyclePhase::Rendered);
                let render_time = run
                    .timing
                    .between(LifecyclePhase::ReportBuilt.name(), LifecyclePhase::Rendered.name())
                    .unwrap_or_default();
                run.timing.mark_phase(&LifecyclePhase::Completion);

                logger
                    .info_builder("Reviews report delivered")
                    .field("image", image.to_url())
                    .field_u64("html_bytes", html.len() as u64)
                    .duration_ms("render_ms", render_time)
                    .duration_ms("total_ms", run.timing.elapsed())
                    .emit();
                PluginReply::Image(image)
            }
            Err(err) => {
                let message = format!("{}: {}", HANDLER_ERROR_PREFIX, err);
                logger.error(&message);
                PluginReply::Plain(message)
            }
        }
    }
}
