//! Public SDK for the locale review board.
//!
//! ```ignore
//! use review_sdk::prelude::*;
//!
//! let session = Arc::new(ReqwestSession::new(&config.user_agent)?);
//! let pipeline = ReviewsPipeline::new(session, config);
//! let plugin = ReviewsPlugin::new(pipeline, Arc::new(HtmlFileRenderer::new("reviews.html")));
//!
//! if let Some(reply) = plugin.handle("好评").await {
//!     host.send(reply);
//! }
//! ```

mod pipeline;
mod plugin;

pub use pipeline::*;
pub use plugin::*;

pub use review_core;
pub use review_data;
pub use review_observability;
pub use review_render;
pub use review_report;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        PipelineError, PipelineRun, PluginReply, ReviewsOutcome, ReviewsPipeline, ReviewsPlugin,
        DEFAULT_TRIGGER, HANDLER_ERROR_PREFIX,
    };
    pub use review_core::*;
    pub use review_data::*;
    pub use review_observability::*;
    pub use review_render::*;
    pub use review_report::*;
}
