//! Core abstractions for the locale review board.
//!
//! This crate provides the fundamental types shared by every stage:
//! - `ReviewFilter` / `LocaleCode` - Storefront review-language filters
//! - `PipelineConfig` - Endpoint and timeout configuration
//! - `RequestId` / `TimingContext` - Per-invocation context

mod config;
mod context;
mod lifecycle;
mod locale;

pub use config::*;
pub use context::*;
pub use lifecycle::*;
pub use locale::*;
