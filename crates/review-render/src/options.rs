//! Image conversion options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Region of the rendered page kept in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for Clip {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 2500,
            height: 10000,
        }
    }
}

/// Options handed to an [`ImageRenderer`](crate::ImageRenderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub clip: Clip,
    /// Image quality, 0-100.
    #[serde(default = "default_quality")]
    pub quality: u8,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_quality() -> u8 {
    90
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clip: Clip::default(),
            quality: default_quality(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RenderOptions {
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(100);
        self
    }

    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.clip = clip;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Conversion deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
