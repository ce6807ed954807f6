//! Responsive layout helpers for shells.
//!
//! The task is authored against a fixed design size. Shells scale the
//! container to the space they have while keeping that aspect ratio, and
//! store drop positions as percentages so they survive later resizes.

use serde::{Deserialize, Serialize};

use crate::model::{Position, Size};

/// Base font size, in pixels, at the design width.
pub const BASE_FONT_SIZE_PX: f64 = 16.0;

/// Container dimensions after scaling to the available space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerLayout {
    pub width: f64,
    pub height: f64,
    /// Element sizes are in em, so this scales them with the container.
    pub font_size: f64,
}

/// Largest container with the design's aspect ratio that fits `available`.
pub fn fit_container(design: Size, available: Size) -> ContainerLayout {
    let ratio = design.aspect_ratio();
    let (width, height) = if available.width / available.height >= ratio {
        // Wider than the design: height is the limit.
        (available.height * ratio, available.height)
    } else {
        (available.width, available.width / ratio)
    };

    ContainerLayout {
        width,
        height,
        font_size: BASE_FONT_SIZE_PX * (width / design.width),
    }
}

/// Convert a pixel offset inside the container to percentages.
pub fn position_to_percentage(left_px: f64, top_px: f64, container: Size) -> Position {
    Position {
        top: top_px * 100.0 / container.height,
        left: left_px * 100.0 / container.width,
    }
}

/// Resolves content-relative paths for one question instance.
///
/// Passed in explicitly by the host rather than read from global state, so
/// two instances can point at different content folders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPaths {
    /// Prefix for relative paths, typically ending in `/`.
    pub base: String,
}

impl ContentPaths {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Absolute `http(s)` URLs are returned unchanged; anything else is
    /// prefixed with the content base.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.base, path)
    }
}
