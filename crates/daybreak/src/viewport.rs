//! Host surface size.

use daybreak_shared::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

/// The drawable area the host reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport. Unusable sizes collapse to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_extent(width),
            height: clamp_extent(height),
        }
    }

    /// Current width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Current height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Applies a resize. Returns true if the size actually changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let next = Self::new(width, height);
        let changed = next != *self;
        *self = next;
        changed
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

fn clamp_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
