//! # Frame & Viewport Constants
//!
//! Defaults used when the host has not reported anything yet.

/// Frames per second the host aims for (display-synchronized).
pub const TARGET_FPS: u32 = 60;

/// Milliseconds per frame at `TARGET_FPS`.
pub const FRAME_TIME_MS: f64 = 1000.0 / TARGET_FPS as f64;

/// Viewport width before the first resize notification.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

/// Viewport height before the first resize notification.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
