//! # Daybreak Shared
//!
//! Value types used by both the particle engine and the host.
//!
//! ## RULE
//!
//! This crate must never depend on a windowing or drawing backend.
//! Surfaces live in `daybreak_effects`, hosts live in `daybreak`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;

pub use color::Color;
pub use constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, FRAME_TIME_MS, TARGET_FPS};
pub use math::Vec2;
