//! # Daybreak Effects
//!
//! Weather particle engine for the sunrise scene.
//!
//! ## Frame Contract
//!
//! ```text
//! host frame callback
//!   ├─ start_effect / stop_effect   (input, between frames)
//!   ├─ advance(FrameContext)        (kinematics → cull → spawn)
//!   └─ render(&mut DrawSurface)     (clear → draw in creation order)
//! ```
//!
//! Everything runs on the thread that owns the surface. The engine never
//! blocks and `advance`/`render` never fail.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use daybreak_effects::{EffectKind, EngineConfig, FrameContext, ParticleEngine, CommandRecorder};
//!
//! let mut engine = ParticleEngine::new(EngineConfig::default(), 1280.0, 720.0);
//! engine.start_effect(EffectKind::Rain, 30);
//!
//! let mut surface = CommandRecorder::new();
//! engine.advance(&FrameContext::at(16.0));
//! engine.render(&mut surface);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod error;
pub mod kind;
pub mod particle;
pub mod state;
pub mod stats;
pub mod surface;

pub use config::EngineConfig;
pub use engine::{entropy_seed, FrameContext, ParticleEngine};
pub use error::{EffectsError, EffectsResult};
pub use kind::EffectKind;
pub use particle::{Particle, ParticleBody};
pub use state::EffectState;
pub use stats::ParticleStats;
pub use surface::{CommandRecorder, DrawCommand, DrawSurface, Glow};
