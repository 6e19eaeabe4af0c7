//! # Daybreak
//!
//! Host side of the sunrise scene: everything the particle engine treats as
//! an external collaborator.
//!
//! ```text
//! ┌──────────────┐   InputEvent   ┌──────────────────────────────────────┐
//! │ key / swipe  │───────────────>│ FrameLoop::frame(time_ms)            │
//! │ resize       │  (crossbeam)   │  1. drain input → shortcuts, weather │
//! └──────────────┘                │  2. forward viewport size            │
//!                                 │  3. ambient weather tick             │
//!                                 │  4. engine.advance                   │
//!                                 │  5. engine.render → CommandRecorder  │
//!                                 └──────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `viewport`: host surface size
//! - `input`: input event queue
//! - `shortcuts`: keyboard effect toggles
//! - `weather`: swipe cycling and time-of-day ambient weather
//! - `frame_loop`: frame orchestration and timing
//! - `config`: host configuration

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod shortcuts;
pub mod viewport;
pub mod weather;

pub use daybreak_effects as effects;

pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use frame_loop::{FrameLoop, FrameStats, FrameStatsAccumulator};
pub use input::{InputBus, InputEvent, InputReceiver, InputSender};
pub use shortcuts::Shortcut;
pub use viewport::Viewport;
pub use weather::{AmbientWeather, WeatherCycler};
