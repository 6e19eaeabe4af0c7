//! # Daybreak Frame Loop
//!
//! ```text
//! Frame N (one display-synchronized callback):
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. INPUT                                                            │
//! │    ├─ Drain the input queue                                         │
//! │    ├─ Keys → shortcuts, swipes → weather cycler                     │
//! │    └─ Resize → viewport                                             │
//! │                                                                     │
//! │ 2. SURFACE                                                          │
//! │    └─ Forward a changed viewport size to the engine                 │
//! │                                                                     │
//! │ 3. AMBIENT                                                          │
//! │    └─ Time-of-day weather, when its interval has elapsed            │
//! │                                                                     │
//! │ 4. ADVANCE                                                          │
//! │    └─ Kinematics → cull → spawn                                     │
//! │                                                                     │
//! │ 5. RENDER                                                           │
//! │    └─ Composite into the command recorder                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host's display callback owns scheduling; this type only runs one
//! frame when asked and never sleeps.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use daybreak_effects::{entropy_seed, CommandRecorder, FrameContext, ParticleEngine};
use daybreak_shared::FRAME_TIME_MS;

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};
use crate::input::{InputBus, InputEvent, InputReceiver, InputSender};
use crate::shortcuts::Shortcut;
use crate::viewport::Viewport;
use crate::weather::{hour_of_day, AmbientWeather, WeatherCycler};

/// Frame time above which a frame counts as over budget, in microseconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const FRAME_BUDGET_US: u64 = (FRAME_TIME_MS * 1000.0) as u64;

/// Frame timing statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Total frame time in microseconds.
    pub total_us: u64,
    /// Input handling time in microseconds.
    pub input_us: u64,
    /// Engine advance time in microseconds.
    pub advance_us: u64,
    /// Render time in microseconds.
    pub render_us: u64,
    /// Input events processed this frame.
    pub events_processed: u32,
    /// Live particles after the frame.
    pub alive_particles: u32,
    /// Shapes drawn this frame.
    pub draw_calls: u32,
}

/// The host frame loop.
///
/// Owns the engine, the viewport, the drawing surface and the input receiver.
pub struct FrameLoop {
    /// The particle engine.
    engine: ParticleEngine,
    /// Host surface size.
    viewport: Viewport,
    /// Size last forwarded to the engine.
    engine_size: (f32, f32),
    /// Drawing surface.
    surface: CommandRecorder,
    /// Input bus (kept so new senders can be handed out).
    input_bus: InputBus,
    /// Input receiver drained each frame.
    input: InputReceiver,
    /// Swipe weather cycling.
    cycler: WeatherCycler,
    /// Time-of-day weather.
    ambient: AmbientWeather,
    /// Rolls for the ambient schedule.
    rng: ChaCha8Rng,
    /// Notifications waiting for the host to display.
    notifications: Vec<String>,
    /// Configuration.
    config: HostConfig,
    /// Frame counter.
    frame_count: u64,
    /// Accumulated frame statistics.
    stats_accumulator: FrameStatsAccumulator,
    /// False after shutdown.
    running: bool,
}

impl FrameLoop {
    /// Creates a frame loop for a surface of the given size.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure in `config`.
    pub fn new(config: HostConfig, width: f32, height: f32) -> HostResult<Self> {
        config.validate()?;

        let viewport = Viewport::new(width, height);
        let engine = ParticleEngine::new(config.engine.clone(), viewport.width(), viewport.height());
        // Keep the ambient rolls independent from the engine's stream
        let seed = config.engine.seed.map_or_else(entropy_seed, |s| s.rotate_left(32) ^ 0xDA7B_8EAC);
        let input_bus = InputBus::new(config.input_capacity);
        let input = input_bus.receiver();

        Ok(Self {
            engine_size: engine.surface_size(),
            engine,
            viewport,
            surface: CommandRecorder::new(),
            input_bus,
            input,
            cycler: WeatherCycler::new(),
            ambient: AmbientWeather::new(config.ambient_interval_ms),
            rng: ChaCha8Rng::seed_from_u64(seed),
            notifications: Vec::new(),
            config,
            frame_count: 0,
            stats_accumulator: FrameStatsAccumulator::new(),
            running: true,
        })
    }

    /// A sender for input callbacks.
    #[must_use]
    pub fn input_sender(&self) -> InputSender {
        self.input_bus.sender()
    }

    /// Runs one frame at wall-clock `time_ms`.
    ///
    /// # Errors
    ///
    /// `ShutDown` once `shutdown` has been called.
    pub fn frame(&mut self, time_ms: f64) -> HostResult<FrameStats> {
        if !self.running {
            return Err(HostError::ShutDown);
        }
        let frame_start = Instant::now();

        // === 1. INPUT ===
        let events = self.input.drain();
        let events_processed = u32::try_from(events.len()).unwrap_or(u32::MAX);
        for event in events {
            self.handle_event(event, time_ms);
        }

        // === 2. SURFACE ===
        let size = (self.viewport.width(), self.viewport.height());
        if size != self.engine_size {
            self.engine.resize(size.0, size.1);
            self.engine_size = size;
        }

        // === 3. AMBIENT ===
        if self.config.ambient_weather {
            let hour = hour_of_day(time_ms, self.config.utc_offset_hours);
            if let Some(choice) = self.ambient.tick(&mut self.engine, time_ms, hour, &mut self.rng) {
                self.notifications.push(format!("{} drifting in", capitalized(choice.kind.name())));
            }
        }
        let input_done = Instant::now();

        // === 4. ADVANCE ===
        self.engine.advance(&FrameContext::at(time_ms));
        let advance_done = Instant::now();

        // === 5. RENDER ===
        self.surface.begin_frame();
        self.engine.render(&mut self.surface);
        let render_done = Instant::now();

        let stats = FrameStats {
            frame: self.frame_count,
            total_us: micros(render_done - frame_start),
            input_us: micros(input_done - frame_start),
            advance_us: micros(advance_done - input_done),
            render_us: micros(render_done - advance_done),
            events_processed,
            alive_particles: self.engine.stats().alive_count,
            draw_calls: u32::try_from(self.surface.draw_count()).unwrap_or(u32::MAX),
        };
        self.end_frame(stats);
        Ok(stats)
    }

    fn handle_event(&mut self, event: InputEvent, time_ms: f64) {
        match event {
            InputEvent::Key(key) => {
                if let Some(shortcut) = Shortcut::from_key(key) {
                    let note = shortcut.apply(&mut self.engine);
                    self.notifications.push(note.to_owned());
                }
            }
            InputEvent::SwipeLeft => {
                if let Some(kind) = self.cycler.cycle(&mut self.engine, time_ms) {
                    self.notifications.push(format!("{} activated", capitalized(kind.name())));
                }
            }
            InputEvent::SwipeRight => WeatherCycler::clear(&mut self.engine),
            InputEvent::Resize { width, height } => {
                if self.viewport.resize(width, height) {
                    debug!(width, height, "viewport resized");
                }
            }
        }
    }

    fn end_frame(&mut self, stats: FrameStats) {
        self.frame_count += 1;
        self.stats_accumulator.record(stats);

        if self.config.enable_timing_logs && stats.total_us > FRAME_BUDGET_US {
            #[allow(clippy::cast_precision_loss)]
            let ms = stats.total_us as f64 / 1000.0;
            warn!(frame = stats.frame, ms, budget_ms = FRAME_TIME_MS, "frame exceeded budget");
        }
    }

    /// Tears the loop down: stops every effect and drops the surface contents.
    /// Later `frame` calls return `ShutDown`.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.engine.stop_all();
        self.surface.begin_frame();
        self.notifications.clear();
        debug!(frames = self.frame_count, "frame loop shut down");
    }

    /// Is the loop still accepting frames?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Notifications produced since the last call.
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    /// Status line listing active effects, e.g. `Active Effects: rain, fog`.
    #[must_use]
    pub fn active_effects_label(&self) -> String {
        format!("Active Effects: {}", self.engine.effects())
    }

    /// The engine, for direct start/stop calls between frames.
    pub fn engine_mut(&mut self) -> &mut ParticleEngine {
        &mut self.engine
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The drawing surface holding the last frame's commands.
    #[must_use]
    pub fn surface(&self) -> &CommandRecorder {
        &self.surface
    }

    /// Returns the current frame count.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats_accumulator
    }
}

fn micros(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of advance times.
    pub advance_us_sum: u64,
    /// Sum of render times.
    pub render_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
    /// Most particles alive after any frame.
    pub peak_particles: u32,
}

impl FrameStatsAccumulator {
    /// Creates a new accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            advance_us_sum: 0,
            render_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            peak_particles: 0,
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.advance_us_sum += stats.advance_us;
        self.render_us_sum += stats.render_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.peak_particles = self.peak_particles.max(stats.alive_particles);

        if stats.total_us > FRAME_BUDGET_US {
            self.frames_over_budget += 1;
        }
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
