//! # Particle Engine
//!
//! Owns every live particle and the per-kind effect flags.
//!
//! Per frame:
//! 1. `advance`: per-kind rule + displacement for every particle, then one
//!    `retain` pass drops anything past the margin or out of life, then each
//!    active effect rolls for one new particle at its spawn edge.
//! 2. `render`: clear, then draw every particle in creation order.
//!
//! Input may call `start_effect`/`stop_effect` between frames. Both take
//! effect immediately: seeding is synchronous and stopping is a hard removal.

use daybreak_shared::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::kind::EffectKind;
use crate::particle::{uniform, Particle, ParticleBody};
use crate::state::EffectState;
use crate::stats::ParticleStats;
use crate::surface::{DrawSurface, Glow};

/// Width of a rain streak.
const RAIN_STREAK_WIDTH: f32 = 1.0;
/// Rain streak length as a multiple of particle size.
const RAIN_STREAK_LENGTH: f32 = 3.0;

/// Per-frame input to `advance`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameContext {
    /// Wall-clock time in milliseconds. Drives firefly flicker.
    pub time_ms: f64,
}

impl FrameContext {
    /// Context for a frame at `time_ms`.
    #[must_use]
    pub const fn at(time_ms: f64) -> Self {
        Self { time_ms }
    }
}

/// The weather particle engine.
pub struct ParticleEngine {
    /// Live particles, oldest first.
    particles: Vec<Particle>,
    /// Which effects keep spawning.
    effects: EffectState,
    /// Tunables.
    config: EngineConfig,
    /// Surface width.
    width: f32,
    /// Surface height.
    height: f32,
    /// Source of every random attribute and spawn roll.
    rng: ChaCha8Rng,
    /// Current statistics.
    stats: ParticleStats,
}

impl ParticleEngine {
    /// Creates an engine for a `width` x `height` surface with no active effects.
    #[must_use]
    pub fn new(config: EngineConfig, width: f32, height: f32) -> Self {
        let seed = config.seed.unwrap_or_else(entropy_seed);
        debug!(seed, width, height, "particle engine created");

        Self {
            particles: Vec::with_capacity(256),
            effects: EffectState::new(),
            config,
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            rng: ChaCha8Rng::seed_from_u64(seed),
            stats: ParticleStats::default(),
        }
    }

    /// Activates `kind` and seeds `intensity` particles across the whole surface.
    pub fn start_effect(&mut self, kind: EffectKind, intensity: u32) {
        self.effects.set(kind, true);

        self.particles.reserve(intensity as usize);
        for _ in 0..intensity {
            let position = self.random_on_surface();
            let particle = Particle::spawn(kind, position, &mut self.rng);
            self.particles.push(particle);
        }

        self.recount();
        debug!(%kind, intensity, alive = self.particles.len(), "effect started");
    }

    /// Activates `kind` with `config.default_intensity` particles.
    pub fn start_default(&mut self, kind: EffectKind) {
        self.start_effect(kind, self.config.default_intensity);
    }

    /// Deactivates `kind` and removes all of its particles now.
    pub fn stop_effect(&mut self, kind: EffectKind) {
        self.effects.set(kind, false);

        let before = self.particles.len();
        self.particles.retain(|p| p.kind() != kind);
        let removed = before - self.particles.len();

        self.recount();
        debug!(%kind, removed, "effect stopped");
    }

    /// Stops every effect.
    pub fn stop_all(&mut self) {
        for kind in EffectKind::ALL {
            self.stop_effect(kind);
        }
    }

    /// `start_effect` by name. Unknown names are logged and ignored.
    pub fn start_effect_named(&mut self, name: &str, intensity: u32) {
        match name.parse::<EffectKind>() {
            Ok(kind) => self.start_effect(kind, intensity),
            Err(err) => warn!(%err, "start request ignored"),
        }
    }

    /// `stop_effect` by name. Unknown names are logged and ignored.
    pub fn stop_effect_named(&mut self, name: &str) {
        match name.parse::<EffectKind>() {
            Ok(kind) => self.stop_effect(kind),
            Err(err) => warn!(%err, "stop request ignored"),
        }
    }

    /// One simulation step.
    pub fn advance(&mut self, ctx: &FrameContext) {
        for particle in &mut self.particles {
            particle.step(ctx.time_ms);
        }

        let (width, height, margin) = (self.width, self.height, self.config.offscreen_margin);
        let before = self.particles.len();
        self.particles
            .retain(|p| !p.is_expired() && p.position.within_bounds(width, height, margin));
        let culled = before - self.particles.len();

        let mut spawned = 0u32;
        for kind in EffectKind::ALL {
            if self.effects.is_active(kind) && self.rng.gen::<f32>() < self.config.spawn_probability {
                let position = self.spawn_position(kind);
                let particle = Particle::spawn(kind, position, &mut self.rng);
                self.particles.push(particle);
                spawned += 1;
            }
        }

        self.stats.frame += 1;
        self.stats.spawned_this_frame = spawned;
        self.stats.culled_this_frame = saturating_u32(culled);
        self.recount();

        trace!(
            frame = self.stats.frame,
            alive = self.stats.alive_count,
            spawned,
            culled,
            "particles advanced"
        );
    }

    /// Composites every particle onto `surface`, oldest first.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.width, self.height);

        for particle in &self.particles {
            surface.save();

            if particle.glow() {
                surface.set_glow(Some(Glow {
                    blur: self.config.glow_blur,
                    color: particle.color,
                }));
            }

            surface.set_global_alpha(particle.opacity);
            surface.set_fill_color(particle.color);

            match particle.body {
                ParticleBody::Leaves { rotation, .. } => {
                    surface.fill_rotated_square(particle.position, particle.size, rotation);
                }
                ParticleBody::Rain => {
                    let tail = particle.position + Vec2::new(0.0, particle.size * RAIN_STREAK_LENGTH);
                    surface.set_stroke_color(particle.color);
                    surface.stroke_line(particle.position, tail, RAIN_STREAK_WIDTH);
                }
                ParticleBody::Snow
                | ParticleBody::Dust
                | ParticleBody::Fireflies { .. }
                | ParticleBody::Fog { .. } => {
                    surface.fill_circle(particle.position, particle.size);
                }
            }

            surface.restore();
        }
    }

    /// Host resize notification. Later culling and spawning use the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        debug!(width = self.width, height = self.height, "surface resized");
    }

    /// Live particles, oldest first.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// No live particles?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Live particles of one kind.
    #[must_use]
    pub fn count_of(&self, kind: EffectKind) -> usize {
        self.particles.iter().filter(|p| p.kind() == kind).count()
    }

    /// Effect flags.
    #[must_use]
    pub fn effects(&self) -> &EffectState {
        &self.effects
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> ParticleStats {
        self.stats
    }

    /// Surface size as `(width, height)`.
    #[must_use]
    pub fn surface_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn random_on_surface(&mut self) -> Vec2 {
        Vec2::new(
            uniform(&mut self.rng, 0.0, self.width),
            uniform(&mut self.rng, 0.0, self.height),
        )
    }

    fn spawn_position(&mut self, kind: EffectKind) -> Vec2 {
        let margin = self.config.offscreen_margin;
        match kind {
            // Top edge, spread past both sides so slanted rain covers the corners
            EffectKind::Rain | EffectKind::Snow => Vec2::new(
                uniform(&mut self.rng, -margin, self.width + 2.0 * margin),
                -margin,
            ),
            // Bottom edge, drifts upward
            EffectKind::Fog => Vec2::new(uniform(&mut self.rng, 0.0, self.width), self.height + margin),
            EffectKind::Leaves | EffectKind::Dust | EffectKind::Fireflies => self.random_on_surface(),
        }
    }

    fn recount(&mut self) {
        let mut per_kind = [0u32; EffectKind::COUNT];
        for particle in &self.particles {
            per_kind[particle.kind().index()] += 1;
        }
        self.stats.per_kind = per_kind;
        self.stats.alive_count = saturating_u32(self.particles.len());
    }
}

impl Default for ParticleEngine {
    fn default() -> Self {
        Self::new(
            EngineConfig::default(),
            daybreak_shared::DEFAULT_VIEWPORT_WIDTH,
            daybreak_shared::DEFAULT_VIEWPORT_HEIGHT,
        )
    }
}

/// Negative, NaN and infinite extents collapse to zero.
fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Seed from OS entropy, or from the clock if the OS refuses.
#[must_use]
pub fn entropy_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::fill(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(err) => {
            warn!(%err, "OS entropy unavailable, seeding from clock");
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0x5EED, |d| {
                    #[allow(clippy::cast_possible_truncation)]
                    let nanos = d.as_nanos() as u64;
                    nanos
                })
        }
    }
}
