//! Particles and their per-kind payloads.
//!
//! Every particle shares position/velocity/size/color/opacity. Anything only
//! one kind needs lives in its `ParticleBody` variant, so a rain drop has no
//! rotation to forget about and a leaf has no lifetime.

use daybreak_shared::{Color, Vec2};
use rand::Rng;
use std::f32::consts::TAU;

use crate::kind::EffectKind;

/// Fog lifetime in life units.
pub const FOG_MAX_LIFE: f32 = 5.0;
/// Life units a fog puff loses each frame.
pub const FOG_DECAY_PER_FRAME: f32 = 0.01;
/// Frames a fog puff lives (`FOG_MAX_LIFE / FOG_DECAY_PER_FRAME`).
pub const FOG_LIFE_FRAMES: u32 = 500;
/// Fog opacity at full life.
pub const FOG_PEAK_OPACITY: f32 = 0.1;

/// Uniform sample in `[min, min + span)`. Never panics on a zero span.
#[inline]
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, span: f32) -> f32 {
    min + rng.gen::<f32>() * span
}

/// Kind-specific particle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleBody {
    /// Rain streak.
    Rain,
    /// Snow flake.
    Snow,
    /// Leaf, spinning at a constant rate.
    Leaves {
        /// Current rotation in radians.
        rotation: f32,
        /// Radians added per frame.
        rotation_speed: f32,
    },
    /// Dust mote.
    Dust,
    /// Firefly with its own flicker frequency.
    Fireflies {
        /// Multiplier on wall-clock milliseconds inside the flicker sine.
        flicker_speed: f32,
    },
    /// Fog puff that fades out over a fixed number of frames.
    Fog {
        /// Frames of life left.
        frames_left: u32,
        /// Frames of life at creation.
        max_frames: u32,
    },
}

impl ParticleBody {
    /// The kind this body belongs to.
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::Rain => EffectKind::Rain,
            Self::Snow => EffectKind::Snow,
            Self::Leaves { .. } => EffectKind::Leaves,
            Self::Dust => EffectKind::Dust,
            Self::Fireflies { .. } => EffectKind::Fireflies,
            Self::Fog { .. } => EffectKind::Fog,
        }
    }
}

/// A transient visual entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Surface position.
    pub position: Vec2,
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Radius, square side, or streak unit depending on kind.
    pub size: f32,
    /// Fill color, alpha included.
    pub color: Color,
    /// Global alpha used when drawing.
    pub opacity: f32,
    /// Kind-specific state.
    pub body: ParticleBody,
}

impl Particle {
    /// Creates a particle of `kind` at `position` with the kind's randomized attributes.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(kind: EffectKind, position: Vec2, rng: &mut R) -> Self {
        let opacity = uniform(rng, 0.2, 0.8);

        match kind {
            EffectKind::Rain => Self {
                position,
                velocity: Vec2::new(-1.0, uniform(rng, 8.0, 4.0)),
                size: 1.0,
                color: Color::rgba8(173, 216, 230, 0.8),
                opacity,
                body: ParticleBody::Rain,
            },
            EffectKind::Snow => Self {
                position,
                velocity: Vec2::new(uniform(rng, -1.0, 2.0), uniform(rng, 2.0, 2.0)),
                size: uniform(rng, 2.0, 4.0),
                color: Color::rgba8(255, 255, 255, 0.9),
                opacity,
                body: ParticleBody::Snow,
            },
            EffectKind::Leaves => Self {
                position,
                velocity: Vec2::new(uniform(rng, -1.5, 3.0), uniform(rng, 1.0, 2.0)),
                size: uniform(rng, 3.0, 6.0),
                color: Color::from_hsl(uniform(rng, 10.0, 60.0), 0.7, 0.5),
                opacity,
                body: ParticleBody::Leaves {
                    rotation: uniform(rng, 0.0, TAU),
                    rotation_speed: uniform(rng, -0.1, 0.2),
                },
            },
            EffectKind::Dust => Self {
                position,
                velocity: Vec2::new(uniform(rng, -0.5, 1.0), uniform(rng, 0.0, 0.5)),
                size: uniform(rng, 0.5, 2.0),
                color: Color::rgba8(255, 215, 0, 0.3),
                opacity,
                body: ParticleBody::Dust,
            },
            EffectKind::Fireflies => Self {
                position,
                velocity: Vec2::new(uniform(rng, -1.0, 2.0), uniform(rng, -1.0, 2.0)),
                size: uniform(rng, 1.0, 2.0),
                color: Color::rgba8(255, 255, 0, 0.8),
                opacity,
                body: ParticleBody::Fireflies {
                    flicker_speed: uniform(rng, 0.05, 0.1),
                },
            },
            EffectKind::Fog => Self {
                position,
                velocity: Vec2::new(uniform(rng, -0.5, 1.0), -0.2),
                size: uniform(rng, 20.0, 50.0),
                color: Color::rgba8(200, 200, 220, 0.1),
                opacity: FOG_PEAK_OPACITY,
                body: ParticleBody::Fog {
                    frames_left: FOG_LIFE_FRAMES,
                    max_frames: FOG_LIFE_FRAMES,
                },
            },
        }
    }

    /// The particle's kind. Fixed for its whole life.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        self.body.kind()
    }

    /// Requests the soft-glow draw style.
    #[inline]
    #[must_use]
    pub const fn glow(&self) -> bool {
        matches!(self.body, ParticleBody::Fireflies { .. })
    }

    /// Remaining life in life units; `None` for kinds that live until off-screen.
    #[must_use]
    pub fn life(&self) -> Option<f32> {
        match self.body {
            #[allow(clippy::cast_precision_loss)]
            ParticleBody::Fog { frames_left, .. } => Some(frames_left as f32 * FOG_DECAY_PER_FRAME),
            _ => None,
        }
    }

    /// Life at creation; `None` for kinds without a lifetime.
    #[must_use]
    pub fn max_life(&self) -> Option<f32> {
        match self.body {
            #[allow(clippy::cast_precision_loss)]
            ParticleBody::Fog { max_frames, .. } => Some(max_frames as f32 * FOG_DECAY_PER_FRAME),
            _ => None,
        }
    }

    /// Has the lifetime run out?
    #[inline]
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self.body, ParticleBody::Fog { frames_left: 0, .. })
    }

    /// One frame: kind-specific rule, then displacement by velocity.
    pub fn step(&mut self, time_ms: f64) {
        match &mut self.body {
            ParticleBody::Leaves {
                rotation,
                rotation_speed,
            } => {
                *rotation += *rotation_speed;
            }
            ParticleBody::Fireflies { flicker_speed } => {
                let phase = time_ms * f64::from(*flicker_speed);
                // A non-finite clock holds fireflies at mid flicker
                let wave = if phase.is_finite() { phase.sin() } else { 0.0 };
                #[allow(clippy::cast_possible_truncation)]
                let flicker = (0.5 + 0.5 * wave) as f32;
                self.opacity = flicker.clamp(0.0, 1.0);
            }
            ParticleBody::Fog {
                frames_left,
                max_frames,
            } => {
                *frames_left = frames_left.saturating_sub(1);
                #[allow(clippy::cast_precision_loss)]
                let fraction = if *max_frames == 0 {
                    0.0
                } else {
                    *frames_left as f32 / *max_frames as f32
                };
                self.opacity = fraction * FOG_PEAK_OPACITY;
            }
            ParticleBody::Rain | ParticleBody::Snow | ParticleBody::Dust => {}
        }

        self.position += self.velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    /// HSL hue of an opaque color, in degrees.
    fn hue_degrees(c: Color) -> f32 {
        let max = c.r.max(c.g).max(c.b);
        let min = c.r.min(c.g).min(c.b);
        let delta = max - min;
        let sector = if max == c.r {
            ((c.g - c.b) / delta).rem_euclid(6.0)
        } else if max == c.g {
            (c.b - c.r) / delta + 2.0
        } else {
            (c.r - c.g) / delta + 4.0
        };
        sector * 60.0
    }

    #[test]
    fn test_kind_is_fixed_by_body() {
        let mut rng = rng();
        for kind in EffectKind::ALL {
            let mut p = Particle::spawn(kind, Vec2::new(10.0, 10.0), &mut rng);
            assert_eq!(p.kind(), kind);
            p.step(1000.0);
            assert_eq!(p.kind(), kind);
        }
    }

    #[test]
    fn test_creation_ranges() {
        let mut rng = rng();
        for _ in 0..500 {
            let rain = Particle::spawn(EffectKind::Rain, Vec2::ZERO, &mut rng);
            assert_eq!(rain.color, Color::rgba8(173, 216, 230, 0.8));
            assert_eq!(rain.velocity.x, -1.0);
            assert!((8.0..=12.0).contains(&rain.velocity.y));
            assert_eq!(rain.size, 1.0);

            let snow = Particle::spawn(EffectKind::Snow, Vec2::ZERO, &mut rng);
            assert_eq!(snow.color, Color::rgba8(255, 255, 255, 0.9));
            assert!((-1.0..=1.0).contains(&snow.velocity.x));
            assert!((2.0..=4.0).contains(&snow.velocity.y));
            assert!((2.0..=6.0).contains(&snow.size));

            let leaf = Particle::spawn(EffectKind::Leaves, Vec2::ZERO, &mut rng);
            assert_eq!(leaf.color.a, 1.0);
            let hue = hue_degrees(leaf.color);
            assert!((9.99..=70.01).contains(&hue), "leaf hue {hue}");
            assert!((-1.5..=1.5).contains(&leaf.velocity.x));
            assert!((1.0..=3.0).contains(&leaf.velocity.y));
            assert!((3.0..=9.0).contains(&leaf.size));
            match leaf.body {
                ParticleBody::Leaves { rotation_speed, rotation } => {
                    assert!((-0.1..=0.1).contains(&rotation_speed));
                    assert!((0.0..=TAU).contains(&rotation));
                }
                other => panic!("expected leaves body, got {other:?}"),
            }

            let dust = Particle::spawn(EffectKind::Dust, Vec2::ZERO, &mut rng);
            assert_eq!(dust.color, Color::rgba8(255, 215, 0, 0.3));
            assert!((-0.5..=0.5).contains(&dust.velocity.x));
            assert!((0.0..=0.5).contains(&dust.velocity.y));
            assert!((0.5..=2.5).contains(&dust.size));

            let fly = Particle::spawn(EffectKind::Fireflies, Vec2::ZERO, &mut rng);
            assert_eq!(fly.color, Color::rgba8(255, 255, 0, 0.8));
            match fly.body {
                ParticleBody::Fireflies { flicker_speed } => {
                    assert!((0.05..=0.15).contains(&flicker_speed));
                }
                other => panic!("expected fireflies body, got {other:?}"),
            }
            assert!((-1.0..=1.0).contains(&fly.velocity.x));
            assert!((-1.0..=1.0).contains(&fly.velocity.y));
            assert!((1.0..=3.0).contains(&fly.size));
            assert!(fly.glow());

            let fog = Particle::spawn(EffectKind::Fog, Vec2::ZERO, &mut rng);
            assert_eq!(fog.color, Color::rgba8(200, 200, 220, 0.1));
            assert_eq!(fog.opacity, FOG_PEAK_OPACITY);
            assert!((-0.5..=0.5).contains(&fog.velocity.x));
            assert_eq!(fog.velocity.y, -0.2);
            assert!((20.0..=70.0).contains(&fog.size));
            assert_eq!(fog.life(), Some(5.0));
            assert_eq!(fog.max_life(), Some(5.0));
        }
    }

    #[test]
    fn test_only_fireflies_glow() {
        let mut rng = rng();
        for kind in EffectKind::ALL {
            let p = Particle::spawn(kind, Vec2::ZERO, &mut rng);
            assert_eq!(p.glow(), kind == EffectKind::Fireflies);
        }
    }

    #[test]
    fn test_step_displaces_by_velocity() {
        let mut rng = rng();
        let mut p = Particle::spawn(EffectKind::Rain, Vec2::new(100.0, 0.0), &mut rng);
        let v = p.velocity;
        p.step(0.0);
        assert_eq!(p.position, Vec2::new(100.0, 0.0) + v);
    }

    #[test]
    fn test_leaf_rotation_advances() {
        let mut rng = rng();
        let mut p = Particle::spawn(EffectKind::Leaves, Vec2::ZERO, &mut rng);
        let ParticleBody::Leaves { rotation: before, rotation_speed } = p.body else {
            panic!("not a leaf");
        };
        p.step(0.0);
        let ParticleBody::Leaves { rotation: after, .. } = p.body else {
            panic!("not a leaf");
        };
        assert_eq!(after, before + rotation_speed);
    }

    #[test]
    fn test_firefly_flicker_survives_non_finite_clock() {
        let mut rng = rng();
        let mut p = Particle::spawn(EffectKind::Fireflies, Vec2::ZERO, &mut rng);
        for time_ms in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            p.step(time_ms);
            assert_eq!(p.opacity, 0.5);
        }
        p.step(1000.0);
        assert!((0.0..=1.0).contains(&p.opacity));
    }

    #[test]
    fn test_fog_fades_to_zero() {
        let mut rng = rng();
        let mut p = Particle::spawn(EffectKind::Fog, Vec2::ZERO, &mut rng);
        let mut last = p.opacity;
        for _ in 0..FOG_LIFE_FRAMES {
            p.step(0.0);
            assert!(p.opacity < last);
            last = p.opacity;
        }
        assert!(p.is_expired());
        assert_eq!(p.opacity, 0.0);
        assert_eq!(p.life(), Some(0.0));
    }
}
