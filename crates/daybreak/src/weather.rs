//! # Weather Scheduling
//!
//! Two things pick effects without a key press:
//! - `WeatherCycler`: a left swipe rotates rain → snow → leaves → fireflies.
//! - `AmbientWeather`: a periodic time-of-day schedule.
//!
//! Both replace whatever of the four weather kinds is running. Dust and fog
//! are only ever added by the schedule.

use daybreak_effects::{EffectKind, ParticleEngine};
use rand::Rng;
use tracing::debug;

use crate::shortcuts::WEATHER_KINDS;

/// Minimum milliseconds between two swipe cycles.
pub const CYCLE_COOLDOWN_MS: f64 = 3_000.0;
/// Particles seeded by a swipe cycle.
pub const CYCLE_INTENSITY: u32 = 25;

/// Rotates through the four weather kinds on swipe.
#[derive(Debug, Clone, Default)]
pub struct WeatherCycler {
    /// Index into `WEATHER_KINDS` of the current effect.
    index: usize,
    /// When the last cycle happened.
    last_cycle_ms: Option<f64>,
}

impl WeatherCycler {
    /// Creates a cycler that has never fired.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: 0,
            last_cycle_ms: None,
        }
    }

    /// Moves to the next weather kind unless still cooling down.
    ///
    /// Returns the kind that was started, or `None` if the swipe was ignored.
    pub fn cycle(&mut self, engine: &mut ParticleEngine, now_ms: f64) -> Option<EffectKind> {
        if let Some(last) = self.last_cycle_ms {
            if now_ms - last <= CYCLE_COOLDOWN_MS {
                return None;
            }
        }

        self.index = (self.index + 1) % WEATHER_KINDS.len();
        let kind = WEATHER_KINDS[self.index];

        for other in WEATHER_KINDS {
            engine.stop_effect(other);
        }
        engine.start_effect(kind, CYCLE_INTENSITY);

        self.last_cycle_ms = Some(now_ms);
        debug!(%kind, "weather cycled");
        Some(kind)
    }

    /// Right swipe: clears rain, snow and leaves. Fireflies stay.
    pub fn clear(engine: &mut ParticleEngine) {
        for kind in [EffectKind::Rain, EffectKind::Snow, EffectKind::Leaves] {
            engine.stop_effect(kind);
        }
    }
}

/// What the time-of-day schedule wants for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientChoice {
    /// Effect to start.
    pub kind: EffectKind,
    /// Particles to seed.
    pub intensity: u32,
}

/// Periodic time-of-day weather.
#[derive(Debug, Clone)]
pub struct AmbientWeather {
    /// Milliseconds between ticks.
    interval_ms: f64,
    /// When the next tick is due; set on the first frame seen.
    next_due_ms: Option<f64>,
}

impl AmbientWeather {
    /// Creates a schedule ticking every `interval_ms`.
    #[must_use]
    pub const fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    /// The schedule's pick for `hour` (0-23) given a uniform `roll` in [0, 1).
    ///
    /// - 06-11: dust 10, 30% of ticks
    /// - 12-17: leaves 15, 20% of ticks
    /// - 18-21: fireflies 12, every tick
    /// - night: fog 8, 10% of ticks
    #[must_use]
    pub fn choose(hour: u32, roll: f32) -> Option<AmbientChoice> {
        let (kind, intensity, chance) = match hour {
            6..=11 => (EffectKind::Dust, 10, 0.3),
            12..=17 => (EffectKind::Leaves, 15, 0.2),
            18..=21 => (EffectKind::Fireflies, 12, 1.0),
            _ => (EffectKind::Fog, 8, 0.1),
        };
        (roll < chance).then_some(AmbientChoice { kind, intensity })
    }

    /// Runs a tick if one is due at `now_ms`.
    ///
    /// A tick first stops the four weather kinds, then maybe starts the
    /// schedule's pick. Returns the pick when a tick ran and chose something.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        engine: &mut ParticleEngine,
        now_ms: f64,
        hour: u32,
        rng: &mut R,
    ) -> Option<AmbientChoice> {
        let due = *self.next_due_ms.get_or_insert(now_ms + self.interval_ms);
        if now_ms < due {
            return None;
        }
        self.next_due_ms = Some(now_ms + self.interval_ms);

        for kind in WEATHER_KINDS {
            engine.stop_effect(kind);
        }

        let choice = Self::choose(hour, rng.gen::<f32>());
        if let Some(AmbientChoice { kind, intensity }) = choice {
            engine.start_effect(kind, intensity);
        }
        debug!(hour, ?choice, "ambient weather tick");
        choice
    }
}

/// Hour of day (0-23) for a millisecond Unix timestamp shifted by `utc_offset_hours`.
#[must_use]
pub fn hour_of_day(time_ms: f64, utc_offset_hours: i32) -> u32 {
    const MS_PER_HOUR: f64 = 3_600_000.0;
    let hours = (time_ms / MS_PER_HOUR).floor() + f64::from(utc_offset_hours);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hour = hours.rem_euclid(24.0) as u32;
    hour.min(23)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybreak_effects::EngineConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine() -> ParticleEngine {
        ParticleEngine::new(EngineConfig::seeded(2), 640.0, 480.0)
    }

    #[test]
    fn test_first_swipe_selects_snow() {
        let mut e = engine();
        let mut cycler = WeatherCycler::new();
        assert_eq!(cycler.cycle(&mut e, 10_000.0), Some(EffectKind::Snow));
        assert_eq!(e.count_of(EffectKind::Snow), 25);
    }

    #[test]
    fn test_cycle_respects_cooldown_and_wraps() {
        let mut e = engine();
        let mut cycler = WeatherCycler::new();
        let mut now = 0.0;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(cycler.cycle(&mut e, now).unwrap());
            assert_eq!(cycler.cycle(&mut e, now + CYCLE_COOLDOWN_MS), None);
            now += CYCLE_COOLDOWN_MS + 1.0;
        }
        assert_eq!(
            seen,
            vec![EffectKind::Snow, EffectKind::Leaves, EffectKind::Fireflies, EffectKind::Rain]
        );
        // Only the latest weather kind is running
        assert_eq!(e.len(), 25);
        assert_eq!(e.count_of(EffectKind::Rain), 25);
    }

    #[test]
    fn test_right_swipe_keeps_fireflies() {
        let mut e = engine();
        e.start_effect(EffectKind::Fireflies, 3);
        e.start_effect(EffectKind::Snow, 3);
        WeatherCycler::clear(&mut e);
        assert_eq!(e.len(), 3);
        assert!(e.effects().is_active(EffectKind::Fireflies));
    }

    #[test]
    fn test_schedule_by_hour() {
        assert_eq!(
            AmbientWeather::choose(8, 0.1),
            Some(AmbientChoice { kind: EffectKind::Dust, intensity: 10 })
        );
        assert_eq!(AmbientWeather::choose(8, 0.5), None);
        assert_eq!(
            AmbientWeather::choose(12, 0.19),
            Some(AmbientChoice { kind: EffectKind::Leaves, intensity: 15 })
        );
        assert_eq!(AmbientWeather::choose(17, 0.2), None);
        assert_eq!(
            AmbientWeather::choose(21, 0.999),
            Some(AmbientChoice { kind: EffectKind::Fireflies, intensity: 12 })
        );
        assert_eq!(
            AmbientWeather::choose(3, 0.05),
            Some(AmbientChoice { kind: EffectKind::Fog, intensity: 8 })
        );
        assert_eq!(AmbientWeather::choose(22, 0.5), None);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut e = engine();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ambient = AmbientWeather::new(30_000.0);
        e.start_effect(EffectKind::Rain, 5);

        assert_eq!(ambient.tick(&mut e, 0.0, 19, &mut rng), None);
        assert_eq!(ambient.tick(&mut e, 29_999.0, 19, &mut rng), None);
        assert_eq!(e.count_of(EffectKind::Rain), 5);

        let choice = ambient.tick(&mut e, 30_000.0, 19, &mut rng);
        assert_eq!(choice.map(|c| c.kind), Some(EffectKind::Fireflies));
        assert_eq!(e.count_of(EffectKind::Rain), 0);
        assert_eq!(e.count_of(EffectKind::Fireflies), 12);

        // Next one is a full interval later
        assert_eq!(ambient.tick(&mut e, 45_000.0, 19, &mut rng), None);
    }

    #[test]
    fn test_hour_of_day() {
        assert_eq!(hour_of_day(0.0, 0), 0);
        assert_eq!(hour_of_day(3_600_000.0 * 7.5, 0), 7);
        assert_eq!(hour_of_day(3_600_000.0 * 23.0, 2), 1);
        assert_eq!(hour_of_day(0.0, -5), 19);
    }
}
