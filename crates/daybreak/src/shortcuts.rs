//! Keyboard effect toggles.

use daybreak_effects::{EffectKind, ParticleEngine};

/// Effects the clear shortcut (and the weather schedule) manage.
pub const WEATHER_KINDS: [EffectKind; 4] = [
    EffectKind::Rain,
    EffectKind::Snow,
    EffectKind::Leaves,
    EffectKind::Fireflies,
];

/// A keyboard shortcut bound to an effect action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `R`: rain, 30 particles.
    Rain,
    /// `S`: snow, 25 particles.
    Snow,
    /// `L`: leaves, 20 particles.
    Leaves,
    /// `F`: fireflies, 15 particles.
    Fireflies,
    /// `C`: stop rain, snow, leaves and fireflies.
    Clear,
}

impl Shortcut {
    /// Maps a key press, case-insensitively. Unbound keys give `None`.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'r' => Some(Self::Rain),
            's' => Some(Self::Snow),
            'l' => Some(Self::Leaves),
            'f' => Some(Self::Fireflies),
            'c' => Some(Self::Clear),
            _ => None,
        }
    }

    /// Applies the shortcut and returns the notification to show.
    pub fn apply(self, engine: &mut ParticleEngine) -> &'static str {
        match self {
            Self::Rain => {
                engine.start_effect(EffectKind::Rain, 30);
                "Rain activated"
            }
            Self::Snow => {
                engine.start_effect(EffectKind::Snow, 25);
                "Snow activated"
            }
            Self::Leaves => {
                engine.start_effect(EffectKind::Leaves, 20);
                "Autumn leaves activated"
            }
            Self::Fireflies => {
                engine.start_effect(EffectKind::Fireflies, 15);
                "Fireflies activated"
            }
            Self::Clear => {
                for kind in WEATHER_KINDS {
                    engine.stop_effect(kind);
                }
                "Effects cleared"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybreak_effects::EngineConfig;

    fn engine() -> ParticleEngine {
        ParticleEngine::new(EngineConfig::seeded(1), 640.0, 480.0)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Shortcut::from_key('R'), Some(Shortcut::Rain));
        assert_eq!(Shortcut::from_key('l'), Some(Shortcut::Leaves));
        assert_eq!(Shortcut::from_key('h'), None);
        assert_eq!(Shortcut::from_key('x'), None);
    }

    #[test]
    fn test_intensities() {
        let mut e = engine();
        Shortcut::Rain.apply(&mut e);
        Shortcut::Snow.apply(&mut e);
        Shortcut::Leaves.apply(&mut e);
        Shortcut::Fireflies.apply(&mut e);
        assert_eq!(e.count_of(EffectKind::Rain), 30);
        assert_eq!(e.count_of(EffectKind::Snow), 25);
        assert_eq!(e.count_of(EffectKind::Leaves), 20);
        assert_eq!(e.count_of(EffectKind::Fireflies), 15);
    }

    #[test]
    fn test_clear_leaves_dust_and_fog_alone() {
        let mut e = engine();
        e.start_effect(EffectKind::Dust, 4);
        e.start_effect(EffectKind::Fog, 2);
        Shortcut::Rain.apply(&mut e);

        assert_eq!(Shortcut::Clear.apply(&mut e), "Effects cleared");
        assert_eq!(e.count_of(EffectKind::Rain), 0);
        assert_eq!(e.len(), 6);
        assert!(e.effects().is_active(EffectKind::Dust));
        assert!(e.effects().is_active(EffectKind::Fog));
    }
}
