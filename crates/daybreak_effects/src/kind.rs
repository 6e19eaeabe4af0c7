//! Effect kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EffectsError;

/// A particle visual/behavioral category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EffectKind {
    /// Fast thin streaks falling from the top edge.
    Rain = 0,
    /// Slow white flakes falling from the top edge.
    Snow = 1,
    /// Tumbling autumn-colored squares.
    Leaves = 2,
    /// Faint golden motes drifting down.
    Dust = 3,
    /// Glowing yellow points that flicker.
    Fireflies = 4,
    /// Large translucent puffs rising from the bottom edge and fading out.
    Fog = 5,
}

impl EffectKind {
    /// Number of kinds.
    pub const COUNT: usize = 6;

    /// Every kind, in the fixed spawn/display order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Rain,
        Self::Snow,
        Self::Leaves,
        Self::Dust,
        Self::Fireflies,
        Self::Fog,
    ];

    /// Lowercase name as used by input sources.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Leaves => "leaves",
            Self::Dust => "dust",
            Self::Fireflies => "fireflies",
            Self::Fog => "fog",
        }
    }

    /// Dense index into per-kind tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = EffectsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EffectsError::UnknownEffect(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for kind in EffectKind::ALL {
            assert_eq!(kind.name().parse::<EffectKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn test_parse_is_lenient_on_case_and_space() {
        assert_eq!(" Fireflies ".parse::<EffectKind>().ok(), Some(EffectKind::Fireflies));
        assert_eq!("FOG".parse::<EffectKind>().ok(), Some(EffectKind::Fog));
    }

    #[test]
    fn test_unknown_name() {
        let err = "hail".parse::<EffectKind>().unwrap_err();
        assert!(matches!(err, EffectsError::UnknownEffect(ref name) if name == "hail"));
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, kind) in EffectKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
