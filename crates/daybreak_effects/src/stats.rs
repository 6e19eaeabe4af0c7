//! Per-frame engine statistics.

use crate::kind::EffectKind;

/// Statistics from the particle engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleStats {
    /// Frames advanced so far.
    pub frame: u64,
    /// Currently alive particles.
    pub alive_count: u32,
    /// Particles spawned by the last `advance` (start-effect seeding excluded).
    pub spawned_this_frame: u32,
    /// Particles culled by the last `advance` (off-screen or expired).
    pub culled_this_frame: u32,
    /// Alive particles per kind, indexed by `EffectKind::index`.
    pub per_kind: [u32; EffectKind::COUNT],
}

impl ParticleStats {
    /// Alive particles of one kind.
    #[inline]
    #[must_use]
    pub const fn count_of(&self, kind: EffectKind) -> u32 {
        self.per_kind[kind.index()]
    }
}
