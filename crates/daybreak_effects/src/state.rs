//! Per-kind active flags owned by one engine.

use std::fmt;

use crate::kind::EffectKind;

/// Which effects are currently spawning. All inactive at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectState {
    active: [bool; EffectKind::COUNT],
}

impl EffectState {
    /// Creates a state with every effect inactive.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: [false; EffectKind::COUNT],
        }
    }

    /// Is this kind active?
    #[inline]
    #[must_use]
    pub const fn is_active(&self, kind: EffectKind) -> bool {
        self.active[kind.index()]
    }

    /// Sets the flag for one kind.
    #[inline]
    pub fn set(&mut self, kind: EffectKind, active: bool) {
        self.active[kind.index()] = active;
    }

    /// Active kinds in `EffectKind::ALL` order.
    pub fn active_kinds(&self) -> impl Iterator<Item = EffectKind> + '_ {
        EffectKind::ALL
            .into_iter()
            .filter(move |kind| self.is_active(*kind))
    }

    /// Is anything active?
    #[must_use]
    pub fn any_active(&self) -> bool {
        self.active.iter().any(|a| *a)
    }
}

/// `"rain, fog"`, or `"None"` when nothing is active.
impl fmt::Display for EffectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.any_active() {
            return f.write_str("None");
        }
        for (i, kind) in self.active_kinds().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(kind.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_all_inactive() {
        let state = EffectState::new();
        assert!(!state.any_active());
        assert!(EffectKind::ALL.iter().all(|k| !state.is_active(*k)));
        assert_eq!(state, EffectState::default());
    }

    #[test]
    fn test_display_lists_active_in_order() {
        let mut state = EffectState::new();
        assert_eq!(state.to_string(), "None");

        state.set(EffectKind::Fog, true);
        state.set(EffectKind::Rain, true);
        assert_eq!(state.to_string(), "rain, fog");

        state.set(EffectKind::Rain, false);
        assert_eq!(state.active_kinds().collect::<Vec<_>>(), vec![EffectKind::Fog]);
    }
}
