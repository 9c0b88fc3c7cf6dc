//! Detection of boss-slot transitions between coarse steps.

use wildfire_core::WaveStatus;

/// Change in the boss encounter observed during one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Nothing changed.
    Unchanged,
    /// A boss slot began.
    Started,
    /// The boss slot ended.
    Ended,
    /// Still in a boss slot, but the wave group or number changed.
    Restarted,
}

/// Remembers which boss wave, if any, the previous step belonged to.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    current: Option<(u32, u32)>,
}

impl Lifecycle {
    pub(crate) fn observe(&mut self, wave: &WaveStatus) -> Transition {
        let observed = wave.boss_slot.then_some((wave.group, wave.number));
        let transition = match (self.current, observed) {
            (None, None) => Transition::Unchanged,
            (None, Some(_)) => Transition::Started,
            (Some(_), None) => Transition::Ended,
            (Some(previous), Some(next)) if previous == next => Transition::Unchanged,
            (Some(_), Some(_)) => Transition::Restarted,
        };
        self.current = observed;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(boss_slot: bool, group: u32, number: u32) -> WaveStatus {
        WaveStatus {
            boss_slot,
            group,
            number,
            ..WaveStatus::default()
        }
    }

    #[test]
    fn transitions_follow_boss_slot_changes() {
        let mut lifecycle = Lifecycle::default();
        assert_eq!(lifecycle.observe(&wave(false, 1, 4)), Transition::Unchanged);
        assert_eq!(lifecycle.observe(&wave(true, 1, 5)), Transition::Started);
        assert_eq!(lifecycle.observe(&wave(true, 1, 5)), Transition::Unchanged);
        assert_eq!(lifecycle.observe(&wave(true, 2, 5)), Transition::Restarted);
        assert_eq!(lifecycle.observe(&wave(true, 2, 6)), Transition::Restarted);
        assert_eq!(lifecycle.observe(&wave(false, 2, 6)), Transition::Ended);
        assert_eq!(lifecycle.observe(&wave(false, 2, 7)), Transition::Unchanged);
    }
}
