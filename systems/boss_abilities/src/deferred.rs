//! Deferred effect queue holding staggered ignitions and stokes.

use std::time::Duration;

use wildfire_core::{Command, FireStrength, HexCoord, Notification, SoundMode};

/// One scheduled ignition or upgrade waiting for its delay to run out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEffect {
    /// Tile the effect lands on.
    pub hex: HexCoord,
    /// Time left before the effect lands.
    pub remaining: Duration,
    /// What happens when the effect lands.
    pub kind: EffectKind,
    /// Cue resolved at the exact moment the effect lands.
    pub intent: Option<NotificationIntent>,
}

/// Mutation issued to the fire engine when a [`PendingEffect`] lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Forced ignition; without an explicit strength the fire engine's
    /// recommendation at landing time is used.
    Ignite {
        /// Explicit strength chosen at cast time.
        strength: Option<FireStrength>,
    },
    /// Upgrade of an already burning tile, capped at `cap`.
    Stoke {
        /// Strongest tier the upgrade may reach.
        cap: FireStrength,
    },
}

/// Notification resolved when a [`PendingEffect`] lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationIntent {
    /// Plays the sound once.
    Sound {
        /// Asset key of the sound.
        key: String,
    },
    /// Plays the sound once and jolts the screen.
    SoundWithShake {
        /// Asset key of the sound.
        key: String,
    },
}

impl NotificationIntent {
    fn resolve(self, notifications: &mut Vec<Notification>) {
        match self {
            Self::Sound { key } => notifications.push(Notification::Sound {
                key,
                mode: SoundMode::OneShot,
            }),
            Self::SoundWithShake { key } => {
                notifications.push(Notification::Sound {
                    key,
                    mode: SoundMode::OneShot,
                });
                notifications.push(Notification::ScreenShake { sustained: None });
            }
        }
    }
}

/// FIFO of pending effects counted down every coarse step.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<PendingEffect>,
    scratch: Vec<PendingEffect>,
}

impl DeferredQueue {
    /// Effects still waiting to land, in scheduling order.
    #[must_use]
    pub fn pending(&self) -> &[PendingEffect] {
        &self.pending
    }

    /// Number of effects still waiting to land.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Reports whether nothing is waiting to land.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub(crate) fn extend(&mut self, effects: impl IntoIterator<Item = PendingEffect>) {
        self.pending.extend(effects);
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    /// Counts every effect down by `dt` and lands the ones that reach zero.
    ///
    /// Landed effects emit their cue first, then a forced ignite or an upgrade
    /// command, in scheduling order.
    pub(crate) fn drain(
        &mut self,
        dt: Duration,
        recommended: FireStrength,
        commands: &mut Vec<Command>,
        notifications: &mut Vec<Notification>,
    ) {
        if self.pending.is_empty() {
            return;
        }

        self.scratch.clear();
        for mut effect in self.pending.drain(..) {
            effect.remaining = effect.remaining.saturating_sub(dt);
            if !effect.remaining.is_zero() {
                self.scratch.push(effect);
                continue;
            }

            if let Some(intent) = effect.intent {
                intent.resolve(notifications);
            }
            commands.push(match effect.kind {
                EffectKind::Ignite { strength } => Command::Ignite {
                    hex: effect.hex,
                    strength: strength.unwrap_or(recommended),
                    force: true,
                },
                EffectKind::Stoke { cap } => Command::UpgradeFire {
                    hex: effect.hex,
                    cap,
                },
            });
        }
        std::mem::swap(&mut self.pending, &mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignite(q: i32, delay_ms: u64) -> PendingEffect {
        PendingEffect {
            hex: HexCoord::new(q, 0),
            remaining: Duration::from_millis(delay_ms),
            kind: EffectKind::Ignite { strength: None },
            intent: None,
        }
    }

    #[test]
    fn effects_land_once_their_delay_runs_out() {
        let mut queue = DeferredQueue::default();
        queue.extend([ignite(1, 100), ignite(2, 250)]);
        let mut commands = Vec::new();
        let mut notifications = Vec::new();

        queue.drain(
            Duration::from_millis(100),
            FireStrength::Flame,
            &mut commands,
            &mut notifications,
        );

        assert_eq!(
            commands,
            vec![Command::Ignite {
                hex: HexCoord::new(1, 0),
                strength: FireStrength::Flame,
                force: true,
            }]
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pending()[0].remaining, Duration::from_millis(150));
    }

    #[test]
    fn remaining_delay_never_underflows() {
        let mut queue = DeferredQueue::default();
        queue.extend([ignite(1, 10)]);
        let mut commands = Vec::new();
        let mut notifications = Vec::new();

        queue.drain(
            Duration::from_secs(1),
            FireStrength::Flame,
            &mut commands,
            &mut notifications,
        );

        assert_eq!(commands.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn stokes_become_capped_upgrades_and_intents_resolve_first() {
        let mut queue = DeferredQueue::default();
        queue.extend([PendingEffect {
            hex: HexCoord::new(3, -1),
            remaining: Duration::ZERO,
            kind: EffectKind::Stoke {
                cap: FireStrength::Inferno,
            },
            intent: Some(NotificationIntent::SoundWithShake {
                key: "stoke".to_owned(),
            }),
        }]);
        let mut commands = Vec::new();
        let mut notifications = Vec::new();

        queue.drain(
            Duration::from_millis(50),
            FireStrength::Smoldering,
            &mut commands,
            &mut notifications,
        );

        assert_eq!(
            commands,
            vec![Command::UpgradeFire {
                hex: HexCoord::new(3, -1),
                cap: FireStrength::Inferno,
            }]
        );
        assert_eq!(
            notifications,
            vec![
                Notification::Sound {
                    key: "stoke".to_owned(),
                    mode: SoundMode::OneShot,
                },
                Notification::ScreenShake { sustained: None },
            ]
        );
    }

    #[test]
    fn explicit_strength_wins_over_recommendation() {
        let mut queue = DeferredQueue::default();
        queue.extend([PendingEffect {
            kind: EffectKind::Ignite {
                strength: Some(FireStrength::Firestorm),
            },
            ..ignite(4, 0)
        }]);
        let mut commands = Vec::new();
        let mut notifications = Vec::new();

        queue.drain(
            Duration::from_millis(1),
            FireStrength::Flame,
            &mut commands,
            &mut notifications,
        );

        assert_eq!(
            commands,
            vec![Command::Ignite {
                hex: HexCoord::new(4, 0),
                strength: FireStrength::Firestorm,
                force: true,
            }]
        );
    }
}
