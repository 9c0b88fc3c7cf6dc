//! Interval timers for the abilities of the active boss pattern.

use std::time::Duration;

use tracing::debug;
use wildfire_core::{Notification, WaveStatus};

use crate::{
    ability::{AbilityDefinition, AbilityParams},
    casting::CastingState,
    escalation::EscalationCounters,
    patterns::BossPattern,
};

/// How long before its cast an ability starts the casting wind-up.
pub const PRE_CUE: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq, Eq)]
struct AbilityTimer {
    ability: usize,
    name: String,
    interval: Duration,
    elapsed: Duration,
    cued: bool,
    active_until: Option<Duration>,
}

impl AbilityTimer {
    fn until_cast(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }
}

/// Timer that reached its interval during the current step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DueCast {
    pub(crate) timer: usize,
    pub(crate) ability: usize,
    pub(crate) cued: bool,
}

/// One countdown per interval-bearing ability of the encounter's pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TimerRegistry {
    timers: Vec<AbilityTimer>,
}

impl TimerRegistry {
    /// Creates a zeroed timer for every ability that has an interval.
    ///
    /// Accelerating abilities start from the first entry of their schedule.
    pub(crate) fn rebuild(pattern: &BossPattern) -> Self {
        let timers = pattern
            .abilities()
            .iter()
            .enumerate()
            .filter_map(|(ability, definition)| {
                let nominal = definition.interval()?;
                let interval = match definition.params() {
                    AbilityParams::AcceleratingScatter(params) => {
                        params.interval_after(0).unwrap_or(nominal)
                    }
                    _ => nominal,
                };
                Some(AbilityTimer {
                    ability,
                    name: definition.name().to_owned(),
                    interval,
                    elapsed: Duration::ZERO,
                    cued: false,
                    active_until: None,
                })
            })
            .collect();
        Self { timers }
    }

    /// Accrues `dt` on every timer and reports the ones that came due.
    ///
    /// `clock` is the encounter time after this step. Timers held by a
    /// sustain window neither accrue nor come due until the window closes,
    /// then restart from zero. An ability about to fire within
    /// [`PRE_CUE`] starts the casting wind-up if casting is idle and the wave
    /// will still be running when it fires.
    pub(crate) fn advance(
        &mut self,
        dt: Duration,
        clock: Duration,
        wave: &WaveStatus,
        casting: &mut CastingState,
        notifications: &mut Vec<Notification>,
        due: &mut Vec<DueCast>,
    ) {
        if !wave.active {
            return;
        }

        for (index, timer) in self.timers.iter_mut().enumerate() {
            if let Some(until) = timer.active_until {
                if clock < until {
                    continue;
                }
                timer.active_until = None;
                timer.elapsed = Duration::ZERO;
            }

            timer.elapsed += dt;
            let until_cast = timer.until_cast();
            let cue_window = !until_cast.is_zero() && until_cast <= PRE_CUE;
            if !timer.cued
                && cue_window
                && until_cast < wave.time_remaining
                && casting.begin(&timer.name)
            {
                timer.cued = true;
                notifications.push(Notification::AbilityBanner {
                    name: timer.name.clone(),
                });
                debug!(ability = %timer.name, ?until_cast, "casting wind-up started");
            }

            if timer.elapsed >= timer.interval {
                due.push(DueCast {
                    timer: index,
                    ability: timer.ability,
                    cued: timer.cued,
                });
            }
        }
    }

    /// Applies the reset policy of `definition` after its timer fired.
    ///
    /// Sustained casts hold the timer until `clock + sustained_for`;
    /// accelerating casts move to the next interval of their schedule.
    pub(crate) fn complete(
        &mut self,
        timer: usize,
        definition: &AbilityDefinition,
        escalation: &EscalationCounters,
        clock: Duration,
        sustained_for: Option<Duration>,
    ) {
        let Some(timer) = self.timers.get_mut(timer) else {
            return;
        };

        timer.cued = false;
        match sustained_for.filter(|window| !window.is_zero()) {
            Some(window) => timer.active_until = Some(clock + window),
            None => timer.elapsed = Duration::ZERO,
        }
        if let AbilityParams::AcceleratingScatter(params) = definition.params() {
            if let Some(next) = params.interval_after(escalation.activations(definition.variant()))
            {
                timer.interval = next;
            }
        }
    }

    /// Time left before the named ability fires, including any sustain hold.
    pub(crate) fn time_until_cast(&self, name: &str, clock: Duration) -> Option<Duration> {
        let timer = self.timers.iter().find(|timer| timer.name == name)?;
        Some(match timer.active_until {
            Some(until) => until.saturating_sub(clock) + timer.interval,
            None => timer.until_cast(),
        })
    }
}
