#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Encounter ability scheduler for Wildfire boss waves.
//!
//! During a designated boss slot the scheduler loads the wave group's
//! [`BossPattern`], counts down one timer per interval-bearing ability, casts
//! abilities when their timers fire or when a queued external trigger is
//! flushed, and stages every cast as deferred ignitions that land over the
//! following seconds. It reads immutable views through [`EncounterView`] and
//! answers with [`Command`] values for the world plus one-way
//! [`Notification`] cues for the presentation layers.

mod ability;
mod casting;
mod deferred;
mod dispatch;
mod escalation;
mod lifecycle;
mod patterns;
mod targeting;
mod timers;
mod triggers;

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use wildfire_core::{
    ApproachLine, BoardView, Command, FireOutlook, Notification, WaveStatus,
};

pub use ability::{
    AbilityDefinition, AbilityParams, AbilityVariant, AcceleratingScatterParams,
    ClusterRingParams, CrossStrikeParams, EdgeBurnParams, ItemStrikeParams,
    LatticeStrikeParams, LineStrikeParams, MeteorShowerParams, NotificationMode,
    PathFollowParams, RingCollapseParams, RingSweepParams, RowSweepParams, ScatterParams,
    SerpentineParams, SpiralParams, StokeParams, StrengthPick, SustainedBarrageParams,
    TripleStrikeParams, VolleyParams, ZigZagParams,
};
pub use casting::{CastingPhase, CastingState, ACTIVE_DURATION, ENTER_DURATION, EXIT_DURATION};
pub use deferred::{DeferredQueue, EffectKind, NotificationIntent, PendingEffect};
pub use escalation::EscalationCounters;
pub use patterns::{BossPattern, PatternBook, PatternError, FALLBACK_GROUP};
pub use timers::PRE_CUE;

use dispatch::Caster;
use lifecycle::{Lifecycle, Transition};
use timers::{DueCast, TimerRegistry};
use triggers::TriggerQueue;

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Debug)]
pub struct Config {
    patterns: PatternBook,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from a pattern book and a random seed.
    #[must_use]
    pub fn new(patterns: PatternBook, rng_seed: u64) -> Self {
        Self { patterns, rng_seed }
    }
}

/// Read-only collaborator views consulted during one step.
#[derive(Clone, Copy, Debug)]
pub struct EncounterView<'a> {
    /// Every tile of the board in row-major order.
    pub board: &'a BoardView,
    /// State of the wave controller.
    pub wave: &'a WaveStatus,
    /// Fire strengths available this wave.
    pub fire: &'a FireOutlook,
    /// Enemy approach lines.
    pub approach_lines: &'a [ApproachLine],
}

impl<'a> EncounterView<'a> {
    /// Bundles the provided views.
    #[must_use]
    pub const fn new(
        board: &'a BoardView,
        wave: &'a WaveStatus,
        fire: &'a FireOutlook,
        approach_lines: &'a [ApproachLine],
    ) -> Self {
        Self {
            board,
            wave,
            fire,
            approach_lines,
        }
    }
}

/// State that lives exactly as long as one boss encounter.
#[derive(Debug)]
struct Encounter {
    pattern: BossPattern,
    timers: TimerRegistry,
    escalation: EscalationCounters,
    clock: Duration,
}

impl Encounter {
    fn new(pattern: BossPattern) -> Self {
        Self {
            timers: TimerRegistry::rebuild(&pattern),
            pattern,
            escalation: EscalationCounters::default(),
            clock: Duration::ZERO,
        }
    }
}

/// Pure system that schedules and casts boss abilities.
#[derive(Debug)]
pub struct BossAbilities {
    patterns: PatternBook,
    rng: ChaCha8Rng,
    lifecycle: Lifecycle,
    encounter: Option<Encounter>,
    casting: CastingState,
    deferred: DeferredQueue,
    triggers: TriggerQueue,
    due: Vec<DueCast>,
}

impl BossAbilities {
    /// Creates a new scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            patterns: config.patterns,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            lifecycle: Lifecycle::default(),
            encounter: None,
            casting: CastingState::default(),
            deferred: DeferredQueue::default(),
            triggers: TriggerQueue::default(),
            due: Vec::new(),
        }
    }

    /// Advances the scheduler by one coarse step.
    ///
    /// Deferred effects are drained first so that effects already in flight
    /// still land when the encounter ends during this step. The boss slot is
    /// then observed, and finally the ability timers of a running encounter
    /// accrue `dt` and cast whatever came due.
    pub fn tick(
        &mut self,
        dt: Duration,
        view: &EncounterView<'_>,
        commands: &mut Vec<Command>,
        notifications: &mut Vec<Notification>,
    ) {
        self.deferred
            .drain(dt, view.fire.recommended(), commands, notifications);

        match self.lifecycle.observe(view.wave) {
            Transition::Unchanged => {}
            Transition::Started => self.start_encounter(view.wave, false),
            Transition::Restarted => self.start_encounter(view.wave, true),
            Transition::Ended => self.end_encounter(),
        }

        self.run_timers(dt, view, notifications);
    }

    /// Advances the casting animation by one frame.
    pub fn animate(&mut self, dt: Duration) {
        self.casting.advance(dt);
    }

    /// Runs [`BossAbilities::tick`] followed by [`BossAbilities::animate`].
    pub fn update(
        &mut self,
        dt: Duration,
        view: &EncounterView<'_>,
        commands: &mut Vec<Command>,
        notifications: &mut Vec<Notification>,
    ) {
        self.tick(dt, view, commands, notifications);
        self.animate(dt);
    }

    /// Queues an external trigger until the next [`BossAbilities::flush_triggers`].
    pub fn on_external_trigger(&mut self, event: &str) {
        self.triggers.enqueue(event);
        debug!(event, queued = self.triggers.len(), "trigger queued");
    }

    /// Casts every ability of the active pattern bound to each queued
    /// trigger, in the order the triggers were raised.
    ///
    /// Trigger casts bypass the timers and force the casting wind-up. Effects
    /// scheduled without delay land immediately. Triggers flushed outside a
    /// boss encounter are discarded.
    pub fn flush_triggers(
        &mut self,
        view: &EncounterView<'_>,
        commands: &mut Vec<Command>,
        notifications: &mut Vec<Notification>,
    ) {
        while let Some(event) = self.triggers.pop() {
            let Some(encounter) = self.encounter.as_mut() else {
                debug!(event = event.as_str(), "trigger discarded outside a boss encounter");
                continue;
            };

            let mut matched = 0_usize;
            for definition in encounter
                .pattern
                .abilities()
                .iter()
                .filter(|definition| definition.trigger() == Some(event.as_str()))
            {
                matched += 1;
                self.casting.force_begin(definition.name());
                notifications.push(Notification::AbilityBanner {
                    name: definition.name().to_owned(),
                });
                let report = Caster::new(
                    view,
                    &encounter.pattern,
                    &mut encounter.escalation,
                    &mut self.rng,
                )
                .cast(definition, &mut self.deferred, notifications);
                self.casting
                    .set_active_duration(definition.name(), report.duration);
            }
            debug!(event = event.as_str(), matched, "trigger flushed");
        }

        self.deferred
            .drain(Duration::ZERO, view.fire.recommended(), commands, notifications);
    }

    /// Reports whether a boss encounter with a pattern is running.
    #[must_use]
    pub fn is_encounter_active(&self) -> bool {
        self.encounter.is_some()
    }

    /// Name of the ability occupying the casting animation, if any.
    #[must_use]
    pub fn current_casting_ability(&self) -> Option<&str> {
        self.casting.ability()
    }

    /// Casting animation state.
    #[must_use]
    pub fn casting(&self) -> &CastingState {
        &self.casting
    }

    /// Effects waiting to land, in scheduling order.
    #[must_use]
    pub fn pending_effects(&self) -> &[PendingEffect] {
        self.deferred.pending()
    }

    /// Escalation counters of the running encounter.
    #[must_use]
    pub fn escalation(&self) -> Option<&EscalationCounters> {
        self.encounter.as_ref().map(|encounter| &encounter.escalation)
    }

    /// Pattern driving the running encounter.
    #[must_use]
    pub fn active_pattern(&self) -> Option<&BossPattern> {
        self.encounter.as_ref().map(|encounter| &encounter.pattern)
    }

    /// Number of triggers waiting for a flush.
    #[must_use]
    pub fn queued_triggers(&self) -> usize {
        self.triggers.len()
    }

    /// Time left before the named timer ability fires in the running encounter.
    #[must_use]
    pub fn time_until_cast(&self, name: &str) -> Option<Duration> {
        let encounter = self.encounter.as_ref()?;
        encounter.timers.time_until_cast(name, encounter.clock)
    }

    fn start_encounter(&mut self, wave: &WaveStatus, restarted: bool) {
        self.deferred.clear();
        self.encounter = match self.patterns.resolve(wave.group) {
            Some(pattern) => {
                info!(
                    group = wave.group,
                    wave = wave.number,
                    pattern = pattern.group(),
                    abilities = pattern.abilities().len(),
                    restarted,
                    "boss encounter started"
                );
                Some(Encounter::new(pattern.clone()))
            }
            None => {
                warn!(
                    group = wave.group,
                    wave = wave.number,
                    "no boss pattern for wave group; scheduler disabled for this encounter"
                );
                None
            }
        };
    }

    fn end_encounter(&mut self) {
        if let Some(encounter) = self.encounter.take() {
            info!(
                pattern = encounter.pattern.group(),
                elapsed = ?encounter.clock,
                in_flight = self.deferred.len(),
                "boss encounter ended"
            );
        }
    }

    fn run_timers(
        &mut self,
        dt: Duration,
        view: &EncounterView<'_>,
        notifications: &mut Vec<Notification>,
    ) {
        let Some(encounter) = self.encounter.as_mut() else {
            return;
        };
        if !view.wave.active {
            return;
        }

        encounter.clock += dt;
        self.due.clear();
        encounter.timers.advance(
            dt,
            encounter.clock,
            view.wave,
            &mut self.casting,
            notifications,
            &mut self.due,
        );

        for due in &self.due {
            let Some(definition) = encounter.pattern.abilities().get(due.ability) else {
                continue;
            };
            if !due.cued {
                notifications.push(Notification::AbilityBanner {
                    name: definition.name().to_owned(),
                });
                let _ = self.casting.begin(definition.name());
            }

            let report = Caster::new(
                view,
                &encounter.pattern,
                &mut encounter.escalation,
                &mut self.rng,
            )
            .cast(definition, &mut self.deferred, notifications);
            self.casting
                .set_active_duration(definition.name(), report.duration);
            encounter.timers.complete(
                due.timer,
                definition,
                &encounter.escalation,
                encounter.clock,
                report.sustained_for,
            );
        }
    }
}
