//! Routes ability definitions to their targeting algorithm and attaches cues.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};
use wildfire_core::{ApproachLine, BoardView, FireOutlook, Notification, SoundMode};

use crate::{
    ability::{AbilityDefinition, AbilityParams, AbilityVariant, NotificationMode, VolleyParams},
    deferred::{DeferredQueue, NotificationIntent, PendingEffect},
    escalation::EscalationCounters,
    patterns::BossPattern,
    targeting::{self, stagger, CastContext, CastOutcome},
    EncounterView,
};

/// Abilities drawn from the pool on every volley.
const VOLLEY_SIZE: usize = 2;

/// Summary of one dispatched cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CastReport {
    /// Effects pushed into the deferred queue.
    pub(crate) effects: usize,
    /// Time until the last effect lands or the sustain window closes.
    pub(crate) duration: Duration,
    /// Window during which the ability's timer must not reset.
    pub(crate) sustained_for: Option<Duration>,
}

/// Borrowed encounter context used to cast abilities of one pattern.
pub(crate) struct Caster<'a> {
    board: &'a BoardView,
    fire: &'a FireOutlook,
    approach_lines: &'a [ApproachLine],
    pattern: &'a BossPattern,
    escalation: &'a mut EscalationCounters,
    rng: &'a mut ChaCha8Rng,
}

impl<'a> Caster<'a> {
    pub(crate) fn new(
        view: &EncounterView<'a>,
        pattern: &'a BossPattern,
        escalation: &'a mut EscalationCounters,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        Self {
            board: view.board,
            fire: view.fire,
            approach_lines: view.approach_lines,
            pattern,
            escalation,
            rng,
        }
    }

    /// Runs the targeting algorithm of `definition`, queues its effects and
    /// emits or schedules its cues.
    pub(crate) fn cast(
        &mut self,
        definition: &AbilityDefinition,
        queue: &mut DeferredQueue,
        notifications: &mut Vec<Notification>,
    ) -> CastReport {
        let report = match definition.params() {
            AbilityParams::Volley(volley) => self.volley(definition, volley, queue, notifications),
            _ => {
                let outcome = self.run(definition, Duration::ZERO);
                let sustained_for = outcome.sustained_for;
                let (effects, duration) = settle(definition, outcome, queue, notifications);
                CastReport {
                    effects,
                    duration,
                    sustained_for: sustained_for.filter(|_| effects > 0),
                }
            }
        };

        debug!(
            ability = definition.name(),
            variant = definition.variant().key(),
            effects = report.effects,
            duration = ?report.duration,
            "ability cast"
        );
        report
    }

    /// Casts two random members of the volley pool, the second one staggered.
    ///
    /// The volley itself carries no cue; each member keeps its own.
    fn volley(
        &mut self,
        definition: &AbilityDefinition,
        volley: &VolleyParams,
        queue: &mut DeferredQueue,
        notifications: &mut Vec<Notification>,
    ) -> CastReport {
        let pattern = self.pattern;
        let pool: Vec<&AbilityDefinition> = volley
            .pool
            .iter()
            .filter_map(|member| match pattern.find(member) {
                Some(found) if found.variant() == AbilityVariant::Volley => {
                    warn!(
                        volley = definition.name(),
                        member = member.as_str(),
                        "nested volley skipped"
                    );
                    None
                }
                Some(found) => Some(found),
                None => {
                    warn!(
                        volley = definition.name(),
                        member = member.as_str(),
                        "volley member missing from pattern"
                    );
                    None
                }
            })
            .collect();
        let picks: Vec<&AbilityDefinition> = pool
            .choose_multiple(&mut *self.rng, VOLLEY_SIZE)
            .copied()
            .collect();

        let mut report = CastReport::default();
        for (index, member) in picks.into_iter().enumerate() {
            let outcome = self.run(member, stagger(volley.stagger_ms, index));
            let (effects, duration) = settle(member, outcome, queue, notifications);
            report.effects += effects;
            report.duration = report.duration.max(duration);
            debug!(volley = definition.name(), member = member.name(), effects, "volley member cast");
        }
        report
    }

    fn run(&mut self, definition: &AbilityDefinition, base_delay: Duration) -> CastOutcome {
        let mut ctx = CastContext::new(
            self.board,
            self.fire,
            self.approach_lines,
            &mut *self.escalation,
            &mut *self.rng,
            base_delay,
        );
        match definition.params() {
            AbilityParams::Scatter(params) => targeting::scatter(params, &mut ctx),
            AbilityParams::RingSweep(params) => targeting::ring_sweep(params, &mut ctx),
            AbilityParams::RingCollapse(params) => targeting::ring_collapse(params, &mut ctx),
            AbilityParams::LineStrike(params) => targeting::line_strike(params, &mut ctx),
            AbilityParams::CrossStrike(params) => targeting::cross_strike(params, &mut ctx),
            AbilityParams::ZigZag(params) => targeting::zig_zag(params, &mut ctx),
            AbilityParams::MeteorShower(params) => targeting::meteor_shower(params, &mut ctx),
            AbilityParams::PathFollow(params) => targeting::path_follow(params, &mut ctx),
            AbilityParams::ItemStrike(params) => targeting::item_strike(params, &mut ctx),
            AbilityParams::ClusterRing(params) => targeting::cluster_ring(params, &mut ctx),
            AbilityParams::Serpentine(params) => targeting::serpentine(params, &mut ctx),
            AbilityParams::RowSweep(params) => targeting::row_sweep(params, &mut ctx),
            AbilityParams::LatticeStrike(params) => targeting::lattice_strike(params, &mut ctx),
            AbilityParams::SustainedBarrage(params) => {
                targeting::sustained_barrage(params, &mut ctx)
            }
            AbilityParams::AcceleratingScatter(params) => {
                targeting::accelerating_scatter(params, &mut ctx)
            }
            AbilityParams::TripleStrike(params) => targeting::triple_strike(params, &mut ctx),
            AbilityParams::Stoke(params) => targeting::stoke(params, &mut ctx),
            AbilityParams::EdgeBurn(params) => targeting::edge_burn(params, &mut ctx),
            AbilityParams::Spiral(params) => targeting::spiral(params, &mut ctx),
            AbilityParams::Volley(_) => {
                warn!(ability = definition.name(), "nested volley skipped");
            }
            AbilityParams::Unrecognized => {
                warn!(
                    ability = definition.name(),
                    "unrecognized ability variant; cast skipped"
                );
            }
        }
        ctx.finish()
    }
}

/// Attaches the cues of `definition` and queues the effects.
///
/// Returns the number of queued effects and the cast duration. Casts that
/// produced nothing stay silent, last zero time and hold no timer.
fn settle(
    definition: &AbilityDefinition,
    outcome: CastOutcome,
    queue: &mut DeferredQueue,
    notifications: &mut Vec<Notification>,
) -> (usize, Duration) {
    let CastOutcome {
        mut effects,
        sustained_for,
    } = outcome;
    if effects.is_empty() {
        return (0, Duration::ZERO);
    }

    let last_impact = effects
        .iter()
        .map(|effect| effect.remaining)
        .max()
        .unwrap_or_default();
    let duration = last_impact.max(sustained_for.unwrap_or_default());
    let key = definition.sound_key();

    match definition.notification() {
        NotificationMode::Once => {
            notifications.push(Notification::Sound {
                key: key.to_owned(),
                mode: SoundMode::OneShot,
            });
            if definition.shake() {
                notifications.push(Notification::ScreenShake { sustained: None });
            }
        }
        NotificationMode::Looping => {
            notifications.push(Notification::Sound {
                key: key.to_owned(),
                mode: SoundMode::Looping { duration },
            });
            if definition.shake() {
                notifications.push(Notification::ScreenShake {
                    sustained: Some(duration),
                });
            }
        }
        NotificationMode::PerSubEffect => {
            for effect in &mut effects {
                effect.intent = Some(intent(definition));
            }
        }
        NotificationMode::OnFirstImpact => {
            if let Some(first) = first_impact(&mut effects) {
                first.intent = Some(intent(definition));
            }
        }
    }

    let count = effects.len();
    queue.extend(effects);
    (count, duration)
}

fn intent(definition: &AbilityDefinition) -> NotificationIntent {
    let key = definition.sound_key().to_owned();
    if definition.shake() {
        NotificationIntent::SoundWithShake { key }
    } else {
        NotificationIntent::Sound { key }
    }
}

/// Earliest effect to land; ties go to the first scheduled.
fn first_impact(effects: &mut [PendingEffect]) -> Option<&mut PendingEffect> {
    let earliest = effects.iter().map(|effect| effect.remaining).min()?;
    effects
        .iter_mut()
        .find(|effect| effect.remaining == earliest)
}
