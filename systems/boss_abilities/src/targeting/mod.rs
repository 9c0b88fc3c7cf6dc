//! Targeting algorithms that turn one cast into staggered pending effects.
//!
//! Every algorithm receives the same [`CastContext`]: read-only collaborator
//! views, the encounter's escalation counters, the scheduler's random source,
//! and an effect buffer. Algorithms only push effects; the dispatcher decides
//! cues and queues the buffer.

mod clusters;
mod escalating;
mod lines;
mod radial;
mod scatter;
mod sweeps;

use std::time::Duration;

use rand::{seq::SliceRandom, Rng};
use rand_chacha::ChaCha8Rng;
use wildfire_core::{ApproachLine, BoardView, FireOutlook, FireStrength, HexCoord};

use crate::{
    ability::StrengthPick,
    deferred::{EffectKind, PendingEffect},
    escalation::EscalationCounters,
};

pub(crate) use clusters::{cluster_ring, meteor_shower};
pub(crate) use escalating::{accelerating_scatter, serpentine, sustained_barrage, triple_strike};
pub(crate) use lines::{cross_strike, line_strike, path_follow, zig_zag};
pub(crate) use radial::{edge_burn, ring_collapse, ring_sweep, spiral};
pub(crate) use scatter::{item_strike, scatter, stoke};
pub(crate) use sweeps::{lattice_strike, row_sweep};

/// Which tiles an algorithm may aim at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TargetFilter {
    pub(crate) include_core: bool,
    pub(crate) include_structures: bool,
}

impl TargetFilter {
    /// Excludes the core area and indestructible fixed structures.
    pub(crate) const STANDARD: TargetFilter = TargetFilter {
        include_core: false,
        include_structures: false,
    };
}

/// Effects and sustain window produced by one targeting algorithm.
#[derive(Debug, Default)]
pub(crate) struct CastOutcome {
    pub(crate) effects: Vec<PendingEffect>,
    pub(crate) sustained_for: Option<Duration>,
}

/// Encounter-scoped state handed to every targeting algorithm.
pub(crate) struct CastContext<'a> {
    board: &'a BoardView,
    fire: &'a FireOutlook,
    approach_lines: &'a [ApproachLine],
    pub(crate) escalation: &'a mut EscalationCounters,
    pub(crate) rng: &'a mut ChaCha8Rng,
    base_delay: Duration,
    outcome: CastOutcome,
}

impl<'a> CastContext<'a> {
    pub(crate) fn new(
        board: &'a BoardView,
        fire: &'a FireOutlook,
        approach_lines: &'a [ApproachLine],
        escalation: &'a mut EscalationCounters,
        rng: &'a mut ChaCha8Rng,
        base_delay: Duration,
    ) -> Self {
        Self {
            board,
            fire,
            approach_lines,
            escalation,
            rng,
            base_delay,
            outcome: CastOutcome::default(),
        }
    }

    pub(crate) fn board(&self) -> &'a BoardView {
        self.board
    }

    pub(crate) fn fire(&self) -> &'a FireOutlook {
        self.fire
    }

    pub(crate) fn approach_lines(&self) -> &'a [ApproachLine] {
        self.approach_lines
    }

    /// Reports whether `hex` is a valid target under `filter`.
    pub(crate) fn is_target_with(&self, hex: HexCoord, filter: TargetFilter) -> bool {
        self.board.tile(hex).map_or(false, |tile| {
            (filter.include_core || !tile.core) && (filter.include_structures || !tile.structure)
        })
    }

    /// Reports whether `hex` is a valid target under [`TargetFilter::STANDARD`].
    pub(crate) fn is_target(&self, hex: HexCoord) -> bool {
        self.is_target_with(hex, TargetFilter::STANDARD)
    }

    /// Valid targets under `filter` in row-major order.
    pub(crate) fn targets_with(&self, filter: TargetFilter) -> Vec<HexCoord> {
        self.board
            .positions()
            .filter(|hex| self.is_target_with(*hex, filter))
            .collect()
    }

    /// Valid targets under [`TargetFilter::STANDARD`] in row-major order.
    pub(crate) fn targets(&self) -> Vec<HexCoord> {
        self.targets_with(TargetFilter::STANDARD)
    }

    /// Distance from the origin to the farthest tile on the board.
    pub(crate) fn board_radius(&self) -> u32 {
        self.board.positions().map(HexCoord::length).max().unwrap_or(0)
    }

    /// Picks a strength; `None` defers to the recommendation at impact time.
    pub(crate) fn strength(&mut self, pick: StrengthPick) -> Option<FireStrength> {
        match pick {
            StrengthPick::Strongest => Some(self.fire.strongest()),
            StrengthPick::Weakest => Some(self.fire.weakest()),
            StrengthPick::Recommended => None,
            StrengthPick::Random => Some(
                self.fire
                    .ranked()
                    .choose(&mut *self.rng)
                    .copied()
                    .unwrap_or_else(|| self.fire.recommended()),
            ),
        }
    }

    /// Strength for the `rank`-th ring, cluster layer or wave, strongest first.
    ///
    /// Only the three strongest tiers are used; waves offering fewer tiers
    /// collapse onto the weakest available one.
    pub(crate) fn ranked_strength(&self, rank: usize) -> FireStrength {
        self.fire.tier(rank.min(2))
    }

    /// Uniform delay in `[min_ms, max_ms)`, or `min_ms` for an empty range.
    pub(crate) fn random_delay(&mut self, min_ms: u64, max_ms: u64) -> Duration {
        if max_ms <= min_ms {
            return Duration::from_millis(min_ms);
        }
        Duration::from_millis(self.rng.gen_range(min_ms..max_ms))
    }

    /// Uniform index in `0..len`; zero for an empty range.
    pub(crate) fn random_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Picks up to `count` distinct hexes from `candidates`.
    pub(crate) fn choose(&mut self, candidates: &[HexCoord], count: u32) -> Vec<HexCoord> {
        let amount = usize::try_from(count).unwrap_or(usize::MAX);
        candidates
            .choose_multiple(&mut *self.rng, amount)
            .copied()
            .collect()
    }

    /// Schedules a forced ignition `delay` after the cast's base delay.
    pub(crate) fn ignite(&mut self, hex: HexCoord, delay: Duration, strength: Option<FireStrength>) {
        self.outcome.effects.push(PendingEffect {
            hex,
            remaining: self.base_delay + delay,
            kind: EffectKind::Ignite { strength },
            intent: None,
        });
    }

    /// Schedules an in-place upgrade `delay` after the cast's base delay.
    pub(crate) fn stoke(&mut self, hex: HexCoord, delay: Duration, cap: FireStrength) {
        self.outcome.effects.push(PendingEffect {
            hex,
            remaining: self.base_delay + delay,
            kind: EffectKind::Stoke { cap },
            intent: None,
        });
    }

    /// Blocks the ability's timer from resetting for `window`.
    pub(crate) fn sustain_for(&mut self, window: Duration) {
        self.outcome.sustained_for = Some(window);
    }

    pub(crate) fn finish(self) -> CastOutcome {
        self.outcome
    }
}

/// Ignites up to `count` distinct hexes from `candidates` with random delays.
pub(crate) fn strike_random(
    ctx: &mut CastContext<'_>,
    candidates: &[HexCoord],
    count: u32,
    delay: (u64, u64),
    offset: Duration,
    pick: StrengthPick,
) {
    let (min_ms, max_ms) = delay;
    for hex in ctx.choose(candidates, count) {
        let delay = offset + ctx.random_delay(min_ms, max_ms);
        let strength = ctx.strength(pick);
        ctx.ignite(hex, delay, strength);
    }
}

/// Milliseconds as a [`Duration`], multiplied by a step index.
pub(crate) fn stagger(step_ms: u64, index: usize) -> Duration {
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    Duration::from_millis(step_ms.saturating_mul(index))
}
