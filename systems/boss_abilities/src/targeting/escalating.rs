use std::{collections::BTreeSet, time::Duration};

use super::{stagger, strike_random, CastContext};
use crate::ability::{
    AbilityVariant, AcceleratingScatterParams, SerpentineParams, StrengthPick,
    SustainedBarrageParams, TripleStrikeParams,
};

/// Random walk over unvisited targets that grows longer every activation.
///
/// The whole path shares one strength and lands one step at a time. The walk
/// stops early when it paints itself into a corner.
pub(crate) fn serpentine(params: &SerpentineParams, ctx: &mut CastContext<'_>) {
    let activations = ctx.escalation.advance(AbilityVariant::Serpentine);
    let length = params
        .starting_length
        .saturating_add(activations.saturating_mul(params.increment));
    let length = usize::try_from(length).unwrap_or(usize::MAX);

    let targets = ctx.targets();
    let Some(start) = ctx.choose(&targets, 1).first().copied() else {
        return;
    };

    let mut path = vec![start];
    let mut visited = BTreeSet::from([start]);
    let mut head = start;
    while path.len() < length {
        let open: Vec<_> = head
            .neighbors()
            .into_iter()
            .filter(|hex| !visited.contains(hex) && ctx.is_target(*hex))
            .collect();
        if open.is_empty() {
            break;
        }
        head = open[ctx.random_index(open.len())];
        let _ = visited.insert(head);
        path.push(head);
    }

    let strength = ctx.strength(StrengthPick::Random);
    for (step, hex) in path.into_iter().enumerate() {
        ctx.ignite(hex, stagger(params.step_ms, step), strength);
    }
}

/// Strikes a few random hexes every tick of a window that grows in both
/// length and density with each activation.
pub(crate) fn sustained_barrage(params: &SustainedBarrageParams, ctx: &mut CastContext<'_>) {
    let activations = ctx.escalation.advance(AbilityVariant::SustainedBarrage);
    let ticks = params
        .base_ticks
        .saturating_add(activations.saturating_mul(params.tick_growth));
    let hexes = params
        .base_hexes
        .saturating_add(activations.saturating_mul(params.hex_growth));

    let targets = ctx.targets();
    for tick in 0..ticks {
        strike_random(
            ctx,
            &targets,
            hexes,
            (0, params.tick_interval_ms),
            stagger(params.tick_interval_ms, tick as usize),
            StrengthPick::Random,
        );
    }
    ctx.sustain_for(stagger(params.tick_interval_ms, ticks as usize));
}

/// Random scatter whose timer shortens after each activation.
pub(crate) fn accelerating_scatter(params: &AcceleratingScatterParams, ctx: &mut CastContext<'_>) {
    let _ = ctx.escalation.advance(AbilityVariant::AcceleratingScatter);
    let targets = ctx.targets();
    strike_random(
        ctx,
        &targets,
        params.count,
        (0, params.delay_max_ms),
        Duration::ZERO,
        StrengthPick::Random,
    );
}

/// Random scatter where every `cadence`-th activation is a heavy strike at
/// the strongest available fire.
pub(crate) fn triple_strike(params: &TripleStrikeParams, ctx: &mut CastContext<'_>) {
    let previous = ctx.escalation.advance(AbilityVariant::TripleStrike);
    let heavy = params.cadence > 0 && previous % params.cadence == params.cadence - 1;
    let (count, pick) = if heavy {
        (params.heavy_count, StrengthPick::Strongest)
    } else {
        (params.count, StrengthPick::Random)
    };

    let targets = ctx.targets();
    strike_random(
        ctx,
        &targets,
        count,
        (0, params.delay_max_ms),
        Duration::ZERO,
        pick,
    );
}

#[cfg(test)]
mod tests {
    use wildfire_core::{FireStrength, HexCoord};

    use super::*;
    use crate::{
        deferred::EffectKind,
        escalation::EscalationCounters,
        targeting::testing::{board, run},
    };

    #[test]
    fn serpentine_grows_by_increment_per_activation() {
        let board = board(10, 1);
        let params = SerpentineParams {
            starting_length: 10,
            increment: 3,
            step_ms: 100,
        };
        let mut escalation = EscalationCounters::default();

        for (activation, expected) in [(1, 10), (2, 13), (3, 16)] {
            let outcome = run(&board, &mut escalation, 40 + activation, |ctx| {
                serpentine(&params, ctx)
            });
            let path: Vec<HexCoord> = outcome.effects.iter().map(|effect| effect.hex).collect();

            assert!(path.len() <= expected);
            if path.len() < expected {
                let head = path[path.len() - 1];
                assert!(
                    head.neighbors().iter().all(|hex| path.contains(hex)
                        || board.tile(*hex).map_or(true, |tile| tile.core)),
                    "a short path must have run out of room"
                );
            }
            for pair in path.windows(2) {
                assert_eq!(pair[0].distance(pair[1]), 1);
            }
            assert_eq!(
                escalation.activations(AbilityVariant::Serpentine),
                activation as u32
            );
        }
    }

    #[test]
    fn serpentine_shares_one_strength_and_never_revisits() {
        let board = board(6, 1);
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 3, |ctx| {
            serpentine(&SerpentineParams::default(), ctx)
        });

        let unique: BTreeSet<_> = outcome.effects.iter().map(|effect| effect.hex).collect();
        assert_eq!(unique.len(), outcome.effects.len());
        let kinds: BTreeSet<_> = outcome
            .effects
            .iter()
            .map(|effect| format!("{:?}", effect.kind))
            .collect();
        assert_eq!(kinds.len(), 1);
    }

    #[test]
    fn sustained_barrage_window_grows() {
        let board = board(8, 1);
        let params = SustainedBarrageParams::default();
        let mut escalation = EscalationCounters::default();

        let first = run(&board, &mut escalation, 6, |ctx| sustained_barrage(&params, ctx));
        assert_eq!(first.effects.len(), 3 * 3);
        assert_eq!(first.sustained_for, Some(Duration::from_secs(3)));
        assert!(first
            .effects
            .iter()
            .all(|effect| effect.remaining < Duration::from_secs(3)));

        let second = run(&board, &mut escalation, 6, |ctx| sustained_barrage(&params, ctx));
        assert_eq!(second.effects.len(), 4 * 4);
        assert_eq!(second.sustained_for, Some(Duration::from_secs(4)));
    }

    #[test]
    fn accelerating_scatter_counts_activations() {
        let board = board(5, 1);
        let params = AcceleratingScatterParams::default();
        let mut escalation = EscalationCounters::default();

        for _ in 0..2 {
            let outcome = run(&board, &mut escalation, 9, |ctx| {
                accelerating_scatter(&params, ctx)
            });
            assert_eq!(outcome.effects.len(), 6);
        }
        let activations = escalation.activations(AbilityVariant::AcceleratingScatter);
        assert_eq!(activations, 2);
        assert_eq!(params.interval_after(activations), Some(Duration::from_secs(6)));
    }

    #[test]
    fn every_third_triple_strike_is_heavy() {
        let board = board(6, 1);
        let params = TripleStrikeParams::default();
        let mut escalation = EscalationCounters::default();

        let sizes: Vec<_> = (0..6)
            .map(|seed| {
                run(&board, &mut escalation, seed, |ctx| triple_strike(&params, ctx))
                    .effects
                    .len()
            })
            .collect();
        assert_eq!(sizes, vec![4, 4, 12, 4, 4, 12]);

        for _ in 0..2 {
            let _ = run(&board, &mut escalation, 1, |ctx| triple_strike(&params, ctx));
        }
        let heavy = run(&board, &mut escalation, 1, |ctx| triple_strike(&params, ctx));
        assert_eq!(heavy.effects.len(), 12);
        assert!(heavy.effects.iter().all(|effect| effect.kind
            == EffectKind::Ignite {
                strength: Some(FireStrength::Inferno)
            }));
    }
}
