use wildfire_core::HexCoord;

use super::{stagger, CastContext};
use crate::ability::{
    AbilityVariant, EdgeBurnParams, RingCollapseParams, RingSweepParams, SpiralParams,
};

/// Emits concentric rings around a centre, innermost ring strongest.
pub(crate) fn ring_sweep(params: &RingSweepParams, ctx: &mut CastContext<'_>) {
    let centre = if params.around_core {
        HexCoord::ORIGIN
    } else {
        let targets = ctx.targets();
        match ctx.choose(&targets, 1).first() {
            Some(hex) => *hex,
            None => return,
        }
    };

    for ring in 0..=params.max_radius {
        let order = if params.inward {
            params.max_radius - ring
        } else {
            ring
        };
        let delay = stagger(params.ring_stagger_ms, order as usize);
        let strength = ctx.ranked_strength(ring as usize);
        for hex in centre.ring(ring) {
            if ctx.is_target(hex) {
                ctx.ignite(hex, delay, Some(strength));
            }
        }
    }
}

/// Ignites board rings from the edge inward, one ring deeper per activation.
pub(crate) fn ring_collapse(params: &RingCollapseParams, ctx: &mut CastContext<'_>) {
    let depth = ctx.escalation.advance(AbilityVariant::RingCollapse);
    let Some(outermost) = ctx.board_radius().checked_sub(depth) else {
        return;
    };

    let rings = params.rings.max(1);
    for step in 0..rings {
        let Some(radius) = outermost.checked_sub(step) else {
            break;
        };
        let delay = stagger(params.ring_stagger_ms, step as usize);
        let strength = ctx.ranked_strength((rings - 1 - step) as usize);
        for hex in HexCoord::ORIGIN.ring(radius) {
            if ctx.is_target(hex) {
                ctx.ignite(hex, delay, Some(strength));
            }
        }
    }
}

/// Walks the outermost ring of the board.
pub(crate) fn edge_burn(params: &EdgeBurnParams, ctx: &mut CastContext<'_>) {
    let radius = ctx.board_radius();
    if radius == 0 {
        return;
    }

    let edge: Vec<HexCoord> = HexCoord::ORIGIN
        .ring(radius)
        .into_iter()
        .filter(|hex| ctx.is_target(*hex))
        .collect();
    for (index, hex) in edge.into_iter().enumerate() {
        let strength = ctx.strength(params.strength);
        ctx.ignite(hex, stagger(params.step_ms, index), strength);
    }
}

/// Spirals outward from the core, ring by ring.
pub(crate) fn spiral(params: &SpiralParams, ctx: &mut CastContext<'_>) {
    let board_radius = ctx.board_radius();
    let radius = match params.max_radius {
        0 => board_radius,
        limit => limit.min(board_radius),
    };

    let path: Vec<HexCoord> = HexCoord::ORIGIN
        .spiral(radius)
        .into_iter()
        .filter(|hex| ctx.is_target(*hex))
        .collect();
    for (index, hex) in path.into_iter().enumerate() {
        let strength = ctx.strength(params.strength);
        ctx.ignite(hex, stagger(params.step_ms, index), strength);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wildfire_core::FireStrength;

    use super::*;
    use crate::{
        ability::StrengthPick,
        deferred::EffectKind,
        escalation::EscalationCounters,
        targeting::testing::{board, run},
    };

    #[test]
    fn ring_sweep_around_core_staggers_rings_outward() {
        let board = board(5, 1);
        let params = RingSweepParams {
            max_radius: 3,
            ring_stagger_ms: 300,
            inward: false,
            around_core: true,
        };
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 1, |ctx| ring_sweep(&params, ctx));

        // Rings 0 and 1 are core; rings 2 and 3 both fall on the third tier.
        assert_eq!(outcome.effects.len(), 12 + 18);
        for effect in &outcome.effects {
            let ring = effect.hex.length();
            assert_eq!(effect.remaining, Duration::from_millis(300 * u64::from(ring)));
            assert_eq!(
                effect.kind,
                EffectKind::Ignite {
                    strength: Some(FireStrength::Flame)
                }
            );
        }
    }

    #[test]
    fn inward_ring_sweep_lands_outer_ring_first_with_weaker_fire() {
        let board = board(6, 0);
        let params = RingSweepParams {
            max_radius: 2,
            ring_stagger_ms: 100,
            inward: true,
            around_core: true,
        };
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 1, |ctx| ring_sweep(&params, ctx));

        let outer = outcome
            .effects
            .iter()
            .find(|effect| effect.hex.length() == 2)
            .expect("outer ring");
        let inner = outcome
            .effects
            .iter()
            .find(|effect| effect.hex.length() == 1)
            .expect("inner ring");
        assert!(outer.remaining < inner.remaining);
        assert_eq!(
            inner.kind,
            EffectKind::Ignite {
                strength: Some(FireStrength::Blaze)
            }
        );
        assert_eq!(
            outer.kind,
            EffectKind::Ignite {
                strength: Some(FireStrength::Flame)
            }
        );
    }

    #[test]
    fn ring_collapse_moves_one_ring_inward_per_activation() {
        let board = board(5, 1);
        let params = RingCollapseParams {
            rings: 1,
            ring_stagger_ms: 0,
        };
        let mut escalation = EscalationCounters::default();

        for expected_ring in [5, 4, 3, 2] {
            let outcome = run(&board, &mut escalation, 1, |ctx| ring_collapse(&params, ctx));
            assert!(!outcome.effects.is_empty());
            assert!(outcome
                .effects
                .iter()
                .all(|effect| effect.hex.length() == expected_ring));
        }

        let exhausted = run(&board, &mut escalation, 1, |ctx| ring_collapse(&params, ctx));
        assert!(exhausted.effects.is_empty(), "the core is never ignited");
        assert_eq!(escalation.activations(AbilityVariant::RingCollapse), 5);
    }

    #[test]
    fn edge_burn_covers_the_perimeter_in_order() {
        let board = board(4, 1);
        let params = EdgeBurnParams {
            step_ms: 10,
            strength: StrengthPick::Weakest,
        };
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 1, |ctx| edge_burn(&params, ctx));

        assert_eq!(outcome.effects.len(), 24);
        for (index, effect) in outcome.effects.iter().enumerate() {
            assert_eq!(effect.hex.length(), 4);
            assert_eq!(effect.remaining, Duration::from_millis(10 * index as u64));
        }
    }

    #[test]
    fn spiral_skips_core_and_respects_radius() {
        let board = board(6, 1);
        let params = SpiralParams {
            max_radius: 3,
            ..SpiralParams::default()
        };
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 1, |ctx| spiral(&params, ctx));

        assert_eq!(outcome.effects.len(), 12 + 18);
        assert!(outcome
            .effects
            .iter()
            .all(|effect| (2..=3).contains(&effect.hex.length())));
        assert!(outcome.effects.iter().all(|effect| effect.kind
            == EffectKind::Ignite { strength: None }));
    }
}
