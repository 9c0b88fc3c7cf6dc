use wildfire_core::HexCoord;

use super::{stagger, CastContext};
use crate::ability::{AbilityVariant, LatticeStrikeParams, RowSweepParams};

/// Consumes the next batch of board positions in row-major order.
///
/// The cursor survives between activations and wraps at the end of the
/// board. Positions that are not valid targets use up their slot silently.
pub(crate) fn row_sweep(params: &RowSweepParams, ctx: &mut CastContext<'_>) {
    let order: Vec<HexCoord> = ctx.board().positions().collect();
    let activations = ctx.escalation.advance(AbilityVariant::RowSweep);
    if order.is_empty() {
        return;
    }

    let batch = usize::try_from(params.batch).unwrap_or(usize::MAX);
    let consumed = usize::try_from(activations)
        .unwrap_or(usize::MAX)
        .wrapping_mul(batch);
    let cursor = consumed % order.len();
    for step in 0..batch.min(order.len()) {
        let hex = order[(cursor + step) % order.len()];
        if ctx.is_target(hex) {
            ctx.ignite(hex, stagger(params.step_ms, step), None);
        }
    }
}

/// Strikes every `spacing`-th board position, shifting the phase by one
/// on each activation.
pub(crate) fn lattice_strike(params: &LatticeStrikeParams, ctx: &mut CastContext<'_>) {
    let spacing = params.spacing.max(1);
    let phase = ctx.escalation.advance(AbilityVariant::LatticeStrike) % spacing;
    let lattice: Vec<HexCoord> = ctx
        .board()
        .positions()
        .zip((0..spacing).cycle())
        .filter(|(hex, slot)| *slot == phase && ctx.is_target(*hex))
        .map(|(hex, _)| hex)
        .collect();

    for hex in lattice {
        let delay = ctx.random_delay(0, params.delay_max_ms);
        ctx.ignite(hex, delay, None);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{
        escalation::EscalationCounters,
        targeting::testing::{board, run},
    };

    #[test]
    fn row_sweep_cursor_advances_and_wraps() {
        // 7 positions, none of them core.
        let board = board(1, 0);
        let board = wildfire_core::BoardView::from_snapshots(
            board
                .iter()
                .copied()
                .map(|mut tile| {
                    tile.core = false;
                    tile
                })
                .collect(),
        );
        let order: Vec<_> = board.positions().collect();
        let params = RowSweepParams {
            batch: 3,
            step_ms: 10,
        };
        let mut escalation = EscalationCounters::default();

        let mut swept = Vec::new();
        for _ in 0..3 {
            let outcome = run(&board, &mut escalation, 1, |ctx| row_sweep(&params, ctx));
            swept.push(
                outcome
                    .effects
                    .iter()
                    .map(|effect| effect.hex)
                    .collect::<Vec<_>>(),
            );
        }

        assert_eq!(swept[0], order[0..3].to_vec());
        assert_eq!(swept[1], order[3..6].to_vec());
        assert_eq!(swept[2], vec![order[6], order[0], order[1]]);
        assert_eq!(escalation.activations(AbilityVariant::RowSweep), 3);
    }

    #[test]
    fn lattice_phase_rotates_through_disjoint_sets() {
        let board = board(4, 0);
        let params = LatticeStrikeParams {
            spacing: 3,
            delay_max_ms: 500,
        };
        let mut escalation = EscalationCounters::default();

        let mut all = BTreeSet::new();
        let mut total = 0;
        for _ in 0..3 {
            let outcome = run(&board, &mut escalation, 2, |ctx| lattice_strike(&params, ctx));
            total += outcome.effects.len();
            all.extend(outcome.effects.iter().map(|effect| effect.hex));
        }

        assert_eq!(total, all.len(), "phases never overlap");
        assert_eq!(all.len(), board.len() - 1, "three phases cover the board");

        let fourth = run(&board, &mut escalation, 2, |ctx| lattice_strike(&params, ctx));
        let first_phase: BTreeSet<_> = board
            .positions()
            .step_by(3)
            .filter(|hex| *hex != HexCoord::ORIGIN)
            .collect();
        let fourth_hexes: BTreeSet<_> = fourth.effects.iter().map(|effect| effect.hex).collect();
        assert_eq!(fourth_hexes, first_phase);
    }
}
