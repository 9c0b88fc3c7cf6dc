use std::time::Duration;

use wildfire_core::HexCoord;

use super::{strike_random, CastContext, TargetFilter};
use crate::ability::{ItemStrikeParams, ScatterParams, StokeParams, StrengthPick};

pub(crate) fn scatter(params: &ScatterParams, ctx: &mut CastContext<'_>) {
    let filter = TargetFilter {
        include_structures: params.include_structures,
        ..TargetFilter::STANDARD
    };
    let targets = ctx.targets_with(filter);
    strike_random(
        ctx,
        &targets,
        params.count,
        (params.delay_min_ms, params.delay_max_ms),
        Duration::from_millis(params.base_delay_ms),
        params.strength,
    );
}

/// Strikes every hex holding the configured item with the strongest fire.
///
/// Falls back to a small random scatter when no such item is on the board.
pub(crate) fn item_strike(params: &ItemStrikeParams, ctx: &mut CastContext<'_>) {
    let board = ctx.board();
    let items: Vec<HexCoord> = board
        .iter()
        .filter(|tile| tile.item == Some(params.item))
        .map(|tile| tile.hex)
        .filter(|hex| ctx.is_target(*hex))
        .collect();

    if items.is_empty() {
        let targets = ctx.targets();
        strike_random(
            ctx,
            &targets,
            params.fallback_count,
            (0, params.delay_max_ms),
            Duration::ZERO,
            StrengthPick::Random,
        );
        return;
    }

    let strongest = ctx.fire().strongest();
    for hex in items {
        let delay = ctx.random_delay(0, params.delay_max_ms);
        ctx.ignite(hex, delay, Some(strongest));
    }
}

/// Upgrades random burning hexes in place, up to the configured cap.
pub(crate) fn stoke(params: &StokeParams, ctx: &mut CastContext<'_>) {
    let burning: Vec<HexCoord> = ctx
        .board()
        .burning()
        .map(|(hex, _)| hex)
        .filter(|hex| ctx.is_target(*hex))
        .collect();
    let cap = params.cap.unwrap_or_else(|| ctx.fire().strongest());

    for hex in ctx.choose(&burning, params.count) {
        let delay = ctx.random_delay(0, params.delay_max_ms);
        ctx.stoke(hex, delay, cap);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use wildfire_core::{BoardView, FireStrength, ItemKind, TileSnapshot};

    use super::*;
    use crate::{
        deferred::EffectKind,
        escalation::EscalationCounters,
        targeting::testing::{board, run},
    };

    #[test]
    fn scatter_picks_distinct_valid_hexes_within_delay_range() {
        let board = board(4, 1);
        let params = ScatterParams {
            count: 10,
            delay_min_ms: 200,
            delay_max_ms: 700,
            base_delay_ms: 1_000,
            ..ScatterParams::default()
        };
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 7, |ctx| scatter(&params, ctx));

        assert_eq!(outcome.effects.len(), 10);
        let unique: HashSet<_> = outcome.effects.iter().map(|effect| effect.hex).collect();
        assert_eq!(unique.len(), 10);
        for effect in &outcome.effects {
            assert!(effect.hex.length() > 1, "core hexes are never targeted");
            assert!(effect.remaining >= Duration::from_millis(1_200));
            assert!(effect.remaining < Duration::from_millis(1_700));
        }
    }

    #[test]
    fn scatter_is_capped_by_available_targets() {
        let board = board(2, 1);
        let params = ScatterParams {
            count: 50,
            ..ScatterParams::default()
        };
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 3, |ctx| scatter(&params, ctx));

        assert_eq!(outcome.effects.len(), 12);
    }

    #[test]
    fn scatter_on_empty_board_produces_nothing() {
        let board = BoardView::default();
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 3, |ctx| {
            scatter(&ScatterParams::default(), ctx)
        });

        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn item_strike_hits_every_matching_item_with_strongest_fire() {
        let turrets = [HexCoord::new(2, 0), HexCoord::new(-3, 1)];
        let board = BoardView::from_snapshots(
            HexCoord::ORIGIN
                .spiral(3)
                .into_iter()
                .map(|hex| TileSnapshot {
                    hex,
                    fire: None,
                    item: turrets.contains(&hex).then_some(ItemKind::Turret),
                    structure: false,
                    core: hex.length() == 0,
                })
                .collect(),
        );
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 11, |ctx| {
            item_strike(&ItemStrikeParams::default(), ctx)
        });

        let hit: HashSet<_> = outcome.effects.iter().map(|effect| effect.hex).collect();
        assert_eq!(hit, turrets.into_iter().collect());
        assert!(outcome.effects.iter().all(|effect| effect.kind
            == EffectKind::Ignite {
                strength: Some(FireStrength::Inferno)
            }));
    }

    #[test]
    fn item_strike_falls_back_to_small_scatter() {
        let board = board(3, 0);
        let mut escalation = EscalationCounters::default();
        let params = ItemStrikeParams {
            item: ItemKind::Sprinkler,
            fallback_count: 3,
            ..ItemStrikeParams::default()
        };

        let outcome = run(&board, &mut escalation, 5, |ctx| item_strike(&params, ctx));

        assert_eq!(outcome.effects.len(), 3);
    }

    #[test]
    fn stoke_only_touches_burning_hexes() {
        let burning = [HexCoord::new(2, -1), HexCoord::new(0, 3)];
        let board = BoardView::from_snapshots(
            HexCoord::ORIGIN
                .spiral(3)
                .into_iter()
                .map(|hex| TileSnapshot {
                    hex,
                    fire: burning.contains(&hex).then_some(FireStrength::Flame),
                    item: None,
                    structure: false,
                    core: false,
                })
                .collect(),
        );
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 2, |ctx| {
            stoke(&StokeParams::default(), ctx)
        });

        assert_eq!(outcome.effects.len(), 2);
        for effect in &outcome.effects {
            assert!(burning.contains(&effect.hex));
            assert_eq!(
                effect.kind,
                EffectKind::Stoke {
                    cap: FireStrength::Inferno
                }
            );
        }
    }
}
