use std::{
    collections::{BTreeSet, VecDeque},
    time::Duration,
};

use wildfire_core::{BoardView, FireStrength, HexCoord};

use super::{stagger, strike_random, CastContext};
use crate::ability::{ClusterRingParams, MeteorShowerParams, StrengthPick};

const FALLBACK_DELAY_MAX_MS: u64 = 1_000;

/// Drops small clusters on random centres, one shared delay per cluster.
///
/// The centre of each cluster burns one tier hotter than its rim.
pub(crate) fn meteor_shower(params: &MeteorShowerParams, ctx: &mut CastContext<'_>) {
    let targets = ctx.targets();
    let centres = ctx.choose(&targets, params.clusters);
    let mut struck = BTreeSet::new();

    for (index, centre) in centres.into_iter().enumerate() {
        let delay = stagger(params.cluster_stagger_ms, index);
        for hex in centre.spiral(params.cluster_radius) {
            if !ctx.is_target(hex) || !struck.insert(hex) {
                continue;
            }
            let tier = usize::from(hex != centre);
            let strength = ctx.ranked_strength(tier);
            ctx.ignite(hex, delay, Some(strength));
        }
    }
}

/// Encircles every sizable cluster of same-strength fire with fire of that
/// strength. Without such a cluster, scatters a few random fires instead.
pub(crate) fn cluster_ring(params: &ClusterRingParams, ctx: &mut CastContext<'_>) {
    let minimum = usize::try_from(params.min_cluster.max(1)).unwrap_or(usize::MAX);
    let clusters: Vec<(FireStrength, BTreeSet<HexCoord>)> = fire_clusters(ctx.board())
        .into_iter()
        .filter(|(_, members)| members.len() >= minimum)
        .collect();

    if clusters.is_empty() {
        let targets = ctx.targets();
        strike_random(
            ctx,
            &targets,
            params.fallback_count,
            (0, FALLBACK_DELAY_MAX_MS),
            Duration::ZERO,
            StrengthPick::Random,
        );
        return;
    }

    let mut struck = BTreeSet::new();
    for (index, (strength, members)) in clusters.into_iter().enumerate() {
        let delay = stagger(params.cluster_stagger_ms, index);
        let rim: BTreeSet<HexCoord> = members
            .iter()
            .flat_map(|hex| hex.neighbors())
            .filter(|hex| !members.contains(hex) && ctx.is_target(*hex))
            .collect();
        for hex in rim {
            if struck.insert(hex) {
                ctx.ignite(hex, delay, Some(strength));
            }
        }
    }
}

/// Groups burning tiles into edge-connected clusters of equal strength.
///
/// Clusters are discovered in row-major order of their first member.
fn fire_clusters(board: &BoardView) -> Vec<(FireStrength, BTreeSet<HexCoord>)> {
    let mut seen = BTreeSet::new();
    let mut clusters = Vec::new();

    for (seed, strength) in board.burning() {
        if !seen.insert(seed) {
            continue;
        }
        let mut members = BTreeSet::from([seed]);
        let mut frontier = VecDeque::from([seed]);
        while let Some(hex) = frontier.pop_front() {
            for neighbor in board.neighbors(hex) {
                let same_fire = board
                    .tile(neighbor)
                    .map_or(false, |tile| tile.fire == Some(strength));
                if same_fire && seen.insert(neighbor) {
                    let _ = members.insert(neighbor);
                    frontier.push_back(neighbor);
                }
            }
        }
        clusters.push((strength, members));
    }

    clusters
}

#[cfg(test)]
mod tests {
    use wildfire_core::TileSnapshot;

    use super::*;
    use crate::{
        deferred::EffectKind,
        escalation::EscalationCounters,
        targeting::testing::{board, run},
    };

    fn burning_board(fires: &[(HexCoord, FireStrength)]) -> BoardView {
        BoardView::from_snapshots(
            HexCoord::ORIGIN
                .spiral(5)
                .into_iter()
                .map(|hex| TileSnapshot {
                    hex,
                    fire: fires
                        .iter()
                        .find(|(burning, _)| *burning == hex)
                        .map(|(_, strength)| *strength),
                    item: None,
                    structure: false,
                    core: hex.length() == 0,
                })
                .collect(),
        )
    }

    #[test]
    fn meteor_clusters_share_one_delay_each() {
        let board = board(6, 1);
        let params = MeteorShowerParams {
            clusters: 3,
            cluster_radius: 1,
            cluster_stagger_ms: 500,
        };
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 13, |ctx| meteor_shower(&params, ctx));

        assert!(!outcome.effects.is_empty());
        let delays: BTreeSet<_> = outcome
            .effects
            .iter()
            .map(|effect| effect.remaining.as_millis())
            .collect();
        assert!(delays.iter().all(|delay| [0, 500, 1_000].contains(delay)));
        let unique: BTreeSet<_> = outcome.effects.iter().map(|effect| effect.hex).collect();
        assert_eq!(unique.len(), outcome.effects.len());
        assert!(outcome
            .effects
            .iter()
            .any(|effect| effect.kind
                == EffectKind::Ignite {
                    strength: Some(FireStrength::Inferno)
                }));
    }

    #[test]
    fn flood_fill_separates_strengths_and_gaps() {
        let board = burning_board(&[
            (HexCoord::new(2, 0), FireStrength::Flame),
            (HexCoord::new(3, 0), FireStrength::Flame),
            (HexCoord::new(3, -1), FireStrength::Blaze),
            (HexCoord::new(-3, 0), FireStrength::Flame),
        ]);

        let clusters = fire_clusters(&board);

        let sizes: Vec<_> = clusters
            .iter()
            .map(|(strength, members)| (*strength, members.len()))
            .collect();
        assert_eq!(
            sizes,
            vec![
                (FireStrength::Blaze, 1),
                (FireStrength::Flame, 1),
                (FireStrength::Flame, 2),
            ]
        );
    }

    #[test]
    fn cluster_ring_encircles_qualifying_cluster_with_its_strength() {
        let pair = [HexCoord::new(2, 0), HexCoord::new(3, 0)];
        let board = burning_board(&[
            (pair[0], FireStrength::Blaze),
            (pair[1], FireStrength::Blaze),
            (HexCoord::new(-3, 0), FireStrength::Flame),
        ]);
        let mut escalation = EscalationCounters::default();

        let outcome = run(&board, &mut escalation, 5, |ctx| {
            cluster_ring(&ClusterRingParams::default(), ctx)
        });

        assert_eq!(outcome.effects.len(), 8);
        for effect in &outcome.effects {
            assert!(!pair.contains(&effect.hex));
            assert!(pair.iter().any(|member| member.distance(effect.hex) == 1));
            assert_eq!(
                effect.kind,
                EffectKind::Ignite {
                    strength: Some(FireStrength::Blaze)
                }
            );
        }
    }

    #[test]
    fn cluster_ring_falls_back_to_scatter() {
        let board = burning_board(&[(HexCoord::new(1, 1), FireStrength::Flame)]);
        let mut escalation = EscalationCounters::default();
        let params = ClusterRingParams {
            fallback_count: 4,
            ..ClusterRingParams::default()
        };

        let outcome = run(&board, &mut escalation, 8, |ctx| cluster_ring(&params, ctx));

        assert_eq!(outcome.effects.len(), 4);
        assert!(outcome
            .effects
            .iter()
            .all(|effect| effect.remaining < Duration::from_millis(FALLBACK_DELAY_MAX_MS)));
    }
}
