use wildfire_core::{HexCoord, HexDirection};

use super::{stagger, CastContext};
use crate::ability::{
    CrossStrikeParams, LineStrikeParams, PathFollowParams, StrengthPick, ZigZagParams,
};

/// Axes a straight line may run along, one per opposite-direction pair.
const AXES: [HexDirection; 3] = [
    HexDirection::East,
    HexDirection::NorthEast,
    HexDirection::NorthWest,
];

/// Hexes from `start` (exclusive) in `direction` until the board edge.
fn walk(ctx: &CastContext<'_>, start: HexCoord, direction: HexDirection) -> Vec<HexCoord> {
    let board = ctx.board();
    std::iter::successors(Some(start.neighbor(direction)), |hex| {
        Some(hex.neighbor(direction))
    })
    .take_while(|hex| board.contains(*hex))
    .collect()
}

/// Ignites the centre and every arm, delayed by distance from the centre.
///
/// With `edges_first` the arm tips land first and the strike converges.
fn strike_arms(
    ctx: &mut CastContext<'_>,
    centre: HexCoord,
    directions: &[HexDirection],
    step_ms: u64,
    edges_first: bool,
    pick: StrengthPick,
) {
    let arms: Vec<Vec<HexCoord>> = directions
        .iter()
        .map(|direction| walk(ctx, centre, *direction))
        .collect();
    let reach = arms.iter().map(Vec::len).max().unwrap_or(0);
    let delay_for = |distance: usize| {
        if edges_first {
            stagger(step_ms, reach - distance)
        } else {
            stagger(step_ms, distance)
        }
    };

    if ctx.is_target(centre) {
        let strength = ctx.strength(pick);
        ctx.ignite(centre, delay_for(0), strength);
    }
    for arm in arms {
        for (index, hex) in arm.into_iter().enumerate() {
            if ctx.is_target(hex) {
                let strength = ctx.strength(pick);
                ctx.ignite(hex, delay_for(index + 1), strength);
            }
        }
    }
}

fn random_centre(ctx: &mut CastContext<'_>) -> Option<HexCoord> {
    let targets = ctx.targets();
    ctx.choose(&targets, 1).first().copied()
}

/// Burns a straight line through a random centre along a random axis.
pub(crate) fn line_strike(params: &LineStrikeParams, ctx: &mut CastContext<'_>) {
    let Some(centre) = random_centre(ctx) else {
        return;
    };
    let axis = AXES[ctx.random_index(AXES.len())];
    strike_arms(
        ctx,
        centre,
        &[axis, axis.opposite()],
        params.step_ms,
        params.edges_first,
        params.strength,
    );
}

/// Burns a star of arms out of a random centre.
pub(crate) fn cross_strike(params: &CrossStrikeParams, ctx: &mut CastContext<'_>) {
    let arms = usize::try_from(params.arms.min(6)).unwrap_or(6);
    if arms == 0 {
        return;
    }
    let Some(centre) = random_centre(ctx) else {
        return;
    };
    let spacing = (6 / arms).max(1);
    let directions: Vec<HexDirection> = HexDirection::ALL
        .iter()
        .copied()
        .step_by(spacing)
        .take(arms)
        .collect();
    strike_arms(
        ctx,
        centre,
        &directions,
        params.step_ms,
        params.edges_first,
        StrengthPick::Recommended,
    );
}

/// Walks from a random edge hex toward the centre, switching heading
/// between the two diagonals of the inward direction every segment.
pub(crate) fn zig_zag(params: &ZigZagParams, ctx: &mut CastContext<'_>) {
    let radius = ctx.board_radius();
    if radius == 0 {
        return;
    }
    let edge: Vec<HexCoord> = HexCoord::ORIGIN
        .ring(radius)
        .into_iter()
        .filter(|hex| ctx.is_target(*hex))
        .collect();
    let Some(start) = ctx.choose(&edge, 1).first().copied() else {
        return;
    };

    let inward = HexDirection::ALL
        .into_iter()
        .min_by_key(|direction| start.neighbor(*direction).length())
        .unwrap_or(HexDirection::West);
    let segment = params.segment_length.max(1);
    let max_steps = radius.saturating_mul(4);

    let mut hex = start;
    let mut step = 0_u32;
    let board = ctx.board();
    while board.contains(hex) && step <= max_steps {
        if ctx.is_target(hex) {
            let strength = ctx.strength(params.strength);
            ctx.ignite(hex, stagger(params.step_ms, step as usize), strength);
        }
        let heading = if (step / segment) % 2 == 0 {
            inward.rotated_left()
        } else {
            inward.rotated_right()
        };
        hex = hex.neighbor(heading);
        step += 1;
    }
}

/// Burns along the enemy approach lines, one line after another.
pub(crate) fn path_follow(params: &PathFollowParams, ctx: &mut CastContext<'_>) {
    let limit = match params.max_lines {
        0 => usize::MAX,
        lines => usize::try_from(lines).unwrap_or(usize::MAX),
    };
    let lines = ctx.approach_lines();
    for (line_index, line) in lines.iter().take(limit).enumerate() {
        let line_delay = stagger(params.line_offset_ms, line_index);
        for (hex_index, hex) in line.hexes().iter().enumerate() {
            if ctx.is_target(*hex) {
                let strength = ctx.strength(params.strength);
                let delay = line_delay + stagger(params.hex_stagger_ms, hex_index);
                ctx.ignite(*hex, delay, strength);
            }
        }
    }
}
