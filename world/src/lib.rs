#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Wildfire.
//!
//! The world owns the hex board, the fire state of every tile, the wave
//! controller clock, and the enemy approach layout. Systems never touch it
//! directly: they read the views exposed by [`query`] and submit [`Command`]
//! values that [`apply`] executes deterministically.

mod board;

use std::time::Duration;

use wildfire_core::{
    ApproachLine, Command, Event, FireStrength, HexCoord, HexDirection, IgnitionError,
    PlacementError,
};

use board::Board;

const DEFAULT_BOARD_RADIUS: u32 = 8;
const DEFAULT_CORE_RADIUS: u32 = 1;

/// Represents the authoritative Wildfire world state.
#[derive(Debug)]
pub struct World {
    board: Board,
    wave: WaveClock,
    approach_lines: Vec<ApproachLine>,
    modal_open: bool,
    tick_index: u64,
}

impl World {
    /// Creates a new world with the default board and no running wave.
    #[must_use]
    pub fn new() -> Self {
        let board = Board::new(DEFAULT_BOARD_RADIUS, DEFAULT_CORE_RADIUS);
        let approach_lines = default_approach_lines(&board);
        Self {
            board,
            wave: WaveClock::default(),
            approach_lines,
            modal_open: false,
            tick_index: 0,
        }
    }

    fn ignite(
        &mut self,
        hex: HexCoord,
        strength: FireStrength,
        force: bool,
        out_events: &mut Vec<Event>,
    ) {
        if self.board.is_core(hex) && self.board.contains(hex) {
            out_events.push(Event::IgnitionRejected {
                hex,
                reason: IgnitionError::CoreArea,
            });
            return;
        }

        let Some(tile) = self.board.tile_mut(hex) else {
            out_events.push(Event::IgnitionRejected {
                hex,
                reason: IgnitionError::OutOfBounds,
            });
            return;
        };

        let next = match tile.fire {
            None => strength,
            Some(_) if !force => return,
            Some(current) => current.max(strength),
        };
        tile.fire = Some(next);
        out_events.push(Event::TileIgnited {
            hex,
            strength: next,
        });
    }

    fn upgrade(&mut self, hex: HexCoord, cap: FireStrength, out_events: &mut Vec<Event>) {
        let Some(tile) = self.board.tile_mut(hex) else {
            return;
        };
        let Some(current) = tile.fire else {
            return;
        };
        if current >= cap {
            return;
        }

        let next = current.stronger().min(cap);
        tile.fire = Some(next);
        out_events.push(Event::FireUpgraded {
            hex,
            from: current,
            to: next,
        });
    }

    fn placement_error(&self, hex: HexCoord) -> Option<PlacementError> {
        let Some(tile) = self.board.tile(hex) else {
            return Some(PlacementError::OutOfBounds);
        };
        if self.board.is_core(hex) {
            return Some(PlacementError::CoreArea);
        }
        if tile.item.is_some() || tile.structure {
            return Some(PlacementError::Occupied);
        }
        None
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBoard {
            radius,
            core_radius,
        } => {
            world.board = Board::new(radius, core_radius.min(radius));
            world.approach_lines = default_approach_lines(&world.board);
        }
        Command::PlaceItem { hex, kind } => match world.placement_error(hex) {
            Some(reason) => out_events.push(Event::PlacementRejected { hex, reason }),
            None => {
                if let Some(tile) = world.board.tile_mut(hex) {
                    tile.item = Some(kind);
                }
            }
        },
        Command::PlaceStructure { hex } => match world.placement_error(hex) {
            Some(reason) => out_events.push(Event::PlacementRejected { hex, reason }),
            None => {
                if let Some(tile) = world.board.tile_mut(hex) {
                    tile.structure = true;
                }
            }
        },
        Command::SetApproachLines { lines } => {
            world.approach_lines = lines;
        }
        Command::StartWave {
            number,
            group,
            boss_slot,
            duration,
        } => {
            world.wave = WaveClock {
                number,
                group,
                boss_slot,
                active: !duration.is_zero(),
                remaining: duration,
            };
            out_events.push(Event::WaveStarted {
                number,
                group,
                boss_slot,
            });
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            if world.wave.active {
                world.wave.remaining = world.wave.remaining.saturating_sub(dt);
                if world.wave.remaining.is_zero() {
                    world.wave.active = false;
                    world.wave.boss_slot = false;
                    out_events.push(Event::WaveEnded {
                        number: world.wave.number,
                    });
                }
            }
        }
        Command::Ignite {
            hex,
            strength,
            force,
        } => world.ignite(hex, strength, force, out_events),
        Command::UpgradeFire { hex, cap } => world.upgrade(hex, cap, out_events),
        Command::Extinguish { hex } => {
            if let Some(tile) = world.board.tile_mut(hex) {
                if tile.fire.take().is_some() {
                    out_events.push(Event::FireExtinguished { hex });
                }
            }
        }
        Command::SetModalOpen { open } => {
            if world.modal_open != open {
                world.modal_open = open;
                out_events.push(Event::ModalChanged { open });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use wildfire_core::{
        ApproachLine, BoardView, FireOutlook, FireStrength, HexCoord, WaveStatus,
    };

    use super::World;

    /// Captures a read-only view of every tile on the board.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView {
        let board = &world.board;
        BoardView::from_snapshots(
            board
                .tiles()
                .iter()
                .map(|tile| board.snapshot(tile))
                .collect(),
        )
    }

    /// Reports the wave controller state.
    #[must_use]
    pub fn wave_status(world: &World) -> WaveStatus {
        let wave = &world.wave;
        WaveStatus {
            boss_slot: wave.boss_slot,
            group: wave.group,
            number: wave.number,
            active: wave.active,
            time_remaining: wave.remaining,
        }
    }

    /// Reports the fire strengths unlocked by the current wave.
    ///
    /// Waves one and two offer a single tier; every two further waves unlock
    /// the next stronger tier.
    #[must_use]
    pub fn fire_outlook(world: &World) -> FireOutlook {
        let unlocked = 1 + world.wave.number.saturating_sub(1) as usize / 2;
        let count = unlocked.min(FireStrength::ALL.len());
        FireOutlook::new(FireStrength::ALL[..count].to_vec())
    }

    /// Provides the enemy approach lines produced by the path layout.
    #[must_use]
    pub fn approach_lines(world: &World) -> &[ApproachLine] {
        &world.approach_lines
    }

    /// Reports the strength of the fire burning on a tile, if any.
    #[must_use]
    pub fn fire_at(world: &World, hex: HexCoord) -> Option<FireStrength> {
        world.board.tile(hex).and_then(|tile| tile.fire)
    }

    /// Counts the burning tiles on the board.
    #[must_use]
    pub fn burning_count(world: &World) -> usize {
        world
            .board
            .tiles()
            .iter()
            .filter(|tile| tile.fire.is_some())
            .count()
    }

    /// Reports whether a blocking modal is open in the presentation layer.
    #[must_use]
    pub fn modal_open(world: &World) -> bool {
        world.modal_open
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct WaveClock {
    number: u32,
    group: u32,
    boss_slot: bool,
    active: bool,
    remaining: Duration,
}

/// Straight lines from each board corner toward the edge of the core.
fn default_approach_lines(board: &Board) -> Vec<ApproachLine> {
    let radius = board.radius();
    let boundary = board.core_radius().saturating_add(1);
    if radius < boundary {
        return Vec::new();
    }

    let reach = i32::try_from(radius).unwrap_or(i32::MAX);
    HexDirection::ALL
        .iter()
        .map(|direction| {
            let corner = HexCoord::ORIGIN.offset(*direction, reach);
            let inward = direction.opposite();
            let hexes = (0..=radius - boundary)
                .map(|step| corner.offset(inward, i32::try_from(step).unwrap_or(0)))
                .collect();
            ApproachLine::new(hexes)
        })
        .collect()
}
