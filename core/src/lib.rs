#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wildfire engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume immutable views such as
//! [`BoardView`] and [`WaveStatus`] and respond exclusively with new command
//! batches, plus one-way [`Notification`] cues for presentation layers.

mod hex;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use hex::{HexCoord, HexDirection};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the hexagonal board with the provided dimensions.
    ConfigureBoard {
        /// Number of rings surrounding the origin.
        radius: u32,
        /// Tiles within this distance of the origin form the core area.
        core_radius: u32,
    },
    /// Places an item on a tile.
    PlaceItem {
        /// Tile receiving the item.
        hex: HexCoord,
        /// Category of the placed item.
        kind: ItemKind,
    },
    /// Marks a tile as holding an indestructible fixed structure.
    PlaceStructure {
        /// Tile receiving the structure.
        hex: HexCoord,
    },
    /// Replaces the enemy approach lines reported by the path layout.
    SetApproachLines {
        /// New approach lines in priority order.
        lines: Vec<ApproachLine>,
    },
    /// Starts a wave with the provided identity and length.
    StartWave {
        /// One-based wave number within the campaign.
        number: u32,
        /// One-based wave group the wave belongs to.
        group: u32,
        /// Indicates whether the wave occupies the designated boss slot.
        boss_slot: bool,
        /// Time until the wave ends on its own.
        duration: Duration,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Sets a tile on fire.
    Ignite {
        /// Tile to ignite.
        hex: HexCoord,
        /// Strength of the new fire.
        strength: FireStrength,
        /// Re-ignites burning tiles, keeping the stronger of the two strengths.
        force: bool,
    },
    /// Raises the strength of an already burning tile by one tier.
    UpgradeFire {
        /// Tile whose fire should grow.
        hex: HexCoord,
        /// Strongest tier the upgrade may reach.
        cap: FireStrength,
    },
    /// Puts out the fire on a tile.
    Extinguish {
        /// Tile to extinguish.
        hex: HexCoord,
    },
    /// Opens or closes a blocking modal in the presentation layer.
    SetModalOpen {
        /// Whether a modal currently blocks simulation mutations.
        open: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a wave began.
    WaveStarted {
        /// Wave identity as reported through [`WaveStatus`].
        number: u32,
        /// Wave group the wave belongs to.
        group: u32,
        /// Whether the wave occupies the boss slot.
        boss_slot: bool,
    },
    /// Announces that the running wave finished.
    WaveEnded {
        /// Number of the wave that ended.
        number: u32,
    },
    /// Confirms that a tile started burning or was re-ignited.
    TileIgnited {
        /// Tile that is now burning.
        hex: HexCoord,
        /// Strength of the fire after the ignition.
        strength: FireStrength,
    },
    /// Confirms that a burning tile grew stronger.
    FireUpgraded {
        /// Tile whose fire grew.
        hex: HexCoord,
        /// Strength before the upgrade.
        from: FireStrength,
        /// Strength after the upgrade.
        to: FireStrength,
    },
    /// Confirms that a tile stopped burning.
    FireExtinguished {
        /// Tile that stopped burning.
        hex: HexCoord,
    },
    /// Reports that an ignition request was refused.
    IgnitionRejected {
        /// Tile named in the request.
        hex: HexCoord,
        /// Specific reason the ignition failed.
        reason: IgnitionError,
    },
    /// Reports that an item or structure placement was refused.
    PlacementRejected {
        /// Tile named in the request.
        hex: HexCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that the blocking modal flag changed.
    ModalChanged {
        /// New modal state.
        open: bool,
    },
}

/// One-way cues for rendering, audio and UI layers.
///
/// Systems never read these back; they only describe what should be shown or
/// played at the moment they are emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Shows the banner naming the ability being cast.
    AbilityBanner {
        /// Display name of the ability.
        name: String,
    },
    /// Plays a sound effect.
    Sound {
        /// Asset key of the sound.
        key: String,
        /// Playback mode.
        mode: SoundMode,
    },
    /// Shakes the screen.
    ScreenShake {
        /// Keeps shaking for this long, or a single jolt when absent.
        sustained: Option<Duration>,
    },
}

/// Playback mode attached to [`Notification::Sound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundMode {
    /// Plays the sound once.
    OneShot,
    /// Loops the sound for the provided duration.
    Looping {
        /// How long the loop keeps playing.
        duration: Duration,
    },
}

/// Ranked severity of a burning tile, weakest first.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FireStrength {
    /// Barely burning embers.
    Smoldering,
    /// Ordinary open flame.
    Flame,
    /// Hot, fast-spreading fire.
    Blaze,
    /// Severe fire.
    Inferno,
    /// Strongest tier.
    Firestorm,
}

impl FireStrength {
    /// Every tier ordered weakest to strongest.
    pub const ALL: [FireStrength; 5] = [
        FireStrength::Smoldering,
        FireStrength::Flame,
        FireStrength::Blaze,
        FireStrength::Inferno,
        FireStrength::Firestorm,
    ];

    /// Zero-based rank where zero is the weakest tier.
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Next stronger tier, saturating at the strongest.
    #[must_use]
    pub const fn stronger(self) -> Self {
        match self {
            Self::Smoldering => Self::Flame,
            Self::Flame => Self::Blaze,
            Self::Blaze => Self::Inferno,
            Self::Inferno | Self::Firestorm => Self::Firestorm,
        }
    }
}

/// Categories of player-placed items that can occupy a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Water sprinkler that slows nearby fires.
    Sprinkler,
    /// Barricade that blocks enemy movement.
    Barricade,
    /// Turret that attacks approaching enemies.
    Turret,
}

/// Reasons an ignition request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnitionError {
    /// The tile lies outside the board.
    OutOfBounds,
    /// The tile belongs to the protected core area.
    CoreArea,
}

/// Reasons an item or structure placement may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The tile lies outside the board.
    OutOfBounds,
    /// The tile belongs to the protected core area.
    CoreArea,
    /// The tile already holds an item or structure.
    Occupied,
}

/// Immutable representation of a single tile used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSnapshot {
    /// Location of the tile.
    pub hex: HexCoord,
    /// Strength of the fire on the tile, if it is burning.
    pub fire: Option<FireStrength>,
    /// Item placed on the tile, if any.
    pub item: Option<ItemKind>,
    /// Indicates whether the tile holds an indestructible fixed structure.
    pub structure: bool,
    /// Indicates whether the tile belongs to the core area.
    pub core: bool,
}

/// Read-only snapshot describing every tile on the board.
#[derive(Clone, Debug, Default)]
pub struct BoardView {
    tiles: Vec<TileSnapshot>,
}

impl BoardView {
    /// Creates a new board view, sorting the snapshots into row-major order.
    #[must_use]
    pub fn from_snapshots(mut tiles: Vec<TileSnapshot>) -> Self {
        tiles.sort_by_key(|tile| tile.hex);
        tiles.dedup_by_key(|tile| tile.hex);
        Self { tiles }
    }

    /// Iterator over the captured tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &TileSnapshot> {
        self.tiles.iter()
    }

    /// Iterator over every position on the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.tiles.iter().map(|tile| tile.hex)
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the board holds no tiles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns the snapshot of the tile at the provided position.
    #[must_use]
    pub fn tile(&self, hex: HexCoord) -> Option<&TileSnapshot> {
        self.tiles
            .binary_search_by_key(&hex, |tile| tile.hex)
            .ok()
            .map(|index| &self.tiles[index])
    }

    /// Reports whether the position lies on the board.
    #[must_use]
    pub fn contains(&self, hex: HexCoord) -> bool {
        self.tile(hex).is_some()
    }

    /// Adjacent positions that lie on the board.
    pub fn neighbors(&self, hex: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
        hex.neighbors()
            .into_iter()
            .filter(move |neighbor| self.contains(*neighbor))
    }

    /// Iterator over burning tiles and their strengths in row-major order.
    pub fn burning(&self) -> impl Iterator<Item = (HexCoord, FireStrength)> + '_ {
        self.tiles
            .iter()
            .filter_map(|tile| tile.fire.map(|strength| (tile.hex, strength)))
    }
}

/// Snapshot of the wave controller used by systems each step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaveStatus {
    /// Indicates whether the current wave occupies the designated boss slot.
    pub boss_slot: bool,
    /// One-based wave group of the current wave.
    pub group: u32,
    /// One-based number of the current wave.
    pub number: u32,
    /// Indicates whether the wave is running rather than in pre-wave setup.
    pub active: bool,
    /// Time left before the wave ends on its own.
    pub time_remaining: Duration,
}

/// Fire strengths the fire engine offers for the current wave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FireOutlook {
    ranked: Vec<FireStrength>,
    recommended: FireStrength,
}

impl FireOutlook {
    /// Creates an outlook from the available tiers.
    ///
    /// Tiers are ranked strongest first regardless of input order. The
    /// recommended strength is the median tier, or [`FireStrength::Smoldering`]
    /// when no tier is available.
    #[must_use]
    pub fn new(mut available: Vec<FireStrength>) -> Self {
        available.sort_by(|a, b| b.cmp(a));
        available.dedup();
        let recommended = available
            .get(available.len() / 2)
            .copied()
            .unwrap_or(FireStrength::Smoldering);
        Self {
            ranked: available,
            recommended,
        }
    }

    /// Available tiers ordered strongest to weakest.
    #[must_use]
    pub fn ranked(&self) -> &[FireStrength] {
        &self.ranked
    }

    /// Strength the fire engine suggests when no explicit tier is chosen.
    #[must_use]
    pub const fn recommended(&self) -> FireStrength {
        self.recommended
    }

    /// Strongest available tier.
    #[must_use]
    pub fn strongest(&self) -> FireStrength {
        self.tier(0)
    }

    /// Weakest available tier.
    #[must_use]
    pub fn weakest(&self) -> FireStrength {
        self.ranked.last().copied().unwrap_or(self.recommended)
    }

    /// Tier at the provided rank counted from the strongest.
    ///
    /// Ranks beyond the available tiers clamp to the weakest one, so waves
    /// offering fewer tiers degrade to fewer distinct strengths.
    #[must_use]
    pub fn tier(&self, index: usize) -> FireStrength {
        self.ranked
            .get(index)
            .or_else(|| self.ranked.last())
            .copied()
            .unwrap_or(self.recommended)
    }
}

impl Default for FireOutlook {
    fn default() -> Self {
        Self::new(vec![FireStrength::Smoldering])
    }
}

/// Ordered sequence of hexes enemies follow toward the core.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproachLine {
    hexes: Vec<HexCoord>,
}

impl ApproachLine {
    /// Creates an approach line from hexes ordered from entry to core.
    #[must_use]
    pub fn new(hexes: Vec<HexCoord>) -> Self {
        Self { hexes }
    }

    /// Hexes along the line in travel order.
    #[must_use]
    pub fn hexes(&self) -> &[HexCoord] {
        &self.hexes
    }
}
