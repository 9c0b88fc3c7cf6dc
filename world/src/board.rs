//! Dense tile storage for the hexagonal board.

use wildfire_core::{FireStrength, HexCoord, ItemKind, TileSnapshot};

/// Mutable state of a single tile stored inside the world.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tile {
    pub(crate) hex: HexCoord,
    pub(crate) fire: Option<FireStrength>,
    pub(crate) item: Option<ItemKind>,
    pub(crate) structure: bool,
}

impl Tile {
    fn empty(hex: HexCoord) -> Self {
        Self {
            hex,
            fire: None,
            item: None,
            structure: false,
        }
    }
}

/// Hexagonal board of every tile within `radius` of the origin.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    radius: u32,
    core_radius: u32,
    tiles: Vec<Tile>,
}

impl Board {
    pub(crate) fn new(radius: u32, core_radius: u32) -> Self {
        let mut hexes = HexCoord::ORIGIN.spiral(radius);
        hexes.sort();
        Self {
            radius,
            core_radius,
            tiles: hexes.into_iter().map(Tile::empty).collect(),
        }
    }

    pub(crate) const fn radius(&self) -> u32 {
        self.radius
    }

    pub(crate) const fn core_radius(&self) -> u32 {
        self.core_radius
    }

    pub(crate) fn contains(&self, hex: HexCoord) -> bool {
        hex.length() <= self.radius
    }

    pub(crate) fn is_core(&self, hex: HexCoord) -> bool {
        hex.length() <= self.core_radius
    }

    pub(crate) fn tile(&self, hex: HexCoord) -> Option<&Tile> {
        self.index(hex).map(|index| &self.tiles[index])
    }

    pub(crate) fn tile_mut(&mut self, hex: HexCoord) -> Option<&mut Tile> {
        self.index(hex).map(move |index| &mut self.tiles[index])
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn snapshot(&self, tile: &Tile) -> TileSnapshot {
        TileSnapshot {
            hex: tile.hex,
            fire: tile.fire,
            item: tile.item,
            structure: tile.structure,
            core: self.is_core(tile.hex),
        }
    }

    fn index(&self, hex: HexCoord) -> Option<usize> {
        if !self.contains(hex) {
            return None;
        }
        self.tiles.binary_search_by_key(&hex, |tile| tile.hex).ok()
    }
}
