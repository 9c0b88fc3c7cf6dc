//! Axial hex coordinates and the geometric walks built on top of them.

use serde::{Deserialize, Serialize};

/// Six neighbour directions of a hex, listed counter-clockwise from east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    /// Increasing `q`, constant `r`.
    East,
    /// Increasing `q`, decreasing `r`.
    NorthEast,
    /// Constant `q`, decreasing `r`.
    NorthWest,
    /// Decreasing `q`, constant `r`.
    West,
    /// Decreasing `q`, increasing `r`.
    SouthWest,
    /// Constant `q`, increasing `r`.
    SouthEast,
}

impl HexDirection {
    /// Every direction in counter-clockwise order starting from east.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    /// Axial offset applied when stepping one hex in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (0, -1),
            Self::West => (-1, 0),
            Self::SouthWest => (-1, 1),
            Self::SouthEast => (0, 1),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::NorthEast => Self::SouthWest,
            Self::NorthWest => Self::SouthEast,
            Self::West => Self::East,
            Self::SouthWest => Self::NorthEast,
            Self::SouthEast => Self::NorthWest,
        }
    }

    /// Direction rotated one step counter-clockwise.
    #[must_use]
    pub const fn rotated_left(self) -> Self {
        match self {
            Self::East => Self::NorthEast,
            Self::NorthEast => Self::NorthWest,
            Self::NorthWest => Self::West,
            Self::West => Self::SouthWest,
            Self::SouthWest => Self::SouthEast,
            Self::SouthEast => Self::East,
        }
    }

    /// Direction rotated one step clockwise.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        match self {
            Self::East => Self::SouthEast,
            Self::NorthEast => Self::East,
            Self::NorthWest => Self::NorthEast,
            Self::West => Self::NorthWest,
            Self::SouthWest => Self::West,
            Self::SouthEast => Self::SouthWest,
        }
    }
}

/// Location of a single hex expressed in axial coordinates.
///
/// Fields are declared row first so the derived ordering is row-major: hexes
/// sort by `r`, then by `q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    r: i32,
    q: i32,
}

impl HexCoord {
    /// The board origin, which is also the centre of the core area.
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { r, q }
    }

    /// Axial column.
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.q
    }

    /// Axial row.
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Implicit third cube coordinate.
    #[must_use]
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Number of steps separating two hexes.
    #[must_use]
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = self.q.abs_diff(other.q);
        let dr = self.r.abs_diff(other.r);
        let ds = self.s().abs_diff(other.s());
        (dq + dr + ds) / 2
    }

    /// Distance from the board origin.
    #[must_use]
    pub fn length(self) -> u32 {
        self.distance(Self::ORIGIN)
    }

    /// Hex adjacent to this one in the given direction.
    #[must_use]
    pub const fn neighbor(self, direction: HexDirection) -> Self {
        self.offset(direction, 1)
    }

    /// Hex reached by walking `steps` hexes in the given direction.
    #[must_use]
    pub const fn offset(self, direction: HexDirection, steps: i32) -> Self {
        let (dq, dr) = direction.offset();
        Self::new(self.q + dq * steps, self.r + dr * steps)
    }

    /// All six adjacent hexes in direction order.
    #[must_use]
    pub fn neighbors(self) -> [HexCoord; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction))
    }

    /// Hexes exactly `radius` steps away, walked counter-clockwise.
    ///
    /// A radius of zero yields the hex itself.
    #[must_use]
    pub fn ring(self, radius: u32) -> Vec<HexCoord> {
        if radius == 0 {
            return vec![self];
        }

        let steps = i32::try_from(radius).unwrap_or(i32::MAX);
        let mut ring = Vec::with_capacity(6 * radius as usize);
        let mut cursor = self.offset(HexDirection::SouthWest, steps);
        for direction in HexDirection::ALL {
            for _ in 0..radius {
                ring.push(cursor);
                cursor = cursor.neighbor(direction);
            }
        }
        ring
    }

    /// Hexes within `radius` steps ordered centre first, then ring by ring.
    #[must_use]
    pub fn spiral(self, radius: u32) -> Vec<HexCoord> {
        let mut hexes = vec![self];
        for ring in 1..=radius {
            hexes.extend(self.ring(ring));
        }
        hexes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = HexCoord::new(2, -1);
        let b = HexCoord::new(-1, 3);
        assert_eq!(a.distance(b), 4);
        assert_eq!(b.distance(a), 4);
    }

    #[test]
    fn ring_has_six_hexes_per_step_at_exact_distance() {
        let centre = HexCoord::new(1, 1);
        for radius in 1..4 {
            let ring = centre.ring(radius);
            assert_eq!(ring.len(), 6 * radius as usize);
            assert!(ring.iter().all(|hex| hex.distance(centre) == radius));
        }
    }

    #[test]
    fn spiral_counts_centered_hexagonal_numbers() {
        assert_eq!(HexCoord::ORIGIN.spiral(0).len(), 1);
        assert_eq!(HexCoord::ORIGIN.spiral(2).len(), 19);
    }

    #[test]
    fn ordering_is_row_major() {
        let mut hexes = vec![
            HexCoord::new(1, 0),
            HexCoord::new(0, 1),
            HexCoord::new(-1, 0),
        ];
        hexes.sort();
        assert_eq!(
            hexes,
            vec![
                HexCoord::new(-1, 0),
                HexCoord::new(1, 0),
                HexCoord::new(0, 1)
            ]
        );
    }

    #[test]
    fn rotations_are_inverse() {
        for direction in HexDirection::ALL {
            assert_eq!(direction.rotated_left().rotated_right(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }
}
