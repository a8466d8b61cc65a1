//! Board coordinates and facings.

use serde::{Deserialize, Serialize};

/// A cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Taxicab distance to another cell.
    #[must_use]
    pub fn distance(self, other: Coordinate) -> i64 {
        i64::from((self.x - other.x).abs()) + i64::from((self.y - other.y).abs())
    }
}

/// Absolute facing of a character on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All facings in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Facing relative to another character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeDirection {
    Front,
    Back,
    Left,
    Right,
}

/// Board axis an attack travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// A cell plus a facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orientation {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl Orientation {
    #[must_use]
    pub const fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    /// Orientation at `coordinate` facing `direction`.
    #[must_use]
    pub const fn at(coordinate: Coordinate, direction: Direction) -> Self {
        Self::new(coordinate.x, coordinate.y, direction)
    }

    #[must_use]
    pub const fn coordinate(self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}
