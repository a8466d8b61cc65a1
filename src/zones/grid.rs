//! Board geometry.
//!
//! The board is one or more rectilinear polygons given by their corner
//! cells. The first polygon is the main boundary: seats are spread along its
//! perimeter and movement legality is tested against it.

use serde::{Deserialize, Serialize};

use super::orientation::{Coordinate, Direction};

/// Bounding box of one boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extremes {
    pub minimum_x: i32,
    pub maximum_x: i32,
    pub minimum_y: i32,
    pub maximum_y: i32,
}

impl Extremes {
    fn of(coordinates: &[Coordinate]) -> Self {
        let Some(first) = coordinates.first() else {
            return Self::default();
        };
        coordinates.iter().skip(1).fold(
            Self {
                minimum_x: first.x,
                maximum_x: first.x,
                minimum_y: first.y,
                maximum_y: first.y,
            },
            |extremes, c| Self {
                minimum_x: extremes.minimum_x.min(c.x),
                maximum_x: extremes.maximum_x.max(c.x),
                minimum_y: extremes.minimum_y.min(c.y),
                maximum_y: extremes.maximum_y.max(c.y),
            },
        )
    }
}

/// The playing surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    boundaries: Vec<Vec<Coordinate>>,
    extremes: Vec<Extremes>,
}

impl Grid {
    /// Build a grid from boundary outlines.
    #[must_use]
    pub fn new(boundaries: Vec<Vec<Coordinate>>) -> Self {
        let extremes = boundaries.iter().map(|b| Extremes::of(b)).collect();
        Self {
            boundaries,
            extremes,
        }
    }

    #[must_use]
    pub fn boundaries(&self) -> &[Vec<Coordinate>] {
        &self.boundaries
    }

    /// The first boundary, if any.
    #[must_use]
    pub fn main_boundary(&self) -> Option<&[Coordinate]> {
        self.boundaries.first().map(Vec::as_slice)
    }

    #[must_use]
    pub fn main_extremes(&self) -> Option<Extremes> {
        self.extremes.first().copied()
    }

    /// Whether `coordinate` lies inside the main boundary. Edges count as inside.
    #[must_use]
    pub fn is_inside(&self, coordinate: Coordinate) -> bool {
        self.is_inside_boundary(coordinate, 0)
    }

    /// Ray-casting test against one boundary.
    ///
    /// Only axis-aligned edges are considered: points on an edge are inside,
    /// and vertical edges to the right of the point are counted as crossings.
    #[must_use]
    pub fn is_inside_boundary(&self, Coordinate { x, y }: Coordinate, boundary: usize) -> bool {
        let Some(boundary) = self.boundaries.get(boundary) else {
            return false;
        };
        let mut crossings = 0;

        for (index, first) in boundary.iter().enumerate() {
            let second = boundary[(index + boundary.len() - 1) % boundary.len()];

            if first.y == second.y {
                if y == first.y && x >= first.x.min(second.x) && x <= first.x.max(second.x) {
                    return true;
                }
                continue;
            }

            if first.x == second.x {
                if x == first.x && y >= first.y.min(second.y) && y <= first.y.max(second.y) {
                    return true;
                }
                if x < first.x && (first.y > y) != (second.y > y) {
                    crossings += 1;
                }
            }
        }

        crossings % 2 == 1
    }

    /// Starting cell for seat `seat` of `seats`, spaced evenly along the main
    /// boundary's perimeter beginning at its first corner.
    #[must_use]
    pub fn initial_coordinate(&self, seat: usize, seats: usize) -> Coordinate {
        let Some(boundary) = self.main_boundary().filter(|b| !b.is_empty()) else {
            return Coordinate::new(0, 0);
        };
        if seats <= 1 {
            return boundary[0];
        }

        let segment = |index: usize| {
            let current = boundary[index % boundary.len()];
            let next = boundary[(index + 1) % boundary.len()];
            (current, next, f64::from((next.x - current.x).abs() + (next.y - current.y).abs()))
        };
        let perimeter: f64 = (0..boundary.len()).map(|i| segment(i).2).sum();
        if perimeter == 0.0 {
            return boundary[0];
        }

        let step = perimeter / seats as f64;
        let target = step * seat as f64;
        let mut walked = 0.0;
        let mut index = 0;

        loop {
            let (current, next, length) = segment(index);
            if walked + length < target {
                walked += length;
                index += 1;
                continue;
            }
            let t = if length == 0.0 { 0.0 } else { (target - walked) / length };
            return Coordinate::new(
                round_half_up(f64::from(current.x) + t * f64::from(next.x - current.x)),
                round_half_up(f64::from(current.y) + t * f64::from(next.y - current.y)),
            );
        }
    }

    /// Facing for a character starting at `coordinate`: toward the board
    /// centre along the axis perpendicular to the main boundary's first edge.
    #[must_use]
    pub fn initial_direction(&self, coordinate: Coordinate) -> Direction {
        let (Some(boundary), Some(extremes)) = (self.main_boundary(), self.main_extremes()) else {
            return Direction::North;
        };
        let first = boundary.first().copied().unwrap_or(Coordinate::new(0, 0));
        let second = boundary.get(1).copied().unwrap_or(Coordinate::new(0, 0));
        let middle_y = f64::from(extremes.minimum_y + extremes.maximum_y) / 2.0;
        let middle_x = f64::from(extremes.minimum_x + extremes.maximum_x) / 2.0;
        let (x, y) = (f64::from(coordinate.x), f64::from(coordinate.y));

        let x_difference = second.x - first.x;
        if x_difference > 0 {
            return if y > middle_y { Direction::South } else { Direction::North };
        }
        if x_difference < 0 {
            return if y < middle_y { Direction::North } else { Direction::South };
        }

        let y_difference = second.y - first.y;
        if y_difference > 0 {
            return if x < middle_x { Direction::West } else { Direction::East };
        }
        if y_difference < 0 {
            return if x > middle_x { Direction::East } else { Direction::West };
        }
        Direction::North
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
