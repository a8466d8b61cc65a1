//! Where cards live.
//!
//! - `orientation`: board cells, facings and axes
//! - `position`: per-card positions with assignment identity
//! - `grid`: board outline geometry used for seating and movement

pub mod orientation;
pub mod position;
pub mod grid;

pub use orientation::{Axis, Coordinate, Direction, Orientation, RelativeDirection};
pub use position::{Destination, Place, Position, PositionId, Zone};
pub use grid::{Extremes, Grid};
