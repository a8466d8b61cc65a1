//! Card positions.
//!
//! A [`Position`] is where a card is. It carries a [`PositionId`] that is
//! allocated fresh whenever the card enters a different zone, so two
//! positions compare equal only when they are the *same assignment*. Events
//! snapshot the id when they register and compare it when they resolve: a
//! card whose id changed in between has moved and is left alone.
//!
//! Moving within the field, or within a shared one-dimensional zone, keeps
//! the id. Only the coordinates and facing change in place.

use serde::{Deserialize, Serialize};

use super::orientation::Orientation;
use crate::core::{ExclusiveZone, PlayerId};

/// Identity of one position assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionId(pub u64);

impl PositionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.0)
    }
}

/// Zone kinds, without per-player or per-cell detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Field,
    Buffer,
    Fragment,
    Deck,
    ExtraDeck,
    Hand,
    RecycleBin,
}

impl From<ExclusiveZone> for Zone {
    fn from(zone: ExclusiveZone) -> Self {
        match zone {
            ExclusiveZone::Deck => Zone::Deck,
            ExclusiveZone::ExtraDeck => Zone::ExtraDeck,
            ExclusiveZone::Hand => Zone::Hand,
            ExclusiveZone::RecycleBin => Zone::RecycleBin,
        }
    }
}

/// Where a card sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Place {
    /// On the board, at a cell with a facing.
    Field(Orientation),
    /// Shared transient zone for cards mid-resolution.
    Buffer,
    /// Shared zone with no board presence.
    Fragment,
    /// A zone owned by one player.
    Exclusive {
        player: PlayerId,
        zone: ExclusiveZone,
    },
}

impl Place {
    /// Shorthand for a player's exclusive zone.
    #[must_use]
    pub const fn exclusive(player: PlayerId, zone: ExclusiveZone) -> Self {
        Place::Exclusive { player, zone }
    }

    /// The zone kind of this place.
    #[must_use]
    pub fn zone(&self) -> Zone {
        match self {
            Place::Field(_) => Zone::Field,
            Place::Buffer => Zone::Buffer,
            Place::Fragment => Zone::Fragment,
            Place::Exclusive { zone, .. } => (*zone).into(),
        }
    }

    /// The board orientation, for field places.
    #[must_use]
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Place::Field(orientation) => Some(*orientation),
            _ => None,
        }
    }

    /// Whether moving from `self` to `to` keeps the position identity.
    #[must_use]
    pub fn keeps_identity(&self, to: &Place) -> bool {
        match (self, to) {
            (Place::Field(_), Place::Field(_))
            | (Place::Buffer, Place::Buffer)
            | (Place::Fragment, Place::Fragment) => true,
            (
                Place::Exclusive { player, zone },
                Place::Exclusive {
                    player: to_player,
                    zone: to_zone,
                },
            ) => player == to_player && zone == to_zone,
            _ => false,
        }
    }
}

/// A card's current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub place: Place,
}

impl Position {
    #[must_use]
    pub fn zone(&self) -> Zone {
        self.place.zone()
    }

    #[must_use]
    pub fn is_on_field(&self) -> bool {
        matches!(self.place, Place::Field(_))
    }
}

/// Target of a movement: a place plus an optional insertion index into the
/// zone list. Without an index cards are appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    pub place: Place,
    pub index: Option<usize>,
}

impl Destination {
    /// Append to the end of `place`'s list.
    #[must_use]
    pub const fn new(place: Place) -> Self {
        Self { place, index: None }
    }

    /// Insert at `index` in `place`'s list.
    #[must_use]
    pub const fn at_index(place: Place, index: usize) -> Self {
        Self {
            place,
            index: Some(index),
        }
    }

    #[must_use]
    pub const fn field(orientation: Orientation) -> Self {
        Self::new(Place::Field(orientation))
    }

    #[must_use]
    pub const fn buffer() -> Self {
        Self::new(Place::Buffer)
    }

    #[must_use]
    pub const fn exclusive(player: PlayerId, zone: ExclusiveZone) -> Self {
        Self::new(Place::exclusive(player, zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::Direction;

    #[test]
    fn test_identity_rules() {
        let here = Place::Field(Orientation::new(0, 0, Direction::North));
        let there = Place::Field(Orientation::new(3, 1, Direction::East));
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert!(here.keeps_identity(&there));
        assert!(Place::Buffer.keeps_identity(&Place::Buffer));
        assert!(!Place::Buffer.keeps_identity(&Place::Fragment));
        assert!(!here.keeps_identity(&Place::Buffer));
        assert!(Place::exclusive(p0, ExclusiveZone::Hand)
            .keeps_identity(&Place::exclusive(p0, ExclusiveZone::Hand)));
        assert!(!Place::exclusive(p0, ExclusiveZone::Hand)
            .keeps_identity(&Place::exclusive(p1, ExclusiveZone::Hand)));
        assert!(!Place::exclusive(p0, ExclusiveZone::Hand)
            .keeps_identity(&Place::exclusive(p0, ExclusiveZone::Deck)));
    }

    #[test]
    fn test_zone_of_place() {
        let p0 = PlayerId::new(0);
        assert_eq!(Place::exclusive(p0, ExclusiveZone::RecycleBin).zone(), Zone::RecycleBin);
        assert_eq!(Place::Fragment.zone(), Zone::Fragment);
        assert_eq!(
            Place::Field(Orientation::new(1, 2, Direction::South)).zone(),
            Zone::Field
        );
    }
}
