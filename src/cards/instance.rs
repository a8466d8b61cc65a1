//! Card instances - runtime card state.
//!
//! A `Card` is one physical card in a match. It starts as a bare name plus
//! whatever the setup code assigns (owner, position) and picks up its
//! definition values when the game starts.
//!
//! ## Battle geometry
//!
//! A character's facing decides what it contributes on each axis:
//!
//! | facing | on the y axis | on the x axis |
//! |---|---|---|
//! | north | attacks toward smaller y | defends |
//! | south | attacks toward larger y | defends |
//! | east | defends | attacks toward larger x |
//! | west | defends | attacks toward smaller x |
//!
//! A facing along the axis but away from the opponent contributes nothing.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, Color};
use crate::core::PlayerId;
use crate::zones::{Axis, Direction, Orientation, Position, PositionId, RelativeDirection};

/// Type tag that marks a card as a character.
pub const CHARACTER_TYPE: &str = "character";

/// Unique identifier for a card instance within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What a character brings to one side of an exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStat {
    pub attack: i64,
    pub defense: i64,
}

/// A card in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Definition name.
    pub name: String,
    pub attack: Option<i64>,
    pub defense: Option<i64>,
    pub range: Option<i64>,
    pub colors: Vec<Color>,
    pub types: Vec<String>,
    pub skills: Vec<String>,
    pub usage: Option<String>,
    /// Who the card returns to when deleted.
    pub owner: Option<PlayerId>,
    /// Who the card acts for.
    pub controller: Option<PlayerId>,
    pub position: Option<Position>,
    /// Created by the engine rather than supplied by a player.
    pub is_virtual: bool,
}

impl Card {
    /// Create a card with no owner and no position.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attack: None,
            defense: None,
            range: None,
            colors: Vec::new(),
            types: Vec::new(),
            skills: Vec::new(),
            usage: None,
            owner: None,
            controller: None,
            position: None,
            is_virtual: false,
        }
    }

    /// Copy definition values onto this card. Unset definition numbers leave
    /// the card's own values alone; lists are replaced wholesale.
    pub fn initialize(&mut self, definition: &CardDefinition) {
        self.name.clone_from(&definition.name);
        if definition.attack.is_some() {
            self.attack = definition.attack;
        }
        if definition.defense.is_some() {
            self.defense = definition.defense;
        }
        if definition.range.is_some() {
            self.range = definition.range;
        }
        if definition.usage.is_some() {
            self.usage.clone_from(&definition.usage);
        }
        self.colors.clone_from(&definition.colors);
        self.types.clone_from(&definition.types);
        self.skills.clone_from(&definition.skills);
    }

    #[must_use]
    pub fn attack_value(&self) -> i64 {
        self.attack.unwrap_or(1)
    }

    #[must_use]
    pub fn defense_value(&self) -> i64 {
        self.defense.unwrap_or(1)
    }

    #[must_use]
    pub fn range_value(&self) -> i64 {
        self.range.unwrap_or(1)
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.types.iter().any(|t| t == CHARACTER_TYPE)
    }

    /// Identity of the current position assignment.
    #[must_use]
    pub fn position_id(&self) -> Option<PositionId> {
        self.position.map(|p| p.id)
    }

    /// Board orientation, if the card is on the field.
    #[must_use]
    pub fn orientation(&self) -> Option<Orientation> {
        self.position.and_then(|p| p.place.orientation())
    }

    #[must_use]
    pub fn is_on_field(&self) -> bool {
        self.orientation().is_some()
    }

    /// Taxicab distance to another card. Only defined when both are on the field.
    #[must_use]
    pub fn distance_to(&self, other: &Card) -> Option<i64> {
        let (from, to) = (self.orientation()?, other.orientation()?);
        Some(from.coordinate().distance(to.coordinate()))
    }

    /// Whether `other` is within this card's range.
    #[must_use]
    pub fn is_in_range(&self, other: &Card) -> bool {
        self.distance_to(other)
            .is_some_and(|distance| distance <= self.range_value())
    }

    /// This card's contribution when attacking `defender` along `axis`.
    #[must_use]
    pub fn attacker_stat(&self, defender: &Card, axis: Axis) -> BattleStat {
        let (Some(own), Some(other)) = (self.orientation(), defender.orientation()) else {
            return BattleStat::default();
        };
        let attacking = BattleStat {
            attack: self.attack_value(),
            defense: 0,
        };
        let defending = BattleStat {
            attack: 0,
            defense: self.defense_value(),
        };

        match (axis, own.direction) {
            (Axis::Y, Direction::North) if other.y < own.y => attacking,
            (Axis::Y, Direction::South) if other.y > own.y => attacking,
            (Axis::Y, Direction::East | Direction::West) => defending,
            (Axis::X, Direction::North | Direction::South) => defending,
            (Axis::X, Direction::East) if other.x > own.x => attacking,
            (Axis::X, Direction::West) if other.x < own.x => attacking,
            _ => BattleStat::default(),
        }
    }

    /// Both sides of an exchange with `defender` along `axis`: this card as
    /// attacker, then the defender answering back.
    #[must_use]
    pub fn battle_stats(&self, defender: &Card, axis: Axis) -> (BattleStat, BattleStat) {
        (
            self.attacker_stat(defender, axis),
            defender.attacker_stat(self, axis),
        )
    }

    /// Which side of `other` this card stands on, judged by `other`'s facing.
    /// Diagonals have no relative direction.
    #[must_use]
    pub fn relative_direction_to(&self, other: &Card) -> Option<RelativeDirection> {
        let (from, to) = (self.orientation()?, other.orientation()?);
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx.abs() == dy.abs() {
            return None;
        }
        let sideways = dx.abs() > dy.abs();

        use RelativeDirection::{Back, Front, Left, Right};
        let direction = match to.direction {
            Direction::North if sideways => if dx > 0 { Left } else { Right },
            Direction::North => if dy > 0 { Front } else { Back },
            Direction::East if sideways => if dx > 0 { Back } else { Front },
            Direction::East => if dy > 0 { Left } else { Right },
            Direction::South if sideways => if dx > 0 { Right } else { Left },
            Direction::South => if dy > 0 { Back } else { Front },
            Direction::West if sideways => if dx > 0 { Front } else { Back },
            Direction::West => if dy > 0 { Right } else { Left },
        };
        Some(direction)
    }
}
