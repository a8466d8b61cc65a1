//! Players and per-player storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier, assigned in join order.
//!
//! ## PlayerMap
//!
//! `Vec`-backed per-player storage indexed by `PlayerId`. Players join one at a
//! time, so the map grows with [`PlayerMap::push`] rather than being sized up
//! front.
//!
//! ## Player
//!
//! A seat at the table: its exclusive zone lists (card identifiers, top of the
//! deck last), its character references and its integrity counter.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::CardId;

/// Player identifier supporting up to 255 players.
///
/// Player indices are 0-based and follow join order, not seating order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> Default for PlayerMap<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> PlayerMap<T> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return the identifier it was stored under.
    pub fn push(&mut self, value: T) -> PlayerId {
        assert!(self.data.len() < 255, "At most 255 players supported");
        let id = PlayerId(self.data.len() as u8);
        self.data.push(value);
        id
    }

    /// Number of players stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a player's data, if the player exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a player's data mutably, if the player exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in join order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in join order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Zones that belong to exactly one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExclusiveZone {
    Deck,
    ExtraDeck,
    Hand,
    RecycleBin,
}

impl ExclusiveZone {
    /// All exclusive zones, in setup order.
    pub const ALL: [ExclusiveZone; 4] = [
        ExclusiveZone::Deck,
        ExclusiveZone::ExtraDeck,
        ExclusiveZone::Hand,
        ExclusiveZone::RecycleBin,
    ];
}

/// Integrity a player starts with unless configured otherwise.
pub const DEFAULT_INTEGRITY: i64 = 16;

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name, unique within a game by convention only.
    pub name: String,

    /// Characters this player fields. The first one is the main character.
    pub characters: Vec<CardId>,

    /// Deck, top card last.
    pub deck: Vec<CardId>,

    pub extra_deck: Vec<CardId>,

    pub hand: Vec<CardId>,

    pub recycle_bin: Vec<CardId>,

    /// Life counter. Hand sizes above it are discarded at end phase.
    pub integrity: i64,
}

impl Player {
    /// Create a player with empty zones and the default integrity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            characters: Vec::new(),
            deck: Vec::new(),
            extra_deck: Vec::new(),
            hand: Vec::new(),
            recycle_bin: Vec::new(),
            integrity: DEFAULT_INTEGRITY,
        }
    }

    /// Builder: set the starting integrity.
    #[must_use]
    pub fn with_integrity(mut self, integrity: i64) -> Self {
        self.integrity = integrity;
        self
    }

    /// The main character, if one has been assigned.
    #[must_use]
    pub fn main_character(&self) -> Option<CardId> {
        self.characters.first().copied()
    }

    /// Whether `card` is one of this player's characters.
    #[must_use]
    pub fn has_character(&self, card: CardId) -> bool {
        self.characters.contains(&card)
    }

    /// The card list backing an exclusive zone.
    #[must_use]
    pub fn zone(&self, zone: ExclusiveZone) -> &Vec<CardId> {
        match zone {
            ExclusiveZone::Deck => &self.deck,
            ExclusiveZone::ExtraDeck => &self.extra_deck,
            ExclusiveZone::Hand => &self.hand,
            ExclusiveZone::RecycleBin => &self.recycle_bin,
        }
    }

    /// Mutable access to the card list backing an exclusive zone.
    pub fn zone_mut(&mut self, zone: ExclusiveZone) -> &mut Vec<CardId> {
        match zone {
            ExclusiveZone::Deck => &mut self.deck,
            ExclusiveZone::ExtraDeck => &mut self.extra_deck,
            ExclusiveZone::Hand => &mut self.hand,
            ExclusiveZone::RecycleBin => &mut self.recycle_bin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_map_push_assigns_join_order() {
        let mut map: PlayerMap<&str> = PlayerMap::new();
        assert!(map.is_empty());

        let alice = map.push("alice");
        let bob = map.push("bob");

        assert_eq!(alice, PlayerId::new(0));
        assert_eq!(bob, PlayerId::new(1));
        assert_eq!(map.len(), 2);
        assert_eq!(map[bob], "bob");
        assert_eq!(map.get(PlayerId::new(2)), None);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::new();
        let p0 = map.push(0);
        let p1 = map.push(0);

        map[p0] = 10;
        if let Some(value) = map.get_mut(p1) {
            *value = 20;
        }

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(p0, &10), (p1, &20)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let mut map: PlayerMap<i32> = PlayerMap::new();
        map.push(1);
        map.push(2);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_player_defaults() {
        let player = Player::new("alice");
        assert_eq!(player.integrity, DEFAULT_INTEGRITY);
        assert_eq!(player.main_character(), None);

        let player = player.with_integrity(3);
        assert_eq!(player.integrity, 3);
    }

    #[test]
    fn test_player_zone_access() {
        let mut player = Player::new("alice");
        player.zone_mut(ExclusiveZone::Hand).push(CardId::new(7));
        player.zone_mut(ExclusiveZone::Deck).push(CardId::new(8));

        assert_eq!(player.hand, vec![CardId::new(7)]);
        assert_eq!(player.zone(ExclusiveZone::Deck), &vec![CardId::new(8)]);
        assert!(player.zone(ExclusiveZone::RecycleBin).is_empty());
    }
}
