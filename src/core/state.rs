//! Game state: players, cards and the zone lists that hold them.
//!
//! ## Zone lists
//!
//! Every zone is an ordered list of card identifiers. Shared zones (field,
//! buffer, fragment) live on `State`; exclusive zones live on each
//! [`Player`]. A card's [`Position`] names the list it is in, and the
//! helpers here keep the two in step.
//!
//! ## Seating
//!
//! `seating` is the turn order. It starts in join order and is shuffled
//! once when the game is prepared.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::player::{ExclusiveZone, Player, PlayerId, PlayerMap};
use crate::cards::{Card, CardId};
use crate::zones::{Coordinate, Destination, Grid, Place, Position, PositionId};

/// Complete mutable state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Players in join order.
    pub players: PlayerMap<Player>,

    /// Turn order.
    pub seating: Vec<PlayerId>,

    /// Every card in the game, in creation order.
    pub cards: BTreeMap<CardId, Card>,

    pub field: Vec<CardId>,
    pub buffer: Vec<CardId>,
    pub fragment: Vec<CardId>,

    pub grid: Grid,
    pub seed: u64,

    next_card: u32,
    next_position: u64,
}

impl State {
    /// Create an empty state on `grid`.
    #[must_use]
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self {
            players: PlayerMap::new(),
            seating: Vec::new(),
            cards: BTreeMap::new(),
            field: Vec::new(),
            buffer: Vec::new(),
            fragment: Vec::new(),
            grid,
            seed,
            next_card: 0,
            next_position: 0,
        }
    }

    // === Players ===

    /// Seat a player at the end of the current seating.
    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = self.players.push(player);
        self.seating.push(id);
        id
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    /// Seating rotated so that `first` leads. Falls back to plain seating
    /// order when `first` is not seated.
    #[must_use]
    pub fn seating_from(&self, first: PlayerId) -> Vec<PlayerId> {
        let start = self.seating.iter().position(|&p| p == first).unwrap_or(0);
        self.seating[start..]
            .iter()
            .chain(&self.seating[..start])
            .copied()
            .collect()
    }

    /// The player seated after `player`, wrapping around.
    #[must_use]
    pub fn next_player(&self, player: PlayerId) -> Option<PlayerId> {
        let index = self.seating.iter().position(|&p| p == player)?;
        self.seating.get((index + 1) % self.seating.len()).copied()
    }

    /// The player seated before `player`, wrapping around.
    #[must_use]
    pub fn previous_player(&self, player: PlayerId) -> Option<PlayerId> {
        let index = self.seating.iter().position(|&p| p == player)?;
        let len = self.seating.len();
        self.seating.get((index + len - 1) % len).copied()
    }

    // === Cards ===

    /// Create a card with a fresh identifier. It has no position until placed.
    pub fn create_card(&mut self, name: impl Into<String>) -> CardId {
        let id = CardId::new(self.next_card);
        self.next_card += 1;
        self.cards.insert(id, Card::new(id, name));
        id
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    /// Resolve identifiers to cards, skipping unknown ones.
    #[must_use]
    pub fn cards_of(&self, ids: &[CardId]) -> Vec<&Card> {
        ids.iter().filter_map(|id| self.cards.get(id)).collect()
    }

    /// Whether any field card stands on `coordinate`.
    #[must_use]
    pub fn is_occupied(&self, coordinate: Coordinate) -> bool {
        self.cards_of(&self.field)
            .iter()
            .any(|card| card.orientation().is_some_and(|o| o.coordinate() == coordinate))
    }

    // === Zone lists ===

    /// The list backing `place`, if its owner exists.
    #[must_use]
    pub fn zone_list(&self, place: &Place) -> Option<&Vec<CardId>> {
        match place {
            Place::Field(_) => Some(&self.field),
            Place::Buffer => Some(&self.buffer),
            Place::Fragment => Some(&self.fragment),
            Place::Exclusive { player, zone } => self.players.get(*player).map(|p| p.zone(*zone)),
        }
    }

    /// Mutable list backing `place`, if its owner exists.
    pub fn zone_list_mut(&mut self, place: &Place) -> Option<&mut Vec<CardId>> {
        match place {
            Place::Field(_) => Some(&mut self.field),
            Place::Buffer => Some(&mut self.buffer),
            Place::Fragment => Some(&mut self.fragment),
            Place::Exclusive { player, zone } => {
                self.players.get_mut(*player).map(|p| p.zone_mut(*zone))
            }
        }
    }

    /// A position assignment with a fresh identity.
    pub fn allocate_position(&mut self, place: Place) -> Position {
        let id = PositionId::new(self.next_position);
        self.next_position += 1;
        Position { id, place }
    }

    /// Point `card` at `place`, keeping its position identity when the move
    /// stays within the same zone.
    pub fn reposition(&mut self, card: CardId, place: Place) {
        let keeps = self
            .card(card)
            .and_then(|c| c.position)
            .filter(|p| p.place.keeps_identity(&place));
        let position = match keeps {
            Some(current) => Position { place, ..current },
            None => self.allocate_position(place),
        };
        if let Some(card) = self.card_mut(card) {
            card.position = Some(position);
        }
    }

    /// Remove `card` from the list its current position names.
    pub fn detach(&mut self, card: CardId) {
        let Some(place) = self.card(card).and_then(|c| c.position).map(|p| p.place) else {
            return;
        };
        if let Some(list) = self.zone_list_mut(&place) {
            list.retain(|&id| id != card);
        }
    }

    /// Reposition `cards` and insert them, in order, into the destination
    /// list. Nothing happens when the destination owner does not exist.
    pub fn attach(&mut self, cards: &[CardId], destination: Destination) -> bool {
        if self.zone_list(&destination.place).is_none() {
            return false;
        }
        for &card in cards {
            self.reposition(card, destination.place);
        }
        let Some(list) = self.zone_list_mut(&destination.place) else {
            return false;
        };
        match destination.index {
            Some(index) => {
                let index = index.min(list.len());
                list.splice(index..index, cards.iter().copied());
            }
            None => list.extend_from_slice(cards),
        }
        true
    }

    /// Move a single card immediately, outside of any event.
    ///
    /// Used while setting up a match; during play, cards move through
    /// movement events so that other events can observe the change.
    pub fn place_card(&mut self, card: CardId, destination: Destination) -> bool {
        if self.zone_list(&destination.place).is_none() {
            return false;
        }
        self.detach(card);
        self.attach(&[card], destination)
    }

    /// Give every card in a player's exclusive zone a fresh position there,
    /// and make the player its owner and controller.
    pub fn claim_zone(&mut self, player: PlayerId, zone: ExclusiveZone) {
        let ids = self
            .player(player)
            .map(|p| p.zone(zone).clone())
            .unwrap_or_default();
        for id in ids {
            let position = self.allocate_position(Place::exclusive(player, zone));
            if let Some(card) = self.card_mut(id) {
                card.owner = Some(player);
                card.controller = Some(player);
                card.position = Some(position);
            }
        }
    }
}
