//! Event factories.
//!
//! Each factory builds an unstarted [`Event`]. Factories that can find
//! nothing to do return `None`; running `None` through
//! [`Game::run_optional`] reports `false`.
//!
//! The `*_by` variants act for one of a player's characters and return
//! `None` when the acting card is not one of that player's characters.

use crate::cards::CardId;
use crate::core::{ExclusiveZone, PlayerId};
use crate::events::{Battle, Event, Integrity};
use crate::zones::{Axis, Destination, Orientation, Place};

use super::Game;

impl Game {
    /// Group `cards` by owner, in order of first appearance. Unowned cards
    /// are dropped.
    fn by_owner(&self, cards: &[CardId]) -> Vec<(PlayerId, Vec<CardId>)> {
        let mut groups: Vec<(PlayerId, Vec<CardId>)> = Vec::new();
        for &card in cards {
            let Some(owner) = self.state.card(card).and_then(|c| c.owner) else {
                continue;
            };
            if self.state.player(owner).is_none() {
                continue;
            }
            match groups.iter_mut().find(|(player, _)| *player == owner) {
                Some((_, group)) => group.push(card),
                None => groups.push((owner, vec![card])),
            }
        }
        groups
    }

    fn to_owner_zone(
        &self,
        cards: &[CardId],
        zone: ExclusiveZone,
        index: Option<usize>,
        controller: Option<CardId>,
    ) -> Option<Event> {
        let to = self
            .by_owner(cards)
            .into_iter()
            .map(|(owner, group)| {
                let place = Place::exclusive(owner, zone);
                let destination = match index {
                    Some(index) => Destination::at_index(place, index),
                    None => Destination::new(place),
                };
                (destination, group)
            })
            .collect();
        self.movement(to, controller)
    }

    /// A movement event, unless no destination has any card.
    #[must_use]
    pub fn movement(&self, to: Vec<(Destination, Vec<CardId>)>, controller: Option<CardId>) -> Option<Event> {
        let to: Vec<_> = to.into_iter().filter(|(_, cards)| !cards.is_empty()).collect();
        (!to.is_empty()).then(|| Event::movement(to, controller))
    }

    /// Deal `amount` damage to `to`.
    #[must_use]
    pub fn damage(&self, to: CardId, amount: i64, source: Option<CardId>, controller: Option<CardId>) -> Event {
        let mut integrity = Integrity::new();
        integrity.push_damage(to, source, amount);
        Event::integrity(integrity, controller)
    }

    /// Send cards to their owners' recycle bins.
    #[must_use]
    pub fn delete(&self, cards: &[CardId], controller: Option<CardId>) -> Option<Event> {
        self.to_owner_zone(cards, ExclusiveZone::RecycleBin, None, controller)
    }

    /// Delete the given cards that are in a hand.
    #[must_use]
    pub fn discard(&self, cards: &[CardId], controller: Option<CardId>) -> Option<Event> {
        let in_hand: Vec<CardId> = cards
            .iter()
            .copied()
            .filter(|&card| {
                self.state.card(card).and_then(|c| c.position).is_some_and(|p| {
                    matches!(
                        p.place,
                        Place::Exclusive {
                            zone: ExclusiveZone::Hand,
                            ..
                        }
                    )
                })
            })
            .collect();
        self.delete(&in_hand, controller)
    }

    /// Put cards into their owners' hands.
    #[must_use]
    pub fn download(&self, cards: &[CardId], controller: Option<CardId>) -> Option<Event> {
        self.to_owner_zone(cards, ExclusiveZone::Hand, None, controller)
    }

    /// Each listed player draws that many cards from the top of their deck.
    #[must_use]
    pub fn draw(&self, counts: &[(PlayerId, usize)], controller: Option<CardId>) -> Option<Event> {
        let to = counts
            .iter()
            .filter_map(|&(player, count)| {
                let deck = &self.state.player(player)?.deck;
                let top = deck[deck.len().saturating_sub(count)..].to_vec();
                Some((Destination::exclusive(player, ExclusiveZone::Hand), top))
            })
            .collect();
        self.movement(to, controller)
    }

    /// Put cards at the bottom of their owners' decks.
    #[must_use]
    pub fn enqueue(&self, cards: &[CardId], controller: Option<CardId>) -> Option<Event> {
        self.to_owner_zone(cards, ExclusiveZone::Deck, Some(0), controller)
    }

    /// Show cards to every player.
    #[must_use]
    pub fn reveal(&self, cards: &[CardId], controller: Option<CardId>) -> Option<Event> {
        (!cards.is_empty()).then(|| Event::revelation(cards.to_vec(), controller))
    }

    /// Move cards into the shared buffer.
    #[must_use]
    pub fn stage(&self, cards: &[CardId], controller: Option<CardId>) -> Option<Event> {
        self.movement(vec![(Destination::buffer(), cards.to_vec())], controller)
    }

    // === Player-scoped ===

    fn acts_for(&self, player: PlayerId, card: CardId) -> bool {
        self.state.player(player).is_some_and(|p| p.has_character(card))
    }

    /// `attacker` attacks `defender` along `axis`.
    #[must_use]
    pub fn battle(&self, player: PlayerId, attacker: CardId, defender: CardId, axis: Axis) -> Option<Event> {
        self.acts_for(player, attacker)
            .then(|| Event::battle(Battle::new().with_attack(attacker, defender, axis), Some(attacker)))
    }

    /// `mover` moves to, or turns to face, `orientation`.
    #[must_use]
    pub fn move_character(&self, player: PlayerId, mover: CardId, orientation: Orientation) -> Option<Event> {
        self.acts_for(player, mover)
            .then(|| Event::movement(vec![(Destination::field(orientation), vec![mover])], Some(mover)))
    }

    /// `user` uses `card`, activating the card's usage effect.
    #[must_use]
    pub fn use_card(&self, player: PlayerId, user: CardId, card: CardId) -> Option<Event> {
        if !self.acts_for(player, user) {
            return None;
        }
        let effect = self.state.card(card).and_then(|c| c.usage.clone());
        Some(Event::usage(user, card, effect))
    }

    #[must_use]
    pub fn delete_by(&self, player: PlayerId, deleter: CardId, cards: &[CardId]) -> Option<Event> {
        self.acts_for(player, deleter)
            .then(|| self.delete(cards, Some(deleter)))
            .flatten()
    }

    #[must_use]
    pub fn discard_by(&self, player: PlayerId, discarder: CardId, cards: &[CardId]) -> Option<Event> {
        self.acts_for(player, discarder)
            .then(|| self.discard(cards, Some(discarder)))
            .flatten()
    }

    #[must_use]
    pub fn download_by(&self, player: PlayerId, downloader: CardId, cards: &[CardId]) -> Option<Event> {
        self.acts_for(player, downloader)
            .then(|| self.download(cards, Some(downloader)))
            .flatten()
    }

    #[must_use]
    pub fn draw_by(&self, player: PlayerId, drawer: CardId, count: usize) -> Option<Event> {
        self.acts_for(player, drawer)
            .then(|| self.draw(&[(player, count)], Some(drawer)))
            .flatten()
    }

    #[must_use]
    pub fn enqueue_by(&self, player: PlayerId, enqueuer: CardId, cards: &[CardId]) -> Option<Event> {
        self.acts_for(player, enqueuer)
            .then(|| self.enqueue(cards, Some(enqueuer)))
            .flatten()
    }

    #[must_use]
    pub fn reveal_by(&self, player: PlayerId, revealer: CardId, cards: &[CardId]) -> Option<Event> {
        self.acts_for(player, revealer)
            .then(|| self.reveal(cards, Some(revealer)))
            .flatten()
    }

    #[must_use]
    pub fn stage_by(&self, player: PlayerId, stager: CardId, cards: &[CardId]) -> Option<Event> {
        self.acts_for(player, stager)
            .then(|| self.stage(cards, Some(stager)))
            .flatten()
    }
}
