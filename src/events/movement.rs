//! Movement: cards changing place.
//!
//! Register snapshots every moving card's position identity. Resolve moves
//! only the cards still holding that identity; a card that went somewhere
//! else while the event was announced stays where it is.
//!
//! Cards that land in the shared buffer are remembered. Once the enclosing
//! event finishes, whichever of them are still in the buffer get deleted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tree::{Event, EventId, EventKind};
use crate::cards::{Card, CardId};
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process};
use crate::zones::{Destination, Place, PositionId};

/// Payload of a movement event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Destinations with the cards headed there, in order.
    pub to: Vec<(Destination, Vec<CardId>)>,
    /// Position identity of each card at register time.
    pub from: BTreeMap<CardId, Option<PositionId>>,
    /// Cards this event put into the buffer.
    pub buffer: Vec<CardId>,
}

impl Movement {
    #[must_use]
    pub fn new(to: Vec<(Destination, Vec<CardId>)>) -> Self {
        Self {
            to,
            ..Self::default()
        }
    }

    /// Every card named by any destination.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.to.iter().flat_map(|(_, cards)| cards.iter().copied())
    }
}

impl Event {
    #[must_use]
    pub fn movement(to: Vec<(Destination, Vec<CardId>)>, controller: Option<CardId>) -> Self {
        Event::new("movement", EventKind::Movement(Movement::new(to))).with_controller(controller)
    }
}

fn payload_mut(game: &mut Game, id: EventId) -> Option<&mut Movement> {
    match &mut game.events.get_mut(id)?.kind {
        EventKind::Movement(movement) => Some(movement),
        _ => None,
    }
}

pub(crate) fn register(game: &mut Game, _decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let cards: Vec<CardId> = game.events[id]
        .as_movement()
        .map(|movement| movement.cards().collect())
        .unwrap_or_default();
    let from = cards
        .into_iter()
        .map(|card| (card, game.state.card(card).and_then(Card::position_id)))
        .collect();

    if let Some(movement) = payload_mut(game, id) {
        movement.from = from;
    }
    Ok(true)
}

pub(crate) fn resolve(game: &mut Game, _decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let Some(movement) = game.events[id].as_movement().cloned() else {
        return Ok(false);
    };

    let mut result = false;
    let mut buffered = Vec::new();

    for (destination, cards) in &movement.to {
        if game.state.zone_list(&destination.place).is_none() {
            tracing::debug!(event = %id, place = ?destination.place, "destination has no zone, skipping");
            continue;
        }

        let mut moving = Vec::with_capacity(cards.len());
        let mut entering = Vec::new();
        for &card in cards {
            let snapshot = movement.from.get(&card).copied().flatten();
            let position = game.state.card(card).and_then(|c| c.position);
            if position.map(|p| p.id) != snapshot {
                tracing::trace!(event = %id, %card, "card moved since register, skipping");
                continue;
            }
            if position.map_or(true, |p| p.place != Place::Buffer) {
                entering.push(card);
            }
            if snapshot.is_some() {
                game.state.detach(card);
            }
            moving.push(card);
        }

        if moving.is_empty() {
            continue;
        }
        result = true;
        if game.state.attach(&moving, *destination) && destination.place == Place::Buffer {
            buffered.extend(entering);
        }
    }

    if !buffered.is_empty() {
        if let Some(movement) = payload_mut(game, id) {
            movement.buffer.extend(buffered.iter().copied());
        }
        if let Some(parent) = game.events[id].parent {
            game.events.push_after_finish(
                parent,
                Box::new(move |game, decisions, _| {
                    let leftover: Vec<CardId> = buffered
                        .into_iter()
                        .filter(|&card| {
                            game.state
                                .card(card)
                                .and_then(|c| c.position)
                                .is_some_and(|p| p.place == Place::Buffer)
                        })
                        .collect();
                    let event = game.delete(&leftover, None);
                    game.run_optional(decisions, event)
                }),
            );
        }
    }

    Ok(result)
}
