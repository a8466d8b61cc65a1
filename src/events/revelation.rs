//! Revelation: showing cards to every player.
//!
//! Players are notified through a request with a zero-size field whose
//! options are the revealed cards; there is nothing to choose.

use serde::{Deserialize, Serialize};

use super::tree::{Event, EventId, EventKind};
use crate::cards::{Card, CardId};
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process, Request, RequestBatch, RequestField};
use crate::zones::PositionId;

/// Request field carrying revealed cards.
pub const REVELATIONS: &str = "revelations";

/// Payload of a revelation event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revelation {
    pub cards: Vec<CardId>,
    /// Position identity of each card at register time.
    pub pending: Vec<(CardId, Option<PositionId>)>,
    /// Cards still in place at resolve time.
    pub revealed: Vec<CardId>,
}

impl Revelation {
    #[must_use]
    pub fn new(cards: Vec<CardId>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }
}

impl Event {
    #[must_use]
    pub fn revelation(cards: Vec<CardId>, controller: Option<CardId>) -> Self {
        Event::new("revelation", EventKind::Revelation(Revelation::new(cards))).with_controller(controller)
    }
}

fn payload_mut(game: &mut Game, id: EventId) -> Option<&mut Revelation> {
    match &mut game.events.get_mut(id)?.kind {
        EventKind::Revelation(revelation) => Some(revelation),
        _ => None,
    }
}

pub(crate) fn register(game: &mut Game, _decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let cards = game.events[id]
        .as_revelation()
        .map(|r| r.cards.clone())
        .unwrap_or_default();
    let pending = cards
        .into_iter()
        .map(|card| (card, game.state.card(card).and_then(Card::position_id)))
        .collect();

    if let Some(revelation) = payload_mut(game, id) {
        revelation.pending = pending;
    }
    Ok(true)
}

pub(crate) fn resolve(game: &mut Game, decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let pending = game.events[id]
        .as_revelation()
        .map(|r| r.pending.clone())
        .unwrap_or_default();
    let revealed: Vec<CardId> = pending
        .into_iter()
        .filter(|&(card, position)| game.state.card(card).and_then(Card::position_id) == position)
        .map(|(card, _)| card)
        .collect();

    if let Some(revelation) = payload_mut(game, id) {
        revelation.revealed = revealed.clone();
    }

    let mut batch = RequestBatch::new();
    for &player in &game.state.seating {
        batch.push(
            player,
            Request::new().with_field(
                REVELATIONS,
                RequestField::new(0, 0, revealed.iter().copied()).with_default(Vec::new()),
            ),
        );
    }
    game.request(decisions, &batch)?;

    Ok(!revealed.is_empty())
}
