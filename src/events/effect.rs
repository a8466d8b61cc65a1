//! Effect activation.
//!
//! Register runs the activation pipeline:
//!
//! 1. pre-input: for a card usage, stage the used card into the buffer; then
//!    pick targets slot by slot and pay the effect's byte cost;
//! 2. the effect's `input` hook;
//! 3. post-input: a used card must have reached the buffer, and its buffer
//!    position is remembered.
//!
//! Resolve runs the `output` hook. For a card usage, pre-resolve first checks
//! that the used card still holds the buffer position from step 3; if it
//! left, the whole activation terminates without resolving.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tree::{Event, EventId, EventKind};
use crate::cards::{Card, CardId};
use crate::core::{PlayerId, State};
use crate::effects::{Byte, Effect, EffectHook, TargetQuery};
use crate::error::Interrupted;
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process, Request, RequestField};
use crate::zones::{Place, PositionId};

/// Request field for picked cards, used by targeting and payment.
pub const CARDS: &str = "cards";

/// The card behind a usage activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub card: CardId,
    /// Buffer position of the card once staged.
    pub position: Option<PositionId>,
}

/// Payload of an effect event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub effect: Option<String>,
    pub usage: Option<Usage>,
    /// Chosen cards, one list per target slot.
    pub targets: Vec<Vec<CardId>>,
    /// Position identity of each chosen target when it was picked.
    pub positions: BTreeMap<CardId, PositionId>,
}

impl Activation {
    /// Whether `target` was chosen and has not moved since.
    #[must_use]
    pub fn is_available(&self, state: &State, target: CardId) -> bool {
        self.targets.iter().any(|group| group.contains(&target))
            && state.card(target).and_then(Card::position_id) == self.positions.get(&target).copied()
    }

    /// The used card, for usage activations.
    #[must_use]
    pub fn source(&self) -> Option<CardId> {
        self.usage.map(|u| u.card)
    }
}

impl Event {
    /// `controller` activates the named effect.
    #[must_use]
    pub fn effect(controller: CardId, effect: Option<String>) -> Self {
        Event::new(
            "effect",
            EventKind::Effect(Activation {
                effect,
                ..Activation::default()
            }),
        )
        .with_controller(Some(controller))
    }

    /// `user` uses `card`, activating its usage effect.
    #[must_use]
    pub fn usage(user: CardId, card: CardId, effect: Option<String>) -> Self {
        Event::new(
            "effect",
            EventKind::Effect(Activation {
                effect,
                usage: Some(Usage { card, position: None }),
                ..Activation::default()
            }),
        )
        .with_controller(Some(user))
    }
}

fn payload(game: &Game, id: EventId) -> Option<&Activation> {
    game.events.get(id)?.as_effect()
}

fn payload_mut(game: &mut Game, id: EventId) -> Option<&mut Activation> {
    match &mut game.events.get_mut(id)?.kind {
        EventKind::Effect(activation) => Some(activation),
        _ => None,
    }
}

pub(crate) fn register(game: &mut Game, decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    if !pre_input(game, decisions, id)? {
        return Ok(false);
    }
    if !run_hook(game, decisions, id, |effect| effect.input.clone())? {
        return Ok(false);
    }
    Ok(post_input(game, id))
}

pub(crate) fn pre_resolve(game: &mut Game, _decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let Some(usage) = payload(game, id).and_then(|a| a.usage) else {
        return Ok(true);
    };
    let current = game.state.card(usage.card).and_then(Card::position_id);
    Ok(current.is_some() && current == usage.position)
}

pub(crate) fn resolve(game: &mut Game, decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    run_hook(game, decisions, id, |effect| effect.output.clone())
}

fn run_hook(
    game: &mut Game,
    decisions: &mut dyn DecisionChannel,
    id: EventId,
    select: impl Fn(&Effect) -> Option<EffectHook>,
) -> Process {
    let hook = payload(game, id)
        .and_then(|a| a.effect.as_deref())
        .and_then(|name| game.effects.get(name))
        .and_then(select);
    match hook {
        Some(hook) => hook(game, decisions, id),
        None => Ok(true),
    }
}

fn pre_input(game: &mut Game, decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let controller = game.events[id].controller;
    let Some(activation) = payload(game, id).cloned() else {
        return Ok(false);
    };

    if let Some(usage) = activation.usage {
        let (Some(controller), Some(player)) = (controller, game.event_player(id)) else {
            return Ok(false);
        };
        let event = game.stage_by(player, controller, &[usage.card]);
        if !game.run_optional(decisions, event)? {
            return Ok(false);
        }
    }

    let (Some(controller), Some(effect)) = (controller, activation.effect) else {
        return Ok(true);
    };
    let Some(player) = game.event_player(id) else {
        return Ok(false);
    };
    if !select_targets(game, decisions, id, player, controller)? {
        return Ok(false);
    }
    let bytes = game
        .effects
        .get(&effect)
        .and_then(|e| e.bytes.clone())
        .unwrap_or_default();
    game.consume(decisions, player, controller, &bytes)
}

fn post_input(game: &mut Game, id: EventId) -> bool {
    let Some(usage) = payload(game, id).and_then(|a| a.usage) else {
        return true;
    };
    let Some(position) = game.state.card(usage.card).and_then(|c| c.position) else {
        return false;
    };
    if position.place != Place::Buffer {
        return false;
    }
    if let Some(Usage { position: slot, .. }) = payload_mut(game, id).and_then(|a| a.usage.as_mut()) {
        *slot = Some(position.id);
    }
    true
}

fn select_targets(
    game: &mut Game,
    decisions: &mut dyn DecisionChannel,
    id: EventId,
    player: PlayerId,
    controller: CardId,
) -> Process {
    let Some(activation) = payload(game, id).cloned() else {
        return Ok(false);
    };
    let Some(name) = activation.effect else {
        return Ok(true);
    };
    let slots = game
        .effects
        .get(&name)
        .map(|e| e.targets.clone())
        .unwrap_or_default();

    let mut targets = activation.targets;
    let mut positions = activation.positions;
    while let Some(slot) = slots.get(targets.len()) {
        let options = game.valid_targets(controller, &name, &targets, activation.usage.map(|u| u.card));
        let request = Request::new().with_field(CARDS, RequestField::new(slot.minimum, slot.maximum, options));
        let chosen = game.request_player(decisions, player, request)?.cards(CARDS);

        for &card in &chosen {
            let Some(position) = game.state.card(card).and_then(Card::position_id) else {
                return Ok(false);
            };
            positions.insert(card, position);
        }
        targets.push(chosen);

        if let Some(activation) = payload_mut(game, id) {
            activation.targets = targets.clone();
            activation.positions = positions.clone();
        }
    }
    Ok(true)
}

impl Game {
    /// Cards that may fill the next target slot of `effect` for `character`,
    /// given the cards picked so far.
    ///
    /// Field cards must be within the character's range.
    #[must_use]
    pub fn valid_targets(
        &self,
        character: CardId,
        effect: &str,
        selections: &[Vec<CardId>],
        source: Option<CardId>,
    ) -> Vec<CardId> {
        let Some(slot) = self.effects.get(effect).and_then(|e| e.targets.get(selections.len())) else {
            return Vec::new();
        };
        let Some(acting) = self.state.card(character) else {
            return Vec::new();
        };

        self.state
            .cards
            .values()
            .filter(|target| !target.is_on_field() || acting.is_in_range(target))
            .filter(|target| {
                (slot.predicate)(&TargetQuery {
                    game: self,
                    controller: character,
                    target: target.id,
                    selections,
                    source,
                })
            })
            .map(|target| target.id)
            .collect()
    }

    /// Pay `bytes` with cards from `player`'s hand, one card per byte.
    ///
    /// Colored and void payments are revealed. Paid cards go to the bottom of
    /// their owner's deck.
    pub fn consume(
        &mut self,
        decisions: &mut dyn DecisionChannel,
        player: PlayerId,
        consumer: CardId,
        bytes: &[Byte],
    ) -> Result<bool, Interrupted> {
        if !self.state.player(player).is_some_and(|p| p.has_character(consumer)) {
            return Ok(false);
        }

        for byte in bytes {
            let hand = self
                .state
                .player(player)
                .map(|p| p.hand.clone())
                .unwrap_or_default();
            let options: Vec<CardId> = self
                .state
                .cards_of(&hand)
                .into_iter()
                .filter(|card| byte.accepts(&card.colors))
                .map(|card| card.id)
                .collect();
            if options.is_empty() {
                return Ok(false);
            }

            let request = Request::new().with_field(CARDS, RequestField::exactly(1, options));
            let cards = self.request_player(decisions, player, request)?.cards(CARDS);
            if cards.is_empty() {
                return Ok(false);
            }
            if *byte != Byte::Generic {
                let event = self.reveal_by(player, consumer, &cards);
                if !self.run_optional(decisions, event)? {
                    return Ok(false);
                }
            }
            let event = self.enqueue_by(player, consumer, &cards);
            if !self.run_optional(decisions, event)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
