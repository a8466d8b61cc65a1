//! Battle between characters.
//!
//! A battle is an undirected graph: characters are vertices and each edge
//! is an attack along one axis. Resolution looks at every edge from both
//! ends. From each end, the acting side's attack is compared with the other
//! side's defense on that axis and whichever is larger deals the difference.
//! A character facing its opponent has no defense toward it, so two
//! characters facing each other both take damage.
//!
//! All damage is gathered into a single nested integrity event.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::integrity::Integrity;
use super::tree::{Event, EventId, EventKind};
use crate::cards::{Card, CardId};
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process};
use crate::zones::{Axis, PositionId};

/// An attack edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attack {
    pub attacker: CardId,
    pub defender: CardId,
    pub axis: Axis,
}

/// Payload of a battle event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub vertices: Vec<CardId>,
    pub attacks: Vec<Attack>,
    /// Field positions of the combatants at register time.
    pub positions: BTreeMap<CardId, PositionId>,
}

impl Battle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an attack edge and its endpoints.
    #[must_use]
    pub fn with_attack(mut self, attacker: CardId, defender: CardId, axis: Axis) -> Self {
        for card in [attacker, defender] {
            if !self.vertices.contains(&card) {
                self.vertices.push(card);
            }
        }
        self.attacks.push(Attack {
            attacker,
            defender,
            axis,
        });
        self
    }

    /// Cards sharing an edge with `card`, with the edge's axis.
    pub fn neighbors(&self, card: CardId) -> impl Iterator<Item = (CardId, Axis)> + '_ {
        self.attacks.iter().filter_map(move |attack| {
            if attack.attacker == card {
                Some((attack.defender, attack.axis))
            } else if attack.defender == card {
                Some((attack.attacker, attack.axis))
            } else {
                None
            }
        })
    }
}

impl Event {
    #[must_use]
    pub fn battle(battle: Battle, controller: Option<CardId>) -> Self {
        Event::new("battle", EventKind::Battle(battle)).with_controller(controller)
    }
}

fn payload_mut(game: &mut Game, id: EventId) -> Option<&mut Battle> {
    match &mut game.events.get_mut(id)?.kind {
        EventKind::Battle(battle) => Some(battle),
        _ => None,
    }
}

pub(crate) fn register(game: &mut Game, _decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let vertices = game.events[id]
        .as_battle()
        .map(|b| b.vertices.clone())
        .unwrap_or_default();
    let positions: BTreeMap<CardId, PositionId> = vertices
        .into_iter()
        .filter_map(|card| {
            let position = game.state.card(card)?.position?;
            position.is_on_field().then_some((card, position.id))
        })
        .collect();

    let registered = !positions.is_empty();
    if let Some(battle) = payload_mut(game, id) {
        battle.positions = positions;
    }
    Ok(registered)
}

pub(crate) fn resolve(game: &mut Game, decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let Some(battle) = game.events[id].as_battle().cloned() else {
        return Ok(false);
    };
    let mut damage = Integrity::new();
    for &attacker_id in &battle.vertices {
        let Some(attacker) = unmoved(game, &battle, attacker_id) else {
            continue;
        };
        for (defender_id, axis) in battle.neighbors(attacker_id) {
            let Some(defender) = unmoved(game, &battle, defender_id) else {
                continue;
            };
            if !attacker.is_in_range(defender) {
                continue;
            }
            let (attacking, defending) = attacker.battle_stats(defender, axis);

            let attacker_damage = defending.defense - attacking.attack;
            if attacker_damage > 0 {
                damage.push_damage(attacker_id, Some(defender_id), attacker_damage);
            }
            let defender_damage = attacking.attack - defending.defense;
            if defender_damage > 0 {
                damage.push_damage(defender_id, Some(attacker_id), defender_damage);
            }
        }
    }

    if damage.is_empty() {
        return Ok(false);
    }
    let controller = game.events[id].controller;
    game.run(decisions, Event::integrity(damage, controller))
}

/// `card`, if it still holds the field position it had at register time.
fn unmoved<'a>(game: &'a Game, battle: &Battle, card: CardId) -> Option<&'a Card> {
    let snapshot = battle.positions.get(&card).copied()?;
    game.state
        .card(card)
        .filter(|c| c.position_id() == Some(snapshot))
}
