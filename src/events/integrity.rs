//! Integrity: changes to players' life totals, attributed to characters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tree::{Event, EventId, EventKind};
use crate::cards::CardId;
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process};
use crate::zones::PositionId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModificationKind {
    Damage,
    Loss,
    Recovery,
}

/// A signed change to a character's controller's integrity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityModification {
    pub amount: i64,
    pub source: Option<CardId>,
    pub kind: ModificationKind,
}

/// Payload of an integrity event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integrity {
    /// Affected characters with their modifications, in insertion order.
    pub modifications: Vec<(CardId, Vec<IntegrityModification>)>,
    /// Field positions of the affected characters at register time.
    pub positions: BTreeMap<CardId, PositionId>,
}

impl Integrity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a modification for `target`.
    pub fn push(&mut self, target: CardId, modification: IntegrityModification) {
        match self.modifications.iter_mut().find(|(card, _)| *card == target) {
            Some((_, list)) => list.push(modification),
            None => self.modifications.push((target, vec![modification])),
        }
    }

    /// Record `damage` dealt to `target` by `source`, merged into any earlier
    /// damage from the same source.
    pub fn push_damage(&mut self, target: CardId, source: Option<CardId>, damage: i64) {
        let existing = self
            .modifications
            .iter_mut()
            .find(|(card, _)| *card == target)
            .and_then(|(_, list)| {
                list.iter_mut()
                    .find(|m| m.source == source && m.kind == ModificationKind::Damage)
            });
        match existing {
            Some(modification) => modification.amount -= damage,
            None => self.push(
                target,
                IntegrityModification {
                    amount: -damage,
                    source,
                    kind: ModificationKind::Damage,
                },
            ),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }

    /// Net change queued for `target`.
    #[must_use]
    pub fn total_for(&self, target: CardId) -> i64 {
        self.modifications
            .iter()
            .filter(|(card, _)| *card == target)
            .flat_map(|(_, list)| list.iter().map(|m| m.amount))
            .sum()
    }
}

impl Event {
    #[must_use]
    pub fn integrity(integrity: Integrity, controller: Option<CardId>) -> Self {
        Event::new("integrity", EventKind::Integrity(integrity)).with_controller(controller)
    }
}

fn payload_mut(game: &mut Game, id: EventId) -> Option<&mut Integrity> {
    match &mut game.events.get_mut(id)?.kind {
        EventKind::Integrity(integrity) => Some(integrity),
        _ => None,
    }
}

pub(crate) fn register(game: &mut Game, _decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let targets: Vec<CardId> = game.events[id]
        .as_integrity()
        .map(|i| i.modifications.iter().map(|(card, _)| *card).collect())
        .unwrap_or_default();
    let positions: BTreeMap<CardId, PositionId> = targets
        .into_iter()
        .filter_map(|card| {
            let position = game.state.card(card)?.position?;
            position.is_on_field().then_some((card, position.id))
        })
        .collect();

    let registered = !positions.is_empty();
    if let Some(integrity) = payload_mut(game, id) {
        integrity.positions = positions;
    }
    Ok(registered)
}

pub(crate) fn resolve(game: &mut Game, _decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let Some(integrity) = game.events[id].as_integrity().cloned() else {
        return Ok(false);
    };

    let mut result = false;
    for (card, modifications) in &integrity.modifications {
        let Some(target) = game.state.card(*card) else {
            continue;
        };
        if target.position_id() != integrity.positions.get(card).copied() {
            continue;
        }
        let controller = target.controller;
        let Some(player) = controller.and_then(|p| game.state.player_mut(p)) else {
            continue;
        };
        for modification in modifications {
            player.integrity += modification.amount;
            result = true;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_damage_merges_by_source() {
        let attacker = CardId::new(1);
        let defender = CardId::new(2);
        let mut integrity = Integrity::new();

        integrity.push_damage(defender, Some(attacker), 2);
        integrity.push_damage(defender, Some(attacker), 1);
        integrity.push_damage(defender, None, 4);

        assert_eq!(integrity.modifications.len(), 1);
        assert_eq!(integrity.modifications[0].1.len(), 2);
        assert_eq!(integrity.modifications[0].1[0].amount, -3);
        assert_eq!(integrity.total_for(defender), -7);
        assert_eq!(integrity.total_for(attacker), 0);
    }

    #[test]
    fn test_recovery_kept_separate_from_damage() {
        let target = CardId::new(1);
        let mut integrity = Integrity::new();

        integrity.push(
            target,
            IntegrityModification {
                amount: 3,
                source: None,
                kind: ModificationKind::Recovery,
            },
        );
        integrity.push_damage(target, None, 1);

        assert_eq!(integrity.modifications[0].1.len(), 2);
        assert_eq!(integrity.total_for(target), 2);
    }
}
