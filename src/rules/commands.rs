//! The command enumerator.
//!
//! Commands are computed per character of the player holding priority,
//! against the timings the announcing event is currently triggering:
//!
//! - **battle** (only during `"main"`): opponents' characters in range, on
//!   every axis where this character's facing gives it attack;
//! - **movement** (only during `"main"`): turning in place, or moving to any
//!   free in-grid cell within range with any facing;
//! - **usage** (any timing): hand cards whose usage effect is triggered by
//!   one of the timings, is under all of its activation limits and passes its
//!   condition. During `"main"` a character may use one card per main phase.
//!
//! Battle and movement are each offered once per announcing event per
//! character position: a battle or movement the character already started
//! under this event blocks another of the same kind.

use crate::cards::{Card, CardId};
use crate::core::PlayerId;
use crate::events::{EventId, MAIN};
use crate::game::Game;
use crate::zones::{Axis, Coordinate, Direction, Orientation};

use super::command::Command;

impl Game {
    /// Commands `player` may choose while event `event` announces its timings.
    #[must_use]
    pub fn available_commands(&self, event: EventId, player: PlayerId) -> Vec<Command> {
        let Some(node) = self.events.get(event) else {
            return Vec::new();
        };
        let Some(characters) = self.state.player(player).map(|p| p.characters.clone()) else {
            return Vec::new();
        };
        let main = node.is_announcing(MAIN);

        let already_started = |kind: &str, character: &Card| {
            character.position_id().is_some()
                && node.children.iter().any(|&child| {
                    let child = &self.events[child];
                    child.name == kind && child.controller_position == character.position_id()
                })
        };

        let mut commands = Vec::new();
        for character in self.state.cards_of(&characters) {
            if main && !already_started("battle", character) {
                commands.extend(self.battle_commands(player, character));
            }

            if main && !already_started("movement", character) {
                commands.extend(
                    self.movable_orientations(player, character.id)
                        .into_iter()
                        .map(|orientation| Command::Movement {
                            character: character.id,
                            orientation,
                        }),
                );
            }

            if !main || self.activation_count(character.id, MAIN, None) < 1 {
                commands.extend(
                    self.usable_cards(player, character, &node.triggering)
                        .into_iter()
                        .map(|card| Command::Usage {
                            character: character.id,
                            card,
                        }),
                );
            }
        }
        commands
    }

    fn battle_commands(&self, player: PlayerId, character: &Card) -> Vec<Command> {
        let mut commands = Vec::new();
        for &opponent in self.state.seating.iter().filter(|&&p| p != player) {
            let Some(defenders) = self.state.player(opponent).map(|p| p.characters.clone()) else {
                continue;
            };
            for defender in self.state.cards_of(&defenders) {
                if !character.is_in_range(defender) {
                    continue;
                }
                for axis in [Axis::X, Axis::Y] {
                    if character.attacker_stat(defender, axis).attack > 0 {
                        commands.push(Command::Battle {
                            character: character.id,
                            defender: defender.id,
                            axis,
                        });
                    }
                }
            }
        }
        commands
    }

    fn usable_cards(&self, player: PlayerId, character: &Card, timings: &[String]) -> Vec<CardId> {
        let Some(hand) = self.state.player(player).map(|p| p.hand.clone()) else {
            return Vec::new();
        };

        self.state
            .cards_of(&hand)
            .into_iter()
            .filter(|card| {
                let Some(effect) = card.usage.as_deref().and_then(|name| self.effects.get(name)) else {
                    return false;
                };
                if effect.bytes.is_none() {
                    return false;
                }
                let exhausted = effect.limits.iter().any(|(scope, &limit)| {
                    self.activation_count(character.id, scope, Some(effect.name.as_str())) >= limit as usize
                });
                !exhausted
                    && effect.is_triggered_by(timings)
                    && effect
                        .condition
                        .as_ref()
                        .map_or(true, |condition| condition(self, character.id, card.id))
            })
            .map(|card| card.id)
            .collect()
    }

    /// Free in-grid cells `mover` can reach: taxicab distance up to its range.
    ///
    /// The scan is bounded by the board's extremes. The mover's own cell is
    /// occupied, so never included.
    #[must_use]
    pub fn movable_coordinates(&self, player: PlayerId, mover: CardId) -> Vec<Coordinate> {
        let Some(origin) = self.field_character(player, mover) else {
            return Vec::new();
        };
        let Some(extremes) = self.state.grid.main_extremes() else {
            return Vec::new();
        };
        let range = self.state.card(mover).map_or(1, Card::range_value);
        let (x, y) = (i64::from(origin.x), i64::from(origin.y));

        let mut coordinates = Vec::new();
        let columns = x.saturating_sub(range).max(i64::from(extremes.minimum_x))
            ..=x.saturating_add(range).min(i64::from(extremes.maximum_x));
        for cx in columns {
            let reach = range.saturating_sub((cx - x).abs());
            let rows = y.saturating_sub(reach).max(i64::from(extremes.minimum_y))
                ..=y.saturating_add(reach).min(i64::from(extremes.maximum_y));
            for cy in rows {
                // Both ends are clamped to the i32 extremes.
                let coordinate = Coordinate::new(cx as i32, cy as i32);
                if self.state.grid.is_inside(coordinate) && !self.state.is_occupied(coordinate) {
                    coordinates.push(coordinate);
                }
            }
        }
        coordinates
    }

    /// Orientations `mover` can take: the other three facings in place, then
    /// every facing on every movable coordinate.
    #[must_use]
    pub fn movable_orientations(&self, player: PlayerId, mover: CardId) -> Vec<Orientation> {
        let Some(origin) = self.field_character(player, mover) else {
            return Vec::new();
        };

        let turns = Direction::ALL
            .into_iter()
            .filter(|&direction| direction != origin.direction)
            .map(|direction| Orientation::at(origin.coordinate(), direction));
        let moves = self
            .movable_coordinates(player, mover)
            .into_iter()
            .flat_map(|coordinate| Direction::ALL.map(|direction| Orientation::at(coordinate, direction)));
        turns.chain(moves).collect()
    }

    /// Orientation of `card` if it is one of `player`'s characters on the field.
    fn field_character(&self, player: PlayerId, card: CardId) -> Option<Orientation> {
        if !self.state.player(player)?.has_character(card) {
            return None;
        }
        self.state.card(card)?.orientation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::zones::Destination;

    fn standing(range: i64, x: i32, y: i32) -> (Game, PlayerId, CardId) {
        let mut game = Game::new(GameConfig::default().with_seed(1));
        let alice = game.add_player_named("alice");
        let hero = game.add_character(alice, "demo:hero");
        if let Some(card) = game.state.card_mut(hero) {
            card.controller = Some(alice);
            card.range = Some(range);
        }
        game.state
            .place_card(hero, Destination::field(Orientation::new(x, y, Direction::North)));
        (game, alice, hero)
    }

    #[test]
    fn test_range_one_reaches_neighbours() {
        let (game, alice, hero) = standing(1, 2, 2);

        let mut reached = game.movable_coordinates(alice, hero);
        reached.sort_by_key(|c| (c.x, c.y));

        assert_eq!(
            reached,
            vec![
                Coordinate::new(1, 2),
                Coordinate::new(2, 1),
                Coordinate::new(2, 3),
                Coordinate::new(3, 2),
            ]
        );
        // Three turns in place plus four facings on each cell.
        assert_eq!(game.movable_orientations(alice, hero).len(), 3 + 4 * 4);
    }

    #[test]
    fn test_huge_range_is_bounded_by_board() {
        let (game, alice, hero) = standing(i64::MAX, 0, 0);

        let reached = game.movable_coordinates(alice, hero);

        // Every cell of the default 8x8 board except the mover's own.
        assert_eq!(reached.len(), 63);
        assert!(!reached.contains(&Coordinate::new(0, 0)));
    }

    #[test]
    fn test_off_field_character_cannot_move() {
        let mut game = Game::new(GameConfig::default().with_seed(1));
        let alice = game.add_player_named("alice");
        let hero = game.add_character(alice, "demo:hero");

        assert!(game.movable_coordinates(alice, hero).is_empty());
    }
}
