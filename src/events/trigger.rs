//! The priority loop.
//!
//! Announcing timings opens a priority loop on the announcing event. The
//! rotation starts with the player whose turn is running (or the first seat
//! before any turn exists) and is snapshotted when the loop opens. Each
//! player in turn is offered the commands legal right now and may pick at
//! most one. A picked command runs as a nested event aliased `"command"`
//! and the same player is asked again; declining passes priority on. Once
//! every player in the rotation has declined, the loop closes. The announced
//! timings and the priority pointer are cleared however the loop ends.

use super::tree::{Event, EventId};
use crate::core::PlayerId;
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process, Request, RequestField};
use crate::rules::Command;

/// Request field for the command choice.
pub const COMMANDS: &str = "commands";

/// Alias given to events started by a chosen command.
pub const COMMAND_ALIAS: &str = "command";

impl Game {
    /// Announce `timings` on event `id` and run its priority loop.
    ///
    /// Reports `false` only when nobody is seated.
    pub fn trigger(&mut self, decisions: &mut dyn DecisionChannel, id: EventId, timings: Vec<String>) -> Process {
        let Some(first) = self.turn_player().or_else(|| self.state.seating.first().copied()) else {
            return Ok(false);
        };
        if let Some(node) = self.events.get_mut(id) {
            node.triggering.extend(timings);
        }

        let outcome = self.rotate_priority(decisions, id, first);

        if let Some(node) = self.events.get_mut(id) {
            node.priority_pointer = None;
            node.triggering.clear();
        }
        outcome?;
        Ok(true)
    }

    fn rotate_priority(&mut self, decisions: &mut dyn DecisionChannel, id: EventId, first: PlayerId) -> Process {
        for player in self.state.seating_from(first) {
            if let Some(node) = self.events.get_mut(id) {
                node.priority_pointer = Some(player);
            }

            loop {
                let options = self.available_commands(id, player);
                let request = Request::new().with_field(COMMANDS, RequestField::new(0, 1, options));
                let response = self.request_player(decisions, player, request)?;
                let Some(command) = response.commands(COMMANDS).into_iter().next() else {
                    break;
                };

                tracing::debug!(event = %id, %player, kind = command.kind(), "command chosen");
                if let Some(event) = self.command_event(player, &command) {
                    self.run(decisions, event.with_alias(COMMAND_ALIAS))?;
                }
            }
        }
        Ok(true)
    }

    fn command_event(&self, player: PlayerId, command: &Command) -> Option<Event> {
        match *command {
            Command::Battle {
                character,
                defender,
                axis,
            } => self.battle(player, character, defender, axis),
            Command::Movement {
                character,
                orientation,
            } => self.move_character(player, character, orientation),
            Command::Usage { character, card } => self.use_card(player, character, card),
        }
    }
}
