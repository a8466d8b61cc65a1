//! Preparing and starting a match.

use crate::core::ExclusiveZone;
use crate::error::{GameError, Result};
use crate::events::Event;
use crate::protocol::DecisionChannel;
use crate::zones::{Destination, Orientation};

use super::Game;

impl Game {
    /// Seat players and deal opening hands.
    ///
    /// Seating is shuffled, then for every seat: the main character (a
    /// virtual basic character when the player has none) is placed on the
    /// field at the seat's starting cell, the deck is shuffled, every
    /// exclusive-zone card gets a position, and the opening draw moves from
    /// the top of the deck to hand. Finally each card copies its definition.
    pub fn prepare(&mut self) -> Result<()> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        let count = self.state.players.len();
        if count < 2 {
            return Err(GameError::NotEnoughPlayers { count });
        }

        self.rng.shuffle(&mut self.state.seating);
        let seating = self.state.seating.clone();

        for (seat, &player) in seating.iter().enumerate() {
            let character = match self.state.player(player).and_then(|p| p.main_character()) {
                Some(character) => character,
                None => {
                    let name = self.config.basic_character.clone();
                    let character = self.add_character(player, name);
                    if let Some(card) = self.state.card_mut(character) {
                        card.is_virtual = true;
                    }
                    character
                }
            };
            if let Some(card) = self.state.card_mut(character) {
                card.controller = Some(player);
            }

            let coordinate = self.state.grid.initial_coordinate(seat, seating.len());
            let direction = self.state.grid.initial_direction(coordinate);
            self.state
                .place_card(character, Destination::field(Orientation::at(coordinate, direction)));

            if let Some(owner) = self.state.players.get_mut(player) {
                self.rng.shuffle(&mut owner.deck);
            }
            for zone in ExclusiveZone::ALL {
                self.state.claim_zone(player, zone);
            }

            for _ in 0..self.config.opening_draw {
                let Some(top) = self.state.player(player).and_then(|p| p.deck.last().copied()) else {
                    break;
                };
                self.state
                    .place_card(top, Destination::exclusive(player, ExclusiveZone::Hand));
            }
        }

        let cards: Vec<_> = self.state.cards.keys().copied().collect();
        for card in cards {
            self.initialize_card(card);
        }

        self.started = true;
        tracing::info!(seed = self.rng.seed(), seating = ?self.state.seating, "game started");
        Ok(())
    }

    /// Prepare the match and run it.
    ///
    /// The initial event repeats rounds until the decision channel cancels,
    /// so a match that runs to completion ends in
    /// [`GameError::Interrupted`].
    pub fn start(&mut self, decisions: &mut dyn DecisionChannel) -> Result<bool> {
        self.prepare()?;
        Ok(self.run(decisions, Event::initial())?)
    }
}
