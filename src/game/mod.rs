//! The game coordinator.
//!
//! [`Game`] owns everything one match needs: the [`State`], the event tree,
//! the card and effect catalogs, loaded extensions and the seeded RNG. It is
//! passed explicitly to every hook; there is no global game.
//!
//! Operations are spread over submodules by concern:
//!
//! - [`factories`]: building events (`draw`, `delete`, `battle`, ...)
//! - [`activation`]: activation counting for effect limits
//! - [`setup`]: preparing and starting a match
//! - [`extension`]: loading card sets and effects

pub mod activation;
pub mod extension;
pub mod factories;
pub mod setup;

use std::rc::Rc;

use crate::cards::{Card, CardDefinition, CardId, CardRegistry, CHARACTER_TYPE};
use crate::core::{ExclusiveZone, GameConfig, GameRng, Player, PlayerId, State};
use crate::effects::{Effect, EffectRegistry};
use crate::error::Interrupted;
use crate::events::{EventId, EventKind, EventTree};
use crate::protocol::{DecisionChannel, Reply, Request, RequestBatch, Response, Responses};
use crate::zones::Grid;

pub use extension::Extension;

/// One running match.
pub struct Game {
    pub state: State,
    pub events: EventTree,
    /// Card definitions by name.
    pub definitions: CardRegistry,
    pub effects: EffectRegistry,
    /// Loaded extensions, in initialization order.
    extensions: Vec<Rc<dyn Extension>>,
    pub(crate) rng: GameRng,
    pub(crate) config: GameConfig,
    started: bool,
}

impl Game {
    /// Create an empty game. The basic character definition is registered.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let grid = Grid::new(config.boundaries.clone());
        let mut definitions = CardRegistry::new();
        definitions.register(
            CardDefinition::new(config.basic_character.clone())
                .with_attack(1)
                .with_defense(1)
                .with_range(1)
                .with_type(CHARACTER_TYPE),
        );

        Self {
            state: State::new(grid, config.seed),
            events: EventTree::new(),
            definitions,
            effects: EffectRegistry::new(),
            extensions: Vec::new(),
            rng: GameRng::new(config.seed),
            config,
            started: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    // === Assembly ===

    pub fn add_player(&mut self, player: Player) -> PlayerId {
        self.state.add_player(player)
    }

    /// Seat a new player with the configured starting integrity.
    pub fn add_player_named(&mut self, name: impl Into<String>) -> PlayerId {
        let integrity = self.config.starting_integrity;
        self.add_player(Player::new(name).with_integrity(integrity))
    }

    /// Create a card owned by `player` at the end of one of their zones.
    pub fn add_card(&mut self, player: PlayerId, name: impl Into<String>, zone: ExclusiveZone) -> CardId {
        let id = self.create_owned_card(player, name);
        if let Some(owner) = self.state.player_mut(player) {
            owner.zone_mut(zone).push(id);
        }
        id
    }

    /// Create a character for `player`. The first one is their main character.
    pub fn add_character(&mut self, player: PlayerId, name: impl Into<String>) -> CardId {
        let id = self.create_owned_card(player, name);
        if let Some(owner) = self.state.player_mut(player) {
            owner.characters.push(id);
        }
        id
    }

    fn create_owned_card(&mut self, player: PlayerId, name: impl Into<String>) -> CardId {
        let id = self.state.create_card(name);
        self.initialize_card(id);
        if let Some(card) = self.state.card_mut(id) {
            card.owner = Some(player);
        }
        id
    }

    /// Copy a card's definition onto it, if one is registered.
    pub fn initialize_card(&mut self, id: CardId) {
        let Some(definition) = self.state.card(id).and_then(|c| self.definitions.get(&c.name)).cloned() else {
            return;
        };
        if let Some(card) = self.state.card_mut(id) {
            card.initialize(&definition);
        }
    }

    pub fn register_card(&mut self, definition: CardDefinition) -> Option<CardDefinition> {
        self.definitions.register(definition)
    }

    pub fn register_effect(&mut self, effect: Effect) -> Option<Effect> {
        self.effects.register(effect)
    }

    // === Lookups ===

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.state.card(id)
    }

    /// The deepest running event.
    #[must_use]
    pub fn current_event(&self) -> Option<EventId> {
        self.events.current()
    }

    /// The player an event acts for: its controller card's controller, else
    /// its own player.
    #[must_use]
    pub fn event_player(&self, id: EventId) -> Option<PlayerId> {
        let node = self.events.get(id)?;
        node.controller
            .and_then(|card| self.state.card(card))
            .and_then(|card| card.controller)
            .or(node.player)
    }

    /// Player of the innermost running turn.
    #[must_use]
    pub fn turn_player(&self) -> Option<PlayerId> {
        let turn = self.events.find_active(|node| node.kind == EventKind::Turn)?;
        self.event_player(turn)
    }

    // === Requests ===

    /// Issue `batch` until the channel supplies a valid answer for every
    /// player, or cancels. An empty batch answers itself.
    pub fn request(&self, decisions: &mut dyn DecisionChannel, batch: &RequestBatch) -> Result<Responses, Interrupted> {
        if batch.is_empty() {
            return Ok(Responses::default());
        }

        loop {
            tracing::trace!(players = batch.len(), "request issued");
            match decisions.decide(self, batch) {
                Reply::Answer(raw) => match batch.resolve(&raw) {
                    Some(responses) => return Ok(responses),
                    None => tracing::trace!("response rejected, requesting again"),
                },
                Reply::NoAnswer => tracing::trace!("no answer, requesting again"),
                Reply::Cancel => return Err(Interrupted),
            }
        }
    }

    /// Issue a single request to `player` and return their response.
    pub fn request_player(
        &self,
        decisions: &mut dyn DecisionChannel,
        player: PlayerId,
        request: Request,
    ) -> Result<Response, Interrupted> {
        let batch = RequestBatch::single(player, request);
        loop {
            if let Some(response) = self.request(decisions, &batch)?.get(player) {
                return Ok(response.clone());
            }
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("events", &self.events)
            .field("definitions", &self.definitions.len())
            .field("effects", &self.effects.len())
            .field("extensions", &self.extension_names())
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}
