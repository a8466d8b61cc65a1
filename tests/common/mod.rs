//! Shared helpers for the integration tests: scripted decision channels and
//! board setup.

#![allow(dead_code)]

use std::collections::VecDeque;

use grid_ccg::{
    CardDefinition, CardId, Command, DecisionChannel, Destination, Direction, Game, GameConfig,
    Orientation, PlayerId, RawResponse, RawResponses, Reply, RequestBatch, RequestField, COMMANDS,
};

/// Build an answer by asking `pick` for the indices of every field.
pub fn answer(batch: &RequestBatch, mut pick: impl FnMut(PlayerId, &str, &RequestField) -> Vec<usize>) -> Reply {
    let mut raw = RawResponses::default();
    for (player, request) in batch.iter() {
        let mut response = RawResponse::new();
        for (key, field) in &request.fields {
            response.insert(key.clone(), pick(player, key, field));
        }
        raw.insert(player, response);
    }
    Reply::Answer(raw)
}

/// Pick the first `minimum` options of every field.
pub fn minimal(_: &Game, batch: &RequestBatch) -> Reply {
    answer(batch, |_, _, field| (0..field.minimum).collect())
}

/// A channel that plays queued commands whenever they are offered, passes
/// otherwise, and answers every other field minimally.
///
/// Every batch it sees is recorded. With a limit it cancels once that many
/// replies have been given.
#[derive(Default)]
pub struct Script {
    pub commands: VecDeque<Command>,
    pub batches: Vec<RequestBatch>,
    pub limit: Option<usize>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push_back(command);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Batches that asked for a command.
    pub fn command_offers(&self) -> Vec<&RequestBatch> {
        self.batches
            .iter()
            .filter(|batch| batch.iter().any(|(_, request)| request.field(COMMANDS).is_some()))
            .collect()
    }
}

impl DecisionChannel for Script {
    fn decide(&mut self, _game: &Game, requests: &RequestBatch) -> Reply {
        if self.limit.is_some_and(|limit| self.batches.len() >= limit) {
            return Reply::Cancel;
        }
        self.batches.push(requests.clone());

        let commands = &mut self.commands;
        answer(requests, |_, key, field| {
            if key != COMMANDS {
                return (0..field.minimum).collect();
            }
            let Some(next) = commands.front() else {
                return Vec::new();
            };
            let offered = field
                .options
                .iter()
                .position(|choice| choice.as_command() == Some(next));
            match offered {
                Some(index) => {
                    commands.pop_front();
                    vec![index]
                }
                None => Vec::new(),
            }
        })
    }
}

/// A fresh game with two seated players.
pub fn duel(seed: u64) -> (Game, PlayerId, PlayerId) {
    let mut game = Game::new(GameConfig::default().with_seed(seed));
    let alice = game.add_player_named("alice");
    let bob = game.add_player_named("bob");
    (game, alice, bob)
}

/// Register a character definition with the given battle numbers.
pub fn fighter(game: &mut Game, name: &str, attack: i64, defense: i64, range: i64) {
    game.register_card(
        CardDefinition::new(name)
            .with_attack(attack)
            .with_defense(defense)
            .with_range(range)
            .with_type("character"),
    );
}

/// Give `player` a character named `name`, controlled by them and standing
/// on the field.
pub fn field_character(
    game: &mut Game,
    player: PlayerId,
    name: &str,
    x: i32,
    y: i32,
    direction: Direction,
) -> CardId {
    let card = game.add_character(player, name);
    if let Some(character) = game.state.card_mut(card) {
        character.controller = Some(player);
    }
    game.state
        .place_card(card, Destination::field(Orientation::new(x, y, direction)));
    card
}
