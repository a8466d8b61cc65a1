//! Game assembly integration tests.
//!
//! These tests verify extension loading through the public API, the checks
//! `prepare` makes before seating anyone, and a full match driven by a
//! random channel.

use grid_ccg::{
    CardDefinition, Effect, Extension, ExclusiveZone, Game, GameConfig, GameError, Interrupted,
    RandomChannel, BASIC_CHARACTER,
};

/// Registers the basic character with stronger stats.
struct Core;

impl Extension for Core {
    fn name(&self) -> &str {
        "core"
    }

    fn version(&self) -> &str {
        "1.2.0"
    }

    fn initialize(&self, game: &mut Game) -> grid_ccg::error::Result<()> {
        game.register_card(
            CardDefinition::new(BASIC_CHARACTER)
                .with_attack(2)
                .with_defense(2)
                .with_range(1)
                .with_type("character"),
        );
        Ok(())
    }
}

/// Builds on the basic character registered by `core`.
struct Veterans;

impl Extension for Veterans {
    fn name(&self) -> &str {
        "veterans"
    }

    fn dependencies(&self) -> Vec<String> {
        vec!["core".to_string()]
    }

    fn initialize(&self, game: &mut Game) -> grid_ccg::error::Result<()> {
        let Some(basic) = game.definitions.get(BASIC_CHARACTER).cloned() else {
            return Err(GameError::Extension {
                extension: self.name().to_string(),
                message: "basic character is not registered".to_string(),
            });
        };
        game.register_card(CardDefinition {
            name: "veterans:captain".into(),
            ..basic
        });
        game.register_effect(Effect::new("veterans:rally").with_bytes(vec![]).with_trigger("main"));
        Ok(())
    }
}

fn seated(seed: u64) -> Game {
    let mut game = Game::new(GameConfig::default().with_seed(seed));
    for name in ["alice", "bob"] {
        let player = game.add_player_named(name);
        for i in 0..6 {
            game.add_card(player, format!("demo:{name}{i}"), ExclusiveZone::Deck);
        }
    }
    game
}

// =============================================================================
// Extensions
// =============================================================================

/// Test that a dependent extension listed first still initializes second.
#[test]
fn test_load_orders_dependencies() {
    let mut game = seated(1);

    let loaded = game.load(vec![Box::new(Veterans), Box::new(Core)]);

    assert_eq!(loaded, Ok(()));
    assert_eq!(game.extension_names(), vec!["core", "veterans"]);
    assert_eq!(game.extension("core").map(|e| e.version()), Some("1.2.0"));
    assert!(game.definitions.contains("veterans:captain"));
    assert!(game.effects.get("veterans:rally").is_some());
}

/// Test that a dependency satisfied by an earlier load is accepted.
#[test]
fn test_load_in_two_batches() {
    let mut game = seated(2);

    assert_eq!(game.load(vec![Box::new(Core)]), Ok(()));
    assert_eq!(game.load(vec![Box::new(Veterans), Box::new(Core)]), Ok(()));

    assert_eq!(game.extension_names(), vec!["core", "veterans"]);
}

/// Test that an unknown dependency refuses the batch before anything runs.
#[test]
fn test_missing_dependency_loads_nothing() {
    let mut game = seated(3);

    let loaded = game.load(vec![Box::new(Veterans)]);

    assert_eq!(
        loaded,
        Err(GameError::MissingDependency {
            extension: "veterans".to_string(),
            dependency: "core".to_string(),
        })
    );
    assert!(game.extension_names().is_empty());
    assert!(!game.definitions.contains("veterans:captain"));
}

/// Test that the basic character takes its stats from a loaded extension.
#[test]
fn test_virtual_character_uses_loaded_definition() {
    let mut game = seated(4);
    game.load(vec![Box::new(Core)]).unwrap();

    game.prepare().unwrap();

    for player in game.state.seating.clone() {
        let main = game.state.players[player].main_character().unwrap();
        let card = game.card(main).unwrap();
        assert!(card.is_virtual);
        assert_eq!(card.attack, Some(2));
        assert_eq!(card.defense, Some(2));
    }
}

// =============================================================================
// Preparation
// =============================================================================

/// Test that a single player cannot start a game.
#[test]
fn test_prepare_needs_two_players() {
    let mut game = Game::new(GameConfig::default());
    game.add_player_named("solo");

    assert_eq!(game.prepare(), Err(GameError::NotEnoughPlayers { count: 1 }));
    assert_eq!(
        game.prepare().unwrap_err().to_string(),
        "not enough players to start: 1"
    );
}

/// Test that every player is dealt an opening hand from a shuffled deck.
#[test]
fn test_prepare_deals_opening_hands() {
    let mut game = seated(5);
    let draw = game.config().opening_draw;

    game.prepare().unwrap();

    for player in game.state.seating.clone() {
        let owner = &game.state.players[player];
        assert_eq!(owner.hand.len(), draw);
        assert_eq!(owner.deck.len() + owner.hand.len(), 6);
    }
    assert_eq!(game.state.field.len(), 2);
}

// =============================================================================
// Full Match
// =============================================================================

/// Test that a match keeps running until the channel gives up, and that the
/// cancellation unwinds every event.
#[test]
fn test_random_match_runs_until_cancelled() {
    let mut game = seated(6);
    game.load(vec![Box::new(Core)]).unwrap();
    let mut channel = RandomChannel::new(6).with_limit(60);

    let result = game.start(&mut channel);

    assert_eq!(result, Err(GameError::Interrupted(Interrupted)));
    assert!(game.is_started());
    assert!(game.events.active().is_empty());
    assert!(game.events.iter().all(|node| node.finished));
}

/// Test that the same seed and the same random channel replay the same match.
#[test]
fn test_random_match_is_deterministic() {
    let play = |seed: u64| {
        let mut game = seated(seed);
        game.load(vec![Box::new(Core)]).unwrap();
        let mut channel = RandomChannel::new(seed).with_limit(40);
        let _ = game.start(&mut channel);
        game
    };

    let first = play(9);
    let second = play(9);

    assert_eq!(first.state, second.state);
    assert_eq!(first.events.len(), second.events.len());
}
