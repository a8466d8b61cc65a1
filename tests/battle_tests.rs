//! Battle integration tests.
//!
//! These tests verify facing-based damage, symmetric exchanges and the
//! position snapshot that drops characters who left the battle.

mod common;

use common::{duel, fighter, field_character, minimal, Script};
use grid_ccg::{
    Axis, CardDefinition, Command, DecisionChannel, Direction, Effect, EventNode, ExclusiveZone, Game,
    Orientation,
};

fn integrity_events(game: &Game) -> Vec<&EventNode> {
    game.events.iter().filter(|node| node.as_integrity().is_some()).collect()
}

// =============================================================================
// Damage
// =============================================================================

/// Test that attack 3 against defense 1 deals 2 damage.
#[test]
fn test_attack_beats_defense() {
    let (mut game, alice, bob) = duel(1);
    fighter(&mut game, "demo:striker", 3, 1, 1);
    fighter(&mut game, "demo:guard", 0, 1, 1);
    let striker = field_character(&mut game, alice, "demo:striker", 2, 2, Direction::North);
    // Facing across the attack axis: the guard only defends.
    let guard = field_character(&mut game, bob, "demo:guard", 2, 1, Direction::East);

    let battle = game.battle(alice, striker, guard, Axis::Y);
    assert_eq!(game.run_optional(&mut minimal, battle), Ok(true));

    assert_eq!(game.state.players[bob].integrity, 14);
    assert_eq!(game.state.players[alice].integrity, 16);

    let damage = integrity_events(&game);
    assert_eq!(damage.len(), 1);
    let modifications = damage[0].as_integrity().unwrap();
    assert_eq!(modifications.total_for(guard), -2);
    assert_eq!(modifications.modifications.len(), 1);
}

/// Test that two characters facing each other both take damage in one
/// integrity event.
#[test]
fn test_exchange_is_symmetric() {
    let (mut game, alice, bob) = duel(2);
    fighter(&mut game, "demo:striker", 3, 1, 1);
    fighter(&mut game, "demo:brawler", 2, 1, 1);
    let striker = field_character(&mut game, alice, "demo:striker", 2, 2, Direction::North);
    let brawler = field_character(&mut game, bob, "demo:brawler", 2, 1, Direction::South);

    let battle = game.battle(alice, striker, brawler, Axis::Y);
    assert_eq!(game.run_optional(&mut minimal, battle), Ok(true));

    let damage = integrity_events(&game);
    assert_eq!(damage.len(), 1);
    let modifications = damage[0].as_integrity().unwrap();
    assert_eq!(modifications.modifications.len(), 2);
    assert_eq!(modifications.total_for(brawler), -3);
    assert_eq!(modifications.total_for(striker), -2);

    assert_eq!(game.state.players[bob].integrity, 13);
    assert_eq!(game.state.players[alice].integrity, 14);
}

/// Test that a defender out of range takes nothing and the battle fails.
#[test]
fn test_out_of_range_battle_fails() {
    let (mut game, alice, bob) = duel(3);
    fighter(&mut game, "demo:striker", 3, 1, 1);
    let striker = field_character(&mut game, alice, "demo:striker", 2, 4, Direction::North);
    let far = field_character(&mut game, bob, "demo:striker", 2, 1, Direction::East);

    let battle = game.battle(alice, striker, far, Axis::Y);

    assert_eq!(game.run_optional(&mut minimal, battle), Ok(false));
    assert!(integrity_events(&game).is_empty());
    assert_eq!(game.state.players[bob].integrity, 16);
}

// =============================================================================
// Snapshots
// =============================================================================

/// Test that a defender who leaves the field before resolve is no longer in
/// the battle.
#[test]
fn test_defender_leaving_escapes_battle() {
    let (mut game, alice, bob) = duel(4);
    fighter(&mut game, "demo:striker", 3, 1, 1);
    let striker = field_character(&mut game, alice, "demo:striker", 2, 2, Direction::North);
    let guard = field_character(&mut game, bob, "demo:striker", 2, 1, Direction::East);

    game.register_effect(
        Effect::new("demo:retreat")
            .with_bytes(vec![])
            .with_trigger("beforeBattle")
            .with_output(move |game: &mut Game, decisions: &mut dyn DecisionChannel, _| {
                let event = game.download(&[guard], None);
                game.run_optional(decisions, event)
            }),
    );
    game.register_card(CardDefinition::new("demo:smoke").with_usage("demo:retreat"));
    let smoke = game.add_card(bob, "demo:smoke", ExclusiveZone::Hand);
    game.state.claim_zone(bob, ExclusiveZone::Hand);

    let mut script = Script::new().with_command(Command::Usage {
        character: guard,
        card: smoke,
    });
    let battle = game.battle(alice, striker, guard, Axis::Y);

    assert_eq!(game.run_optional(&mut script, battle), Ok(false));
    assert!(script.commands.is_empty());
    assert!(game.state.players[bob].hand.contains(&guard));
    assert!(integrity_events(&game).is_empty());
    assert_eq!(game.state.players[bob].integrity, 16);
}

/// Test that a character moved within the field keeps its place in the
/// battle.
#[test]
fn test_field_move_keeps_battle_identity() {
    let (mut game, alice, bob) = duel(5);
    fighter(&mut game, "demo:striker", 3, 1, 1);
    let striker = field_character(&mut game, alice, "demo:striker", 2, 2, Direction::North);
    let guard = field_character(&mut game, bob, "demo:striker", 3, 1, Direction::East);

    game.register_effect(
        Effect::new("demo:sidestep")
            .with_bytes(vec![])
            .with_trigger("beforeBattle")
            .with_output(move |game: &mut Game, decisions: &mut dyn DecisionChannel, _| {
                let event = game.move_character(bob, guard, Orientation::new(2, 1, Direction::East));
                game.run_optional(decisions, event)
            }),
    );
    game.register_card(CardDefinition::new("demo:step").with_usage("demo:sidestep"));
    let step = game.add_card(bob, "demo:step", ExclusiveZone::Hand);
    game.state.claim_zone(bob, ExclusiveZone::Hand);

    let mut script = Script::new().with_command(Command::Usage {
        character: guard,
        card: step,
    });
    let battle = game.battle(alice, striker, guard, Axis::Y);

    assert_eq!(game.run_optional(&mut script, battle), Ok(true));
    assert_eq!(game.state.players[bob].integrity, 14);
}
