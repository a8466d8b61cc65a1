//! Turn structure integration tests.
//!
//! These tests verify the start-phase draw, the end-phase discard request
//! and the order in which rounds hand out turns.

mod common;

use common::{duel, Script};
use grid_ccg::{Event, EventKind, ExclusiveZone, Game, PlayerId, RequestBatch};

fn fill(game: &mut Game, player: PlayerId, zone: ExclusiveZone, count: usize) {
    for i in 0..count {
        game.add_card(player, format!("demo:filler{i}"), zone);
    }
    game.state.claim_zone(player, zone);
}

fn discard_requests(script: &Script) -> Vec<&RequestBatch> {
    script
        .batches
        .iter()
        .filter(|batch| batch.iter().any(|(_, request)| request.field("cards").is_some()))
        .collect()
}

// =============================================================================
// Start Phase
// =============================================================================

/// Test that every player draws two cards from the top of their deck.
#[test]
fn test_start_phase_draws_two() {
    let (mut game, alice, bob) = duel(1);
    fill(&mut game, alice, ExclusiveZone::Deck, 3);
    fill(&mut game, bob, ExclusiveZone::Deck, 1);
    let alice_deck = game.state.players[alice].deck.clone();

    assert_eq!(game.run(&mut Script::new(), Event::turn(alice)), Ok(true));

    assert_eq!(game.state.players[alice].hand, alice_deck[1..].to_vec());
    assert_eq!(game.state.players[alice].deck, alice_deck[..1].to_vec());
    assert_eq!(game.state.players[bob].hand.len(), 1);
    assert!(game.state.players[bob].deck.is_empty());
}

// =============================================================================
// End Phase
// =============================================================================

/// Test that a hand of five against integrity three asks for exactly one
/// discard, and a player within their integrity is not asked.
#[test]
fn test_end_phase_discards_one() {
    let (mut game, alice, bob) = duel(2);
    fill(&mut game, alice, ExclusiveZone::Hand, 5);
    fill(&mut game, bob, ExclusiveZone::Hand, 2);
    game.state.players[alice].integrity = 3;
    let hand = game.state.players[alice].hand.clone();

    let mut script = Script::new();
    assert_eq!(game.run(&mut script, Event::turn(alice)), Ok(true));

    let requests = discard_requests(&script);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].players().collect::<Vec<_>>(), vec![alice]);
    let field = requests[0].get(alice).unwrap().field("cards").unwrap();
    assert_eq!((field.minimum, field.maximum), (1, 1));
    assert_eq!(field.options.len(), 5);

    assert_eq!(game.state.players[alice].hand, hand[1..].to_vec());
    assert_eq!(game.state.players[alice].recycle_bin, vec![hand[0]]);
    assert_eq!(game.state.players[bob].hand.len(), 2);
}

/// Test that every player over their integrity is asked in one batch,
/// starting with the turn player.
#[test]
fn test_end_phase_asks_everyone_at_once() {
    let (mut game, alice, bob) = duel(3);
    fill(&mut game, alice, ExclusiveZone::Hand, 3);
    fill(&mut game, bob, ExclusiveZone::Hand, 3);
    game.state.players[alice].integrity = 1;
    game.state.players[bob].integrity = 2;

    let mut script = Script::new();
    assert_eq!(game.run(&mut script, Event::turn(bob)), Ok(true));

    let requests = discard_requests(&script);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].players().collect::<Vec<_>>(), vec![bob, alice]);
    assert_eq!(game.state.players[alice].hand.len(), 2);
    assert_eq!(game.state.players[bob].hand.len(), 2);
}

/// Test that an empty hand is never asked, whatever the integrity.
#[test]
fn test_end_phase_skips_empty_hands() {
    let (mut game, alice, _) = duel(4);
    game.state.players[alice].integrity = -1;

    let mut script = Script::new();
    assert_eq!(game.run(&mut script, Event::turn(alice)), Ok(true));

    assert!(discard_requests(&script).is_empty());
}

// =============================================================================
// Rounds
// =============================================================================

/// Test that a round runs one turn per player in seating order, each with
/// start, main and end phases.
#[test]
fn test_round_turn_order() {
    let (mut game, alice, bob) = duel(5);
    game.state.seating = vec![bob, alice];

    assert_eq!(game.run(&mut Script::new(), Event::round()), Ok(true));

    let turns: Vec<_> = game
        .events
        .iter()
        .filter(|node| node.kind == EventKind::Turn)
        .map(|node| node.player)
        .collect();
    assert_eq!(turns, vec![Some(bob), Some(alice)]);

    let phases: Vec<_> = game
        .events
        .iter()
        .filter(|node| matches!(node.kind, EventKind::Phase(_)))
        .map(|node| node.name.as_str())
        .collect();
    assert_eq!(
        phases,
        vec!["startPhase", "mainPhase", "endPhase", "startPhase", "mainPhase", "endPhase"]
    );
    assert!(game.events.iter().all(|node| node.finished));
}

/// Test that the initial event keeps running rounds until cancelled.
#[test]
fn test_initial_runs_until_cancelled() {
    let (mut game, _, _) = duel(6);
    let mut script = Script::new().with_limit(200);

    assert!(game.run(&mut script, Event::initial()).is_err());

    let rounds = game.events.iter().filter(|node| node.kind == EventKind::Round).count();
    assert!(rounds >= 2);
    assert!(game.events.active().is_empty());
}
