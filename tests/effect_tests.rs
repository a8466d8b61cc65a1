//! Effect activation integration tests.
//!
//! These tests verify byte payments, target selection and the buffer check
//! that stops a usage whose card left the buffer before resolving.

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{duel, fighter, field_character, Script};
use grid_ccg::effects::is_other_character;
use grid_ccg::{
    Byte, CardDefinition, CardId, Color, Command, DecisionChannel, Direction, Effect, EventId,
    ExclusiveZone, Game, PlayerId, RequestBatch, TargetSpec,
};

/// Register a usage card for `effect` and put one copy in `player`'s hand.
fn spell(game: &mut Game, player: PlayerId, effect: &str) -> CardId {
    let name = format!("{effect}:card");
    game.register_card(CardDefinition::new(name.clone()).with_usage(effect));
    hand_card(game, player, &name)
}

fn hand_card(game: &mut Game, player: PlayerId, name: &str) -> CardId {
    let card = game.add_card(player, name, ExclusiveZone::Hand);
    game.state.claim_zone(player, ExclusiveZone::Hand);
    card
}

/// An output hook that records that it ran.
fn recorder(ran: &Rc<Cell<bool>>) -> impl Fn(&mut Game, &mut dyn DecisionChannel, EventId) -> bool {
    let ran = ran.clone();
    move |_: &mut Game, _: &mut dyn DecisionChannel, _: EventId| {
        ran.set(true);
        true
    }
}

fn revealed(game: &Game) -> Vec<Vec<CardId>> {
    game.events
        .iter()
        .filter_map(|node| node.as_revelation())
        .map(|revelation| revelation.revealed.clone())
        .collect()
}

// =============================================================================
// Payment
// =============================================================================

/// Test that a generic byte is paid with any hand card, unrevealed, and the
/// payment goes to the bottom of the deck.
#[test]
fn test_generic_payment_goes_to_deck_bottom() {
    let (mut game, alice, _) = duel(1);
    let hero = field_character(&mut game, alice, "demo:hero", 2, 2, Direction::North);
    let bottom = game.add_card(alice, "demo:bottom", ExclusiveZone::Deck);
    game.state.claim_zone(alice, ExclusiveZone::Deck);

    let ran = Rc::new(Cell::new(false));
    game.register_effect(
        Effect::new("demo:bolt")
            .with_bytes(vec![Byte::Generic])
            .with_trigger("main")
            .with_output(recorder(&ran)),
    );
    let bolt = spell(&mut game, alice, "demo:bolt");
    let payment = hand_card(&mut game, alice, "demo:filler");

    let event = game.use_card(alice, hero, bolt);
    assert_eq!(game.run_optional(&mut Script::new(), event), Ok(true));

    assert!(ran.get());
    assert_eq!(game.state.players[alice].deck, vec![payment, bottom]);
    assert!(game.state.players[alice].hand.is_empty());
    assert_eq!(game.state.players[alice].recycle_bin, vec![bolt]);
    assert!(revealed(&game).is_empty());
}

/// Test that void and colored bytes take matching cards and reveal them.
#[test]
fn test_colored_payments_are_revealed() {
    let (mut game, alice, _) = duel(2);
    let hero = field_character(&mut game, alice, "demo:hero", 2, 2, Direction::North);
    game.register_card(CardDefinition::new("demo:ruby").with_color(Color::new("red")));

    let ran = Rc::new(Cell::new(false));
    game.register_effect(
        Effect::new("demo:flare")
            .with_bytes(vec![Byte::Void, Byte::Color(Color::new("red"))])
            .with_trigger("main")
            .with_output(recorder(&ran)),
    );
    let flare = spell(&mut game, alice, "demo:flare");
    let ruby = hand_card(&mut game, alice, "demo:ruby");
    let plain = hand_card(&mut game, alice, "demo:plain");

    let event = game.use_card(alice, hero, flare);
    assert_eq!(game.run_optional(&mut Script::new(), event), Ok(true));

    assert!(ran.get());
    assert_eq!(revealed(&game), vec![vec![plain], vec![ruby]]);
    // Each payment is slipped under the deck in turn.
    assert_eq!(game.state.players[alice].deck, vec![ruby, plain]);
    assert_eq!(game.state.players[alice].recycle_bin, vec![flare]);
}

/// Test that a byte nobody can pay fails the activation before it resolves.
#[test]
fn test_unpayable_byte_fails_activation() {
    let (mut game, alice, _) = duel(3);
    let hero = field_character(&mut game, alice, "demo:hero", 2, 2, Direction::North);

    let ran = Rc::new(Cell::new(false));
    game.register_effect(
        Effect::new("demo:frost")
            .with_bytes(vec![Byte::Color(Color::new("blue"))])
            .with_trigger("main")
            .with_output(recorder(&ran)),
    );
    let frost = spell(&mut game, alice, "demo:frost");
    let plain = hand_card(&mut game, alice, "demo:plain");

    let event = game.use_card(alice, hero, frost);
    assert_eq!(game.run_optional(&mut Script::new(), event), Ok(false));

    assert!(!ran.get());
    assert_eq!(game.state.players[alice].hand, vec![plain]);
    assert!(game.state.players[alice].deck.is_empty());
    // The staged card is cleared from the buffer once the activation ends.
    assert!(game.state.buffer.is_empty());
    assert_eq!(game.state.players[alice].recycle_bin, vec![frost]);
}

// =============================================================================
// Targets
// =============================================================================

/// Alice's scout at (2,2) with bob's scouts adjacent at (2,1) and far away
/// at (2,5).
fn skirmish(seed: u64) -> (Game, PlayerId, PlayerId, CardId, CardId) {
    let (mut game, alice, bob) = duel(seed);
    fighter(&mut game, "demo:scout", 1, 1, 1);
    let hero = field_character(&mut game, alice, "demo:scout", 2, 2, Direction::North);
    let near = field_character(&mut game, bob, "demo:scout", 2, 1, Direction::South);
    field_character(&mut game, bob, "demo:scout", 2, 5, Direction::North);
    (game, alice, bob, hero, near)
}

/// Test that only characters within range are offered as targets, and that
/// a chosen target that stayed put is still available when resolving.
#[test]
fn test_targets_within_range() {
    let (mut game, alice, _, hero, near) = skirmish(4);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    game.register_effect(
        Effect::new("demo:mark")
            .with_bytes(vec![])
            .with_trigger("main")
            .with_target(TargetSpec::single(is_other_character()))
            .with_output(move |game: &mut Game, _: &mut dyn DecisionChannel, id: EventId| {
                let activation = game.events[id].as_effect();
                log.borrow_mut().push((
                    activation.map(|a| a.targets.clone()).unwrap_or_default(),
                    activation.is_some_and(|a| a.is_available(&game.state, near)),
                ));
                true
            }),
    );
    let mark = spell(&mut game, alice, "demo:mark");

    assert_eq!(game.valid_targets(hero, "demo:mark", &[], None), vec![near]);

    let event = game.use_card(alice, hero, mark);
    assert_eq!(game.run_optional(&mut Script::new(), event), Ok(true));

    assert_eq!(*seen.borrow(), vec![(vec![vec![near]], true)]);
}

/// Test that a target that leaves its position after being chosen is no
/// longer available to the output.
#[test]
fn test_moved_target_is_unavailable() {
    let (mut game, alice, bob, hero, near) = skirmish(5);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    game.register_effect(
        Effect::new("demo:dodge")
            .with_bytes(vec![])
            .with_trigger("main")
            .with_target(TargetSpec::single(is_other_character()))
            .with_input(|game: &mut Game, decisions: &mut dyn DecisionChannel, id: EventId| {
                let chosen: Vec<CardId> = game.events[id]
                    .as_effect()
                    .map(|a| a.targets.concat())
                    .unwrap_or_default();
                let event = game.download(&chosen, None);
                game.run_optional(decisions, event)
            })
            .with_output(move |game: &mut Game, _: &mut dyn DecisionChannel, id: EventId| {
                let available = game.events[id]
                    .as_effect()
                    .is_some_and(|a| a.is_available(&game.state, near));
                log.borrow_mut().push(available);
                true
            }),
    );
    let dodge = spell(&mut game, alice, "demo:dodge");

    let event = game.use_card(alice, hero, dodge);
    assert_eq!(game.run_optional(&mut Script::new(), event), Ok(true));

    assert_eq!(*seen.borrow(), vec![false]);
    assert!(game.state.players[bob].hand.contains(&near));
}

// =============================================================================
// Buffer
// =============================================================================

/// Test that a usage whose card is removed from the buffer while its
/// timings are announced terminates: no output and no after-timings.
#[test]
fn test_card_leaving_buffer_terminates_usage() {
    let (mut game, alice, bob) = duel(6);
    let hero = field_character(&mut game, alice, "demo:hero", 1, 1, Direction::North);
    let guard = field_character(&mut game, bob, "demo:guard", 5, 5, Direction::South);

    let ran = Rc::new(Cell::new(false));
    game.register_effect(
        Effect::new("demo:fizzle")
            .with_bytes(vec![])
            .with_trigger("main")
            .with_output(recorder(&ran)),
    );
    let fizzle = spell(&mut game, alice, "demo:fizzle");

    game.register_effect(
        Effect::new("demo:counter")
            .with_bytes(vec![])
            .with_trigger("beforeEffect")
            .with_output(move |game: &mut Game, decisions: &mut dyn DecisionChannel, _: EventId| {
                let event = game.delete(&[fizzle], None);
                game.run_optional(decisions, event)
            }),
    );
    let counter = spell(&mut game, bob, "demo:counter");

    let mut script = Script::new().with_command(Command::Usage {
        character: guard,
        card: counter,
    });
    let mut announced: Vec<(EventId, Vec<String>)> = Vec::new();
    let mut channel = |game: &Game, batch: &RequestBatch| {
        if let Some(id) = game.current_event() {
            announced.push((id, game.events[id].triggering.clone()));
        }
        script.decide(game, batch)
    };

    let event = game.use_card(alice, hero, fizzle);
    assert_eq!(game.run_optional(&mut channel, event), Ok(false));

    assert!(script.commands.is_empty());
    assert!(!ran.get());
    assert_eq!(game.state.players[alice].recycle_bin, vec![fizzle]);
    assert_eq!(game.state.players[bob].recycle_bin, vec![counter]);

    let usage = game
        .events
        .iter()
        .find(|node| node.as_effect().and_then(|a| a.source()) == Some(fizzle))
        .map(|node| node.id)
        .unwrap();
    let timings: Vec<&String> = announced
        .iter()
        .filter(|(id, _)| *id == usage)
        .flat_map(|(_, timings)| timings)
        .collect();
    assert!(timings.iter().any(|t| *t == "beforeEffect"));
    assert!(!timings.iter().any(|t| *t == "afterEffect"));
}
