//! Turn structure: phases, turns, rounds and the initial event.
//!
//! ```text
//! initialization
//! └── round            (repeats forever)
//!     └── turn         (one per seated player)
//!         ├── startPhase   every player draws
//!         ├── mainPhase    opens the "main" timing
//!         └── endPhase     players over their integrity discard one card
//! ```

use serde::{Deserialize, Serialize};

use super::effect::CARDS;
use super::tree::{Event, EventId, EventKind};
use crate::core::PlayerId;
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process, Request, RequestBatch, RequestField};

/// Timing announced by the main phase.
pub const MAIN: &str = "main";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Start,
    Main,
    End,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Start, Phase::Main, Phase::End];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::Start => "startPhase",
            Phase::Main => "mainPhase",
            Phase::End => "endPhase",
        }
    }
}

impl Event {
    #[must_use]
    pub fn phase(phase: Phase, player: PlayerId) -> Self {
        Event::new(phase.name(), EventKind::Phase(phase)).with_player(player)
    }

    #[must_use]
    pub fn turn(player: PlayerId) -> Self {
        Event::new("turn", EventKind::Turn).with_player(player)
    }

    #[must_use]
    pub fn round() -> Self {
        Event::new("round", EventKind::Round)
    }

    #[must_use]
    pub fn initial() -> Self {
        Event::new("initialization", EventKind::Initial)
    }
}

pub(crate) fn resolve_start(game: &mut Game, decisions: &mut dyn DecisionChannel, _id: EventId) -> Process {
    let count = game.config.start_phase_draw;
    let counts: Vec<(PlayerId, usize)> = game.state.seating.iter().map(|&p| (p, count)).collect();
    let event = game.draw(&counts, None);
    game.run_optional(decisions, event)?;
    Ok(true)
}

pub(crate) fn resolve_main(game: &mut Game, decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    game.trigger(decisions, id, vec![MAIN.to_string()])?;
    Ok(true)
}

pub(crate) fn resolve_end(game: &mut Game, decisions: &mut dyn DecisionChannel, _id: EventId) -> Process {
    let Some(turn_player) = game.turn_player() else {
        return Ok(true);
    };

    let mut batch = RequestBatch::new();
    for player_id in game.state.seating_from(turn_player) {
        let Some(player) = game.state.player(player_id) else {
            continue;
        };
        if player.hand.is_empty() || player.hand.len() as i64 <= player.integrity {
            continue;
        }
        batch.push(
            player_id,
            Request::new().with_field(CARDS, RequestField::exactly(1, player.hand.iter().copied())),
        );
    }

    let responses = game.request(decisions, &batch)?;
    let discarded: Vec<_> = responses
        .iter()
        .flat_map(|(_, response)| response.cards(CARDS))
        .collect();
    let event = game.discard(&discarded, None);
    game.run_optional(decisions, event)?;
    Ok(true)
}

pub(crate) fn resolve_turn(game: &mut Game, decisions: &mut dyn DecisionChannel, id: EventId) -> Process {
    let Some(player) = game.event_player(id) else {
        return Ok(true);
    };
    for phase in Phase::ALL {
        game.run(decisions, Event::phase(phase, player))?;
    }
    Ok(true)
}

pub(crate) fn resolve_round(game: &mut Game, decisions: &mut dyn DecisionChannel, _id: EventId) -> Process {
    let seating = game.state.seating.clone();
    for player in seating {
        game.run(decisions, Event::turn(player))?;
    }
    Ok(true)
}

/// Runs rounds until the decision channel cancels.
pub(crate) fn resolve_initial(game: &mut Game, decisions: &mut dyn DecisionChannel, _id: EventId) -> Process {
    loop {
        game.run(decisions, Event::round())?;
    }
}
