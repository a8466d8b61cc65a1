//! The event life-cycle.
//!
//! ```text
//! enter ─► register ─► before<Name> ─► pre-resolve ─► resolve ─► after<Name> ─► exit
//!              │                            │
//!              └──── false ─────────────────┴──────────────────────────────► exit
//! ```
//!
//! Exit always runs: the active stack is truncated back to the event and the
//! event is marked finished. After-finish callbacks only run when the event
//! was not interrupted.

use super::tree::{Event, EventId, EventTag, Hooks};
use super::{battle, effect, integrity, movement, phase, revelation};
use crate::cards::Card;
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process};

impl EventTag {
    /// Life-cycle hooks of this kind.
    #[must_use]
    pub fn hooks(self) -> Hooks {
        use super::phase::Phase;

        match self {
            EventTag::Plain => Hooks::default(),
            EventTag::Movement => Hooks {
                register: Some(movement::register),
                resolve: Some(movement::resolve),
                ..Hooks::default()
            },
            EventTag::Battle => Hooks {
                register: Some(battle::register),
                resolve: Some(battle::resolve),
                ..Hooks::default()
            },
            EventTag::Integrity => Hooks {
                register: Some(integrity::register),
                resolve: Some(integrity::resolve),
                ..Hooks::default()
            },
            EventTag::Effect => Hooks {
                register: Some(effect::register),
                pre_resolve: Some(effect::pre_resolve),
                resolve: Some(effect::resolve),
            },
            EventTag::Revelation => Hooks {
                register: Some(revelation::register),
                resolve: Some(revelation::resolve),
                ..Hooks::default()
            },
            EventTag::Phase(Phase::Start) => Hooks {
                resolve: Some(phase::resolve_start),
                ..Hooks::default()
            },
            EventTag::Phase(Phase::Main) => Hooks {
                resolve: Some(phase::resolve_main),
                ..Hooks::default()
            },
            EventTag::Phase(Phase::End) => Hooks {
                resolve: Some(phase::resolve_end),
                ..Hooks::default()
            },
            EventTag::Turn => Hooks {
                resolve: Some(phase::resolve_turn),
                ..Hooks::default()
            },
            EventTag::Round => Hooks {
                resolve: Some(phase::resolve_round),
                ..Hooks::default()
            },
            EventTag::Initial => Hooks {
                resolve: Some(phase::resolve_initial),
                ..Hooks::default()
            },
        }
    }
}

impl Game {
    /// Run `event` as a child of the current event, to completion.
    ///
    /// Returns the event's result, or [`Interrupted`](crate::Interrupted)
    /// when the decision channel cancelled somewhere inside it.
    pub fn run(&mut self, decisions: &mut dyn DecisionChannel, event: Event) -> Process {
        let controller_position = event
            .controller
            .and_then(|card| self.state.card(card))
            .and_then(Card::position_id);
        let id = self.events.enter(event, controller_position);
        let hooks = self.events[id].kind.tag().hooks();
        tracing::debug!(
            event = %id,
            name = %self.events[id].name,
            parent = ?self.events[id].parent,
            "event started"
        );

        let outcome = self.run_body(decisions, id, hooks);

        let callbacks = self.events.exit(id);
        tracing::debug!(event = %id, result = ?outcome, "event finished");
        let result = outcome?;

        for callback in callbacks {
            callback(self, decisions, id)?;
        }
        Ok(result)
    }

    /// Run `event` if there is one. A missing event reports `false`.
    pub fn run_optional(&mut self, decisions: &mut dyn DecisionChannel, event: Option<Event>) -> Process {
        match event {
            Some(event) => self.run(decisions, event),
            None => Ok(false),
        }
    }

    fn run_body(&mut self, decisions: &mut dyn DecisionChannel, id: EventId, hooks: Hooks) -> Process {
        if let Some(register) = hooks.register {
            if !register(self, decisions, id)? {
                return Ok(false);
            }
        }

        let before = self.events[id].timings("before");
        self.trigger(decisions, id, before)?;

        if let Some(pre_resolve) = hooks.pre_resolve {
            if !pre_resolve(self, decisions, id)? {
                tracing::debug!(event = %id, "event terminated before resolving");
                return Ok(false);
            }
        }
        let result = match hooks.resolve {
            Some(resolve) => resolve(self, decisions, id)?,
            None => true,
        };

        let after = self.events[id].timings("after");
        self.trigger(decisions, id, after)?;
        Ok(result)
    }
}
