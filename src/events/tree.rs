//! The event tree.
//!
//! Every event that ever ran stays in an arena, linked to its parent and
//! children by [`EventId`]. Events still running form the *active stack*:
//! a prefix of ancestors ending at the current event. History queries
//! ("how often has this character activated during the main phase") walk
//! the tree; only stack membership says what is still running.
//!
//! ## Invariants
//!
//! - A node's parent and its place in the parent's child list are set once,
//!   when it enters, and never change.
//! - New children are only attached to the current (deepest active) event.
//! - When an event exits, the stack is truncated back to its slot.

use std::ops::Index;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::battle::Battle;
use super::effect::Activation;
use super::integrity::Integrity;
use super::movement::Movement;
use super::phase::Phase;
use super::revelation::Revelation;
use crate::cards::CardId;
use crate::core::PlayerId;
use crate::game::Game;
use crate::protocol::{DecisionChannel, Process};
use crate::zones::PositionId;

/// Stable identifier of an event in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u32);

impl EventId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// Kind-specific payload of an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// No hooks: only announces its before and after timings.
    Plain,
    Movement(Movement),
    Battle(Battle),
    Integrity(Integrity),
    Effect(Activation),
    Revelation(Revelation),
    Phase(Phase),
    Turn,
    Round,
    Initial,
}

impl EventKind {
    /// Payload-free tag used to pick life-cycle hooks.
    #[must_use]
    pub fn tag(&self) -> EventTag {
        match self {
            EventKind::Plain => EventTag::Plain,
            EventKind::Movement(_) => EventTag::Movement,
            EventKind::Battle(_) => EventTag::Battle,
            EventKind::Integrity(_) => EventTag::Integrity,
            EventKind::Effect(_) => EventTag::Effect,
            EventKind::Revelation(_) => EventTag::Revelation,
            EventKind::Phase(phase) => EventTag::Phase(*phase),
            EventKind::Turn => EventTag::Turn,
            EventKind::Round => EventTag::Round,
            EventKind::Initial => EventTag::Initial,
        }
    }
}

/// Event kinds without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTag {
    Plain,
    Movement,
    Battle,
    Integrity,
    Effect,
    Revelation,
    Phase(Phase),
    Turn,
    Round,
    Initial,
}

/// A life-cycle hook.
pub type Hook = fn(&mut Game, &mut dyn DecisionChannel, EventId) -> Process;

/// The hooks an event kind supplies. A missing hook succeeds.
///
/// A `pre_resolve` that reports `false` terminates the whole event: resolve
/// and the after-timings are skipped and the event reports failure.
#[derive(Clone, Copy, Default)]
pub struct Hooks {
    pub register: Option<Hook>,
    pub pre_resolve: Option<Hook>,
    pub resolve: Option<Hook>,
}

/// An event that has not started yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub aliases: SmallVec<[String; 2]>,
    /// Card the event acts for.
    pub controller: Option<CardId>,
    /// Player the event acts for, when no card does.
    pub player: Option<PlayerId>,
    pub kind: EventKind,
}

impl Event {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EventKind) -> Self {
        Self {
            name: name.into(),
            aliases: SmallVec::new(),
            controller: None,
            player: None,
            kind,
        }
    }

    /// A hook-less event that only announces its timings.
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, EventKind::Plain)
    }

    #[must_use]
    pub fn with_controller(mut self, controller: Option<CardId>) -> Self {
        self.controller = controller;
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// A started event, running or finished.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNode {
    pub id: EventId,
    pub name: String,
    pub aliases: SmallVec<[String; 2]>,
    pub controller: Option<CardId>,
    /// The controller's position identity when the event entered.
    pub controller_position: Option<PositionId>,
    pub player: Option<PlayerId>,
    pub parent: Option<EventId>,
    pub children: Vec<EventId>,
    pub finished: bool,
    /// Timings this event is announcing right now.
    pub triggering: Vec<String>,
    /// Timings the parent was announcing when this event entered.
    pub triggered_from: Vec<String>,
    /// Player offered priority by this event's open trigger loop.
    pub priority_pointer: Option<PlayerId>,
    pub kind: EventKind,
}

impl EventNode {
    /// Timings announced around this event, aliases first:
    /// `prefix` + capitalized name.
    #[must_use]
    pub fn timings(&self, prefix: &str) -> Vec<String> {
        self.aliases
            .iter()
            .chain(std::iter::once(&self.name))
            .map(|name| format!("{prefix}{}", capitalize(name)))
            .collect()
    }

    #[must_use]
    pub fn is_announcing(&self, timing: &str) -> bool {
        self.triggering.iter().any(|t| t == timing)
    }

    #[must_use]
    pub fn was_triggered_from(&self, timing: &str) -> bool {
        self.triggered_from.iter().any(|t| t == timing)
    }

    #[must_use]
    pub fn as_movement(&self) -> Option<&Movement> {
        match &self.kind {
            EventKind::Movement(movement) => Some(movement),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_battle(&self) -> Option<&Battle> {
        match &self.kind {
            EventKind::Battle(battle) => Some(battle),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integrity(&self) -> Option<&Integrity> {
        match &self.kind {
            EventKind::Integrity(integrity) => Some(integrity),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_effect(&self) -> Option<&Activation> {
        match &self.kind {
            EventKind::Effect(activation) => Some(activation),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_revelation(&self) -> Option<&Revelation> {
        match &self.kind {
            EventKind::Revelation(revelation) => Some(revelation),
            _ => None,
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Callback run once an event has finished normally.
pub type AfterFinish = Box<dyn FnOnce(&mut Game, &mut dyn DecisionChannel, EventId) -> Process>;

/// Arena of events plus the active stack.
#[derive(Default)]
pub struct EventTree {
    nodes: Vec<EventNode>,
    active: Vec<EventId>,
    after_finish: FxHashMap<EventId, Vec<AfterFinish>>,
}

impl EventTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `event` under the current event and push it on the stack.
    pub fn enter(&mut self, event: Event, controller_position: Option<PositionId>) -> EventId {
        let id = EventId(self.nodes.len() as u32);
        let parent = self.current();
        let triggered_from = parent
            .map(|p| self.nodes[p.index()].triggering.clone())
            .unwrap_or_default();

        self.nodes.push(EventNode {
            id,
            name: event.name,
            aliases: event.aliases,
            controller: event.controller,
            controller_position,
            player: event.player,
            parent,
            children: Vec::new(),
            finished: false,
            triggering: Vec::new(),
            triggered_from,
            priority_pointer: None,
            kind: event.kind,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.active.push(id);
        id
    }

    /// Pop `id` (and anything left above it), mark it finished and hand back
    /// its queued callbacks.
    pub fn exit(&mut self, id: EventId) -> Vec<AfterFinish> {
        if let Some(slot) = self.active.iter().position(|&a| a == id) {
            self.active.truncate(slot);
        }
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.finished = true;
        }
        self.after_finish.remove(&id).unwrap_or_default()
    }

    /// Queue a callback to run after `id` finishes.
    pub fn push_after_finish(&mut self, id: EventId, callback: AfterFinish) {
        self.after_finish.entry(id).or_default().push(callback);
    }

    #[must_use]
    pub fn get(&self, id: EventId) -> Option<&EventNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: EventId) -> Option<&mut EventNode> {
        self.nodes.get_mut(id.index())
    }

    /// The deepest running event.
    #[must_use]
    pub fn current(&self) -> Option<EventId> {
        self.active.last().copied()
    }

    /// Running events, outermost first.
    #[must_use]
    pub fn active(&self) -> &[EventId] {
        &self.active
    }

    #[must_use]
    pub fn is_active(&self, id: EventId) -> bool {
        self.active.contains(&id)
    }

    /// The innermost running event matching `predicate`.
    pub fn find_active(&self, predicate: impl Fn(&EventNode) -> bool) -> Option<EventId> {
        self.active
            .iter()
            .rev()
            .copied()
            .find(|&id| predicate(&self.nodes[id.index()]))
    }

    /// All descendants of `id`, depth-first, each node before its children.
    #[must_use]
    pub fn descendants(&self, id: EventId) -> Vec<EventId> {
        let mut result = Vec::new();
        let mut stack: Vec<EventId> = match self.get(id) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return result,
        };
        while let Some(next) = stack.pop() {
            result.push(next);
            stack.extend(self.nodes[next.index()].children.iter().rev().copied());
        }
        result
    }

    /// Number of events ever started.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventNode> + Clone {
        self.nodes.iter()
    }
}

impl Index<EventId> for EventTree {
    type Output = EventNode;

    fn index(&self, id: EventId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

impl std::fmt::Debug for EventTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTree")
            .field("nodes", &self.nodes.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
