//! Effect definitions.
//!
//! An `Effect` is catalog data supplied by extensions: what it costs, when
//! it may be activated, what it targets, and the two hooks that do its work.
//!
//! ## Hooks
//!
//! - `input`: runs after targets are chosen and the cost is paid, before
//!   any timing is announced. Returning false aborts the activation.
//! - `output`: the effect's resolution.
//!
//! Hooks receive the running effect event's id and may run nested events.
//! They can return a plain `bool` or a full [`Process`].
//!
//! ## Limits
//!
//! `limits` maps a scope name to the number of activations a single
//! character may make of this effect within that scope.

use std::collections::BTreeMap;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::targeting::TargetSpec;
use crate::cards::{CardId, Color};
use crate::events::EventId;
use crate::game::Game;
use crate::protocol::{DecisionChannel, IntoProcess, Process};

/// One unit of activation cost, paid with a hand card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Byte {
    /// Any card.
    Generic,
    /// A colorless card.
    Void,
    /// A card of this color. The payment is revealed.
    Color(Color),
}

impl Byte {
    /// Whether a card with `colors` can pay this byte.
    #[must_use]
    pub fn accepts(&self, colors: &[Color]) -> bool {
        match self {
            Byte::Generic => true,
            Byte::Void => colors.is_empty(),
            Byte::Color(color) => colors.contains(color),
        }
    }
}

/// Static activation precondition: `(game, character, card)`.
pub type EffectCondition = Rc<dyn Fn(&Game, CardId, CardId) -> bool>;

/// Effect hook, given the running effect event.
pub type EffectHook = Rc<dyn Fn(&mut Game, &mut dyn DecisionChannel, EventId) -> Process>;

/// A named effect.
#[derive(Clone, Default)]
pub struct Effect {
    pub name: String,
    /// Activation cost. Cards whose usage effect has no byte list cannot be used.
    pub bytes: Option<Vec<Byte>>,
    pub condition: Option<EffectCondition>,
    pub input: Option<EffectHook>,
    pub output: Option<EffectHook>,
    pub limits: BTreeMap<String, u32>,
    pub targets: Vec<TargetSpec>,
    /// Timings during which the effect may be activated.
    pub triggers: Vec<String>,
}

impl Effect {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bytes(mut self, bytes: Vec<Byte>) -> Self {
        self.bytes = Some(bytes);
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, timing: impl Into<String>) -> Self {
        self.triggers.push(timing.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, scope: impl Into<String>, limit: u32) -> Self {
        self.limits.insert(scope.into(), limit);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.targets.push(target);
        self
    }

    #[must_use]
    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Game, CardId, CardId) -> bool + 'static,
    {
        self.condition = Some(Rc::new(condition));
        self
    }

    #[must_use]
    pub fn with_input<F, R>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Game, &mut dyn DecisionChannel, EventId) -> R + 'static,
        R: IntoProcess,
    {
        self.input = Some(Rc::new(move |game, decisions, event| {
            hook(game, decisions, event).into_process()
        }));
        self
    }

    #[must_use]
    pub fn with_output<F, R>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Game, &mut dyn DecisionChannel, EventId) -> R + 'static,
        R: IntoProcess,
    {
        self.output = Some(Rc::new(move |game, decisions, event| {
            hook(game, decisions, event).into_process()
        }));
        self
    }

    /// Whether this effect may be activated during any of `timings`.
    #[must_use]
    pub fn is_triggered_by(&self, timings: &[String]) -> bool {
        self.triggers.iter().any(|t| timings.contains(t))
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("name", &self.name)
            .field("bytes", &self.bytes)
            .field("limits", &self.limits)
            .field("targets", &self.targets)
            .field("triggers", &self.triggers)
            .finish_non_exhaustive()
    }
}

/// Effect catalog keyed by name.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    effects: FxHashMap<String, Effect>,
}

impl EffectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect, replacing any previous one with the same name.
    pub fn register(&mut self, effect: Effect) -> Option<Effect> {
        self.effects.insert(effect.name.clone(), effect)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Effect> {
        self.effects.get(name)
    }

    /// Activation limits of a named effect; empty when unknown.
    #[must_use]
    pub fn limits(&self, name: &str) -> BTreeMap<String, u32> {
        self.get(name).map(|e| e.limits.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
