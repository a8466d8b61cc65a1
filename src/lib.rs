//! # grid-ccg
//!
//! Event orchestration engine for a turn-based card game played on a grid.
//!
//! ## Design Principles
//!
//! 1. **Everything is an event**: moves, battles, damage, effect activations,
//!    phases, turns and rounds all run through one life-cycle
//!    (`register`, before-triggers, `pre_resolve`, `resolve`, after-triggers).
//!
//! 2. **Suspension through the channel**: whenever the engine needs a player
//!    decision it blocks on a [`DecisionChannel`]. Cancelling unwinds every
//!    running event with [`Interrupted`].
//!
//! 3. **Position identity**: events remember where cards were when they
//!    registered, and do nothing to cards that have moved since.
//!
//! ## Modules
//!
//! - `core`: players, state, RNG, configuration
//! - `zones`: grid geometry and card positions
//! - `cards`: card definitions and instances
//! - `protocol`: requests, responses, the decision channel
//! - `effects`: the effect catalog and targeting
//! - `events`: the event tree, life-cycle, priority loop and event kinds
//! - `rules`: player commands and their enumeration
//! - `game`: the [`Game`] coordinator, event factories, setup, extensions
//! - `error`: setup errors and cancellation

pub mod core;
pub mod zones;
pub mod cards;
pub mod protocol;
pub mod effects;
pub mod events;
pub mod rules;
pub mod game;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    ExclusiveZone, Player, PlayerId, PlayerMap,
    GameRng, GameRngState,
    GameConfig, BASIC_CHARACTER, DEFAULT_INTEGRITY,
    State,
};

pub use crate::zones::{Axis, Coordinate, Destination, Direction, Grid, Orientation, Place, Position, PositionId};

pub use crate::cards::{BattleStat, Card, CardDefinition, CardId, CardRegistry, Color, CHARACTER_TYPE};

pub use crate::protocol::{
    Choice, RawResponse, RawResponses, Request, RequestBatch, RequestField, Response, Responses,
    DecisionChannel, IntoProcess, Process, RandomChannel, Reply,
};

pub use crate::effects::{Byte, Effect, EffectHook, EffectRegistry, TargetQuery, TargetSpec};

pub use crate::events::{
    Event, EventId, EventKind, EventNode, EventTree,
    Attack, Battle, Activation, Integrity, Movement, Phase, Revelation,
    COMMANDS, MAIN,
};

pub use crate::rules::Command;

pub use crate::game::{Extension, Game};

pub use crate::error::{GameError, Interrupted};
