//! Events: the nested, suspendable units of rule resolution.
//!
//! - [`tree`]: the event arena, the active stack and unstarted [`Event`]s
//! - [`lifecycle`]: [`Game::run`](crate::Game::run) and the per-kind hooks
//! - [`trigger`]: the priority loop opened by announced timings
//! - one module per concrete kind

pub mod battle;
pub mod effect;
pub mod integrity;
pub mod lifecycle;
pub mod movement;
pub mod phase;
pub mod revelation;
pub mod tree;
pub mod trigger;

pub use battle::{Attack, Battle};
pub use effect::{Activation, Usage, CARDS};
pub use integrity::{Integrity, IntegrityModification, ModificationKind};
pub use movement::Movement;
pub use phase::{Phase, MAIN};
pub use revelation::{Revelation, REVELATIONS};
pub use tree::{AfterFinish, Event, EventId, EventKind, EventNode, EventTag, EventTree, Hook, Hooks};
pub use trigger::{COMMANDS, COMMAND_ALIAS};
