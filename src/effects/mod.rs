//! Effect catalog: costs, targets, limits and hooks for card abilities.
//!
//! Effects are data registered by extensions. The engine runs them through
//! effect events (see `events::effect`).

pub mod effect;
pub mod targeting;

pub use effect::{Byte, Effect, EffectCondition, EffectHook, EffectRegistry};
pub use targeting::{is_character, is_other_character, predicate, TargetPredicate, TargetQuery, TargetSpec};
