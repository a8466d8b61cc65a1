//! Core engine types: players, state, RNG, configuration.

pub mod player;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{ExclusiveZone, Player, PlayerId, PlayerMap, DEFAULT_INTEGRITY};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, BASIC_CHARACTER};
pub use state::State;
