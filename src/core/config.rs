//! Game configuration.
//!
//! Everything a match needs to know before the first event runs: the seed,
//! the board outline, and the handful of numbers the built-in phases use.
//! Card and effect catalogs are not configuration; extensions register them
//! at load time.

use serde::{Deserialize, Serialize};

use crate::zones::Coordinate;

/// Card definition used for a seat that has no main character.
pub const BASIC_CHARACTER: &str = "refresh:basicCharacter";

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use grid_ccg::core::GameConfig;
///
/// let config = GameConfig::default()
///     .with_seed(7)
///     .with_start_phase_draw(1);
///
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.starting_integrity, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for seating and deck shuffles.
    pub seed: u64,

    /// Board outlines. The first one is the main boundary used for seating.
    pub boundaries: Vec<Vec<Coordinate>>,

    /// Integrity given to players created through [`Game::add_player_named`](crate::game::Game::add_player_named).
    pub starting_integrity: i64,

    /// Cards moved from deck to hand during setup.
    pub opening_draw: usize,

    /// Cards every player draws in each start phase.
    pub start_phase_draw: usize,

    /// Definition name of the stand-in main character.
    pub basic_character: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            boundaries: vec![vec![
                Coordinate::new(0, 0),
                Coordinate::new(7, 0),
                Coordinate::new(7, 7),
                Coordinate::new(0, 7),
            ]],
            starting_integrity: crate::core::player::DEFAULT_INTEGRITY,
            opening_draw: 1,
            start_phase_draw: 2,
            basic_character: BASIC_CHARACTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the board outlines.
    #[must_use]
    pub fn with_boundaries(mut self, boundaries: Vec<Vec<Coordinate>>) -> Self {
        self.boundaries = boundaries;
        self
    }

    #[must_use]
    pub fn with_starting_integrity(mut self, integrity: i64) -> Self {
        self.starting_integrity = integrity;
        self
    }

    #[must_use]
    pub fn with_opening_draw(mut self, count: usize) -> Self {
        self.opening_draw = count;
        self
    }

    #[must_use]
    pub fn with_start_phase_draw(mut self, count: usize) -> Self {
        self.start_phase_draw = count;
        self
    }

    /// Set the stand-in main character definition.
    #[must_use]
    pub fn with_basic_character(mut self, name: impl Into<String>) -> Self {
        self.basic_character = name.into();
        self
    }
}
