//! Error types.
//!
//! Rule failures are not errors: an event that cannot do its work reports
//! `false` through its [`Process`](crate::protocol::Process) result. The two
//! types here cover what remains:
//!
//! - [`Interrupted`]: the decision channel cancelled the running process.
//!   It unwinds every awaiting event through `?`.
//! - [`GameError`]: setup failures that must stop game assembly before any
//!   event runs.

/// The decision channel answered a request with [`Reply::Cancel`](crate::protocol::Reply::Cancel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("process interrupted by the decision channel")]
pub struct Interrupted;

/// Errors raised while assembling or starting a game.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// An extension depends on itself, directly or transitively.
    #[error("circular dependency detected for extension \"{extension}\"")]
    CircularDependency { extension: String },

    /// An extension names a dependency that is neither loaded nor supplied.
    #[error("missing dependency \"{dependency}\" for extension \"{extension}\"")]
    MissingDependency {
        extension: String,
        dependency: String,
    },

    /// An extension initializer refused to run.
    #[error("extension \"{extension}\" failed to initialize: {message}")]
    Extension { extension: String, message: String },

    /// Games need at least two seated players.
    #[error("not enough players to start: {count}")]
    NotEnoughPlayers { count: usize },

    /// `prepare` was called on a game that already started.
    #[error("game already started")]
    AlreadyStarted,

    /// The running game was cancelled by its decision channel.
    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

pub type Result<T> = std::result::Result<T, GameError>;
