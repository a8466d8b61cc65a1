//! Suspension: processes and the decision channel they block on.
//!
//! Every event runs as a plain call that may, at a request, hand a
//! [`RequestBatch`] to the [`DecisionChannel`] and wait for its [`Reply`].
//! Only one process runs at a time and nested events are driven to
//! completion by ordinary calls, so the call stack is the process stack.
//!
//! A reply can be:
//!
//! - [`Reply::Answer`]: raw indices, validated against the batch. Invalid
//!   answers re-issue the same batch.
//! - [`Reply::NoAnswer`]: re-issue the same batch.
//! - [`Reply::Cancel`]: stop. The running process unwinds with
//!   [`Interrupted`] through every awaiting event.

use crate::core::GameRng;
use crate::error::Interrupted;
use crate::game::Game;

use super::request::{RawResponse, RawResponses, RequestBatch};

/// Result of a process: the event's success flag, unless interrupted.
pub type Process = Result<bool, Interrupted>;

/// Hooks may return either a plain flag or a full [`Process`].
pub trait IntoProcess {
    fn into_process(self) -> Process;
}

impl IntoProcess for bool {
    fn into_process(self) -> Process {
        Ok(self)
    }
}

impl IntoProcess for Process {
    fn into_process(self) -> Process {
        self
    }
}

/// What a decision channel hands back for a request batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Answer(RawResponses),
    NoAnswer,
    Cancel,
}

/// The external source of player decisions.
///
/// The game is passed read-only so a channel can render or inspect state
/// before answering.
pub trait DecisionChannel {
    fn decide(&mut self, game: &Game, requests: &RequestBatch) -> Reply;
}

impl<F> DecisionChannel for F
where
    F: FnMut(&Game, &RequestBatch) -> Reply,
{
    fn decide(&mut self, game: &Game, requests: &RequestBatch) -> Reply {
        self(game, requests)
    }
}

/// Answers every request with a uniformly random valid selection.
///
/// Cancels once its reply budget is spent, or when a field cannot be
/// satisfied with the options on offer.
#[derive(Clone, Debug)]
pub struct RandomChannel {
    rng: GameRng,
    remaining: Option<usize>,
}

impl RandomChannel {
    /// A channel that answers forever.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            remaining: None,
        }
    }

    /// Builder: cancel after `replies` answers.
    #[must_use]
    pub fn with_limit(mut self, replies: usize) -> Self {
        self.remaining = Some(replies);
        self
    }

    /// Answers left before the channel cancels.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        self.remaining
    }
}

impl DecisionChannel for RandomChannel {
    fn decide(&mut self, _game: &Game, requests: &RequestBatch) -> Reply {
        match self.remaining {
            Some(0) => return Reply::Cancel,
            Some(ref mut remaining) => *remaining -= 1,
            None => {}
        }

        let mut raw = RawResponses::default();
        for (player, request) in requests.iter() {
            let mut answer = RawResponse::new();
            for (key, field) in &request.fields {
                let available = field.options.len().min(field.maximum);
                if available < field.minimum {
                    tracing::warn!(%player, key, "random channel cannot satisfy request field");
                    return Reply::Cancel;
                }
                let count = self.rng.integer_in_range(field.minimum as i64, available as i64) as usize;
                let mut indices: Vec<usize> = (0..field.options.len()).collect();
                self.rng.shuffle(&mut indices);
                indices.truncate(count);
                answer.insert(key.clone(), indices);
            }
            raw.insert(player, answer);
        }

        Reply::Answer(raw)
    }
}
