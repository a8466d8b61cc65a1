//! Request and response shapes.
//!
//! A [`Request`] maps field names to [`RequestField`]s: a list of options
//! plus how many of them must be picked. A [`RequestBatch`] addresses one
//! request to each of several players at once. Answers come back as raw
//! option indices ([`RawResponses`]) and are validated against the batch by
//! [`RequestBatch::resolve`]:
//!
//! - every addressed player must answer;
//! - every field resolves from the answer, or from its default options;
//! - indices must be unique, in range, and their count inside
//!   `[minimum, maximum]`.
//!
//! Any failure rejects the whole batch. There is no partial commit.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::PlayerId;
use crate::rules::Command;

/// Something a player can pick.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Card(CardId),
    Command(Command),
}

impl Choice {
    #[must_use]
    pub fn as_card(&self) -> Option<CardId> {
        match self {
            Choice::Card(card) => Some(*card),
            Choice::Command(_) => None,
        }
    }

    #[must_use]
    pub fn as_command(&self) -> Option<&Command> {
        match self {
            Choice::Command(command) => Some(command),
            Choice::Card(_) => None,
        }
    }
}

impl From<CardId> for Choice {
    fn from(card: CardId) -> Self {
        Choice::Card(card)
    }
}

impl From<Command> for Choice {
    fn from(command: Command) -> Self {
        Choice::Command(command)
    }
}

/// One question inside a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestField {
    pub minimum: usize,
    pub maximum: usize,
    pub options: Vec<Choice>,
    /// Indices used when the answer omits this field.
    pub default_options: Option<Vec<usize>>,
}

impl RequestField {
    /// Pick between `minimum` and `maximum` of `options`.
    #[must_use]
    pub fn new(minimum: usize, maximum: usize, options: impl IntoIterator<Item = impl Into<Choice>>) -> Self {
        Self {
            minimum,
            maximum,
            options: options.into_iter().map(Into::into).collect(),
            default_options: None,
        }
    }

    /// Pick exactly `count` of `options`.
    #[must_use]
    pub fn exactly(count: usize, options: impl IntoIterator<Item = impl Into<Choice>>) -> Self {
        Self::new(count, count, options)
    }

    #[must_use]
    pub fn with_default(mut self, indices: Vec<usize>) -> Self {
        self.default_options = Some(indices);
        self
    }

    /// Map `indices` to options, or `None` if they break the field's rules.
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Option<Vec<Choice>> {
        let unique: BTreeSet<_> = indices.iter().collect();
        if unique.len() != indices.len()
            || indices.len() < self.minimum
            || indices.len() > self.maximum
        {
            return None;
        }
        indices.iter().map(|&i| self.options.get(i).cloned()).collect()
    }
}

/// Named fields addressed to one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub fields: BTreeMap<String, RequestField>,
}

impl Request {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, field: RequestField) -> Self {
        self.fields.insert(key.into(), field);
        self
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&RequestField> {
        self.fields.get(key)
    }
}

/// Requests addressed to several players at once, in addressing order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBatch {
    entries: Vec<(PlayerId, Request)>,
}

impl RequestBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A batch with a single request.
    #[must_use]
    pub fn single(player: PlayerId, request: Request) -> Self {
        let mut batch = Self::new();
        batch.push(player, request);
        batch
    }

    /// Address `request` to `player`, replacing any earlier request to them.
    pub fn push(&mut self, player: PlayerId, request: Request) {
        match self.entries.iter_mut().find(|(p, _)| *p == player) {
            Some(entry) => entry.1 = request,
            None => self.entries.push((player, request)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&Request> {
        self.entries.iter().find(|(p, _)| *p == player).map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Request)> {
        self.entries.iter().map(|(p, r)| (*p, r))
    }

    /// Players addressed by this batch.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    /// Validate raw answers against every request in the batch.
    #[must_use]
    pub fn resolve(&self, raw: &RawResponses) -> Option<Responses> {
        let mut responses = Responses::default();

        for (player, request) in &self.entries {
            let answer = raw.get(player)?;
            let mut response = Response::default();

            for (key, field) in &request.fields {
                let indices = answer.get(key).or(field.default_options.as_ref())?;
                response.fields.insert(key.clone(), field.select(indices)?);
            }

            responses.entries.push((*player, response));
        }

        Some(responses)
    }
}

/// Chosen option indices per field, as supplied by one player.
pub type RawResponse = BTreeMap<String, Vec<usize>>;

/// Raw answers keyed by player.
pub type RawResponses = FxHashMap<PlayerId, RawResponse>;

/// One player's validated answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub fields: BTreeMap<String, Vec<Choice>>,
}

impl Response {
    /// Chosen options for a field, in chosen order.
    #[must_use]
    pub fn choices(&self, key: &str) -> &[Choice] {
        self.fields.get(key).map_or(&[], Vec::as_slice)
    }

    /// Chosen cards for a field.
    #[must_use]
    pub fn cards(&self, key: &str) -> Vec<CardId> {
        self.choices(key).iter().filter_map(Choice::as_card).collect()
    }

    /// Chosen commands for a field.
    #[must_use]
    pub fn commands(&self, key: &str) -> Vec<Command> {
        self.choices(key)
            .iter()
            .filter_map(Choice::as_command)
            .cloned()
            .collect()
    }
}

/// Validated answers in the batch's addressing order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responses {
    entries: Vec<(PlayerId, Response)>,
}

impl Responses {
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&Response> {
        self.entries.iter().find(|(p, _)| *p == player).map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Response)> {
        self.entries.iter().map(|(p, r)| (*p, r))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
