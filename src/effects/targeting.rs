//! Effect targeting.
//!
//! An effect declares an ordered list of [`TargetSpec`] slots. When it is
//! activated, each slot is offered in turn to the controlling player. The
//! options are every card that is either off the field or within the
//! acting character's range, and that passes the slot's predicate given the
//! selections made so far.

use std::rc::Rc;

use crate::cards::CardId;
use crate::game::Game;

/// Everything a target predicate may look at.
pub struct TargetQuery<'a> {
    pub game: &'a Game,
    /// The character activating the effect.
    pub controller: CardId,
    /// The candidate.
    pub target: CardId,
    /// Cards picked for earlier slots.
    pub selections: &'a [Vec<CardId>],
    /// The card being used, for usage effects.
    pub source: Option<CardId>,
}

/// Decides whether a card may fill a target slot.
pub type TargetPredicate = Rc<dyn Fn(&TargetQuery<'_>) -> bool>;

/// One target slot.
#[derive(Clone)]
pub struct TargetSpec {
    pub minimum: usize,
    pub maximum: usize,
    pub predicate: TargetPredicate,
}

impl TargetSpec {
    #[must_use]
    pub fn new(minimum: usize, maximum: usize, predicate: TargetPredicate) -> Self {
        Self {
            minimum,
            maximum,
            predicate,
        }
    }

    /// Slot taking exactly one card.
    #[must_use]
    pub fn single(predicate: TargetPredicate) -> Self {
        Self::new(1, 1, predicate)
    }
}

impl std::fmt::Debug for TargetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetSpec")
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .finish_non_exhaustive()
    }
}

/// Wrap a closure as a predicate.
pub fn predicate<F>(f: F) -> TargetPredicate
where
    F: Fn(&TargetQuery<'_>) -> bool + 'static,
{
    Rc::new(f)
}

/// Any character on the field.
#[must_use]
pub fn is_character() -> TargetPredicate {
    predicate(|query| {
        query
            .game
            .state
            .card(query.target)
            .is_some_and(|card| card.is_on_field() && card.is_character())
    })
}

/// Any character on the field other than the acting one.
#[must_use]
pub fn is_other_character() -> TargetPredicate {
    let character = is_character();
    predicate(move |query| query.target != query.controller && character(query))
}
