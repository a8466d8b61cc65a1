//! Activation counting.
//!
//! Effect limits are counted per character position within a scope. The
//! scope is found by walking up from the current event:
//!
//! - an event *named* like the scope: count effect events anywhere in its
//!   subtree;
//! - an event *announcing* the scope as a timing: count its direct children;
//! - an event *created while* its parent announced the scope: count the
//!   parent's direct children.
//!
//! A character's identity is its position: an effect event counts when its
//! controller held the same position identity when the event entered.

use crate::cards::{Card, CardId};
use crate::events::EventId;

use super::Game;

impl Game {
    /// How many times `character` activated effects (or the named `effect`)
    /// within `scope`. Zero when no enclosing event matches the scope.
    #[must_use]
    pub fn activation_count(&self, character: CardId, scope: &str, effect: Option<&str>) -> usize {
        let Some(position) = self.state.card(character).and_then(Card::position_id) else {
            return 0;
        };
        let Some((root, wide)) = self.scope_root(scope) else {
            return 0;
        };

        let candidates = if wide {
            self.events.descendants(root)
        } else {
            self.events[root].children.clone()
        };
        candidates
            .into_iter()
            .filter(|&id| {
                let node = &self.events[id];
                let Some(activation) = node.as_effect() else {
                    return false;
                };
                node.controller_position == Some(position)
                    && effect.map_or(true, |name| activation.effect.as_deref() == Some(name))
            })
            .count()
    }

    /// The event whose history bounds `scope`, and whether to search its
    /// whole subtree.
    fn scope_root(&self, scope: &str) -> Option<(EventId, bool)> {
        let mut cursor = self.events.current();
        while let Some(id) = cursor {
            let node = &self.events[id];
            if node.name == scope {
                return Some((id, true));
            }
            if node.is_announcing(scope) {
                return Some((id, false));
            }
            if node.was_triggered_from(scope) {
                return node.parent.map(|parent| (parent, false));
            }
            cursor = node.parent;
        }
        None
    }
}
