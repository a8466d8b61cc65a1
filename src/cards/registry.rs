//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition an extension has
//! registered, keyed by definition name. Cards look their definition up by
//! name when the game starts.

use rustc_hash::FxHashMap;

use super::definition::CardDefinition;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use grid_ccg::cards::{CardDefinition, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new("demo:knight").with_attack(3));
///
/// let found = registry.get("demo:knight").unwrap();
/// assert_eq!(found.attack, Some(3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<String, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition, replacing any previous one with the same
    /// name. Returns the replaced definition.
    pub fn register(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        self.cards.insert(card.name.clone(), card)
    }

    /// Get a card definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.get(name)
    }

    /// Check if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find definitions carrying a type tag.
    pub fn find_by_type<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a CardDefinition> + 'a {
        self.cards
            .values()
            .filter(move |c| c.types.iter().any(|t| t == tag))
    }
}
