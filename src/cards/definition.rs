//! Card definitions - static card data.
//!
//! A `CardDefinition` holds what every copy of a named card shares: its
//! battle numbers, colors, type tags and the effects it carries. Definitions
//! are registered by extensions and copied onto each [`Card`](super::Card)
//! when the game starts. Unset battle numbers fall back to the card defaults.

use serde::{Deserialize, Serialize};

/// A card color. Extensions define which colors exist.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Color(pub String);

impl Color {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static card definition, keyed by name.
///
/// ## Example
///
/// ```
/// use grid_ccg::cards::{CardDefinition, Color};
///
/// let knight = CardDefinition::new("demo:knight")
///     .with_attack(3)
///     .with_range(2)
///     .with_color(Color::new("red"))
///     .with_type("character");
///
/// assert_eq!(knight.attack, Some(3));
/// assert!(knight.types.iter().any(|t| t == "character"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    pub attack: Option<i64>,
    pub defense: Option<i64>,
    pub range: Option<i64>,
    pub colors: Vec<Color>,
    pub types: Vec<String>,
    /// Names of passive effects.
    pub skills: Vec<String>,
    /// Name of the effect run when the card is used from hand.
    pub usage: Option<String>,
}

impl CardDefinition {
    /// Create a definition with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attack(mut self, attack: i64) -> Self {
        self.attack = Some(attack);
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: i64) -> Self {
        self.defense = Some(defense);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: i64) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.colors.push(color);
        self
    }

    #[must_use]
    pub fn with_type(mut self, tag: impl Into<String>) -> Self {
        self.types.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_skill(mut self, effect: impl Into<String>) -> Self {
        self.skills.push(effect.into());
        self
    }

    #[must_use]
    pub fn with_usage(mut self, effect: impl Into<String>) -> Self {
        self.usage = Some(effect.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_builder() {
        let def = CardDefinition::new("demo:spark")
            .with_defense(2)
            .with_color(Color::new("blue"))
            .with_skill("demo:shield")
            .with_usage("demo:zap");

        assert_eq!(def.name, "demo:spark");
        assert_eq!(def.attack, None);
        assert_eq!(def.defense, Some(2));
        assert_eq!(def.colors, vec![Color::new("blue")]);
        assert_eq!(def.skills, vec!["demo:shield".to_string()]);
        assert_eq!(def.usage.as_deref(), Some("demo:zap"));
    }

    #[test]
    fn test_definition_serialization() {
        let def = CardDefinition::new("demo:wall").with_defense(5).with_type("character");
        let json = serde_json::to_string(&def).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, deserialized);
    }
}
