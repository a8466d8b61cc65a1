//! Commands a player may issue while holding priority.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::zones::{Axis, Orientation};

/// A legal action offered by the priority loop.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// `character` attacks `defender` along `axis`.
    Battle {
        character: CardId,
        defender: CardId,
        axis: Axis,
    },
    /// `character` moves to, or turns to face, `orientation`.
    Movement {
        character: CardId,
        orientation: Orientation,
    },
    /// `character` uses `card` from its player's hand.
    Usage { character: CardId, card: CardId },
}

impl Command {
    /// The character issuing the command.
    #[must_use]
    pub fn character(&self) -> CardId {
        match self {
            Command::Battle { character, .. }
            | Command::Movement { character, .. }
            | Command::Usage { character, .. } => *character,
        }
    }

    /// Short name of the command kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Battle { .. } => "battle",
            Command::Movement { .. } => "movement",
            Command::Usage { .. } => "usage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::Direction;

    #[test]
    fn test_command_accessors() {
        let battle = Command::Battle {
            character: CardId::new(1),
            defender: CardId::new(2),
            axis: Axis::X,
        };
        let movement = Command::Movement {
            character: CardId::new(3),
            orientation: Orientation::new(0, 1, Direction::East),
        };

        assert_eq!(battle.character(), CardId::new(1));
        assert_eq!(battle.kind(), "battle");
        assert_eq!(movement.character(), CardId::new(3));
        assert_eq!(movement.kind(), "movement");
    }

    #[test]
    fn test_command_serialization() {
        let usage = Command::Usage {
            character: CardId::new(1),
            card: CardId::new(9),
        };
        let json = serde_json::to_string(&usage).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(usage, deserialized);
    }
}
