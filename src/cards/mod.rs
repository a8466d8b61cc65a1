//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for one card instance in a game
//! - `CardDefinition`: Static card data shared by every copy of a name
//! - `Card`: Runtime card state (position, owner, controller, battle numbers)
//! - `CardRegistry`: Definition lookup by name

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, Color};
pub use instance::{BattleStat, Card, CardId, CHARACTER_TYPE};
pub use registry::CardRegistry;
