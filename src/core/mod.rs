//! Core data model: coordinates, world, factions, configuration, randomness,
//! events and the turn context.
//!
//! Nothing in this module decides legality; it only stores and queries state.

pub mod coord;
pub mod world;
pub mod faction;
pub mod config;
pub mod rng;
pub mod events;
pub mod context;

pub use coord::{Coord, Neighbors};
pub use world::{PortalEntry, Terrain, World, IMPASSABLE_COST};
pub use faction::{Faction, FactionId, FactionMap, Factions, Holding};
pub use config::{GameModeFlags, GameplayConstants};
pub use rng::{GameRng, RandomSource};
pub use events::{EventLog, EventSink, DEFAULT_EVENT_CAPACITY};
pub use context::{CaptureLedger, TurnContext};
