//! # rust-conquest
//!
//! Rule engine for a turn-based territorial conquest game on a grid.
//!
//! Factions expand outward from a base one adjacent cell at a time, spending
//! a per-turn action budget. Terrain shapes the cost of each capture: water
//! must be bridged, mountains are slow, towers extend vision, and linked
//! portals let a faction project power across the map.
//!
//! ## Design Principles
//!
//! 1. **Decide, then mutate**: `BuildValidator` answers "may this faction
//!    take this cell, and at what cost" without touching state.
//!    `MoveExecutor` is the only code that changes ownership.
//!
//! 2. **One owner per cell**: every transfer strips the previous holder
//!    before the new holder is added; portal pairs change hands together.
//!
//! 3. **Injected randomness**: the planner draws from a `RandomSource`, so a
//!    seeded `GameRng` replays a game exactly.
//!
//! ## Modules
//!
//! - `core`: coordinates, world, factions, configuration, RNG, events, turn context
//! - `rules`: ownership, cost and reachability rules, and the validator
//! - `executor`: applies validated captures
//! - `visibility`: fog of war
//! - `ai`: target selection and the per-turn planner
//! - `session`: turn order, rounds, fortress decay and game outcome

pub mod core;
pub mod rules;
pub mod executor;
pub mod visibility;
pub mod ai;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CaptureLedger, Coord, EventLog, EventSink, Faction, FactionId, FactionMap, Factions,
    GameModeFlags, GameRng, GameplayConstants, Holding, RandomSource, Terrain, TurnContext,
    World,
};

pub use crate::rules::{BuildResult, BuildValidator, OwnerResolver, ReachabilityChecker};

pub use crate::executor::{CaptureKind, MoveExecutor};

pub use crate::visibility::VisibilityService;

pub use crate::ai::{Planner, PlannerConfig, Strategy, TargetSelector};

pub use crate::session::{Outcome, Session, TurnManager};
