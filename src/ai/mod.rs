//! Computer-controlled factions.
//!
//! ## Overview
//!
//! A faction's turn has two phases:
//!
//! - **Strategy**: once per turn, `TargetSelector` picks a target cell
//!   (defend the base, chase a nearby threat, march on an enemy base, or
//!   roam), with a reachable unclaimed tower or portal overriding the pick.
//! - **Execution**: while budget remains, every legal adjacent capture is
//!   scored against the target and the best one is applied.
//!
//! All randomness goes through a `RandomSource`, so a seeded `GameRng` (or a
//! scripted source in tests) reproduces a turn exactly.
//!
//! ## Usage
//!
//! ```
//! use rust_conquest::ai::{Planner, PlannerConfig};
//! use rust_conquest::core::{
//!     CaptureLedger, Coord, Faction, FactionId, Factions, GameModeFlags, GameRng,
//!     GameplayConstants, TurnContext, World,
//! };
//!
//! let mut world = World::new(8, 8);
//! let mut factions = Factions::from_factions(vec![
//!     Faction::new("Red", Coord::new(1, 1)),
//!     Faction::new("Blue", Coord::new(6, 6)),
//! ]);
//! let mut ledger = CaptureLedger::new();
//! let mut events: Vec<String> = Vec::new();
//! let mut rng = GameRng::new(42);
//!
//! let planner = Planner::new(GameplayConstants::default(), PlannerConfig::default());
//! let mut ctx = TurnContext::new(
//!     FactionId::new(0),
//!     &mut factions,
//!     &mut world,
//!     GameModeFlags::new(),
//!     &mut ledger,
//!     0,
//!     &mut events,
//! );
//! planner.take_turn(&mut ctx, &mut rng, |_remaining| {});
//!
//! assert!(factions[FactionId::new(0)].power() > 0);
//! ```

pub mod candidates;
pub mod config;
pub mod planner;
pub mod target;

pub use candidates::{Board, Candidate};
pub use config::PlannerConfig;
pub use planner::Planner;
pub use target::{Strategy, TargetSelector};
