//! The rule engine: pure decision logic for captures.
//!
//! - `OwnerResolver`: who holds a cell and whether it is fortress-tier
//! - `CostCalculator`: what a capture costs before mode discounts
//! - `ReachabilityChecker`: whether an adjacent own cell may project a capture
//! - `BuildValidator`: the full decision, combining all of the above
//!
//! Nothing here mutates state. Rejection is data (`BuildResult::allowed ==
//! false`), never an error.

pub mod owner;
pub mod cost;
pub mod reachability;
pub mod validator;

pub use owner::{OwnerInfo, OwnerResolver};
pub use cost::{CostCalculator, TileContext};
pub use reachability::{ReachabilityChecker, ReachabilityPolicy};
pub use validator::{BuildResult, BuildValidator};
