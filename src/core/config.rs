//! Session configuration.
//!
//! - `GameModeFlags`: the three independent rule toggles, fixed for a session.
//! - `GameplayConstants`: radii, costs and budgets consumed by the engine.
//!
//! Both are plain serde values built with chained `with_*` methods.

use serde::{Deserialize, Serialize};

/// Rule toggles that influence validation and execution.
///
/// All three may be active at the same time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameModeFlags {
    /// Fortress-tier cells of living factions cannot be captured.
    /// False means conquest rules.
    pub classic: bool,

    /// Capture sources must be connected to the base through owned cells,
    /// with portal links counting as edges.
    pub supply: bool,

    /// Mountains that were converted once cost at most 1 afterwards.
    pub mountain_efficiency: bool,
}

impl GameModeFlags {
    /// Conquest rules, default reachability, no mountain discount.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classic: false,
            supply: false,
            mountain_efficiency: false,
        }
    }

    /// Enable classic fortress protection.
    #[must_use]
    pub const fn with_classic(mut self) -> Self {
        self.classic = true;
        self
    }

    /// Enable supply-line reachability.
    #[must_use]
    pub const fn with_supply(mut self) -> Self {
        self.supply = true;
        self
    }

    /// Enable the converted-mountain discount.
    #[must_use]
    pub const fn with_mountain_efficiency(mut self) -> Self {
        self.mountain_efficiency = true;
        self
    }
}

/// Gameplay constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameplayConstants {
    /// Vision radius around base, territory and plain fortresses.
    pub fog_radius: u32,

    /// Vision radius around held towers.
    pub tower_vision_radius: u32,

    /// Cost of taking a fortress-tier cell.
    pub fortress_capture_cost: u32,

    /// Cost of bridging unowned water.
    pub bridge_build_cost: u32,

    /// Cost of taking an owned bridge.
    pub bridge_capture_cost: u32,

    /// Action points per faction turn.
    pub actions_per_turn: u32,

    /// Rounds a classic-mode fortress survives before decaying to territory.
    pub fortress_lifetime: u32,
}

impl Default for GameplayConstants {
    fn default() -> Self {
        Self {
            fog_radius: 5,
            tower_vision_radius: 15,
            fortress_capture_cost: 3,
            bridge_build_cost: 5,
            bridge_capture_cost: 1,
            actions_per_turn: 6,
            fortress_lifetime: 5,
        }
    }
}

impl GameplayConstants {
    /// Set both vision radii.
    #[must_use]
    pub fn with_vision(mut self, fog_radius: u32, tower_vision_radius: u32) -> Self {
        self.fog_radius = fog_radius;
        self.tower_vision_radius = tower_vision_radius;
        self
    }

    /// Set the fortress capture cost.
    #[must_use]
    pub fn with_fortress_capture_cost(mut self, cost: u32) -> Self {
        self.fortress_capture_cost = cost;
        self
    }

    /// Set bridge build and capture costs.
    #[must_use]
    pub fn with_bridge_costs(mut self, build: u32, capture: u32) -> Self {
        self.bridge_build_cost = build;
        self.bridge_capture_cost = capture;
        self
    }

    /// Set the per-turn action budget.
    #[must_use]
    pub fn with_actions_per_turn(mut self, actions: u32) -> Self {
        self.actions_per_turn = actions;
        self
    }

    /// Set the classic-mode fortress lifetime in rounds.
    #[must_use]
    pub fn with_fortress_lifetime(mut self, rounds: u32) -> Self {
        self.fortress_lifetime = rounds;
        self
    }
}
