//! Planner heuristic parameters.

use serde::{Deserialize, Serialize};

/// Tuning knobs for target selection and candidate scoring.
///
/// Distances are Manhattan. Scores are lower-is-better; strategic value is
/// subtracted after weighting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Enemy cells strictly inside this radius of the base count toward defense.
    pub defense_radius: i32,

    /// Any enemy cell at or inside this radius triggers defense immediately.
    pub close_defense_radius: i32,

    /// Number of nearby enemy cells that triggers defense.
    pub defense_threshold: usize,

    /// Enemy cells strictly inside this radius of the base are threats.
    pub threat_radius: i32,

    /// Weight of the enemy/self power ratio in threat scoring.
    pub threat_power_weight: f64,

    /// Weight of raw enemy power in enemy-base scoring.
    pub base_power_weight: f64,

    /// An enemy weaker than this fraction of own power is "weak".
    pub weak_enemy_ratio: f64,

    /// Multiplier applied to a weak enemy's base score.
    pub weak_enemy_discount: f64,

    /// Weight of action cost in candidate scoring.
    pub cost_weight: f64,

    /// Upper bound of the uniform tie-break jitter.
    pub jitter: f64,

    /// Half-width of the extra symmetric jitter while roaming.
    pub roaming_jitter: f64,

    /// Weight of strategic value in candidate scoring.
    pub strategic_weight: f64,

    /// Bonus for a living enemy's base.
    pub enemy_base_bonus: f64,

    /// Bonus for an enemy fortress-tier cell.
    pub enemy_fortress_bonus: f64,

    /// Bonus for any other enemy cell.
    pub enemy_cell_bonus: f64,

    /// Extra bonus when the enemy's power is below `weak_owner_ratio` of ours.
    pub weak_owner_bonus: f64,

    /// Power ratio below which `weak_owner_bonus` applies.
    pub weak_owner_ratio: f64,

    /// Bonus for a neutral tower.
    pub neutral_tower_bonus: f64,

    /// Bonus for a cell next to one of our towers.
    pub own_tower_bonus: f64,

    /// Bonus for portal terrain.
    pub portal_bonus: f64,

    /// Bonus for a cell in the corridor between our base and an enemy base.
    pub corridor_bonus: f64,

    /// Bonus for a cell guarding one of our important points.
    pub defense_bonus: f64,

    /// Maximum cross-product magnitude (exclusive) for the corridor test.
    pub corridor_tolerance: i64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            defense_radius: 8,
            close_defense_radius: 5,
            defense_threshold: 3,
            threat_radius: 12,
            threat_power_weight: 0.5,
            base_power_weight: 0.1,
            weak_enemy_ratio: 0.5,
            weak_enemy_discount: 0.7,
            cost_weight: 2.0,
            jitter: 1.5,
            roaming_jitter: 1.5,
            strategic_weight: 0.3,
            enemy_base_bonus: 30.0,
            enemy_fortress_bonus: 8.0,
            enemy_cell_bonus: 12.0,
            weak_owner_bonus: 5.0,
            weak_owner_ratio: 0.7,
            neutral_tower_bonus: 18.0,
            own_tower_bonus: 15.0,
            portal_bonus: 20.0,
            corridor_bonus: 10.0,
            defense_bonus: 8.0,
            corridor_tolerance: 3,
        }
    }
}

impl PlannerConfig {
    /// Set the defense trigger radii and count.
    pub fn with_defense(mut self, radius: i32, close_radius: i32, threshold: usize) -> Self {
        self.defense_radius = radius;
        self.close_defense_radius = close_radius;
        self.defense_threshold = threshold;
        self
    }

    /// Set the threat radius.
    pub fn with_threat_radius(mut self, radius: i32) -> Self {
        self.threat_radius = radius;
        self
    }

    /// Set both jitter widths. Zero makes scoring deterministic given the shuffle.
    pub fn with_jitter(mut self, jitter: f64, roaming_jitter: f64) -> Self {
        self.jitter = jitter;
        self.roaming_jitter = roaming_jitter;
        self
    }

    /// Set the cost weight.
    pub fn with_cost_weight(mut self, weight: f64) -> Self {
        self.cost_weight = weight;
        self
    }

    /// Set the strategic value weight.
    pub fn with_strategic_weight(mut self, weight: f64) -> Self {
        self.strategic_weight = weight;
        self
    }

    /// Set the corridor tolerance.
    pub fn with_corridor_tolerance(mut self, tolerance: i64) -> Self {
        self.corridor_tolerance = tolerance;
        self
    }
}
