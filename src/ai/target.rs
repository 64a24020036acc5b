//! Strategic target selection, run once at the start of a faction's turn.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::{Coord, Faction, FactionId, Factions, Holding, RandomSource, Terrain, World};

use super::config::PlannerConfig;

/// Where the planner is heading this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strategy {
    /// Cell candidates are scored against.
    pub target: Coord,
    /// No enemy in sight; scoring gets extra jitter.
    pub roaming: bool,
}

/// Target selection heuristics.
pub struct TargetSelector;

impl TargetSelector {
    /// Pick this turn's strategy.
    ///
    /// Order: base defense, visible threat, visible enemy base, roaming.
    /// A reachable unclaimed tower or portal overrides whichever won.
    pub fn determine_strategy<R: RandomSource>(
        me: FactionId,
        factions: &Factions,
        world: &World,
        visible: &FxHashSet<Coord>,
        rng: &mut R,
        config: &PlannerConfig,
    ) -> Strategy {
        let faction = &factions[me];

        let mut strategy = if Self::needs_base_defense(me, factions, visible, config) {
            Strategy {
                target: faction.base,
                roaming: false,
            }
        } else if let Some(target) = Self::select_target(me, factions, visible, config) {
            Strategy {
                target,
                roaming: false,
            }
        } else {
            Strategy {
                target: Self::select_roaming_target(faction, world, rng),
                roaming: true,
            }
        };

        if let Some(priority) = Self::find_priority_target(me, factions, world, visible) {
            strategy = Strategy {
                target: priority,
                roaming: false,
            };
        }

        debug!(
            faction = %faction.name,
            target = %strategy.target,
            roaming = strategy.roaming,
            "strategy chosen"
        );
        strategy
    }

    /// Whether enough visible enemy presence sits near our base.
    pub fn needs_base_defense(
        me: FactionId,
        factions: &Factions,
        visible: &FxHashSet<Coord>,
        config: &PlannerConfig,
    ) -> bool {
        if visible.is_empty() {
            return false;
        }

        let base = factions[me].base;
        let mut nearby = 0;

        for (_, enemy) in enemies(me, factions) {
            for cell in enemy.core_cells() {
                if !visible.contains(&cell) {
                    continue;
                }
                let dist = cell.manhattan(base);
                if dist <= config.close_defense_radius {
                    return true;
                }
                if dist < config.defense_radius {
                    nearby += 1;
                }
            }
        }

        nearby >= config.defense_threshold
    }

    /// Nearest weighted threat, else the most attractive visible enemy base.
    pub fn select_target(
        me: FactionId,
        factions: &Factions,
        visible: &FxHashSet<Coord>,
        config: &PlannerConfig,
    ) -> Option<Coord> {
        let faction = &factions[me];
        let my_power = faction.power() as f64;

        let mut threat: Option<(f64, Coord)> = None;
        for (_, enemy) in enemies(me, factions) {
            let ratio = enemy.power() as f64 / my_power.max(1.0);
            for cell in sorted(enemy.core_cells()) {
                if !visible.contains(&cell) {
                    continue;
                }
                let dist = cell.manhattan(faction.base);
                if dist >= config.threat_radius {
                    continue;
                }
                let score = f64::from(dist) * (1.0 + ratio * config.threat_power_weight);
                if threat.map_or(true, |(best, _)| score < best) {
                    threat = Some((score, cell));
                }
            }
        }
        if let Some((_, cell)) = threat {
            return Some(cell);
        }

        let mut best: Option<(f64, Coord)> = None;
        for (_, enemy) in enemies(me, factions) {
            if !visible.contains(&enemy.base) {
                continue;
            }
            let enemy_power = enemy.power() as f64;
            let dist = f64::from(faction.base.manhattan(enemy.base));

            let mut score = dist * (1.0 + enemy_power * config.base_power_weight);
            if enemy_power < (my_power * config.weak_enemy_ratio).max(1.0) {
                score *= config.weak_enemy_discount;
            }
            if best.map_or(true, |(b, _)| score < b) {
                best = Some((score, enemy.base));
            }
        }
        best.map(|(_, cell)| cell)
    }

    /// A random in-bounds neighbor of a random owned cell.
    pub fn select_roaming_target<R: RandomSource>(faction: &Faction, world: &World, rng: &mut R) -> Coord {
        let cells = sorted(faction.core_cells());
        let Some(&anchor) = rng.choose(&cells) else {
            return faction.base;
        };

        let mut neighbors = anchor.neighbors();
        rng.shuffle(&mut neighbors);
        neighbors
            .into_iter()
            .find(|n| world.in_bounds(*n))
            .unwrap_or(anchor)
    }

    /// Nearest visible neutral tower or unclaimed portal next to our land.
    pub fn find_priority_target(
        me: FactionId,
        factions: &Factions,
        world: &World,
        visible: &FxHashSet<Coord>,
    ) -> Option<Coord> {
        if visible.is_empty() {
            return None;
        }

        let faction = &factions[me];
        let cells = faction.core_cells();
        let touches_us = |coord: Coord| cells.iter().any(|cell| cell.is_adjacent(coord));

        let towers = world.tower_coords().into_iter();
        let portals = world
            .portal_link_coords()
            .into_iter()
            .filter(|p| world.is(*p, Terrain::Portal))
            .filter(|p| !factions.living().any(|(_, f)| f.holds(Holding::Portal, *p)));

        let mut best: Option<(i32, Coord)> = None;
        for coord in towers.chain(portals) {
            if !visible.contains(&coord) || !touches_us(coord) {
                continue;
            }
            let dist = coord.manhattan(faction.base);
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, coord));
            }
        }
        best.map(|(_, coord)| coord)
    }
}

/// Living factions other than `me`.
pub(crate) fn enemies(me: FactionId, factions: &Factions) -> impl Iterator<Item = (FactionId, &Faction)> {
    factions.living().filter(move |(id, _)| *id != me)
}

fn sorted(cells: FxHashSet<Coord>) -> Vec<Coord> {
    let mut cells: Vec<Coord> = cells.into_iter().collect();
    cells.sort_unstable();
    cells
}
