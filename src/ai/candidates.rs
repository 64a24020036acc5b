//! Candidate collection and scoring for the per-action loop.

use rustc_hash::FxHashSet;

use crate::core::{Coord, Faction, FactionId, Factions, GameModeFlags, RandomSource, Terrain, World};
use crate::rules::{BuildResult, BuildValidator};

use super::config::PlannerConfig;
use super::target::{enemies, Strategy};

/// A legal, affordable capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Cell to capture.
    pub coord: Coord,
    /// The validator's verdict for it.
    pub result: BuildResult,
}

/// Read-only view of the board used while scoring.
pub struct Board<'a> {
    /// Faction choosing a move.
    pub me: FactionId,
    /// All factions.
    pub factions: &'a Factions,
    /// The map.
    pub world: &'a World,
    /// Cells `me` can see this turn.
    pub visible: &'a FxHashSet<Coord>,
}

impl<'a> Board<'a> {
    fn faction(&self) -> &'a Faction {
        &self.factions[self.me]
    }
}

/// Every unowned in-bounds neighbor of our land that is legal and costs at
/// most `budget`. Cells held by a living faction must also be visible.
///
/// Returned sorted by coordinate.
pub fn collect_candidates(
    board: &Board<'_>,
    validator: &BuildValidator,
    flags: GameModeFlags,
    mountain_discounts: &FxHashSet<Coord>,
    budget: u32,
) -> Vec<Candidate> {
    let owned = board.faction().owned_cells();

    let mut spots: Vec<Coord> = owned
        .iter()
        .flat_map(|cell| board.world.neighbors(*cell))
        .filter(|n| !owned.contains(n))
        .collect();
    spots.sort_unstable();
    spots.dedup();

    spots
        .into_iter()
        .filter_map(|coord| {
            let result = validator.validate(
                coord,
                board.me,
                board.factions,
                board.world,
                flags,
                mountain_discounts,
            );
            if !result.allowed || result.cost > budget {
                return None;
            }
            let owner_alive = result.owner.map_or(false, |o| board.factions[o].is_alive());
            if owner_alive && !board.visible.contains(&coord) {
                return None;
            }
            Some(Candidate { coord, result })
        })
        .collect()
}

/// Lowest-scoring candidate after a random shuffle.
///
/// Score = distance to target + weighted cost + jitter
/// (+ roaming jitter) - weighted strategic value.
pub fn choose_candidate<R: RandomSource>(
    candidates: &[Candidate],
    strategy: Strategy,
    board: &Board<'_>,
    rng: &mut R,
    config: &PlannerConfig,
) -> Option<(Candidate, f64)> {
    let mut shuffled = candidates.to_vec();
    rng.shuffle(&mut shuffled);

    let mut best: Option<(Candidate, f64)> = None;
    for candidate in shuffled {
        let mut score = f64::from(candidate.coord.manhattan(strategy.target));
        score += f64::from(candidate.result.cost) * config.cost_weight;
        score += rng.uniform(0.0, config.jitter);
        if strategy.roaming {
            score += rng.uniform(-config.roaming_jitter, config.roaming_jitter);
        }
        score -= strategic_value(&candidate, board, config) * config.strategic_weight;

        if best.map_or(true, |(_, s)| score < s) {
            best = Some((candidate, score));
        }
    }
    best
}

/// Sum of independent bonuses for capturing `candidate`.
pub fn strategic_value(candidate: &Candidate, board: &Board<'_>, config: &PlannerConfig) -> f64 {
    let coord = candidate.coord;
    let me = board.faction();
    let mut value = 0.0;

    if let Some(owner) = candidate.result.owner.map(|o| &board.factions[o]) {
        if owner.is_alive() {
            value += if coord == owner.base {
                config.enemy_base_bonus
            } else if candidate.result.is_fortress {
                config.enemy_fortress_bonus
            } else {
                config.enemy_cell_bonus
            };

            let my_power = me.power() as f64;
            if (owner.power() as f64) < (my_power * config.weak_owner_ratio).max(1.0) {
                value += config.weak_owner_bonus;
            }
        }
    }

    if board.world.has_neutral_tower(coord) {
        value += config.neutral_tower_bonus;
    } else if me.towers().iter().any(|t| t.is_adjacent(coord)) {
        value += config.own_tower_bonus;
    }

    if board.world.is(coord, Terrain::Portal) {
        value += config.portal_bonus;
    }

    if is_blocking_enemy(coord, board, config.corridor_tolerance) {
        value += config.corridor_bonus;
    }

    if is_defending_important(coord, me, board.world) {
        value += config.defense_bonus;
    }

    value
}

/// Whether `cell` lies in the thin corridor from some living enemy base to ours.
pub fn is_blocking_enemy(cell: Coord, board: &Board<'_>, tolerance: i64) -> bool {
    if board.visible.is_empty() {
        return false;
    }

    let home = board.faction().base;
    enemies(board.me, board.factions).any(|(_, enemy)| {
        let dx = i64::from(home.x - enemy.base.x);
        let dy = i64::from(home.y - enemy.base.y);
        if dx == 0 && dy == 0 {
            return false;
        }
        let cx = i64::from(cell.x - enemy.base.x);
        let cy = i64::from(cell.y - enemy.base.y);

        let cross = (cx * dy - cy * dx).abs();
        let dot = cx * dx + cy * dy;
        cross < tolerance && (0..=dx * dx + dy * dy).contains(&dot)
    })
}

/// Whether `cell` is within one step of our base, a fortress, a tower or a
/// fortified portal.
pub fn is_defending_important(cell: Coord, me: &Faction, world: &World) -> bool {
    let near = |point: &Coord| cell.manhattan(*point) <= 1;

    near(&me.base)
        || me.fortresses().iter().any(near)
        || me.towers().iter().any(near)
        || me
            .fortresses()
            .iter()
            .filter(|f| world.is(**f, Terrain::Portal))
            .any(near)
}
