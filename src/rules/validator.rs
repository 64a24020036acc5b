//! Build validation: is a capture legal, and what does it cost?
//!
//! Pure decision logic; nothing is mutated. Every mode flag applies at once.
//!
//! Decision order:
//! 1. Reject the acting faction's own cells.
//! 2. Reject impassable terrain (water is always a bridge site).
//! 3. Resolve the current owner and fortress tier.
//! 4. Classic mode: reject fortress-tier cells of living owners.
//! 5. Reject unless an adjacent own cell is an active source.
//! 6. Price the capture, applying the converted-mountain discount.
//!
//! Rejections still carry the resolved owner so callers can reason about them.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::core::{Coord, FactionId, Factions, GameModeFlags, GameplayConstants, World};

use super::cost::{CostCalculator, TileContext};
use super::owner::{OwnerInfo, OwnerResolver};
use super::reachability::{ReachabilityChecker, ReachabilityPolicy};

/// Outcome of validating a capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildResult {
    /// Whether the capture may be executed.
    pub allowed: bool,
    /// Action-point cost. Zero when rejected.
    pub cost: u32,
    /// Current holder of the target, if any.
    pub owner: Option<FactionId>,
    /// Whether the target is fortress-tier.
    pub is_fortress: bool,
}

impl BuildResult {
    /// A rejection carrying the resolved owner metadata.
    #[must_use]
    pub fn rejected(info: OwnerInfo) -> Self {
        Self {
            allowed: false,
            cost: 0,
            owner: info.owner,
            is_fortress: info.is_fortress,
        }
    }

    /// An approved capture.
    #[must_use]
    pub fn allowed(cost: u32, info: OwnerInfo) -> Self {
        Self {
            allowed: true,
            cost,
            owner: info.owner,
            is_fortress: info.is_fortress,
        }
    }

    /// Action points actually spent: never less than one.
    #[must_use]
    pub fn spend(&self) -> u32 {
        self.cost.max(1)
    }
}

/// Validates captures against the session's constants.
#[derive(Clone, Debug, Default)]
pub struct BuildValidator {
    constants: GameplayConstants,
}

impl BuildValidator {
    /// Create a validator.
    #[must_use]
    pub fn new(constants: GameplayConstants) -> Self {
        Self { constants }
    }

    /// The constants used for pricing.
    #[must_use]
    pub fn constants(&self) -> &GameplayConstants {
        &self.constants
    }

    /// Validate `me` capturing `target`.
    #[must_use]
    pub fn validate(
        &self,
        target: Coord,
        me: FactionId,
        factions: &Factions,
        world: &World,
        flags: GameModeFlags,
        mountain_discounts: &FxHashSet<Coord>,
    ) -> BuildResult {
        let faction = &factions[me];
        let info = OwnerResolver::resolve(target, me, factions, world);

        if faction.owns(target) {
            trace!(%target, faction = %faction.name, "rejected: own cell");
            return BuildResult::rejected(info);
        }

        let tile = TileContext::capture(world, target);
        if tile.is_impassable() {
            trace!(%target, faction = %faction.name, "rejected: impassable");
            return BuildResult::rejected(info);
        }

        if flags.classic && info.is_fortress {
            if let Some(owner) = info.owner {
                if factions[owner].is_alive() {
                    trace!(%target, faction = %faction.name, "rejected: classic fortress lock");
                    return BuildResult::rejected(info);
                }
            }
        }

        let policy = ReachabilityPolicy::from_flags(flags);
        if !ReachabilityChecker::has_reachable_source(target, faction, world, policy) {
            trace!(%target, faction = %faction.name, ?policy, "rejected: no active source");
            return BuildResult::rejected(info);
        }

        let mut cost = CostCalculator::base_cost(&tile, info.owner, info.is_fortress, &self.constants);
        if flags.mountain_efficiency && tile.is_mountain && mountain_discounts.contains(&target) {
            cost = cost.min(1);
        }

        BuildResult::allowed(cost, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Faction, Holding, Terrain};

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    fn validate(
        target: Coord,
        factions: &Factions,
        world: &World,
        flags: GameModeFlags,
        discounts: &FxHashSet<Coord>,
    ) -> BuildResult {
        BuildValidator::default().validate(target, FactionId::new(0), factions, world, flags, discounts)
    }

    #[test]
    fn test_rejects_own_cell() {
        let world = World::new(5, 5);
        let factions = Factions::from_factions(vec![
            Faction::new("Blue", c(0, 0)).with(Holding::Territory, c(1, 0)),
        ]);

        let none = FxHashSet::default();
        assert!(!validate(c(1, 0), &factions, &world, GameModeFlags::new(), &none).allowed);
        assert!(!validate(c(0, 0), &factions, &world, GameModeFlags::new(), &none).allowed);
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let world = World::new(1, 1);
        let factions = Factions::from_factions(vec![Faction::new("Blue", c(0, 0))]);

        let result = validate(c(1, 0), &factions, &world, GameModeFlags::new(), &FxHashSet::default());
        assert!(!result.allowed);
    }

    #[test]
    fn test_water_is_bridge_site() {
        let world = World::new(2, 1).with_terrain(c(1, 0), Terrain::Water);
        let factions = Factions::from_factions(vec![Faction::new("Blue", c(0, 0))]);

        let result = validate(c(1, 0), &factions, &world, GameModeFlags::new(), &FxHashSet::default());
        assert!(result.allowed);
        assert_eq!(result.cost, 5);
    }

    #[test]
    fn test_unreachable_target_keeps_metadata() {
        let world = World::new(6, 1);
        let factions = Factions::from_factions(vec![
            Faction::new("Blue", c(0, 0)),
            Faction::new("Red", c(5, 0)).with(Holding::Fortress, c(3, 0)),
        ]);

        let result = validate(c(3, 0), &factions, &world, GameModeFlags::new(), &FxHashSet::default());
        assert!(!result.allowed);
        assert_eq!(result.owner, Some(FactionId::new(1)));
        assert!(result.is_fortress);
    }

    #[test]
    fn test_classic_lock_ignores_dead_owner() {
        let world = World::new(4, 1);
        let mut factions = Factions::from_factions(vec![
            Faction::new("Blue", c(0, 0)),
            Faction::new("Red", c(3, 0)).with(Holding::Fortress, c(1, 0)),
        ]);
        factions[FactionId::new(1)].kill();

        let flags = GameModeFlags::new().with_classic();
        let result = validate(c(1, 0), &factions, &world, flags, &FxHashSet::default());
        assert!(result.allowed);
        assert_eq!(result.cost, 3);
    }

    #[test]
    fn test_mountain_discount_requires_flag() {
        let world = World::new(2, 1).with_terrain(c(1, 0), Terrain::Mountain);
        let factions = Factions::from_factions(vec![Faction::new("Blue", c(0, 0))]);
        let discounts: FxHashSet<Coord> = [c(1, 0)].into_iter().collect();

        let off = validate(c(1, 0), &factions, &world, GameModeFlags::new(), &discounts);
        assert_eq!(off.cost, 2);

        let on = validate(c(1, 0), &factions, &world, GameModeFlags::new().with_mountain_efficiency(), &discounts);
        assert_eq!(on.cost, 1);
    }

    #[test]
    fn test_spend_is_at_least_one() {
        let result = BuildResult::allowed(0, OwnerInfo::UNOWNED);
        assert_eq!(result.spend(), 1);
        assert_eq!(BuildResult::allowed(3, OwnerInfo::UNOWNED).spend(), 3);
    }
}
