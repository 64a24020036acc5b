//! Reachability: can a faction project a capture onto a target cell?
//!
//! A target is reachable iff at least one orthogonal neighbor is an *active*
//! cell of the acting faction. What counts as active depends on the policy:
//!
//! - **Default**: the base, territory, and tower/bridge/portal holdings are
//!   active. A plain fortress is active only when a chain of contiguous
//!   fortresses leads back to territory or the base; a fortress standing on
//!   portal terrain is always active.
//! - **Supply**: a cell must be active under the default rules *and* lie on a
//!   path of territory/fortress cells starting at the base, where stepping
//!   through a linked portal counts as adjacency. A portal endpoint is also
//!   supplied when its linked partner is.
//!
//! Every check runs a fresh BFS over the faction's own holdings.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::core::{Coord, Faction, GameModeFlags, Holding, Terrain, World};

/// Which definition of "active source" applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReachabilityPolicy {
    /// Local rules: holdings project, fortress chains need an anchor.
    Default,
    /// Stricter: sources must be supply-connected to the base.
    Supply,
}

impl ReachabilityPolicy {
    /// Policy selected by the session flags.
    #[must_use]
    pub fn from_flags(flags: GameModeFlags) -> Self {
        if flags.supply {
            ReachabilityPolicy::Supply
        } else {
            ReachabilityPolicy::Default
        }
    }
}

/// Reachability queries.
pub struct ReachabilityChecker;

impl ReachabilityChecker {
    /// Whether `faction` has an active cell orthogonally adjacent to `target`.
    #[must_use]
    pub fn has_reachable_source(
        target: Coord,
        faction: &Faction,
        world: &World,
        policy: ReachabilityPolicy,
    ) -> bool {
        target
            .neighbors()
            .into_iter()
            .filter(|n| faction.owns(*n))
            .any(|n| Self::is_source_active(n, faction, world, policy))
    }

    /// Whether an owned `cell` may project a capture under `policy`.
    #[must_use]
    pub fn is_source_active(
        cell: Coord,
        faction: &Faction,
        world: &World,
        policy: ReachabilityPolicy,
    ) -> bool {
        if cell == faction.base {
            return true;
        }
        if !Self::is_locally_active(cell, faction, world) {
            return false;
        }
        match policy {
            ReachabilityPolicy::Default => true,
            ReachabilityPolicy::Supply => {
                let partner_supplied = world
                    .linked_portal(cell)
                    .is_some_and(|linked| Self::is_supplied(linked, faction, world));
                partner_supplied || Self::is_supplied(cell, faction, world)
            }
        }
    }

    fn is_locally_active(cell: Coord, faction: &Faction, world: &World) -> bool {
        if faction.holds(Holding::Territory, cell)
            || faction.holds(Holding::Tower, cell)
            || faction.holds(Holding::Bridge, cell)
            || faction.holds(Holding::Portal, cell)
        {
            return true;
        }
        if faction.holds(Holding::Fortress, cell) {
            return world.is(cell, Terrain::Portal) || Self::fortress_chain_anchored(cell, faction);
        }
        false
    }

    /// BFS through contiguous fortresses from `start`; true once territory or
    /// the base is adjacent to the chain.
    fn fortress_chain_anchored(start: Coord, faction: &Faction) -> bool {
        let mut visited: FxHashSet<Coord> = FxHashSet::default();
        visited.insert(start);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for neighbor in current.neighbors() {
                if neighbor == faction.base || faction.holds(Holding::Territory, neighbor) {
                    return true;
                }
                if faction.holds(Holding::Fortress, neighbor) && visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        false
    }

    fn is_supply_node(cell: Coord, faction: &Faction) -> bool {
        faction.holds(Holding::Territory, cell) || faction.holds(Holding::Fortress, cell)
    }

    /// Whether `cell` lies on a territory/fortress path from the base.
    /// Linked portals count as edges.
    #[must_use]
    pub fn is_supplied(cell: Coord, faction: &Faction, world: &World) -> bool {
        if cell == faction.base {
            return true;
        }
        if !Self::is_supply_node(cell, faction) {
            return false;
        }

        let mut visited: FxHashSet<Coord> = FxHashSet::default();
        visited.insert(faction.base);
        let mut queue = VecDeque::from([faction.base]);

        while let Some(current) = queue.pop_front() {
            let portal_hop = world.linked_portal(current);
            for next in current.neighbors().into_iter().chain(portal_hop) {
                if !Self::is_supply_node(next, faction) || !visited.insert(next) {
                    continue;
                }
                if next == cell {
                    return true;
                }
                queue.push_back(next);
            }
        }

        false
    }
}
