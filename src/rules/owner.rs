//! Ownership resolution.
//!
//! Answers "who holds this cell, and is it fortress-tier?" against every
//! faction except the one asking. Living factions are searched first; only if
//! none claims the cell are dead factions consulted, so stale holdings left
//! behind by a defeated faction stay resolvable (and capturable).

use crate::core::{Coord, Faction, FactionId, Factions, Holding, World};

/// Snapshot of who controls a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OwnerInfo {
    /// Holding faction, if any.
    pub owner: Option<FactionId>,
    /// Whether the holding is stronger than plain territory.
    pub is_fortress: bool,
}

impl OwnerInfo {
    /// Nobody holds the cell.
    pub const UNOWNED: OwnerInfo = OwnerInfo {
        owner: None,
        is_fortress: false,
    };
}

/// Resolves cell ownership.
pub struct OwnerResolver;

impl OwnerResolver {
    /// Resolve the owner of `coord` as seen by `me`.
    #[must_use]
    pub fn resolve(coord: Coord, me: FactionId, factions: &Factions, world: &World) -> OwnerInfo {
        Self::find(coord, me, factions, world, true)
            .or_else(|| Self::find(coord, me, factions, world, false))
            .unwrap_or(OwnerInfo::UNOWNED)
    }

    fn find(
        coord: Coord,
        me: FactionId,
        factions: &Factions,
        world: &World,
        alive: bool,
    ) -> Option<OwnerInfo> {
        factions
            .iter()
            .filter(|(id, faction)| *id != me && faction.is_alive() == alive)
            .find_map(|(id, faction)| {
                Self::classify(coord, faction, world).map(|is_fortress| OwnerInfo {
                    owner: Some(id),
                    is_fortress,
                })
            })
    }

    /// `Some(is_fortress)` if `faction` claims `coord`.
    ///
    /// A base is never fortress-tier. Territory on bridge, portal or tower
    /// terrain is.
    #[must_use]
    pub fn classify(coord: Coord, faction: &Faction, world: &World) -> Option<bool> {
        if coord == faction.base {
            return Some(false);
        }
        if faction.holds(Holding::Fortress, coord) {
            return Some(true);
        }
        if faction.holds(Holding::Territory, coord) {
            let on_structure = world.terrain(coord).is_some_and(|t| t.is_structure());
            return Some(on_structure);
        }
        if faction.holds(Holding::Tower, coord)
            || faction.holds(Holding::Bridge, coord)
            || faction.holds(Holding::Portal, coord)
        {
            return Some(true);
        }
        None
    }
}
