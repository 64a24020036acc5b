//! The game map: terrain plus neutral structures.
//!
//! Terrain is stored sparsely; any in-bounds cell without an entry is
//! `Terrain::Empty`. Out-of-bounds cells have no terrain at all.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::coord::{Coord, Neighbors};
use super::faction::FactionId;

/// Movement cost sentinel for cells that cannot be entered.
pub const IMPASSABLE_COST: u32 = 999;

/// Terrain classification of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Open ground.
    #[default]
    Empty,
    /// Impassable except as a bridge site.
    Water,
    /// Passable at double cost.
    Mountain,
    /// Former water, converted by a bridge build.
    Bridge,
    /// Watchtower site.
    Tower,
    /// Portal endpoint.
    Portal,
}

impl Terrain {
    /// Base movement cost.
    #[must_use]
    pub const fn move_cost(self) -> u32 {
        match self {
            Terrain::Water => IMPASSABLE_COST,
            Terrain::Mountain => 2,
            _ => 1,
        }
    }

    /// Terrain that makes any holding on it fortress-tier.
    #[must_use]
    pub const fn is_structure(self) -> bool {
        matches!(self, Terrain::Bridge | Terrain::Tower | Terrain::Portal)
    }
}

/// Registry entry for a portal endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalEntry {
    /// Faction currently holding the portal, if any.
    pub owner: Option<FactionId>,
}

/// Map terrain, neutral tower/portal registries and the portal-link table.
#[derive(Clone, Debug)]
pub struct World {
    width: i32,
    height: i32,
    terrain: FxHashMap<Coord, Terrain>,
    towers: FxHashSet<Coord>,
    portals: FxHashMap<Coord, PortalEntry>,
    portal_links: FxHashMap<Coord, Coord>,
}

impl World {
    /// Create an all-empty world.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "World dimensions must be positive");

        Self {
            width,
            height,
            terrain: FxHashMap::default(),
            towers: FxHashSet::default(),
            portals: FxHashMap::default(),
            portal_links: FxHashMap::default(),
        }
    }

    /// Width in cells.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a coordinate lies on the map.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.in_bounds(self.width, self.height)
    }

    /// In-bounds orthogonal neighbors.
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> Neighbors {
        coord
            .neighbors()
            .into_iter()
            .filter(|n| self.in_bounds(*n))
            .collect()
    }

    // === Terrain ===

    /// Terrain at `coord`, or `None` off the map.
    #[must_use]
    pub fn terrain(&self, coord: Coord) -> Option<Terrain> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(self.terrain.get(&coord).copied().unwrap_or_default())
    }

    /// Whether `coord` is on the map and has the given terrain.
    #[must_use]
    pub fn is(&self, coord: Coord, terrain: Terrain) -> bool {
        self.terrain(coord) == Some(terrain)
    }

    /// Set terrain. Ignored off the map.
    pub fn set_terrain(&mut self, coord: Coord, terrain: Terrain) {
        if !self.in_bounds(coord) {
            return;
        }
        if terrain == Terrain::Empty {
            self.terrain.remove(&coord);
        } else {
            self.terrain.insert(coord, terrain);
        }
    }

    /// Builder form of `set_terrain`.
    #[must_use]
    pub fn with_terrain(mut self, coord: Coord, terrain: Terrain) -> Self {
        self.set_terrain(coord, terrain);
        self
    }

    /// Movement cost; off-map cells are impassable.
    #[must_use]
    pub fn move_cost(&self, coord: Coord) -> u32 {
        self.terrain(coord).map_or(IMPASSABLE_COST, Terrain::move_cost)
    }

    /// Convert water into a bridge. No-op on any other terrain.
    pub fn build_bridge(&mut self, coord: Coord) {
        if self.is(coord, Terrain::Water) {
            self.set_terrain(coord, Terrain::Bridge);
        }
    }

    /// Reset a cell to plain terrain.
    pub fn restore_to_empty(&mut self, coord: Coord) {
        self.set_terrain(coord, Terrain::Empty);
    }

    // === Neutral towers ===

    /// Register a neutral tower; also sets tower terrain.
    pub fn add_tower(&mut self, coord: Coord) {
        if !self.in_bounds(coord) {
            return;
        }
        self.towers.insert(coord);
        self.set_terrain(coord, Terrain::Tower);
    }

    /// Remove a neutral tower entry. Terrain is left untouched.
    ///
    /// Returns true if an entry existed.
    pub fn remove_tower(&mut self, coord: Coord) -> bool {
        self.towers.remove(&coord)
    }

    /// Whether an unclaimed tower stands at `coord`.
    #[must_use]
    pub fn has_neutral_tower(&self, coord: Coord) -> bool {
        self.towers.contains(&coord)
    }

    /// Tower terrain or a neutral tower entry.
    #[must_use]
    pub fn is_tower(&self, coord: Coord) -> bool {
        self.is(coord, Terrain::Tower) || self.has_neutral_tower(coord)
    }

    /// Neutral tower coordinates, sorted.
    #[must_use]
    pub fn tower_coords(&self) -> Vec<Coord> {
        let mut coords: Vec<_> = self.towers.iter().copied().collect();
        coords.sort_unstable();
        coords
    }

    // === Portals ===

    /// Register an unowned portal; also sets portal terrain.
    pub fn add_portal(&mut self, coord: Coord) {
        if !self.in_bounds(coord) {
            return;
        }
        self.portals.insert(coord, PortalEntry::default());
        self.set_terrain(coord, Terrain::Portal);
    }

    /// Remove a portal registry entry.
    pub fn remove_portal(&mut self, coord: Coord) -> Option<PortalEntry> {
        self.portals.remove(&coord)
    }

    /// Portal registry entry at `coord`.
    #[must_use]
    pub fn portal(&self, coord: Coord) -> Option<&PortalEntry> {
        self.portals.get(&coord)
    }

    /// Mutable portal registry entry at `coord`.
    pub fn portal_mut(&mut self, coord: Coord) -> Option<&mut PortalEntry> {
        self.portals.get_mut(&coord)
    }

    /// Registered portal coordinates, sorted.
    #[must_use]
    pub fn portal_coords(&self) -> Vec<Coord> {
        let mut coords: Vec<_> = self.portals.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    /// Link two portal endpoints. The link is stored in both directions.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn link_portals(&mut self, a: Coord, b: Coord) {
        assert!(a != b, "Portal {} cannot link to itself", a);

        if let Some(old) = self.portal_links.insert(a, b) {
            self.portal_links.remove(&old);
        }
        if let Some(old) = self.portal_links.insert(b, a) {
            self.portal_links.remove(&old);
        }
    }

    /// Register both endpoints as portals and link them.
    #[must_use]
    pub fn with_portal_pair(mut self, a: Coord, b: Coord) -> Self {
        self.add_portal(a);
        self.add_portal(b);
        self.link_portals(a, b);
        self
    }

    /// The endpoint linked to `coord`, if any.
    #[must_use]
    pub fn linked_portal(&self, coord: Coord) -> Option<Coord> {
        self.portal_links.get(&coord).copied()
    }

    /// Every linked endpoint, sorted.
    #[must_use]
    pub fn portal_link_coords(&self) -> Vec<Coord> {
        let mut coords: Vec<_> = self.portal_links.keys().copied().collect();
        coords.sort_unstable();
        coords
    }
}
