//! Capture cost calculation.

use crate::core::{Coord, FactionId, GameplayConstants, Terrain, World, IMPASSABLE_COST};

/// Snapshot of the terrain facts that decide cost and passability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileContext {
    /// Terrain, or `None` off the map.
    pub terrain: Option<Terrain>,
    /// Terrain movement cost.
    pub base_cost: u32,
    /// Water terrain.
    pub is_water: bool,
    /// Bridge terrain.
    pub is_bridge: bool,
    /// Tower terrain or a neutral tower entry.
    pub is_tower: bool,
    /// Portal terrain.
    pub is_portal: bool,
    /// Mountain terrain.
    pub is_mountain: bool,
}

impl TileContext {
    /// Capture the tile facts at `coord`.
    #[must_use]
    pub fn capture(world: &World, coord: Coord) -> Self {
        let terrain = world.terrain(coord);
        Self {
            terrain,
            base_cost: world.move_cost(coord),
            is_water: terrain == Some(Terrain::Water),
            is_bridge: terrain == Some(Terrain::Bridge),
            is_tower: world.is_tower(coord),
            is_portal: terrain == Some(Terrain::Portal),
            is_mountain: terrain == Some(Terrain::Mountain),
        }
    }

    /// Cannot be entered. Water is excluded: it is always a bridge site.
    #[must_use]
    pub fn is_impassable(&self) -> bool {
        self.base_cost >= IMPASSABLE_COST && !self.is_water
    }
}

/// Computes action-point costs.
pub struct CostCalculator;

impl CostCalculator {
    /// Cost before any mode discount.
    ///
    /// Priority: unowned water → bridge build; owned bridge → bridge capture;
    /// tower or portal → 1; fortress-tier → fortress capture; else terrain cost.
    #[must_use]
    pub fn base_cost(
        tile: &TileContext,
        owner: Option<FactionId>,
        is_fortress: bool,
        constants: &GameplayConstants,
    ) -> u32 {
        if tile.is_water && owner.is_none() {
            return constants.bridge_build_cost;
        }
        if tile.is_bridge && owner.is_some() {
            return constants.bridge_capture_cost;
        }
        if tile.is_tower || tile.is_portal {
            return 1;
        }
        if is_fortress {
            return constants.fortress_capture_cost;
        }
        tile.base_cost
    }
}
