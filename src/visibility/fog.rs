use rustc_hash::FxHashSet;

use crate::core::{Coord, Faction, GameplayConstants, World};

/// Computes the cells a faction can currently see.
///
/// Recomputed on every query. Towers see farther than everything else.
#[derive(Clone, Debug, Default)]
pub struct VisibilityService {
    constants: GameplayConstants,
}

impl VisibilityService {
    /// Create a service using the radii in `constants`.
    #[must_use]
    pub fn new(constants: GameplayConstants) -> Self {
        Self { constants }
    }

    /// Union of vision discs around every source, clipped to the map.
    #[must_use]
    pub fn visible_cells(&self, faction: &Faction, world: &World) -> FxHashSet<Coord> {
        let mut normal_sources: Vec<Coord> = Vec::new();
        let mut tower_sources: FxHashSet<Coord> = FxHashSet::default();

        normal_sources.push(faction.base);
        normal_sources.extend(faction.territory().iter().copied());

        for &fortress in faction.fortresses() {
            if faction.towers().contains(&fortress) || world.has_neutral_tower(fortress) {
                tower_sources.insert(fortress);
            } else {
                normal_sources.push(fortress);
            }
        }
        tower_sources.extend(faction.towers().iter().copied());

        let mut visible = FxHashSet::default();

        // No disc needs to reach past the map's full span.
        let span = u32::try_from(world.width() + world.height()).unwrap_or(0);

        let normal = disc_offsets(self.constants.fog_radius.min(span));
        for source in normal_sources {
            paint(source, &normal, world, &mut visible);
        }

        if !tower_sources.is_empty() {
            let extended = disc_offsets(self.constants.tower_vision_radius.min(span));
            for source in tower_sources {
                paint(source, &extended, world, &mut visible);
            }
        }

        visible
    }
}

/// All `(dx, dy)` with `dx² + dy² <= radius²`.
fn disc_offsets(radius: u32) -> Vec<(i32, i32)> {
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    let limit = i64::from(r) * i64::from(r);
    let mut offsets = Vec::new();
    for dx in -r..=r {
        for dy in -r..=r {
            if i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy) <= limit {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

fn paint(center: Coord, offsets: &[(i32, i32)], world: &World, visible: &mut FxHashSet<Coord>) {
    for &(dx, dy) in offsets {
        let cell = center.offset(dx, dy);
        if world.in_bounds(cell) {
            visible.insert(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Holding;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    fn service(fog: u32, tower: u32) -> VisibilityService {
        VisibilityService::new(GameplayConstants::default().with_vision(fog, tower))
    }

    #[test]
    fn test_disc_offsets_shape() {
        // r = 1: the plus shape only
        let offsets = disc_offsets(1);
        assert_eq!(offsets.len(), 5);
        assert!(!offsets.contains(&(1, 1)));

        // r = 2 includes (1, 1) but not (2, 1)
        let offsets = disc_offsets(2);
        assert!(offsets.contains(&(1, 1)));
        assert!(!offsets.contains(&(2, 1)));
        assert_eq!(offsets.len(), 13);
    }

    #[test]
    fn test_base_vision_clipped_to_world() {
        let world = World::new(10, 10);
        let red = Faction::new("Red", c(0, 0));

        let visible = service(2, 5).visible_cells(&red, &world);

        assert!(visible.contains(&c(0, 0)));
        assert!(visible.contains(&c(2, 0)));
        assert!(visible.contains(&c(1, 1)));
        assert!(!visible.contains(&c(2, 1)));
        assert!(visible.iter().all(|cell| world.in_bounds(*cell)));
        // Quarter disc of radius 2
        assert_eq!(visible.len(), 6);
    }

    #[test]
    fn test_territory_extends_vision() {
        let world = World::new(20, 1);
        let red = Faction::new("Red", c(0, 0)).with(Holding::Territory, c(5, 0));

        let visible = service(1, 5).visible_cells(&red, &world);

        assert!(visible.contains(&c(6, 0)));
        assert!(!visible.contains(&c(7, 0)));
        assert!(!visible.contains(&c(3, 0)));
    }

    #[test]
    fn test_tower_uses_extended_radius() {
        let world = World::new(30, 1);
        let red = Faction::new("Red", c(0, 0))
            .with(Holding::Tower, c(2, 0))
            .with(Holding::Fortress, c(2, 0));

        let visible = service(1, 10).visible_cells(&red, &world);

        assert!(visible.contains(&c(12, 0)));
        assert!(!visible.contains(&c(13, 0)));
    }

    #[test]
    fn test_plain_fortress_uses_normal_radius() {
        let world = World::new(30, 1);
        let red = Faction::new("Red", c(0, 0)).with(Holding::Fortress, c(10, 0));

        let visible = service(1, 10).visible_cells(&red, &world);

        assert!(visible.contains(&c(11, 0)));
        assert!(!visible.contains(&c(12, 0)));
    }

    #[test]
    fn test_huge_radius_sees_whole_map() {
        let world = World::new(8, 5);
        let red = Faction::new("Red", c(0, 0))
            .with(Holding::Tower, c(1, 0))
            .with(Holding::Fortress, c(1, 0));

        let visible = service(50_000, u32::MAX).visible_cells(&red, &world);

        assert_eq!(visible.len(), 40);
    }
}
