//! Property-based tests for the capture rules.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use rust_conquest::core::{
    CaptureLedger, Coord, Faction, FactionId, Factions, GameModeFlags, Holding, Terrain, TurnContext, World,
};
use rust_conquest::executor::MoveExecutor;
use rust_conquest::rules::BuildValidator;

const WIDTH: i32 = 8;
const HEIGHT: i32 = 8;

fn terrain_strategy() -> impl Strategy<Value = Terrain> {
    prop_oneof![
        6 => Just(Terrain::Empty),
        1 => Just(Terrain::Water),
        2 => Just(Terrain::Mountain),
        1 => Just(Terrain::Bridge),
    ]
}

fn holding_strategy() -> impl Strategy<Value = Holding> {
    prop_oneof![Just(Holding::Territory), Just(Holding::Fortress)]
}

fn cell_strategy() -> impl Strategy<Value = Coord> {
    (0..WIDTH, 0..HEIGHT).prop_map(|(x, y)| Coord::new(x, y))
}

/// A world with random terrain, up to two linked portal pairs, a few neutral
/// towers and two factions with random scattered holdings.
fn board_strategy() -> impl Strategy<Value = (World, Factions)> {
    let terrain = prop::collection::vec(terrain_strategy(), (WIDTH * HEIGHT) as usize);
    let portals = prop::collection::vec((cell_strategy(), cell_strategy()), 0..3);
    let towers = prop::collection::vec(cell_strategy(), 0..4);
    let cells = prop::collection::vec((cell_strategy(), holding_strategy(), 0u8..2), 0..24);
    (terrain, portals, towers, cells).prop_map(|(terrain, portals, towers, cells)| {
        let a_base = Coord::new(0, 0);
        let b_base = Coord::new(WIDTH - 1, HEIGHT - 1);

        let mut world = World::new(WIDTH, HEIGHT);
        for (i, t) in terrain.into_iter().enumerate() {
            let coord = Coord::new(i as i32 % WIDTH, i as i32 / WIDTH);
            if coord != a_base && coord != b_base {
                world.set_terrain(coord, t);
            }
        }

        let mut taken: FxHashSet<Coord> = FxHashSet::default();
        taken.insert(a_base);
        taken.insert(b_base);
        for (p, q) in portals {
            if p == q || taken.contains(&p) || taken.contains(&q) {
                continue;
            }
            taken.insert(p);
            taken.insert(q);
            world.add_portal(p);
            world.add_portal(q);
            world.link_portals(p, q);
        }
        for tower in towers {
            if taken.insert(tower) {
                world.add_tower(tower);
            }
        }

        let mut a = Faction::new("A", a_base);
        let mut b = Faction::new("B", b_base);
        for (coord, holding, who) in cells {
            let holding = if world.is(coord, Terrain::Bridge) { Holding::Fortress } else { holding };
            if world.is(coord, Terrain::Water) || !taken.insert(coord) {
                continue;
            }
            let owner = if who == 0 { &mut a } else { &mut b };
            owner.insert(holding, coord);
            if world.is(coord, Terrain::Bridge) {
                owner.insert(Holding::Bridge, coord);
            }
        }

        (world, Factions::from_factions(vec![a, b]))
    })
}

fn flags_strategy() -> impl Strategy<Value = GameModeFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(classic, efficiency, supply)| {
        let mut flags = GameModeFlags::new();
        if classic {
            flags = flags.with_classic();
        }
        if efficiency {
            flags = flags.with_mountain_efficiency();
        }
        if supply {
            flags = flags.with_supply();
        }
        flags
    })
}

/// Living owner of `cell`, if any.
fn living_owner(factions: &Factions, cell: Coord) -> Option<FactionId> {
    factions.living().find(|(_, f)| f.owns(cell)).map(|(id, _)| id)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Anything legal under supply rules is legal under default rules.
    #[test]
    fn prop_supply_narrows_default((world, factions) in board_strategy(), x in 0..WIDTH, y in 0..HEIGHT) {
        let validator = BuildValidator::default();
        let discounts = FxHashSet::default();
        let target = Coord::new(x, y);

        for me in FactionId::all(2) {
            let supply = validator.validate(target, me, &factions, &world, GameModeFlags::new().with_supply(), &discounts);
            let default = validator.validate(target, me, &factions, &world, GameModeFlags::new(), &discounts);
            if supply.allowed {
                prop_assert!(default.allowed);
                prop_assert_eq!(supply.cost, default.cost);
            }
        }
    }

    /// Mountain cost is 1 with a recorded discount and 2 without.
    #[test]
    fn prop_mountain_discount((mut world, factions) in board_strategy(), x in 0..WIDTH, y in 0..HEIGHT) {
        let target = Coord::new(x, y);
        prop_assume!(factions.iter().all(|(_, f)| f.base != target));
        world.set_terrain(target, Terrain::Mountain);

        let validator = BuildValidator::default();
        let flags = GameModeFlags::new().with_mountain_efficiency();
        let mut discounts = FxHashSet::default();
        let plain = validator.validate(target, FactionId::new(0), &factions, &world, flags, &discounts);
        discounts.insert(target);
        let discounted = validator.validate(target, FactionId::new(0), &factions, &world, flags, &discounts);

        prop_assert_eq!(plain.allowed, discounted.allowed);
        if discounted.allowed {
            prop_assert_eq!(discounted.cost, plain.cost.min(1));
            if plain.owner.is_none() {
                prop_assert_eq!(plain.cost, 2);
            }
        }
    }

    /// After any sequence of validated captures no cell has two living owners,
    /// both ends of every portal link share an owner, and a fallen base
    /// always means a dead faction.
    #[test]
    fn prop_single_owner_after_captures(
        (mut world, mut factions) in board_strategy(),
        flags in flags_strategy(),
        moves in prop::collection::vec((0u8..2, 0..WIDTH, 0..HEIGHT), 1..60),
    ) {
        let validator = BuildValidator::default();
        let mut ledger = CaptureLedger::new();
        let mut events: Vec<String> = Vec::new();

        for (who, x, y) in moves {
            let acting = FactionId::new(who);
            if !factions[acting].is_alive() {
                continue;
            }
            let target = Coord::new(x, y);
            let result = validator.validate(target, acting, &factions, &world, flags, &ledger.mountain_discounts);
            if !result.allowed {
                continue;
            }
            let mut ctx = TurnContext::new(acting, &mut factions, &mut world, flags, &mut ledger, 0, &mut events);
            MoveExecutor::apply(target, &result, &mut ctx);

            for cx in 0..WIDTH {
                for cy in 0..HEIGHT {
                    let cell = Coord::new(cx, cy);
                    let holders = factions.living().filter(|(_, f)| f.owns(cell)).count();
                    prop_assert!(holders <= 1);
                }
            }
            for end in world.portal_link_coords() {
                if let Some(partner) = world.linked_portal(end) {
                    prop_assert_eq!(living_owner(&factions, end), living_owner(&factions, partner));
                }
            }
            for (_, faction) in factions.iter() {
                let base_taken = factions
                    .iter()
                    .any(|(_, other)| other.base != faction.base && other.is_alive() && other.owns(faction.base));
                if base_taken {
                    prop_assert!(!faction.is_alive());
                }
            }
        }
    }
}
