//! Full games driven through `Session`.

use rust_conquest::ai::{Planner, PlannerConfig};
use rust_conquest::core::{Coord, Faction, FactionId, Factions, GameModeFlags, GameRng, GameplayConstants, World};
use rust_conquest::session::{Outcome, Session};

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

fn four_corners(flags: GameModeFlags) -> Session {
    let mut world = World::new(14, 14).with_portal_pair(c(3, 10), c(10, 3));
    world.add_tower(c(7, 7));
    let factions = Factions::from_factions(vec![
        Faction::new("Red", c(1, 1)),
        Faction::new("Blue", c(12, 12)),
        Faction::new("Green", c(12, 1)),
        Faction::new("Gold", c(1, 12)),
    ]);
    Session::new(world, factions, flags, GameplayConstants::default())
}

fn assert_single_owner(session: &Session) {
    for x in 0..session.world().width() {
        for y in 0..session.world().height() {
            let cell = c(x, y);
            let holders = session
                .factions()
                .iter()
                .filter(|(_, f)| f.is_alive() && f.owns(cell))
                .count();
            assert!(holders <= 1, "{cell} held by {holders} living factions");
        }
    }
}

fn play_rounds(session: &mut Session, rounds: u32, seed: u64) {
    let planner = Planner::new(session.constants().clone(), PlannerConfig::default());
    let mut rng = GameRng::new(seed);
    while session.round() < rounds && session.outcome().is_none() {
        session.run_ai_turn(&planner, &mut rng, |_| {});
        assert_single_owner(session);
    }
}

#[test]
fn test_ai_game_keeps_single_owner() {
    let mut session = four_corners(GameModeFlags::new());
    play_rounds(&mut session, 15, 11);

    let total: usize = session.factions().iter().map(|(_, f)| f.power()).sum();
    assert!(total > 0);
}

#[test]
fn test_classic_game_keeps_single_owner() {
    let mut session = four_corners(GameModeFlags::new().with_classic().with_mountain_efficiency());
    play_rounds(&mut session, 15, 5);
}

#[test]
fn test_supply_game_keeps_single_owner() {
    let mut session = four_corners(GameModeFlags::new().with_supply());
    play_rounds(&mut session, 15, 8);
}

#[test]
fn test_each_ai_turn_passes_the_turn() {
    let mut session = four_corners(GameModeFlags::new());
    let planner = Planner::new(GameplayConstants::default(), PlannerConfig::default());
    let mut rng = GameRng::new(1);

    for expected in [1u8, 2, 3, 0] {
        session.run_ai_turn(&planner, &mut rng, |_| {});
        assert_eq!(session.current(), FactionId::new(expected));
    }
    assert_eq!(session.round(), 1);
}

#[test]
fn test_step_callback_sees_remaining_budget() {
    let mut session = four_corners(GameModeFlags::new());
    let planner = Planner::new(GameplayConstants::default(), PlannerConfig::default());
    let mut rng = GameRng::new(3);
    let mut seen = Vec::new();

    session.run_ai_turn(&planner, &mut rng, |remaining| seen.push(remaining));

    assert_eq!(seen.last(), Some(&0));
    assert!(seen.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_human_conquest_to_victory() {
    let factions = Factions::from_factions(vec![Faction::new("Red", c(0, 0)), Faction::new("Blue", c(3, 0))]);
    let mut session = Session::new(World::new(4, 1), factions, GameModeFlags::new(), GameplayConstants::default());

    assert!(session.attempt_build(c(1, 0)));
    assert!(session.attempt_build(c(2, 0)));
    assert!(session.attempt_build(c(3, 0)));

    assert_eq!(session.outcome(), Some(Outcome::Winner(FactionId::new(0))));
    let events = session.events().latest();
    assert_eq!(events, vec!["Blue DEFEATED!".to_string(), "RED WINS!".to_string()]);

    // Asking again does not announce twice
    session.outcome();
    assert_eq!(session.events().len(), 2);
}

#[test]
fn test_summaries_report_every_faction() {
    let session = four_corners(GameModeFlags::new());
    let summaries = session.summaries();

    assert_eq!(summaries.len(), 4);
    assert!(summaries[0].starts_with("Red (ALIVE)"));
}
