use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::ai::Planner;
use crate::core::{
    CaptureLedger, Coord, EventLog, EventSink, FactionId, Factions, GameModeFlags,
    GameplayConstants, Holding, RandomSource, Terrain, TurnContext, World,
};
use crate::executor::MoveExecutor;
use crate::rules::{BuildResult, BuildValidator};
use crate::visibility::VisibilityService;

use super::outcome::Outcome;
use super::turn::TurnManager;

/// A running game: the board plus turn order, round counter and event log.
#[derive(Clone, Debug)]
pub struct Session {
    world: World,
    factions: Factions,
    flags: GameModeFlags,
    constants: GameplayConstants,
    validator: BuildValidator,
    visibility: VisibilityService,
    ledger: CaptureLedger,
    round: u32,
    events: EventLog,
    turns: TurnManager,
    outcome: Option<Outcome>,
}

impl Session {
    /// Start a game at round 0 with faction 0 to move.
    #[must_use]
    pub fn new(world: World, factions: Factions, flags: GameModeFlags, constants: GameplayConstants) -> Self {
        Self {
            world,
            factions,
            flags,
            validator: BuildValidator::new(constants.clone()),
            visibility: VisibilityService::new(constants.clone()),
            turns: TurnManager::new(constants.actions_per_turn),
            constants,
            ledger: CaptureLedger::new(),
            round: 0,
            events: EventLog::default(),
            outcome: None,
        }
    }

    // === Accessors ===

    /// The map.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// All factions.
    #[must_use]
    pub fn factions(&self) -> &Factions {
        &self.factions
    }

    /// Rule toggles.
    #[must_use]
    pub fn flags(&self) -> GameModeFlags {
        self.flags
    }

    /// Gameplay constants.
    #[must_use]
    pub fn constants(&self) -> &GameplayConstants {
        &self.constants
    }

    /// Cross-turn bookkeeping.
    #[must_use]
    pub fn ledger(&self) -> &CaptureLedger {
        &self.ledger
    }

    /// Completed rounds.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Recent events.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Turn order and remaining budget.
    #[must_use]
    pub fn turns(&self) -> &TurnManager {
        &self.turns
    }

    /// Faction to move.
    #[must_use]
    pub fn current(&self) -> FactionId {
        self.turns.current()
    }

    /// Cells visible to `faction`.
    #[must_use]
    pub fn visible_cells(&self, faction: FactionId) -> FxHashSet<Coord> {
        self.visibility.visible_cells(&self.factions[faction], &self.world)
    }

    /// What would happen if the current faction tried to capture `target`.
    #[must_use]
    pub fn validate(&self, target: Coord) -> BuildResult {
        self.validator.validate(
            target,
            self.current(),
            &self.factions,
            &self.world,
            self.flags,
            &self.ledger.mountain_discounts,
        )
    }

    /// One status line per faction.
    #[must_use]
    pub fn summaries(&self) -> Vec<String> {
        self.factions.iter().map(|(_, f)| f.summary()).collect()
    }

    // === Actions ===

    /// Capture `target` for the current faction.
    ///
    /// Returns false without touching state when the capture is illegal or
    /// costs more than the points left this turn.
    pub fn attempt_build(&mut self, target: Coord) -> bool {
        if !self.factions[self.current()].is_alive() {
            return false;
        }

        let result = self.validate(target);
        if !result.allowed {
            return false;
        }
        let cost = result.spend();
        if cost > self.turns.moves_left() {
            return false;
        }

        let mut ctx = TurnContext::new(
            self.turns.current(),
            &mut self.factions,
            &mut self.world,
            self.flags,
            &mut self.ledger,
            self.round,
            &mut self.events,
        );
        MoveExecutor::apply(target, &result, &mut ctx);

        self.turns.consume(cost);
        if self.turns.needs_advance() {
            self.advance_turn();
        }
        true
    }

    /// Give up one action point.
    pub fn skip_action(&mut self) -> bool {
        if self.turns.moves_left() == 0 {
            return false;
        }
        self.turns.consume(1);
        if self.turns.needs_advance() {
            self.advance_turn();
        }
        true
    }

    /// Let `planner` play the current faction's turn, then pass the turn on.
    pub fn run_ai_turn<R: RandomSource>(&mut self, planner: &Planner, rng: &mut R, on_step: impl FnMut(u32)) {
        let mut ctx = TurnContext::new(
            self.turns.current(),
            &mut self.factions,
            &mut self.world,
            self.flags,
            &mut self.ledger,
            self.round,
            &mut self.events,
        );
        planner.take_turn(&mut ctx, rng, on_step);
        self.advance_turn();
    }

    /// Pass the turn to the next faction.
    ///
    /// Completing a round bumps the round counter and, in classic mode,
    /// decays old fortresses. A lone faction never completes a round.
    pub fn advance_turn(&mut self) {
        if self.turns.advance(self.factions.len()) {
            self.round += 1;
            debug!(round = self.round, "round complete");
            if self.flags.classic {
                self.decay_fortresses();
            }
        }
    }

    /// Classic mode: plain fortresses older than the lifetime fall back to territory.
    ///
    /// Bases, structures (bridge, tower, portal terrain) and neutral tower
    /// cells never decay; nor do fortresses with no recorded age.
    fn decay_fortresses(&mut self) {
        let lifetime = self.constants.fortress_lifetime;
        let living: Vec<FactionId> = self.factions.living().map(|(id, _)| id).collect();

        for id in living {
            let faction = &self.factions[id];
            let mut expired: Vec<Coord> = faction
                .fortresses()
                .iter()
                .copied()
                .filter(|&coord| coord != faction.base)
                .filter(|&coord| {
                    !matches!(
                        self.world.terrain(coord),
                        Some(Terrain::Bridge | Terrain::Tower | Terrain::Portal)
                    )
                })
                .filter(|&coord| !self.world.has_neutral_tower(coord))
                .filter(|coord| {
                    self.ledger
                        .fortress_ages
                        .get(coord)
                        .map_or(false, |&placed| self.round.saturating_sub(placed) > lifetime)
                })
                .collect();
            expired.sort_unstable();

            if expired.is_empty() {
                continue;
            }
            info!(faction = %self.factions[id].name, count = expired.len(), round = self.round, "fortresses decayed");

            let faction = &mut self.factions[id];
            for coord in expired {
                faction.remove(Holding::Fortress, coord);
                faction.insert(Holding::Territory, coord);
                self.ledger.fortress_ages.remove(&coord);
            }
        }
    }

    // === Outcome ===

    /// The result, once at most one faction is left standing.
    ///
    /// The first detection of a winner is announced in the event log.
    pub fn outcome(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        let mut living = self.factions.living();
        let outcome = match (living.next(), living.next()) {
            (Some((id, faction)), None) => {
                let message = format!("{} WINS!", faction.name.to_uppercase());
                info!(winner = %faction.name, "game over");
                self.events.push(message);
                Outcome::Winner(id)
            }
            (None, _) => {
                info!("game over: no survivors");
                Outcome::Draw
            }
            _ => return None,
        };

        self.outcome = Some(outcome);
        self.outcome
    }

    /// Whether the game has been decided.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.factions.living().nth(1).is_none()
    }
}
