//! Turn-scoped mutable state.
//!
//! `CaptureLedger` groups the bookkeeping sets that outlive a single move:
//! converted mountains, towers that already announced their capture, and
//! classic-mode fortress ages. `TurnContext` bundles everything a move needs
//! into one value passed by reference to the executor and planner.

use rustc_hash::{FxHashMap, FxHashSet};

use super::config::GameModeFlags;
use super::coord::Coord;
use super::events::EventSink;
use super::faction::{Faction, FactionId, Factions};
use super::world::World;

/// Bookkeeping sets maintained across moves and turns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureLedger {
    /// Mountains converted while mountain efficiency is active.
    pub mountain_discounts: FxHashSet<Coord>,
    /// Towers whose capture has been announced. Announced once per coordinate, ever.
    pub captured_towers: FxHashSet<Coord>,
    /// Round in which each classic-mode fortress was placed.
    pub fortress_ages: FxHashMap<Coord, u32>,
}

impl CaptureLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything a single move reads or writes.
pub struct TurnContext<'a> {
    /// Faction performing the move.
    pub acting: FactionId,
    /// The full roster.
    pub factions: &'a mut Factions,
    /// The map.
    pub world: &'a mut World,
    /// Session rule toggles.
    pub flags: GameModeFlags,
    /// Cross-move bookkeeping.
    pub ledger: &'a mut CaptureLedger,
    /// Current round number.
    pub round: u32,
    /// Receiver of event messages.
    pub events: &'a mut dyn EventSink,
}

impl<'a> TurnContext<'a> {
    /// Bundle the state for `acting`'s move.
    pub fn new(
        acting: FactionId,
        factions: &'a mut Factions,
        world: &'a mut World,
        flags: GameModeFlags,
        ledger: &'a mut CaptureLedger,
        round: u32,
        events: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            acting,
            factions,
            world,
            flags,
            ledger,
            round,
            events,
        }
    }

    /// The acting faction.
    #[must_use]
    pub fn me(&self) -> &Faction {
        &self.factions[self.acting]
    }
}
