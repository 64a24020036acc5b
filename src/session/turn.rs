//! Turn order and the per-turn action budget.

use serde::{Deserialize, Serialize};

use crate::core::FactionId;

/// Whose turn it is and how many action points remain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnManager {
    budget: u32,
    current: FactionId,
    moves_left: u32,
}

impl TurnManager {
    /// Start at faction 0 with a full budget.
    #[must_use]
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            current: FactionId::new(0),
            moves_left: budget,
        }
    }

    /// Faction whose turn it is.
    #[must_use]
    pub fn current(&self) -> FactionId {
        self.current
    }

    /// Action points left this turn.
    #[must_use]
    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Action points granted at the start of each turn.
    #[must_use]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Back to faction 0 with a full budget.
    pub fn reset(&mut self) {
        self.set_index(FactionId::new(0));
    }

    /// Jump to `id` with a full budget.
    pub fn set_index(&mut self, id: FactionId) {
        self.current = id;
        self.moves_left = self.budget;
    }

    /// Spend action points. Never goes below zero.
    pub fn consume(&mut self, amount: u32) {
        self.moves_left = self.moves_left.saturating_sub(amount);
    }

    /// True once the budget is spent.
    #[must_use]
    pub fn needs_advance(&self) -> bool {
        self.moves_left == 0
    }

    /// Pass the turn to the next faction, wrapping at `total`.
    ///
    /// Returns true when the index wrapped back to 0 from a later seat, i.e.
    /// a round completed. A lone faction never completes a round.
    pub fn advance(&mut self, total: usize) -> bool {
        assert!(total > 0, "Must have at least 1 faction");
        let previous = self.current.index();
        let next = (previous + 1) % total;
        self.set_index(FactionId::new(next as u8));
        next == 0 && previous != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_turn_manager() {
        let turns = TurnManager::new(6);
        assert_eq!(turns.current(), FactionId::new(0));
        assert_eq!(turns.moves_left(), 6);
        assert!(!turns.needs_advance());
    }

    #[test]
    fn test_consume_saturates() {
        let mut turns = TurnManager::new(3);
        turns.consume(2);
        assert_eq!(turns.moves_left(), 1);
        turns.consume(5);
        assert_eq!(turns.moves_left(), 0);
        assert!(turns.needs_advance());
    }

    #[test]
    fn test_advance_wraps() {
        let mut turns = TurnManager::new(6);
        turns.consume(4);

        assert!(!turns.advance(3));
        assert_eq!(turns.current(), FactionId::new(1));
        assert_eq!(turns.moves_left(), 6);

        assert!(!turns.advance(3));
        assert!(turns.advance(3));
        assert_eq!(turns.current(), FactionId::new(0));
    }

    #[test]
    fn test_single_faction_never_completes_round() {
        let mut turns = TurnManager::new(6);
        assert!(!turns.advance(1));
        assert!(!turns.advance(1));
        assert_eq!(turns.current(), FactionId::new(0));
        assert_eq!(turns.moves_left(), 6);
    }

    #[test]
    fn test_set_index_and_reset() {
        let mut turns = TurnManager::new(6);
        turns.set_index(FactionId::new(2));
        turns.consume(1);
        assert_eq!(turns.current(), FactionId::new(2));

        turns.reset();
        assert_eq!(turns.current(), FactionId::new(0));
        assert_eq!(turns.moves_left(), 6);
    }
}
