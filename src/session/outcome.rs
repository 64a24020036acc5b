use crate::core::FactionId;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Sole surviving faction.
    Winner(FactionId),
    /// Nobody survived.
    Draw,
}

impl Outcome {
    /// Check if a faction won.
    #[must_use]
    pub fn is_winner(&self, faction: FactionId) -> bool {
        matches!(self, Outcome::Winner(f) if *f == faction)
    }
}
