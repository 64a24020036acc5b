//! Turn driver.
//!
//! `Session` owns the board and sequences play: human captures through
//! `attempt_build` / `skip_action`, computer turns through `run_ai_turn`,
//! round bookkeeping and classic-mode fortress decay in `advance_turn`,
//! and end-of-game detection in `outcome`.

pub mod game;
pub mod outcome;
pub mod turn;

pub use game::Session;
pub use outcome::Outcome;
pub use turn::TurnManager;
