//! Move execution: applying a validated capture to world and faction state.
//!
//! The executor is the only mutator of ownership. It assumes the decision it
//! receives came from `BuildValidator` against the same state; it does not
//! re-validate.

pub mod apply;

pub use apply::{CaptureKind, MoveExecutor};
