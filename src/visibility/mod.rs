//! Fog of war.

pub mod fog;

pub use fog::VisibilityService;
