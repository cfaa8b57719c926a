//! Turn-based duel engine for a small touchscreen device.
//!
//! The main entry point for running matches is [`engine::TurnEngine`]. All
//! drawing, touch input and timing go through the [`frontend::Frontend`]
//! trait, so the same engine drives the on-device screen, a terminal
//! adapter and the headless simulation harness.

pub mod catalog;
pub mod engine;
pub mod frontend;
pub mod layout;
pub mod match_log;
pub mod render;
pub mod session;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::catalog::{assign_sides, CATALOG};
    pub use crate::engine::{match_outcome, prompt_replay, MatchResult, TurnEngine};
    pub use crate::frontend::{Color, Frontend, NullFrontend};
    pub use crate::layout::Rect;
    pub use crate::session::{Difficulty, SessionStats};
    pub use crate::sim::combatant::{Combatant, Move, Side, SideId};
}
