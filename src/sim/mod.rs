//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, no delta time
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod flow;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use effects::{Cue, EffectEvent, Tone};
pub use flow::Command;
pub use level::{Level, LevelCatalog};
pub use state::{
    Collapse, Enemy, GamePhase, GameSession, InputState, Outcome, Particle, Physics, Platform,
    Player, RunState,
};
pub use tick::tick;
