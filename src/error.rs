//! Crate error type

use crate::sim::{Command, GamePhase};

/// Errors surfaced by the simulation and its configuration
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Level lookups are 1-based and bounded by the catalog size
    #[error("level index {index} is outside 1..={count}")]
    InvalidLevelIndex { index: usize, count: usize },

    /// A flow command was issued in a phase that does not accept it
    #[error("{command:?} is not valid while {phase:?}")]
    InvalidTransition { command: Command, phase: GamePhase },

    /// Level data failed to parse
    #[error("level catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Settings JSON failed to parse
    #[error("settings error: {0}")]
    Settings(#[source] serde_json::Error),
}
