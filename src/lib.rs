//! Chaos Jumper - A five-level arcade platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level flow)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio tones for effect events (wasm only)
//! - `settings`: Presentation preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (world units are canvas pixels, y grows downward)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Number of hand-authored levels
    pub const LEVEL_COUNT: usize = 5;
    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 3;
    /// Score awarded for reaching a goal
    pub const GOAL_SCORE: u64 = 100;

    /// Player box and spawn point
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    pub const PLAYER_SPAWN_Y: f32 = 400.0;

    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -12.0;
    /// Horizontal velocity multiplier when no direction is held
    pub const FRICTION: f32 = 0.8;
    /// Animation counter period; sprite frame flips at the midpoint
    pub const ANIMATION_PERIOD: u32 = 60;

    /// Enemy hitbox edge length
    pub const ENEMY_SIZE: f32 = 20.0;
    /// Per-tick probability an enemy reverses direction
    pub const ENEMY_TURN_CHANCE: f64 = 0.01;

    /// Ticks between first touch and a collapsing platform dropping
    pub const COLLAPSE_DELAY_TICKS: u32 = 60;
    /// One-shot drop distance of a collapsed platform
    pub const COLLAPSE_DROP: f32 = 5.0;

    /// Particle defaults
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_MAX_SPREAD_X: f32 = 2.0;
    pub const PARTICLE_MAX_RISE: f32 = 4.0;
    pub const JUMP_BURST: usize = 5;
    pub const DEATH_BURST: usize = 10;

    /// Screen shake pulses (ticks)
    pub const LANDING_SHAKE: u32 = 5;
    pub const DEATH_SHAKE: u32 = 10;
    /// Max jitter applied by the renderer while shaking (pixels)
    pub const SHAKE_JITTER: f32 = 2.0;

    /// Gain at the start of every tone, before volume scaling
    pub const TONE_GAIN: f32 = 0.1;
    /// Usual end gain of a tone's exponential decay
    pub const TONE_RAMP_FLOOR: f32 = 0.01;
}
