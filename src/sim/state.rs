//! Game session and runtime entity types
//!
//! Everything the frame driver mutates lives in `GameSession`, owned by a
//! single caller and passed by `&mut` into `tick` and the flow commands.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::EffectEvent;
use super::level::{EnemyTemplate, LevelCatalog, PlatformTemplate};
use crate::consts::*;
use crate::error::GameError;

/// Outcome shown on the game-over panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Goal reached, waiting for the next-level command
    LevelComplete,
    /// Run ended, either by clearing the last level or running out of lives
    GameOver(Outcome),
}

/// Input flags for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Animation counter in `0..ANIMATION_PERIOD`
    pub frame: u32,
    /// A landing was resolved on the previous tick
    #[serde(default)]
    pub resting: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::spawn(),
            vel: Vec2::ZERO,
            on_ground: false,
            frame: 0,
            resting: false,
        }
    }
}

impl Player {
    pub const SIZE: Vec2 = Vec2::splat(PLAYER_SIZE);

    pub fn spawn() -> Vec2 {
        Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, Self::SIZE)
    }

    /// Bottom-centre point, where jump and death bursts originate
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + PLAYER_SIZE / 2.0, self.pos.y + PLAYER_SIZE)
    }

    /// Move back to the spawn point at rest
    pub fn respawn(&mut self) {
        self.pos = Self::spawn();
        self.vel = Vec2::ZERO;
        self.resting = false;
    }

    /// Two-frame sprite index derived from the animation counter
    pub fn sprite_frame(&self) -> u32 {
        if self.frame < ANIMATION_PERIOD / 2 { 0 } else { 1 }
    }
}

/// Collapse behaviour of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collapse {
    /// Never falls
    Solid,
    /// Collapsible, not yet touched
    Stable,
    /// Touched, counting down to the drop
    Armed { ticks_left: u32 },
    /// Already dropped; stays where it is
    Dropped,
}

/// Runtime platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Aabb,
    pub vx: f32,
    pub collapse: Collapse,
}

impl From<&PlatformTemplate> for Platform {
    fn from(t: &PlatformTemplate) -> Self {
        Self {
            rect: t.rect,
            vx: t.vx,
            collapse: if t.collapsing {
                Collapse::Stable
            } else {
                Collapse::Solid
            },
        }
    }
}

impl Platform {
    /// Drift and run the collapse countdown. Returns true on the tick it drops.
    pub fn advance(&mut self) -> bool {
        self.rect.x += self.vx;

        if let Collapse::Armed { ticks_left } = self.collapse {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left == 0 {
                self.rect.y += COLLAPSE_DROP;
                self.collapse = Collapse::Dropped;
                return true;
            }
            self.collapse = Collapse::Armed { ticks_left };
        }
        false
    }

    /// Start the delayed fall on first touch. Returns true if it armed.
    pub fn touch(&mut self) -> bool {
        if self.collapse == Collapse::Stable {
            self.collapse = Collapse::Armed {
                ticks_left: COLLAPSE_DELAY_TICKS,
            };
            true
        } else {
            false
        }
    }
}

/// Patrolling enemy with an implicit 20x20 box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl From<&EnemyTemplate> for Enemy {
    fn from(t: &EnemyTemplate) -> Self {
        Self {
            pos: t.pos,
            vel: Vec2::new(t.vx, 0.0),
        }
    }
}

impl Enemy {
    pub const SIZE: Vec2 = Vec2::splat(ENEMY_SIZE);

    pub fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, Self::SIZE)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
}

/// Run progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Current level (1-based)
    pub level: usize,
    pub lives: u32,
    pub score: u64,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            level: 1,
            lives: STARTING_LIVES,
            score: 0,
        }
    }
}

/// Per-level physics taken from the active level on load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    pub gravity: f32,
    pub speed: f32,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    catalog: LevelCatalog,
    pub phase: GamePhase,
    pub run: RunState,
    pub physics: Physics,
    /// Goal rectangle of the active level
    pub goal: Aabb,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Screen shake ticks remaining
    pub shake: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Effect events not yet drained by the presenter
    pub(crate) events: Vec<EffectEvent>,
}

impl GameSession {
    /// New session on the built-in campaign
    pub fn new(seed: u64) -> Result<Self, GameError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let catalog = LevelCatalog::builtin(&mut rng)?;
        Ok(Self::from_parts(seed, rng, catalog))
    }

    /// New session on a custom catalog
    pub fn with_catalog(catalog: LevelCatalog, seed: u64) -> Self {
        Self::from_parts(seed, Pcg32::seed_from_u64(seed), catalog)
    }

    fn from_parts(seed: u64, rng: Pcg32, catalog: LevelCatalog) -> Self {
        Self {
            seed,
            rng,
            catalog,
            phase: GamePhase::Menu,
            run: RunState::default(),
            physics: Physics {
                gravity: 0.0,
                speed: 0.0,
            },
            goal: Aabb::new(0.0, 0.0, 0.0, 0.0),
            player: Player::default(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            shake: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Replace all level entities with fresh clones of the current level
    pub fn load_level(&mut self) -> Result<(), GameError> {
        let level = self.catalog.level(self.run.level)?;

        self.platforms = level.platforms.iter().map(Platform::from).collect();
        self.enemies = level.enemies.iter().map(Enemy::from).collect();
        self.particles.clear();
        self.physics = Physics {
            gravity: level.gravity,
            speed: level.speed,
        };
        self.goal = level.goal;
        self.player.respawn();

        log::info!(
            "Level {} '{}': gravity={}, speed={}",
            self.run.level,
            level.name,
            level.gravity,
            level.speed
        );
        Ok(())
    }

    /// Take all pending effect events
    pub fn drain_events(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_in_menu() {
        let session = GameSession::new(1).unwrap();
        assert_eq!(session.phase, GamePhase::Menu);
        assert_eq!(session.run, RunState::default());
        assert_eq!(session.run.lives, 3);
        assert!(session.platforms.is_empty());
    }

    #[test]
    fn test_load_level_clones_template() {
        let mut session = GameSession::new(1).unwrap();
        session.load_level().unwrap();
        assert_eq!(session.platforms.len(), 3);
        assert_eq!(session.enemies.len(), 1);
        assert_eq!(session.platforms[0].collapse, Collapse::Solid);
        assert_eq!(session.physics.gravity, 0.5);
        assert_eq!(session.goal, Aabb::new(750.0, 250.0, 50.0, 50.0));

        session.platforms[0].rect.x = 999.0;
        session.enemies[0].pos.x = -5.0;
        let template = &session.catalog().level(1).unwrap().platforms[0];
        assert_eq!(template.rect.x, 0.0);

        session.load_level().unwrap();
        assert_eq!(session.platforms[0].rect.x, 0.0);
        assert_eq!(session.enemies[0].pos.x, 400.0);
    }

    #[test]
    fn test_load_level_resets_player_and_particles() {
        let mut session = GameSession::new(1).unwrap();
        session.player.pos = Vec2::new(300.0, 10.0);
        session.player.vel = Vec2::new(4.0, -3.0);
        session.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 10,
        });
        session.player.resting = true;
        session.load_level().unwrap();
        assert_eq!(session.player.pos, Vec2::new(50.0, 400.0));
        assert_eq!(session.player.vel, Vec2::ZERO);
        assert!(!session.player.resting);
        assert!(session.particles.is_empty());
    }

    #[test]
    fn test_load_invalid_level_fails() {
        let mut session = GameSession::new(1).unwrap();
        session.run.level = 9;
        assert!(matches!(
            session.load_level(),
            Err(GameError::InvalidLevelIndex { index: 9, .. })
        ));
    }

    #[test]
    fn test_collapse_countdown() {
        let mut p = Platform {
            rect: Aabb::new(0.0, 500.0, 200.0, 20.0),
            vx: 0.0,
            collapse: Collapse::Stable,
        };
        assert!(!p.advance());
        assert!(p.touch());
        assert_eq!(p.collapse, Collapse::Armed { ticks_left: 60 });
        assert!(!p.touch());

        for _ in 0..59 {
            assert!(!p.advance());
            assert_eq!(p.rect.y, 500.0);
        }
        assert!(p.advance());
        assert_eq!(p.rect.y, 505.0);
        assert_eq!(p.collapse, Collapse::Dropped);

        // One-shot: no further drops and no re-arming
        assert!(!p.touch());
        for _ in 0..100 {
            p.advance();
        }
        assert_eq!(p.rect.y, 505.0);
    }

    #[test]
    fn test_solid_platform_never_arms() {
        let mut p = Platform {
            rect: Aabb::new(0.0, 0.0, 10.0, 10.0),
            vx: 2.0,
            collapse: Collapse::Solid,
        };
        assert!(!p.touch());
        p.advance();
        assert_eq!(p.rect.x, 2.0);
        assert_eq!(p.collapse, Collapse::Solid);
    }

    #[test]
    fn test_sprite_frame_toggles_at_midpoint() {
        let mut player = Player::default();
        player.frame = 29;
        assert_eq!(player.sprite_frame(), 0);
        player.frame = 30;
        assert_eq!(player.sprite_frame(), 1);
    }
}
