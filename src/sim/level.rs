//! Level catalog
//!
//! Levels are authored as JSON and resolved once into immutable templates.
//! Runtime entities are cloned from these templates on every level load, so
//! nothing that happens during play can leak back into the catalog.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::error::GameError;

/// Built-in five level campaign
pub const BUILTIN_LEVELS: &str = include_str!("levels.json");

/// Horizontal platform velocity as authored
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum DriftDef {
    /// Constant velocity
    Fixed(f32),
    /// Sampled once from `[-random, random)` when the catalog is built
    Random { random: f32 },
}

impl DriftDef {
    fn resolve<R: Rng>(self, rng: &mut R) -> f32 {
        match self {
            DriftDef::Fixed(vx) => vx,
            DriftDef::Random { random } => {
                let span = random.abs();
                if span == 0.0 {
                    0.0
                } else {
                    rng.random_range(-span..span)
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlatformDef {
    #[serde(flatten)]
    rect: Aabb,
    #[serde(default)]
    vx: Option<DriftDef>,
    #[serde(default)]
    collapsing: bool,
}

#[derive(Debug, Deserialize)]
struct EnemyDef {
    x: f32,
    y: f32,
    vx: f32,
}

#[derive(Debug, Deserialize)]
struct LevelDef {
    name: String,
    platforms: Vec<PlatformDef>,
    #[serde(default)]
    enemies: Vec<EnemyDef>,
    goal: Aabb,
    gravity: f32,
    speed: f32,
}

/// Platform as placed in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformTemplate {
    pub rect: Aabb,
    /// Horizontal velocity (0 = static)
    pub vx: f32,
    /// Arms on first touch and drops after a delay
    pub collapsing: bool,
}

/// Enemy spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub pos: Vec2,
    pub vx: f32,
}

/// One immutable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub platforms: Vec<PlatformTemplate>,
    pub enemies: Vec<EnemyTemplate>,
    pub goal: Aabb,
    pub gravity: f32,
    /// Player horizontal speed while a direction is held
    pub speed: f32,
}

impl Level {
    fn resolve<R: Rng>(def: LevelDef, rng: &mut R) -> Self {
        let platforms = def
            .platforms
            .into_iter()
            .map(|p| PlatformTemplate {
                rect: p.rect,
                vx: p.vx.map(|d| d.resolve(rng)).unwrap_or(0.0),
                collapsing: p.collapsing,
            })
            .collect();
        let enemies = def
            .enemies
            .into_iter()
            .map(|e| EnemyTemplate {
                pos: Vec2::new(e.x, e.y),
                vx: e.vx,
            })
            .collect();

        Self {
            name: def.name,
            platforms,
            enemies,
            goal: def.goal,
            gravity: def.gravity,
            speed: def.speed,
        }
    }
}

/// Ordered, 1-indexed set of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Build the built-in campaign, sampling random drifts from `rng`
    pub fn builtin<R: Rng>(rng: &mut R) -> Result<Self, GameError> {
        Self::from_json(BUILTIN_LEVELS, rng)
    }

    /// Parse a JSON array of level definitions
    pub fn from_json<R: Rng>(json: &str, rng: &mut R) -> Result<Self, GameError> {
        let defs: Vec<LevelDef> = serde_json::from_str(json)?;
        let levels = defs.into_iter().map(|d| Level::resolve(d, rng)).collect();
        Ok(Self { levels })
    }

    /// Look up a level by 1-based index
    pub fn level(&self, index: usize) -> Result<&Level, GameError> {
        index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .ok_or(GameError::InvalidLevelIndex {
                index,
                count: self.levels.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
