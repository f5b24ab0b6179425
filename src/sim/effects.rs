//! Feedback effects
//!
//! Gameplay occurrences are recorded as `EffectEvent`s. The simulation turns
//! them into particles and shake; the presenter drains them afterwards and
//! plays the matching tone.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameSession, Particle};
use crate::consts::*;

/// A discrete gameplay occurrence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectEvent {
    Jump { origin: Vec2 },
    Land { origin: Vec2 },
    Death { origin: Vec2 },
    LevelComplete,
    GameOver { won: bool },
}

/// A short synthesized tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
}

const fn tone(frequency: f32, duration: f32) -> Tone {
    Tone {
        frequency,
        duration,
    }
}

impl Tone {
    /// Start and end gain of the exponential decay at `volume`. The end
    /// always sits below the start, since an exponential ramp cannot reach 0.
    pub fn envelope(volume: f32) -> (f32, f32) {
        let start = TONE_GAIN * volume;
        (start, TONE_RAMP_FLOOR.min(start * 0.1))
    }
}

/// Notes played for an event, `spacing` seconds apart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub notes: &'static [Tone],
    pub spacing: f32,
}

impl EffectEvent {
    /// Particles emitted at the event origin
    pub fn burst(&self) -> Option<(Vec2, usize)> {
        match *self {
            EffectEvent::Jump { origin } => Some((origin, JUMP_BURST)),
            EffectEvent::Death { origin } => Some((origin, DEATH_BURST)),
            _ => None,
        }
    }

    /// Shake pulse length, if any. Landing shake is applied per resolved
    /// landing by the platform step, not per event.
    pub fn shake(&self) -> Option<u32> {
        match self {
            EffectEvent::Death { .. } => Some(DEATH_SHAKE),
            _ => None,
        }
    }

    /// Audio cue for this event
    pub fn cue(&self) -> Cue {
        const JUMP: &[Tone] = &[tone(440.0, 0.1)];
        const LAND: &[Tone] = &[tone(110.0, 0.05)];
        const DEATH: &[Tone] = &[tone(220.0, 0.2)];
        const LEVEL_COMPLETE: &[Tone] = &[tone(523.0, 0.15), tone(659.0, 0.15), tone(784.0, 0.15)];
        const WON: &[Tone] = &[
            tone(523.0, 0.18),
            tone(659.0, 0.18),
            tone(784.0, 0.18),
            tone(1047.0, 0.18),
        ];
        const LOST: &[Tone] = &[
            tone(392.0, 0.3),
            tone(330.0, 0.3),
            tone(262.0, 0.3),
            tone(196.0, 0.3),
        ];

        let (notes, spacing) = match self {
            EffectEvent::Jump { .. } => (JUMP, 0.0),
            EffectEvent::Land { .. } => (LAND, 0.0),
            EffectEvent::Death { .. } => (DEATH, 0.0),
            EffectEvent::LevelComplete => (LEVEL_COMPLETE, 0.1),
            EffectEvent::GameOver { won: true } => (WON, 0.12),
            EffectEvent::GameOver { won: false } => (LOST, 0.2),
        };
        Cue { notes, spacing }
    }
}

/// Push `count` particles at `origin` with a small upward spray
pub fn emit_burst<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, origin: Vec2, count: usize) {
    particles.extend((0..count).map(|_| Particle {
        pos: origin,
        vel: Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPREAD_X..PARTICLE_MAX_SPREAD_X),
            -rng.random_range(0.0..PARTICLE_MAX_RISE),
        ),
        life: PARTICLE_LIFE,
    }));
}

/// Advance particles one tick and drop the expired ones (order preserving)
pub fn integrate_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

impl GameSession {
    /// Record an event and apply its in-simulation feedback
    pub(crate) fn emit(&mut self, event: EffectEvent) {
        if let Some((origin, count)) = event.burst() {
            emit_burst(&mut self.particles, &mut self.rng, origin, count);
        }
        if let Some(shake) = event.shake() {
            self.shake = shake;
        }
        self.events.push(event);
    }
}
