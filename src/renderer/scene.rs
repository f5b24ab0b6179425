//! Scene assembly
//!
//! Turns a read-only session snapshot into canvas-space vertices. No GPU
//! access happens here.

use glam::Vec2;
use rand::Rng;

use super::shapes::{push_rect, quad};
use super::vertex::{Vertex, colors};
use crate::consts::{PLAYER_SIZE, SHAKE_JITTER};
use crate::sim::{Aabb, Collapse, GameSession, Player};

/// Particle quad edge length
const PARTICLE_SIZE: f32 = 2.0;
/// Player eye size and inset
const EYE_SIZE: f32 = 6.0;
const EYE_INSET: f32 = 8.0;

/// Random camera jitter while the shake timer runs
pub fn shake_offset<R: Rng>(shake: u32, enabled: bool, rng: &mut R) -> Vec2 {
    if shake == 0 || !enabled {
        return Vec2::ZERO;
    }
    Vec2::new(
        rng.random_range(-SHAKE_JITTER..SHAKE_JITTER),
        rng.random_range(-SHAKE_JITTER..SHAKE_JITTER),
    )
}

/// Build vertices in draw order: platforms, enemies, goal, player, particles
pub fn build_scene(session: &GameSession, offset: Vec2, draw_particles: bool) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        (session.platforms.len() + session.enemies.len() + session.particles.len() + 3) * 6,
    );

    for platform in &session.platforms {
        let color = match platform.collapse {
            Collapse::Armed { .. } => colors::PLATFORM_ARMED,
            _ => colors::PLATFORM,
        };
        push_rect(&mut out, &platform.rect, offset, color);
    }

    for enemy in &session.enemies {
        push_rect(&mut out, &enemy.bounds(), offset, colors::ENEMY);
    }

    push_rect(&mut out, &session.goal, offset, colors::GOAL);

    push_player(&mut out, &session.player, offset);

    if draw_particles {
        for p in &session.particles {
            out.extend(quad(p.pos + offset, Vec2::splat(PARTICLE_SIZE), colors::PARTICLE));
        }
    }

    out
}

/// Two-frame player sprite: body tint and eye position follow the frame
fn push_player(out: &mut Vec<Vertex>, player: &Player, offset: Vec2) {
    let frame = player.sprite_frame() as usize;
    push_rect(out, &player.bounds(), offset, colors::PLAYER[frame]);

    let facing = if player.vel.x < 0.0 {
        EYE_INSET
    } else {
        PLAYER_SIZE - EYE_INSET - EYE_SIZE
    };
    let bob = frame as f32;
    let eye = Aabb::new(
        player.pos.x + facing,
        player.pos.y + EYE_INSET + bob,
        EYE_SIZE,
        EYE_SIZE,
    );
    push_rect(out, &eye, offset, colors::PLAYER_EYE);
}
