//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one frame. There is no
//! delta-time scaling; the frame driver calls this once per display refresh.

use rand::Rng;

use super::effects::{EffectEvent, integrate_particles};
use super::state::{GamePhase, GameSession, InputState};
use crate::consts::*;

/// Advance the session by one tick
pub fn tick(session: &mut GameSession, input: &InputState) {
    if session.phase != GamePhase::Playing {
        return;
    }

    session.time_ticks += 1;

    step_player(session, input);
    step_platforms(session);
    step_enemies(session);

    // Goal and death checks only fire while still playing this tick
    if session.phase == GamePhase::Playing && session.player.bounds().overlaps(&session.goal) {
        session.complete_level();
    }
    if session.phase == GamePhase::Playing && session.player.pos.y > CANVAS_HEIGHT {
        session.lose_life();
    }

    integrate_particles(&mut session.particles);

    if session.shake > 0 {
        session.shake -= 1;
    }
}

/// Steering, jump, gravity and integration
fn step_player(session: &mut GameSession, input: &InputState) {
    let speed = session.physics.speed;
    let gravity = session.physics.gravity;
    let player = &mut session.player;

    if input.left {
        player.vel.x = -speed;
    } else if input.right {
        player.vel.x = speed;
    } else {
        player.vel.x *= FRICTION;
    }

    let jumped = input.jump && player.on_ground;
    if jumped {
        player.vel.y = JUMP_VELOCITY;
        player.on_ground = false;
    }
    let feet = player.feet();

    player.vel.y += gravity;
    player.pos += player.vel;
    player.frame = (player.frame + 1) % ANIMATION_PERIOD;

    if jumped {
        session.emit(EffectEvent::Jump { origin: feet });
    }
}

/// Move platforms and resolve top-side landings in collection order
fn step_platforms(session: &mut GameSession) {
    let was_resting = session.player.resting;
    let mut landed = false;

    for (i, platform) in session.platforms.iter_mut().enumerate() {
        if platform.advance() {
            log::debug!("Platform {} collapsed", i);
        }

        let player = &mut session.player;
        // Only downward movement lands; once landed, vy is zero so later
        // overlaps in the same tick are ignored.
        if player.vel.y > 0.0 && player.bounds().overlaps(&platform.rect) {
            player.pos.y = platform.rect.top() - PLAYER_SIZE;
            player.vel.y = 0.0;
            player.on_ground = true;
            landed = true;
            session.shake = LANDING_SHAKE;

            if platform.touch() {
                log::debug!("Platform {} armed", i);
            }
        }
    }

    // Shake pulses on every resolved landing; the event only on touchdown
    session.player.resting = landed;
    if landed && !was_resting {
        session.emit(EffectEvent::Land {
            origin: session.player.feet(),
        });
    }
}

/// Patrol enemies and test them against the player
fn step_enemies(session: &mut GameSession) {
    let player_box = session.player.bounds();
    let mut hit = false;

    for enemy in session.enemies.iter_mut() {
        enemy.pos += enemy.vel;
        if session.rng.random_bool(ENEMY_TURN_CHANCE) {
            enemy.vel.x = -enemy.vel.x;
        }
        hit |= enemy.bounds().overlaps(&player_box);
    }

    if hit {
        session.lose_life();
    }
}
