//! Game flow controller
//!
//! Phase transitions:
//! - `Menu` --start--> `Playing`
//! - `Playing` --goal--> `LevelComplete`
//! - `LevelComplete` --next_level--> `Playing`, or `GameOver(Won)` after the last level
//! - `Playing` --last life lost--> `GameOver(Lost)`
//! - `GameOver` --restart--> `Playing`

use serde::{Deserialize, Serialize};

use super::effects::EffectEvent;
use super::state::{GamePhase, GameSession, Outcome, RunState};
use crate::consts::GOAL_SCORE;
use crate::error::GameError;

/// Player-issued flow commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    NextLevel,
    Restart,
}

impl GameSession {
    /// Leave the menu and load level 1. Lives and score carry over.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.expect_phase(Command::Start, |p| p == GamePhase::Menu)?;
        self.run.level = 1;
        self.load_level()?;
        self.set_phase(GamePhase::Playing);
        Ok(())
    }

    /// Advance past a completed level, or end the run if it was the last one
    pub fn next_level(&mut self) -> Result<(), GameError> {
        self.expect_phase(Command::NextLevel, |p| p == GamePhase::LevelComplete)?;

        if self.run.level >= self.catalog().len() {
            self.set_phase(GamePhase::GameOver(Outcome::Won));
            self.events.push(EffectEvent::GameOver { won: true });
            return Ok(());
        }

        self.run.level += 1;
        self.load_level()?;
        self.set_phase(GamePhase::Playing);
        Ok(())
    }

    /// Begin a fresh run from level 1
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.expect_phase(Command::Restart, |p| matches!(p, GamePhase::GameOver(_)))?;
        self.run = RunState::default();
        self.load_level()?;
        self.set_phase(GamePhase::Playing);
        Ok(())
    }

    /// Award the goal and stop play
    pub(crate) fn complete_level(&mut self) {
        self.run.score += GOAL_SCORE;
        self.set_phase(GamePhase::LevelComplete);
        self.events.push(EffectEvent::LevelComplete);
    }

    /// Death from an enemy or falling off the world
    pub(crate) fn lose_life(&mut self) {
        self.run.lives = self.run.lives.saturating_sub(1);
        log::debug!("Life lost at {:?}, {} left", self.player.pos, self.run.lives);

        self.emit(EffectEvent::Death {
            origin: self.player.feet(),
        });

        if self.run.lives == 0 {
            self.set_phase(GamePhase::GameOver(Outcome::Lost));
            self.events.push(EffectEvent::GameOver { won: false });
        } else {
            self.player.respawn();
        }
    }

    fn expect_phase(
        &self,
        command: Command,
        allowed: impl Fn(GamePhase) -> bool,
    ) -> Result<(), GameError> {
        if allowed(self.phase) {
            Ok(())
        } else {
            log::warn!("Ignoring {:?} while {:?}", command, self.phase);
            Err(GameError::InvalidTransition {
                command,
                phase: self.phase,
            })
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Platform;
    use crate::sim::{InputState, tick};
    use glam::Vec2;

    fn playing() -> GameSession {
        let mut session = GameSession::new(11).unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn test_start_loads_level_one() {
        let session = playing();
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.run.level, 1);
        assert_eq!(session.platforms.len(), 3);
        assert_eq!(session.player.pos, Vec2::new(50.0, 400.0));
    }

    #[test]
    fn test_start_keeps_lives_and_score() {
        let mut session = GameSession::new(11).unwrap();
        session.run.lives = 2;
        session.run.score = 300;
        session.start().unwrap();
        assert_eq!(session.run.lives, 2);
        assert_eq!(session.run.score, 300);
    }

    #[test]
    fn test_commands_rejected_in_wrong_phase() {
        let mut session = GameSession::new(11).unwrap();
        assert!(matches!(
            session.next_level(),
            Err(GameError::InvalidTransition {
                command: Command::NextLevel,
                phase: GamePhase::Menu
            })
        ));
        assert!(session.restart().is_err());

        session.start().unwrap();
        assert!(session.start().is_err());
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_next_level_advances_and_keeps_run() {
        let mut session = playing();
        session.complete_level();
        assert_eq!(session.phase, GamePhase::LevelComplete);
        assert_eq!(session.run.score, 100);

        session.player.pos = Vec2::new(700.0, 200.0);
        session.next_level().unwrap();
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.run.level, 2);
        assert_eq!(session.run.score, 100);
        assert_eq!(session.run.lives, 3);
        assert_eq!(session.player.pos, Vec2::new(50.0, 400.0));
        assert_eq!(session.physics.speed, 6.0);
    }

    #[test]
    fn test_last_level_wins() {
        let mut session = playing();
        session.run.level = 5;
        session.load_level().unwrap();
        session.complete_level();
        session.next_level().unwrap();

        assert_eq!(session.phase, GamePhase::GameOver(Outcome::Won));
        assert_eq!(session.run.level, 5);
        assert!(
            session
                .drain_events()
                .contains(&EffectEvent::GameOver { won: true })
        );
    }

    #[test]
    fn test_lose_life_respawns() {
        let mut session = playing();
        session.player.pos = Vec2::new(300.0, 100.0);
        session.player.vel = Vec2::new(5.0, 3.0);
        session.lose_life();
        assert_eq!(session.run.lives, 2);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.player.pos, Vec2::new(50.0, 400.0));
        assert_eq!(session.player.vel, Vec2::ZERO);
        assert_eq!(session.particles.len(), crate::consts::DEATH_BURST);
    }

    #[test]
    fn test_last_life_ends_run_without_respawn() {
        let mut session = playing();
        session.run.lives = 1;
        session.player.pos = Vec2::new(300.0, 100.0);
        session.lose_life();
        assert_eq!(session.run.lives, 0);
        assert_eq!(session.phase, GamePhase::GameOver(Outcome::Lost));
        assert_eq!(session.player.pos, Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_restart_resets_run_and_template() {
        let mut session = playing();
        session.run.level = 3;
        session.load_level().unwrap();
        session.run.score = 500;
        session.platforms[0].rect.x = 123.0;
        session.run.lives = 1;
        session.lose_life();
        assert!(matches!(session.phase, GamePhase::GameOver(Outcome::Lost)));

        session.restart().unwrap();
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.run, RunState::default());
        assert_eq!(session.run.score, 0);
        assert_eq!(session.platforms[0].rect.x, 0.0);
        assert_eq!(session.platforms, {
            let level = session.catalog().level(1).unwrap();
            level.platforms.iter().map(Platform::from).collect::<Vec<_>>()
        });
    }

    #[test]
    fn test_restart_after_win() {
        let mut session = playing();
        session.run.level = 5;
        session.complete_level();
        session.next_level().unwrap();
        session.restart().unwrap();
        assert_eq!(session.run.level, 1);
        assert_eq!(session.run.score, 0);
    }

    #[test]
    fn test_ticks_ignored_outside_playing() {
        let mut session = GameSession::new(11).unwrap();
        let before = session.player.pos;
        tick(&mut session, &InputState { right: true, ..Default::default() });
        assert_eq!(session.player.pos, before);
        assert_eq!(session.time_ticks, 0);
    }
}
