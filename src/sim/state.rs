//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bricks::{BrickField, BrickLayout};
use super::particles::ParticleSystem;
use crate::config::EngineConfig;
use crate::consts::SERVE_HEIGHT;

/// Current phase of the game
///
/// `Won` and `Lost` only exist for the instant between the terminal event and
/// the reset that follows it inside the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Won,
    Lost,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    Won,
    Lost,
}

/// Things that happened during a step, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    /// Normalized contact offset from paddle center, in [-1, 1]
    PaddleHit { hit: f32 },
    BrickDestroyed { row: usize, col: usize },
    BallLost { lives_left: u8 },
    Won { score: u32 },
    Lost { score: u32 },
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(config: &EngineConfig) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: config.ball_radius,
        };
        ball.serve(config);
        ball
    }

    /// Put the ball back at the serve point with the initial velocity
    pub fn serve(&mut self, config: &EngineConfig) {
        self.pos = serve_position(config);
        self.vel = Vec2::new(config.initial_dx, config.initial_dy);
    }
}

/// Where the ball is (re)served from
pub fn serve_position(config: &EngineConfig) -> Vec2 {
    Vec2::new(config.play_width / 2.0, config.play_height - SERVE_HEIGHT)
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Current left edge
    pub x: f32,
    /// Left edge the paddle is easing toward
    pub target_x: f32,
    pub width: f32,
    pub height: f32,
    pub ease: f32,
}

impl Paddle {
    /// Centered paddle at rest
    pub fn new(config: &EngineConfig) -> Self {
        let x = (config.play_width - config.paddle_width) / 2.0;
        Self {
            x,
            target_x: x,
            width: config.paddle_width,
            height: config.paddle_height,
            ease: config.paddle_ease,
        }
    }

    /// Close `ease` of the distance to the target, then clamp into `[0, max_x]`
    pub fn ease_toward_target(&mut self, max_x: f32) {
        self.x += (self.target_x - self.x) * self.ease;
        self.x = self.x.clamp(0.0, max_x.max(0.0));
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Score, lives and phase
///
/// The rest of the simulation only touches this through the event methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub lives: u8,
    pub phase: GamePhase,
    initial_lives: u8,
}

impl GameState {
    pub fn new(initial_lives: u8) -> Self {
        Self {
            score: 0,
            lives: initial_lives,
            phase: GamePhase::Playing,
            initial_lives,
        }
    }

    pub fn on_brick_destroyed(&mut self) {
        self.score += 1;
    }

    /// Take a life. Returns `Terminal::Lost` when none are left.
    pub fn on_ball_missed(&mut self) -> Option<Terminal> {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::Lost;
            Some(Terminal::Lost)
        } else {
            None
        }
    }

    pub fn on_field_cleared(&mut self) -> Terminal {
        self.phase = GamePhase::Won;
        Terminal::Won
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.initial_lives;
        self.phase = GamePhase::Playing;
    }
}

/// Everything the step mutates
#[derive(Debug, Clone)]
pub struct World {
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickField,
    pub particles: ParticleSystem,
    pub game: GameState,
}

impl World {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            ball: Ball::new(config),
            paddle: Paddle::new(config),
            bricks: BrickField::new(BrickLayout::from_config(config)),
            particles: ParticleSystem::new(config.max_particles),
            game: GameState::new(config.initial_lives),
        }
    }

    /// Back to starting conditions, reusing the existing allocations
    pub fn reset(&mut self, config: &EngineConfig) {
        self.ball.serve(config);
        self.paddle = Paddle::new(config);
        self.bricks.reset();
        self.particles.clear();
        self.game.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_serves_from_bottom_center() {
        let config = EngineConfig::default();
        let ball = Ball::new(&config);
        assert_eq!(ball.pos, Vec2::new(410.0, 520.0));
        assert_eq!(ball.vel, Vec2::new(3.2, -3.2));
        assert_eq!(ball.radius, 10.0);
    }

    #[test]
    fn test_paddle_eases_toward_target() {
        let config = EngineConfig::default();
        let mut paddle = Paddle::new(&config);
        assert_eq!(paddle.x, 355.0);

        paddle.target_x = 455.0;
        paddle.ease_toward_target(config.paddle_max_x());
        assert!((paddle.x - 373.0).abs() < 1e-4);

        // Converges without overshooting
        for _ in 0..200 {
            paddle.ease_toward_target(config.paddle_max_x());
            assert!(paddle.x <= 455.0);
        }
        assert!((paddle.x - 455.0).abs() < 1e-3);
    }

    #[test]
    fn test_paddle_is_clamped_to_play_field() {
        let config = EngineConfig::default();
        let mut paddle = Paddle::new(&config);

        paddle.target_x = -5000.0;
        for _ in 0..50 {
            paddle.ease_toward_target(config.paddle_max_x());
            assert!(paddle.x >= 0.0);
        }
        assert_eq!(paddle.x, 0.0);

        paddle.target_x = 5000.0;
        for _ in 0..50 {
            paddle.ease_toward_target(config.paddle_max_x());
            assert!(paddle.x <= config.paddle_max_x());
        }
        assert_eq!(paddle.x, config.paddle_max_x());
    }

    #[test]
    fn test_full_ease_snaps_to_target() {
        let config = EngineConfig {
            paddle_ease: 1.0,
            ..Default::default()
        };
        let mut paddle = Paddle::new(&config);
        paddle.target_x = 100.0;
        paddle.ease_toward_target(config.paddle_max_x());
        assert_eq!(paddle.x, 100.0);
    }

    #[test]
    fn test_game_state_life_loss() {
        let mut game = GameState::new(2);
        assert_eq!(game.on_ball_missed(), None);
        assert_eq!(game.lives, 1);
        assert_eq!(game.phase, GamePhase::Playing);

        assert_eq!(game.on_ball_missed(), Some(Terminal::Lost));
        assert_eq!(game.lives, 0);
        assert_eq!(game.phase, GamePhase::Lost);

        game.reset();
        assert_eq!(game.lives, 2);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_state_win_and_reset() {
        let mut game = GameState::new(3);
        game.on_brick_destroyed();
        game.on_brick_destroyed();
        assert_eq!(game.score, 2);
        assert_eq!(game.on_field_cleared(), Terminal::Won);
        assert_eq!(game.phase, GamePhase::Won);

        game.reset();
        assert_eq!(game.score, 0);
        assert_eq!(game.lives, 3);
        assert_eq!(game.phase, GamePhase::Playing);
    }
}
