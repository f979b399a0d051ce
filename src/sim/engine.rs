//! The engine: owned simulation state behind a narrow interface
//!
//! Callers feed a paddle target and call `step()` once per frame; everything
//! else is read-only.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bricks::{Brick, BrickField};
use super::particles::{Particle, ParticleSystem};
use super::rng::RandomSource;
use super::state::{Ball, GameEvent, GamePhase, Paddle, Terminal, World};
use super::tick::tick;
use crate::config::{ConfigError, EngineConfig};

/// Owned copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: Vec<Brick>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub lives: u8,
    pub phase: GamePhase,
    pub last_terminal: Option<Terminal>,
}

/// Brick breaker simulation
#[derive(Debug)]
pub struct Engine<R = Pcg32> {
    config: EngineConfig,
    world: World,
    rng: R,
    frame: u64,
    events: Vec<GameEvent>,
    last_terminal: Option<Terminal>,
}

impl Engine<Pcg32> {
    /// Engine with a seeded PCG source; a seed and input sequence fully
    /// determine the run
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Engine<R> {
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::new(&config);
        log::info!(
            "Engine created: {}x{} field, {}x{} bricks, {} lives",
            config.play_width,
            config.play_height,
            config.brick_rows,
            config.brick_columns,
            config.initial_lives
        );
        Ok(Self {
            config,
            world,
            rng,
            frame: 0,
            events: Vec::new(),
            last_terminal: None,
        })
    }

    /// Advance the simulation by one frame
    ///
    /// Returns the terminal state reached during this frame. The world has
    /// already been reset when a terminal state is returned.
    pub fn step(&mut self) -> Option<Terminal> {
        self.events.clear();
        self.frame += 1;
        self.last_terminal = tick(&mut self.world, &self.config, &mut self.rng, &mut self.events);
        if self.last_terminal.is_some() {
            self.frame = 0;
        }
        self.last_terminal
    }

    /// Set the left edge the paddle eases toward
    pub fn set_paddle_target(&mut self, x: f32) {
        if x.is_finite() {
            self.world.paddle.target_x = x;
        }
    }

    /// Reinitialize to starting conditions
    pub fn reset(&mut self) {
        self.world.reset(&self.config);
        self.frame = 0;
        self.events.clear();
        self.last_terminal = None;
        log::info!("Engine reset");
    }

    pub fn ball(&self) -> &Ball {
        &self.world.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.world.paddle
    }

    pub fn bricks(&self) -> &BrickField {
        &self.world.bricks
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.world.particles
    }

    pub fn score(&self) -> u32 {
        self.world.game.score
    }

    pub fn lives(&self) -> u8 {
        self.world.game.lives
    }

    pub fn phase(&self) -> GamePhase {
        self.world.game.phase
    }

    /// Frames since the last reset
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Events raised by the most recent step
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Terminal state reached by the most recent step, if any
    pub fn last_terminal(&self) -> Option<Terminal> {
        self.last_terminal
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            ball: self.world.ball.clone(),
            paddle: self.world.paddle.clone(),
            bricks: self.world.bricks.as_slice().to_vec(),
            particles: self.world.particles.as_slice().to_vec(),
            score: self.world.game.score,
            lives: self.world.game.lives,
            phase: self.world.game.phase,
            last_terminal: self.last_terminal,
        }
    }
}
