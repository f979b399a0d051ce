//! Brickfall - a single-ball brick breaker simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: Engine configuration and validation

pub mod config;
pub mod sim;

pub use config::{ConfigError, EngineConfig};
pub use sim::{Engine, GameEvent, GamePhase, Terminal};

/// Fixed rules of the game that are not exposed as configuration
pub mod consts {
    /// Maximum paddle deflection angle (radians, ~66 degrees)
    pub const MAX_DEFLECTION: f32 = 1.15;
    /// Gap between the paddle's bottom edge and the bottom of the play field
    pub const PADDLE_FLOOR_GAP: f32 = 10.0;
    /// Extra depth of the paddle contact band below the paddle's bottom edge
    pub const PADDLE_CATCH_DEPTH: f32 = 10.0;
    /// How far below the play field the ball travels before it counts as a miss
    pub const MISS_MARGIN: f32 = 40.0;
    /// Serve height above the bottom of the play field
    pub const SERVE_HEIGHT: f32 = 80.0;

    /// Particle burst defaults
    pub const BURST_COUNT: usize = 14;
    pub const BURST_SPEED_MIN: f32 = 1.2;
    pub const BURST_SPEED_MAX: f32 = 4.4;
    pub const BURST_RADIUS_MIN: f32 = 1.2;
    pub const BURST_RADIUS_MAX: f32 = 3.4;
    pub const BURST_LIFE_MIN: u32 = 18;
    pub const BURST_LIFE_MAX: u32 = 32;
    /// Per-tick velocity damping applied to particles
    pub const PARTICLE_DAMPING: f32 = 0.98;
    /// Default particle cap
    pub const MAX_PARTICLES: usize = 512;

    pub const INITIAL_LIVES: u8 = 3;
    /// Largest brick grid a config may ask for
    pub const MAX_BRICKS: usize = 4096;
}
