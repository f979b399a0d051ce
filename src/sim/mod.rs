//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Injected RNG only
//! - Stable iteration order (bricks row-major)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod engine;
pub mod geometry;
pub mod particles;
pub mod rng;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickField, BrickLayout};
pub use collision::{Resolution, WallContact, bounce_walls, paddle_deflection, paddle_hit_offset};
pub use engine::{Engine, Snapshot};
pub use geometry::{Rect, boxes_overlap};
pub use particles::{Particle, ParticleSystem};
pub use rng::{FixedSequence, RandomSource};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Terminal, World};
pub use tick::tick;
