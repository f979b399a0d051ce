//! Engine configuration
//!
//! Every field has a default, so a JSON document only needs to name the
//! values it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BURST_COUNT, INITIAL_LIVES, MAX_BRICKS, MAX_PARTICLES, SERVE_HEIGHT};

/// Reasons a configuration is rejected at engine construction
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("brick grid must have at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },

    #[error("brick grid {rows}x{columns} exceeds the {max} brick limit")]
    GridTooLarge { rows: usize, columns: usize, max: usize },

    #[error("ball diameter {diameter} does not fit in play field width {play}")]
    BallTooWide { diameter: f32, play: f32 },

    #[error("serve height {serve_y} leaves no room for a ball of radius {radius} in play field height {play}")]
    ServeOutOfField { serve_y: f32, radius: f32, play: f32 },

    #[error("paddle_ease must be in (0, 1], got {0}")]
    EaseOutOfRange(f32),

    #[error("initial velocity must be non-zero")]
    ZeroVelocity,

    #[error("initial_lives must be at least 1")]
    NoLives,

    #[error("paddle width {paddle} does not fit in play field width {play}")]
    PaddleTooWide { paddle: f32, play: f32 },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Play field ===
    pub play_width: f32,
    pub play_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub initial_dx: f32,
    pub initial_dy: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Fraction of the remaining distance to the target closed per step
    pub paddle_ease: f32,

    // === Bricks ===
    pub brick_columns: usize,
    pub brick_rows: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_x: f32,
    pub brick_offset_y: f32,

    // === Rules ===
    pub initial_lives: u8,

    // === Effects ===
    /// Particles spawned per collision burst
    pub burst_count: usize,
    /// Particle cap (0 disables effects)
    pub max_particles: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            play_width: 820.0,
            play_height: 600.0,

            ball_radius: 10.0,
            initial_dx: 3.2,
            initial_dy: -3.2,

            paddle_width: 110.0,
            paddle_height: 12.0,
            paddle_ease: 0.18,

            brick_columns: 9,
            brick_rows: 5,
            brick_width: 72.0,
            brick_height: 22.0,
            brick_padding: 10.0,
            brick_offset_x: 46.0,
            brick_offset_y: 56.0,

            initial_lives: INITIAL_LIVES,

            burst_count: BURST_COUNT,
            max_particles: MAX_PARTICLES,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes usable geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("play_width", self.play_width),
            ("play_height", self.play_height),
            ("ball_radius", self.ball_radius),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let finite = [
            ("brick_padding", self.brick_padding),
            ("brick_offset_x", self.brick_offset_x),
            ("brick_offset_y", self.brick_offset_y),
            ("initial_dx", self.initial_dx),
            ("initial_dy", self.initial_dy),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.brick_padding < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "brick_padding",
                value: self.brick_padding,
            });
        }

        if self.brick_rows == 0 || self.brick_columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.brick_rows,
                columns: self.brick_columns,
            });
        }
        match self.brick_rows.checked_mul(self.brick_columns) {
            Some(count) if count <= MAX_BRICKS => {}
            _ => {
                return Err(ConfigError::GridTooLarge {
                    rows: self.brick_rows,
                    columns: self.brick_columns,
                    max: MAX_BRICKS,
                });
            }
        }

        let diameter = 2.0 * self.ball_radius;
        if diameter > self.play_width {
            return Err(ConfigError::BallTooWide {
                diameter,
                play: self.play_width,
            });
        }
        let serve_y = self.play_height - SERVE_HEIGHT;
        if serve_y < self.ball_radius || serve_y > self.play_height - self.ball_radius {
            return Err(ConfigError::ServeOutOfField {
                serve_y,
                radius: self.ball_radius,
                play: self.play_height,
            });
        }

        if !(self.paddle_ease > 0.0 && self.paddle_ease <= 1.0) {
            return Err(ConfigError::EaseOutOfRange(self.paddle_ease));
        }
        if self.initial_dx == 0.0 && self.initial_dy == 0.0 {
            return Err(ConfigError::ZeroVelocity);
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.paddle_width > self.play_width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_width,
                play: self.play_width,
            });
        }

        // Oversized grids are playable (the off-field bricks are just unreachable)
        let (grid_right, grid_bottom) = self.brick_grid_extent();
        if grid_right > self.play_width || grid_bottom > self.play_height {
            log::warn!(
                "Brick grid extends to ({}, {}) beyond play field {}x{}",
                grid_right,
                grid_bottom,
                self.play_width,
                self.play_height
            );
        }

        Ok(())
    }

    /// Total number of bricks in the layout (saturates on unvalidated grids)
    pub fn brick_count(&self) -> usize {
        self.brick_rows.saturating_mul(self.brick_columns)
    }

    /// Bottom-right corner of the brick grid
    pub fn brick_grid_extent(&self) -> (f32, f32) {
        let right = self.brick_offset_x
            + self.brick_columns as f32 * (self.brick_width + self.brick_padding)
            - self.brick_padding;
        let bottom = self.brick_offset_y
            + self.brick_rows as f32 * (self.brick_height + self.brick_padding)
            - self.brick_padding;
        (right, bottom)
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.play_height - self.paddle_height - crate::consts::PADDLE_FLOOR_GAP
    }

    /// Rightmost valid paddle left edge
    pub fn paddle_max_x(&self) -> f32 {
        self.play_width - self.paddle_width
    }
}
