//! Collision detection and response
//!
//! At most one paddle or brick contact is resolved per step. The checks run
//! in a fixed order: side walls, top wall, paddle, bottom miss, then bricks
//! (bricks only after the ball position has been committed).

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{GameEvent, Paddle, World};
use crate::config::EngineConfig;
use crate::consts::{MAX_DEFLECTION, MISS_MARGIN, PADDLE_CATCH_DEPTH};

/// What the pre-commit checks decided for this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Commit the candidate position and scan the bricks
    Clear,
    /// Ball came off the paddle; commit the candidate position, skip the bricks
    PaddleBounce { hit: f32 },
    /// Ball fell out of the play field; the step ends here
    Missed,
}

/// Which walls the ball bounced off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub side: bool,
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Reflect off the side and top walls
///
/// Each axis is corrected at most once: the offending velocity component is
/// negated and the candidate position recomputed from `pos`. There is no
/// bottom wall.
pub fn bounce_walls(
    pos: Vec2,
    vel: &mut Vec2,
    next: &mut Vec2,
    radius: f32,
    play_width: f32,
) -> WallContact {
    let mut contact = WallContact::default();

    if next.x < radius || next.x > play_width - radius {
        vel.x = -vel.x;
        next.x = pos.x + vel.x;
        contact.side = true;
    }
    if next.y < radius {
        vel.y = -vel.y;
        next.y = pos.y + vel.y;
        contact.top = true;
    }

    contact
}

/// Normalized paddle contact offset in [-1, 1], or `None` if the ball misses
///
/// The ball must be moving down, its bottom edge inside the band from the
/// paddle top to `PADDLE_CATCH_DEPTH` below the paddle, and its center over
/// the paddle.
pub fn paddle_hit_offset(
    next: Vec2,
    vel: Vec2,
    radius: f32,
    paddle: &Paddle,
    paddle_top: f32,
) -> Option<f32> {
    let paddle_bottom = paddle_top + paddle.height + PADDLE_CATCH_DEPTH;
    let ball_bottom = next.y + radius;

    let in_band = ball_bottom >= paddle_top && ball_bottom <= paddle_bottom;
    let over_paddle = next.x >= paddle.x && next.x <= paddle.right();

    if in_band && over_paddle && vel.y > 0.0 {
        let half = paddle.width / 2.0;
        Some(((next.x - paddle.center_x()) / half).clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// New velocity after a paddle bounce
///
/// The angle from vertical scales linearly with the hit offset up to
/// `MAX_DEFLECTION`. Speed is kept and the ball always leaves upward.
pub fn paddle_deflection(vel: Vec2, hit: f32) -> Vec2 {
    let angle = hit * MAX_DEFLECTION;
    let speed = vel.length();
    Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs())
}

/// True once the ball has dropped far enough below the field to count as lost
#[inline]
pub fn is_miss(next_y: f32, play_height: f32) -> bool {
    next_y > play_height + MISS_MARGIN
}

/// Walls, paddle and miss checks against the candidate position `next`
///
/// May change the ball velocity and `next`, and spawns a burst on paddle
/// contact. Does not move the ball.
pub fn resolve<R: RandomSource + ?Sized>(
    world: &mut World,
    config: &EngineConfig,
    next: &mut Vec2,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Resolution {
    let ball = &mut world.ball;

    let walls = bounce_walls(ball.pos, &mut ball.vel, next, ball.radius, config.play_width);
    if walls.any() {
        events.push(GameEvent::WallBounce);
    }

    let paddle_top = config.paddle_top();
    if let Some(hit) = paddle_hit_offset(*next, ball.vel, ball.radius, &world.paddle, paddle_top) {
        ball.vel = paddle_deflection(ball.vel, hit);
        world
            .particles
            .spawn_burst(Vec2::new(next.x, paddle_top), config.burst_count, rng);
        events.push(GameEvent::PaddleHit { hit });
        return Resolution::PaddleBounce { hit };
    }

    if is_miss(next.y, config.play_height) {
        return Resolution::Missed;
    }

    Resolution::Clear
}

/// Break the first brick the ball overlaps at its current position
///
/// Scans row-major and stops at the first hit, so at most one brick dies per
/// step. The bounce is always vertical.
pub fn resolve_bricks<R: RandomSource + ?Sized>(
    world: &mut World,
    config: &EngineConfig,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<(usize, usize)> {
    let ball = &mut world.ball;
    let (row, col) = world.bricks.first_overlapping(ball.pos, ball.radius)?;

    if world.bricks.kill_at(row, col) {
        world.game.on_brick_destroyed();
    }
    ball.vel.y = -ball.vel.y;
    world
        .particles
        .spawn_burst(ball.pos, config.burst_count, rng);
    events.push(GameEvent::BrickDestroyed { row, col });

    Some((row, col))
}
