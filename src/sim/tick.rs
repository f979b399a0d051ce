//! One simulation step
//!
//! Order matters: the paddle moves before any collision test reads it.

use super::collision::{self, Resolution};
use super::rng::RandomSource;
use super::state::{GameEvent, Terminal, World};
use crate::config::EngineConfig;

/// Advance the world by one frame
///
/// Returns the terminal state reached during this step, if any. A terminal
/// step has already reset the world to starting conditions when it returns.
pub fn tick<R: RandomSource + ?Sized>(
    world: &mut World,
    config: &EngineConfig,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<Terminal> {
    world.paddle.ease_toward_target(config.paddle_max_x());

    let mut next = world.ball.pos + world.ball.vel;

    match collision::resolve(world, config, &mut next, rng, events) {
        Resolution::Missed => return on_miss(world, config, events),
        Resolution::PaddleBounce { .. } => {
            world.ball.pos = next;
        }
        Resolution::Clear => {
            world.ball.pos = next;
            if collision::resolve_bricks(world, config, rng, events).is_some()
                && world.bricks.remaining_count() == 0
            {
                let terminal = world.game.on_field_cleared();
                let score = world.game.score;
                events.push(GameEvent::Won { score });
                log::info!("All bricks cleared with score {}", score);
                world.reset(config);
                return Some(terminal);
            }
        }
    }

    world.particles.advance();
    None
}

/// Life loss: re-serve, or end the game when no lives are left
fn on_miss(
    world: &mut World,
    config: &EngineConfig,
    events: &mut Vec<GameEvent>,
) -> Option<Terminal> {
    let terminal = world.game.on_ball_missed();
    let lives_left = world.game.lives;
    events.push(GameEvent::BallLost { lives_left });

    match terminal {
        Some(terminal) => {
            let score = world.game.score;
            events.push(GameEvent::Lost { score });
            log::info!("Out of lives with score {}", score);
            world.reset(config);
            Some(terminal)
        }
        None => {
            log::debug!("Ball lost, {} lives left", lives_left);
            world.ball.serve(config);
            None
        }
    }
}
