//! Brickfall headless runner
//!
//! Drives the engine with an autopilot paddle and logs what happens. Useful
//! for soak-testing a config or reproducing a seed.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use brickfall::sim::Engine;
use brickfall::{EngineConfig, GameEvent};

#[derive(Parser, Debug)]
#[command(about = "Run the brick breaker simulation headless", version)]
struct Args {
    /// RNG seed for particle effects
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 36_000)]
    frames: u64,
    /// JSON config overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final world snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let mut engine = Engine::with_seed(config, args.seed)?;
    log::info!("Running {} frames with seed {}", args.frames, args.seed);

    let mut wins = 0u32;
    let mut losses = 0u32;
    let mut best_score = 0u32;

    for frame in 0..args.frames {
        // Sweep the contact point across the paddle so the ball keeps changing angle
        let sweep = ((frame / 120) % 9) as f32 / 8.0 - 0.5;
        let paddle = engine.paddle();
        let target = engine.ball().pos.x - paddle.width / 2.0 - sweep * paddle.width * 0.8;
        engine.set_paddle_target(target);

        engine.step();
        best_score = best_score.max(engine.score());

        for event in engine.events() {
            match event {
                GameEvent::Won { score } => {
                    wins += 1;
                    best_score = best_score.max(*score);
                    log::info!("Frame {}: won with score {}", frame, score);
                }
                GameEvent::Lost { score } => {
                    losses += 1;
                    best_score = best_score.max(*score);
                    log::info!("Frame {}: lost with score {}", frame, score);
                }
                GameEvent::BallLost { lives_left } => {
                    log::debug!("Frame {}: ball lost, {} lives left", frame, lives_left);
                }
                GameEvent::BrickDestroyed { row, col } => {
                    log::trace!("Frame {}: brick ({}, {}) destroyed", frame, row, col);
                }
                GameEvent::PaddleHit { .. } | GameEvent::WallBounce => {}
            }
        }
    }

    println!(
        "frames={} wins={} losses={} best_score={} score={} lives={} bricks_left={}",
        args.frames,
        wins,
        losses,
        best_score,
        engine.score(),
        engine.lives(),
        engine.bricks().remaining_count()
    );

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }

    Ok(())
}
