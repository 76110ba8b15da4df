//! Headless runner: drives the simulation at the configured tick rate and
//! logs a periodic status line. Rendering, audio and input adapters attach
//! through the snapshot and command interfaces instead of this binary.

use std::time::{Duration, Instant};

use anyhow::Context;
use thousands::Separable;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use pacman_core::config::Config;
use pacman_core::game::Game;
use pacman_core::snapshot::AudioCue;
use pacman_core::systems::controller::GameStage;

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Could not set global tracing subscriber")?;

    let seed = std::env::var("PACMAN_SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);

    let config = Config {
        skip_intro: true,
        seed,
        ..Config::default()
    };
    let mut game = Game::new(config).context("Could not build the simulation")?;

    info!(seed, "Simulation starting");

    let mut last_report = Instant::now();
    loop {
        let tick_start = Instant::now();
        let snapshot = game.tick();

        for cue in &snapshot.cues {
            if *cue == AudioCue::ExtraLife {
                info!(score = %snapshot.score.separate_with_commas(), "Extra life!");
            }
        }

        if last_report.elapsed() >= Duration::from_secs(1) {
            last_report = Instant::now();
            info!(
                tick = snapshot.tick,
                stage = ?snapshot.stage,
                score = %snapshot.score.separate_with_commas(),
                lives = snapshot.lives,
                food = snapshot.food_remaining,
                "status"
            );
        }

        if matches!(snapshot.stage, GameStage::GameOver { .. }) {
            info!(
                score = %snapshot.score.separate_with_commas(),
                hiscore = %snapshot.hiscore.points.separate_with_commas(),
                level = snapshot.level,
                "Game over"
            );
            return Ok(());
        }

        let loop_time = Duration::from_nanos(1_000_000_000 / game.frequency() as u64);
        let elapsed = tick_start.elapsed();
        if elapsed < loop_time {
            spin_sleep::sleep(loop_time - elapsed);
        }
    }
}
