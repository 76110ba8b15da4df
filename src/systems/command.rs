//! Applies queued one-shot commands at the tick boundary.

use bevy_ecs::event::EventWriter;
use bevy_ecs::query::Without;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::info;

use crate::commands::{CommandQueue, GameCommand, InputIntent};
use crate::config::Config;
use crate::events::GameEvent;
use crate::map::builder::Maze;
use crate::systems::components::{Ghost, GhostState, PacMan};
use crate::systems::controller::{GameStage, IntroGate};

#[allow(clippy::too_many_arguments)]
pub fn command_system(
    mut queue: ResMut<CommandQueue>,
    mut intent: ResMut<InputIntent>,
    mut config: ResMut<Config>,
    mut intro_gate: ResMut<IntroGate>,
    stage: Res<GameStage>,
    mut maze: ResMut<Maze>,
    ghosts: Query<&Ghost, Without<PacMan>>,
    mut events: EventWriter<GameEvent>,
) {
    for command in queue.0.drain(..) {
        match command {
            GameCommand::SetDirection(dir) => {
                intent.0 = dir;
            }
            GameCommand::CompleteIntro => {
                intro_gate.0 = true;
            }
            GameCommand::ToggleMute => {
                config.muted = !config.muted;
                info!(muted = config.muted, "Sound toggled");
            }
            GameCommand::ToggleStateLogging => {
                config.log_state_machines = !config.log_state_machines;
                info!(enabled = config.log_state_machines, "State machine logging toggled");
            }
            GameCommand::SetFrequency(frequency) => {
                config.frequency = frequency.clamp(1, 240);
                info!(frequency = config.frequency, "Clock frequency set");
            }
            GameCommand::BumpFrequency(delta) => {
                let step = if config.frequency > 10 { 5 } else { 1 };
                let next = config.frequency as i32 + delta.signum() * step;
                config.frequency = next.clamp(1, 240) as u32;
                info!(frequency = config.frequency, "Clock frequency set");
            }
            GameCommand::ToggleOverflowFix => {
                config.fix_overflow_bug = !config.fix_overflow_bug;
                info!(fixed = config.fix_overflow_bug, "Overflow bug toggled");
            }
            GameCommand::ToggleFrightenedBehavior => {
                config.flee_randomly = !config.flee_randomly;
                info!(
                    behavior = if config.flee_randomly { "random" } else { "safe corner" },
                    "Frightened behavior changed"
                );
            }
            GameCommand::ToggleImmortal => {
                config.immortal_pacman = !config.immortal_pacman;
                info!(immortal = config.immortal_pacman, "Pac-Man immortality toggled");
            }
            GameCommand::KillAllGhosts => {
                for ghost in ghosts.iter() {
                    if ghost.state.is_hostile() || ghost.state == GhostState::Frightened {
                        events.write(GameEvent::GhostKilled { ghost: ghost.name });
                    }
                }
                info!("All ghosts killed");
            }
            GameCommand::EatAllPellets => {
                maze.remove_all_pellets();
                info!(remaining = maze.food_remaining(), "All pellets eaten");
                if maze.food_remaining() == 0 && stage.is_playing() {
                    events.write(GameEvent::LevelCompleted);
                }
            }
            GameCommand::NextLevel => {
                if stage.is_playing() {
                    events.write(GameEvent::LevelCompleted);
                }
            }
        }
    }
}
