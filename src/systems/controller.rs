//! The top-level game state machine.
//!
//! Sequences intro, ready countdowns, play, level changes, deaths and game
//! over. Timer-driven transitions live here; event-driven ones (ghost kills,
//! Pac-Man's death, level completion) are applied by the scoring drain when
//! it processes the corresponding events.

use bevy_ecs::query::Without;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::sec;
use crate::level::level_params;
use crate::map::builder::Maze;
use crate::snapshot::{AudioCue, CueBuffer};
use crate::systems::attack::AttackWave;
use crate::systems::bonus::Bonus;
use crate::systems::components::{GameData, Ghost, GhostName, GhostState, PacMan, PacManState};
use crate::systems::house::Doorman;
use crate::systems::movement::Actor;

/// The top-level game stage. Stages with a timer count down once per tick
/// and transition at zero.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStage {
    /// Waiting for the intro cinematic (a view concern) to finish.
    Intro,
    /// "Ready!" shown, actors parked.
    GettingReady { remaining: u32 },
    /// Short beat before control is handed to the player.
    StartPlaying { remaining: u32 },
    /// The main loop: everything updates.
    Playing,
    /// Maze flash and level switch; constants swap at the two-second mark.
    ChangingLevel { remaining: u32 },
    /// Brief freeze while a ghost's score is displayed.
    GhostDying { remaining: u32 },
    /// Death sequence; lives were already adjusted on entry.
    PacDying { remaining: u32, total: u32 },
    /// Sixty seconds of game-over text, then back to the intro.
    GameOver { remaining: u32 },
}

impl GameStage {
    pub const fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }
}

/// Set by the `CompleteIntro` command; consumed when the intro stage exits.
#[derive(Resource, Debug, Default)]
pub struct IntroGate(pub bool);

/// Duration of the level-change flash sequence for a level.
pub fn changing_level_ticks(level: u32) -> u32 {
    sec(2.0 + 0.4 * level_params(level).maze_flashes as f32)
}

/// Re-seats every actor for a (re)started round.
///
/// Pac-Man returns to his seat in bed; ghosts return to their beds, locked.
/// The doorman re-releases Blinky on the next playing tick. Dot counters are
/// only cleared when a new level begins, never after a death.
pub fn reset_actors(
    pacman: &mut Query<(&mut PacMan, &mut Actor)>,
    ghosts: &mut Query<(&mut Ghost, &mut Actor), Without<PacMan>>,
    maze: &Maze,
    wave: &AttackWave,
    reset_dot_counters: bool,
) {
    if let Ok((mut pac, mut actor)) = pacman.single_mut() {
        actor.park_on(&maze.pacman_seat);
        actor.visible = true;
        actor.enabled = true;
        pac.state = PacManState::InBed;
        pac.power = 0;
        pac.digestion = 0;
    }
    for (mut ghost, mut actor) in ghosts.iter_mut() {
        let bed = match ghost.name {
            GhostName::Blinky => &maze.house.entry,
            GhostName::Pinky => &maze.house.pinky_bed,
            GhostName::Inky => &maze.house.inky_bed,
            GhostName::Clyde => &maze.house.clyde_bed,
        };
        actor.park_on(bed);
        actor.visible = true;
        actor.enabled = true;
        ghost.enter_state(GhostState::Locked);
        ghost.released = false;
        ghost.next_state = wave.regime();
        ghost.target = None;
        if reset_dot_counters {
            ghost.dot_counter = 0;
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn controller_system(
    config: Res<Config>,
    mut stage: ResMut<GameStage>,
    mut intro_gate: ResMut<IntroGate>,
    mut data: ResMut<GameData>,
    mut maze: ResMut<Maze>,
    mut wave: ResMut<AttackWave>,
    mut doorman: ResMut<Doorman>,
    mut bonus: ResMut<Bonus>,
    mut cues: ResMut<CueBuffer>,
    mut pacman: Query<(&mut PacMan, &mut Actor)>,
    mut ghosts: Query<(&mut Ghost, &mut Actor), Without<PacMan>>,
) {
    data.tick += 1;

    let next = match *stage {
        GameStage::Intro => {
            if config.skip_intro || intro_gate.0 {
                intro_gate.0 = false;
                cues.push(AudioCue::IntroComplete);

                // Fresh game: bookkeeping, food, timers, actors.
                data.start();
                maze.reset_food();
                wave.init(data.level);
                doorman.reset(data.level);
                bonus.clear();
                reset_actors(&mut pacman, &mut ghosts, &maze, &wave, true);
                info!("Game started");
                Some(GameStage::GettingReady { remaining: sec(5.0) })
            } else {
                None
            }
        }
        GameStage::GettingReady { remaining } => {
            if remaining > 1 {
                Some(GameStage::GettingReady { remaining: remaining - 1 })
            } else {
                wave.init(data.level);
                Some(GameStage::StartPlaying { remaining: sec(1.7) })
            }
        }
        GameStage::StartPlaying { remaining } => {
            if remaining > 1 {
                Some(GameStage::StartPlaying { remaining: remaining - 1 })
            } else {
                // Hand over control: Pac-Man wakes up.
                if let Ok((mut pac, _)) = pacman.single_mut() {
                    pac.state = PacManState::Awake;
                }
                Some(GameStage::Playing)
            }
        }
        GameStage::Playing => None,
        GameStage::ChangingLevel { remaining } => {
            if remaining == sec(2.0) {
                // Flashing done: swap in the next level while the screen
                // still sits on the bare maze.
                data.level += 1;
                data.ghosts_killed_by_energizer = 0;
                info!(level = data.level, "Level advanced");
                maze.reset_food();
                wave.init(data.level);
                doorman.reset(data.level);
                bonus.clear();
                reset_actors(&mut pacman, &mut ghosts, &maze, &wave, true);
            }
            if remaining > 1 {
                Some(GameStage::ChangingLevel { remaining: remaining - 1 })
            } else {
                if let Ok((mut pac, _)) = pacman.single_mut() {
                    pac.state = PacManState::Awake;
                }
                Some(GameStage::Playing)
            }
        }
        GameStage::GhostDying { remaining } => {
            if remaining > 1 {
                Some(GameStage::GhostDying { remaining: remaining - 1 })
            } else {
                if let Ok((_, mut actor)) = pacman.single_mut() {
                    actor.visible = true;
                }
                Some(GameStage::Playing)
            }
        }
        GameStage::PacDying { remaining, total } => {
            let consumed = total - remaining;
            if consumed == sec(1.0) {
                for (_, mut actor) in ghosts.iter_mut() {
                    actor.visible = false;
                }
            }
            if remaining > 1 {
                Some(GameStage::PacDying {
                    remaining: remaining - 1,
                    total,
                })
            } else if data.lives == 0 {
                info!(score = data.score, "Game is over");
                Some(GameStage::GameOver { remaining: sec(60.0) })
            } else {
                reset_actors(&mut pacman, &mut ghosts, &maze, &wave, false);
                if let Ok((mut pac, _)) = pacman.single_mut() {
                    pac.state = PacManState::Awake;
                }
                Some(GameStage::Playing)
            }
        }
        GameStage::GameOver { remaining } => {
            if remaining > 1 {
                Some(GameStage::GameOver { remaining: remaining - 1 })
            } else {
                Some(GameStage::Intro)
            }
        }
    };

    if let Some(next) = next {
        if std::mem::discriminant(&next) != std::mem::discriminant(&*stage) {
            debug!(from = ?*stage, to = ?next, "Game stage transition");
        }
        *stage = next;
    }
}
