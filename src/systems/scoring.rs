//! The once-per-tick event drain: scoring, power handling and the
//! event-driven stage transitions.
//!
//! Events written by earlier systems this tick are all consumed here; events
//! this drain itself produces (power-up, level completion) surface on the
//! next tick, which keeps every state machine free of re-entrant updates.

use bevy_ecs::event::{EventCursor, Events};
use bevy_ecs::query::Without;
use bevy_ecs::system::{Local, Query, Res, ResMut};
use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::{
    sec, BONUS_CONSUMED_TICKS, BONUS_MILESTONES, ENERGIZER_POINTS, FIRST_GHOST_POINTS, GHOST_DYING_TICKS,
    PELLET_POINTS, TICKS_PER_SECOND,
};
use crate::events::GameEvent;
use crate::level::level_params;
use crate::map::builder::Maze;
use crate::rng::GameRng;
use crate::snapshot::{AudioCue, CueBuffer};
use crate::systems::attack::AttackWave;
use crate::systems::bonus::Bonus;
use crate::systems::components::{GameData, Ghost, GhostState, PacMan, PacManState, Regime};
use crate::systems::controller::{changing_level_ticks, GameStage};
use crate::systems::house::Doorman;
use crate::systems::movement::Actor;

#[allow(clippy::too_many_arguments)]
pub fn scoring_system(
    mut cursor: Local<EventCursor<GameEvent>>,
    mut events: ResMut<Events<GameEvent>>,
    config: Res<Config>,
    maze: Res<Maze>,
    mut data: ResMut<GameData>,
    mut wave: ResMut<AttackWave>,
    mut doorman: ResMut<Doorman>,
    mut bonus: ResMut<Bonus>,
    mut rng: ResMut<GameRng>,
    mut stage: ResMut<GameStage>,
    mut cues: ResMut<CueBuffer>,
    mut pacman: Query<(&mut PacMan, &mut Actor)>,
    mut ghosts: Query<(&mut Ghost, &mut Actor), Without<PacMan>>,
) {
    let pending: SmallVec<[GameEvent; 8]> = cursor.read(&events).copied().collect();
    let mut deferred: SmallVec<[GameEvent; 2]> = SmallVec::new();
    let params = level_params(data.level);

    for event in pending {
        match event {
            GameEvent::FoodFound { energizer, .. } => {
                let points = if energizer { ENERGIZER_POINTS } else { PELLET_POINTS };
                let extra_life = data.score_points(points);
                cues.push(if energizer { AudioCue::AteEnergizer } else { AudioCue::AtePellet });
                if extra_life {
                    cues.push(AudioCue::ExtraLife);
                }
                if maze.food_remaining() == 0 {
                    deferred.push(GameEvent::LevelCompleted);
                } else if BONUS_MILESTONES.contains(&maze.food_eaten()) {
                    let display_ticks = sec(9.0) + rng.0.random_range(0..TICKS_PER_SECOND);
                    bonus.activate(params.bonus_symbol, params.bonus_value, display_ticks);
                }
                if energizer && maze.food_remaining() > 0 {
                    deferred.push(GameEvent::PacManGainsPower);
                }
            }
            GameEvent::BonusFound { .. } => {
                let extra_life = data.score_points(bonus.value);
                info!(symbol = bonus.symbol.as_ref(), value = bonus.value, "Bonus eaten");
                bonus.consume(BONUS_CONSUMED_TICKS);
                cues.push(AudioCue::AteFruit);
                if extra_life {
                    cues.push(AudioCue::ExtraLife);
                }
            }
            GameEvent::PacManGainsPower => {
                data.ghosts_killed_by_energizer = 0;
                let power_ticks = sec(params.fright_seconds as f32);
                if power_ticks > 0 {
                    wave.suspended = true;
                    if let Ok((mut pac, _)) = pacman.single_mut() {
                        pac.state = PacManState::Powerful;
                        pac.power = power_ticks;
                    }
                }
                for (mut ghost, mut actor) in ghosts.iter_mut() {
                    if matches!(ghost.state, GhostState::Chasing | GhostState::Scattering) {
                        // The one sanctioned reversal.
                        actor.move_dir = actor.move_dir.opposite();
                        actor.wish_dir = actor.move_dir;
                        if power_ticks > 0 {
                            ghost.enter_state(GhostState::Frightened);
                        } else {
                            ghost.forced = true;
                        }
                    }
                }
                debug!(power_ticks, "Energizer took effect");
            }
            GameEvent::PacManLostPower => {
                wave.suspended = false;
                let regime_state = match wave.regime() {
                    Regime::Scattering => GhostState::Scattering,
                    Regime::Chasing => GhostState::Chasing,
                };
                for (mut ghost, _) in ghosts.iter_mut() {
                    if ghost.state == GhostState::Frightened {
                        ghost.enter_state(regime_state);
                    }
                }
            }
            GameEvent::GhostKilled { ghost: name } => {
                if !matches!(*stage, GameStage::Playing | GameStage::GhostDying { .. }) {
                    continue;
                }
                let points = FIRST_GHOST_POINTS << data.ghosts_killed_by_energizer;
                let extra_life = data.score_points(points);
                info!(ghost = name.as_ref(), points, "Ghost killed");
                cues.push(AudioCue::AteGhost);
                if extra_life {
                    cues.push(AudioCue::ExtraLife);
                }
                data.ghosts_killed_by_energizer = (data.ghosts_killed_by_energizer + 1).min(4);

                for (mut ghost, mut actor) in ghosts.iter_mut() {
                    if ghost.name == name {
                        ghost.enter_state(GhostState::Dying);
                        actor.visible = false;
                    }
                }
                if let Ok((_, mut actor)) = pacman.single_mut() {
                    actor.visible = false;
                }
                *stage = GameStage::GhostDying {
                    remaining: GHOST_DYING_TICKS,
                };
            }
            GameEvent::PacManKilled { by } => {
                if !stage.is_playing() {
                    continue;
                }
                info!(ghost = by.as_ref(), "Pac-Man killed");
                if config.immortal_pacman {
                    debug!("Immortality on, keeping the life");
                } else {
                    data.lives = data.lives.saturating_sub(1);
                }
                data.ghosts_killed_by_energizer = 0;
                doorman.enable_global_counter();
                wave.init(data.level);
                if let Ok((mut pac, _)) = pacman.single_mut() {
                    pac.state = PacManState::Dead;
                    pac.power = 0;
                    pac.digestion = 0;
                }
                cues.push(AudioCue::PacManDied);
                let total = if data.lives > 0 { sec(6.0) } else { sec(4.0) };
                *stage = GameStage::PacDying { remaining: total, total };
            }
            GameEvent::LevelCompleted => {
                info!(level = data.level, "Level completed");
                cues.push(AudioCue::LevelComplete);
                for (_, mut actor) in ghosts.iter_mut() {
                    actor.visible = false;
                }
                *stage = GameStage::ChangingLevel {
                    remaining: changing_level_ticks(data.level),
                };
            }
            // Regime switches and unlocks are consumed by the ghost system.
            GameEvent::StartChasing
            | GameEvent::StartScattering
            | GameEvent::GhostUnlocked { .. }
            | GameEvent::PacManGettingWeaker => {}
        }
    }

    for event in deferred {
        events.send(event);
    }
}
