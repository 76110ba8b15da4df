//! The per-ghost state machine: regimes, targets and movement.

use bevy_ecs::event::EventReader;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res};
use tracing::{debug, trace};

use crate::config::Config;
use crate::constants::{speed, GHOST_DYING_TICKS};
use crate::events::GameEvent;
use crate::level::{level_params, LevelParams};
use crate::map::builder::{Bed, Maze};
use crate::map::direction::Direction;
use crate::map::tile::Tile;
use crate::rng::fright_rng;
use crate::steering;
use crate::systems::components::{GameData, Ghost, GhostName, GhostState, PacMan, Regime};
use crate::systems::controller::GameStage;
use crate::systems::movement::{move_actor, Actor};

/// Computes the tile `n` tiles ahead of an actor.
///
/// With the overflow bug left in place (the arcade default), looking ahead
/// while facing up also shifts the target `n` tiles to the left.
pub fn tiles_ahead(tile: Tile, dir: Direction, n: i32, fix_overflow_bug: bool) -> Tile {
    let ahead = tile.towards(dir, n);
    if dir == Direction::Up && !fix_overflow_bug {
        ahead.towards(Direction::Left, n)
    } else {
        ahead
    }
}

/// The chase-mode target tile for a ghost.
pub fn chase_target(
    name: GhostName,
    ghost_tile: Tile,
    pac_tile: Tile,
    pac_dir: Direction,
    blinky_tile: Tile,
    scatter: Tile,
    fix_overflow_bug: bool,
) -> Tile {
    match name {
        GhostName::Blinky => pac_tile,
        GhostName::Pinky => tiles_ahead(pac_tile, pac_dir, 4, fix_overflow_bug),
        GhostName::Inky => {
            let pivot = tiles_ahead(pac_tile, pac_dir, 2, fix_overflow_bug);
            Tile::new(2 * pivot.col - blinky_tile.col, 2 * pivot.row - blinky_tile.row)
        }
        GhostName::Clyde => {
            // Shadows Pac-Man from afar, shies back to his corner up close.
            if ghost_tile.distance_squared(pac_tile) > 64 {
                pac_tile
            } else {
                scatter
            }
        }
    }
}

/// Cruise Elroy stage for Blinky: 0, 1 or 2 depending on remaining food.
fn elroy_stage(params: &LevelParams, food_remaining: u32) -> u8 {
    if food_remaining < params.elroy2_dots {
        2
    } else if food_remaining < params.elroy1_dots {
        1
    } else {
        0
    }
}

/// Whether a tile lies in the slow tunnel corridors.
fn in_tunnel(maze: &Maze, tile: Tile) -> bool {
    tile.row == maze.tunnel_row && (tile.col < 6 || tile.col > 21)
}

/// Speed of a ghost this tick, in pixels.
fn ghost_speed(ghost: &Ghost, tile: Tile, maze: &Maze, params: &LevelParams, food_remaining: u32) -> f32 {
    let fraction = match ghost.state {
        GhostState::Locked | GhostState::LeavingHouse | GhostState::EnteringHouse => params.ghost_speed * 0.5,
        GhostState::Dying => 0.0,
        // Eyes race home at twice the body speed.
        GhostState::Dead => params.ghost_speed * 2.0,
        GhostState::Frightened => {
            if in_tunnel(maze, tile) {
                params.ghost_tunnel_speed
            } else {
                params.ghost_fright_speed
            }
        }
        GhostState::Chasing | GhostState::Scattering => {
            if in_tunnel(maze, tile) {
                params.ghost_tunnel_speed
            } else if ghost.name == GhostName::Blinky {
                match elroy_stage(params, food_remaining) {
                    2 => params.elroy2_speed,
                    1 => params.elroy1_speed,
                    _ => params.ghost_speed,
                }
            } else {
                params.ghost_speed
            }
        }
    };
    speed(fraction)
}

/// Traversal rule for a ghost: door and house interior open up only to the
/// house regimes.
fn ghost_can_enter(maze: &Maze, state: GhostState, tile: Tile) -> bool {
    if !maze.is_accessible(tile) {
        return false;
    }
    if maze.is_door(tile) || maze.house.contains(tile) {
        return state.in_house_regime();
    }
    true
}

/// Reverses an actor in place; used on fright onset and regime switches,
/// the only times the no-reverse rule is suspended.
fn reverse(actor: &mut Actor) {
    actor.move_dir = actor.move_dir.opposite();
    actor.wish_dir = actor.move_dir;
}

fn bed_for<'m>(maze: &'m Maze, name: GhostName) -> &'m Bed {
    match name {
        // Blinky never slept inside; eaten, he borrows the center bed.
        GhostName::Blinky | GhostName::Pinky => &maze.house.pinky_bed,
        GhostName::Inky => &maze.house.inky_bed,
        GhostName::Clyde => &maze.house.clyde_bed,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn ghost_system(
    stage: Res<GameStage>,
    config: Res<Config>,
    data: Res<GameData>,
    maze: Res<Maze>,
    mut events: EventReader<GameEvent>,
    pacman: Query<&Actor, With<PacMan>>,
    mut ghosts: Query<(&mut Ghost, &mut Actor), Without<PacMan>>,
) {
    // Which ghosts advance depends on the top-level stage.
    let updates = |ghost: &Ghost| match *stage {
        GameStage::Playing => true,
        GameStage::GettingReady { .. } | GameStage::StartPlaying { .. } => ghost.state == GhostState::Locked,
        GameStage::GhostDying { .. } => matches!(
            ghost.state,
            GhostState::Dying | GhostState::Dead | GhostState::EnteringHouse
        ),
        _ => false,
    };
    if matches!(
        *stage,
        GameStage::Intro | GameStage::ChangingLevel { .. } | GameStage::PacDying { .. } | GameStage::GameOver { .. }
    ) {
        events.clear();
        return;
    }

    let params = level_params(data.level);
    let playing = stage.is_playing();

    let (pac_tile, pac_dir) = pacman
        .single()
        .map(|actor| (actor.tile(), actor.move_dir))
        .unwrap_or((maze.pacman_seat.tile, Direction::Left));
    let blinky_tile = ghosts
        .iter()
        .find(|(ghost, _)| ghost.name == GhostName::Blinky)
        .map(|(_, actor)| actor.tile())
        .unwrap_or(maze.house.entry.tile);

    // Regime switches and unlocks announced earlier this tick.
    let mut regime_switch = None;
    let mut unlocked: Vec<GhostName> = Vec::new();
    for event in events.read() {
        match event {
            GameEvent::StartScattering => regime_switch = Some(Regime::Scattering),
            GameEvent::StartChasing => regime_switch = Some(Regime::Chasing),
            GameEvent::GhostUnlocked { ghost } => unlocked.push(*ghost),
            _ => {}
        }
    }

    for (mut ghost, mut actor) in ghosts.iter_mut() {
        if !updates(&ghost) || !actor.enabled {
            continue;
        }
        let ghost = &mut *ghost;
        ghost.state_ticks += 1;

        // Ghosts leaving the house adopt whatever regime is current.
        if playing {
            if let Some(regime) = regime_switch {
                ghost.next_state = regime;
            }
        }

        // Doorman release.
        if ghost.state == GhostState::Locked && unlocked.contains(&ghost.name) {
            ghost.released = true;
            ghost.enter_state(GhostState::LeavingHouse);
            trace!(ghost = ghost.name.as_ref(), "Leaving house");
        }

        // Scatter/chase flips reverse the ghost on the spot.
        if let Some(regime) = regime_switch {
            match (ghost.state, regime) {
                (GhostState::Chasing, Regime::Scattering) => {
                    ghost.enter_state(GhostState::Scattering);
                    reverse(&mut actor);
                }
                (GhostState::Scattering, Regime::Chasing) => {
                    ghost.enter_state(GhostState::Chasing);
                    reverse(&mut actor);
                }
                _ => {}
            }
        }

        let pace = ghost_speed(ghost, actor.tile(), &maze, params, maze.food_remaining());
        let scatter = maze.scatter_targets[ghost.name.as_usize()];

        match ghost.state {
            GhostState::Locked => {
                let bed = if ghost.name == GhostName::Blinky {
                    &maze.house.entry
                } else {
                    bed_for(&maze, ghost.name)
                };
                steering::bounce_on_bed(&mut actor, bed, pace);
                ghost.target = None;
            }
            GhostState::LeavingHouse => {
                if steering::leave_house(&mut actor, &maze, pace) {
                    let next = match ghost.next_state {
                        Regime::Scattering => GhostState::Scattering,
                        Regime::Chasing => GhostState::Chasing,
                    };
                    ghost.enter_state(next);
                    actor.move_dir = Direction::Left;
                    actor.wish_dir = Direction::Left;
                    debug!(ghost = ghost.name.as_ref(), state = next.as_ref(), "Ghost left house");
                }
            }
            GhostState::Chasing | GhostState::Scattering => {
                let target = if ghost.state == GhostState::Chasing {
                    chase_target(
                        ghost.name,
                        actor.tile(),
                        pac_tile,
                        pac_dir,
                        blinky_tile,
                        scatter,
                        config.fix_overflow_bug,
                    )
                } else {
                    scatter
                };
                ghost.target = Some(target);
                let state = ghost.state;
                let decided = steering::head_for_target(&mut actor, &maze, target, ghost.forced, &|tile| {
                    ghost_can_enter(&maze, state, tile)
                });
                if decided {
                    ghost.forced = false;
                }
                move_actor(&mut actor, &maze, pace, &|tile| ghost_can_enter(&maze, state, tile));
            }
            GhostState::Frightened => {
                let state = ghost.state;
                if config.flee_randomly {
                    let mut rng = fright_rng(config.seed, data.tick, ghost.name);
                    steering::random_move(&mut actor, &maze, &mut rng, ghost.forced, &|tile| {
                        ghost_can_enter(&maze, state, tile)
                    });
                    ghost.target = None;
                } else {
                    ghost.target = steering::flee_to_safe_corner(&mut actor, &maze, pac_tile, &mut ghost.path);
                }
                ghost.forced = false;
                move_actor(&mut actor, &maze, pace, &|tile| ghost_can_enter(&maze, state, tile));
            }
            GhostState::Dying => {
                if ghost.state_ticks >= GHOST_DYING_TICKS {
                    ghost.enter_state(GhostState::Dead);
                    actor.visible = true;
                    debug!(ghost = ghost.name.as_ref(), "Ghost eyes heading home");
                }
            }
            GhostState::Dead => {
                let entry = maze.house.entry.tile;
                ghost.target = Some(entry);
                if actor.tile() == entry {
                    ghost.enter_state(GhostState::EnteringHouse);
                } else {
                    let state = ghost.state;
                    let decided = steering::head_for_target(&mut actor, &maze, entry, ghost.forced, &|tile| {
                        ghost_can_enter(&maze, state, tile)
                    });
                    if decided {
                        ghost.forced = false;
                    }
                    move_actor(&mut actor, &maze, pace, &|tile| ghost_can_enter(&maze, state, tile));
                }
            }
            GhostState::EnteringHouse => {
                let bed = bed_for(&maze, ghost.name);
                ghost.target = Some(bed.tile);
                if steering::enter_house(&mut actor, &maze, bed, pace) {
                    if ghost.released {
                        ghost.enter_state(GhostState::LeavingHouse);
                    } else {
                        ghost.enter_state(GhostState::Locked);
                    }
                    debug!(ghost = ghost.name.as_ref(), released = ghost.released, "Ghost reached bed");
                }
            }
        }
    }
}
