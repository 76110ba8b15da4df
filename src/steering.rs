//! Steering behaviors.
//!
//! Every behavior is a plain function the actor systems dispatch from a
//! per-state table; behaviors set the actor's wish direction (or, for the
//! scripted house routes, drive the position directly) and leave the shared
//! kinematics to do the moving.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::TILE_SIZE;
use crate::map::builder::{Bed, Maze};
use crate::map::direction::Direction;
use crate::map::tile::Tile;
use crate::systems::movement::Actor;

/// The arcade ghost decision rule: at each tile entry, pick the enterable
/// neighbor (never the reverse) closest to the target, breaking ties in the
/// order UP, LEFT, DOWN, RIGHT.
///
/// Returns true when a decision point was evaluated this tick.
pub fn head_for_target(
    actor: &mut Actor,
    maze: &Maze,
    target: Tile,
    forced: bool,
    can_enter: &dyn Fn(Tile) -> bool,
) -> bool {
    if !(actor.entered_new_tile || forced) {
        return false;
    }
    let current = actor.tile();
    let opposite = actor.move_dir.opposite();
    let mut best: Option<(i32, Direction)> = None;
    for dir in Direction::PRIORITY {
        if dir == opposite {
            continue;
        }
        let neighbor = maze.neighbor(current, dir);
        if !can_enter(neighbor) {
            continue;
        }
        let distance = neighbor.manhattan(target);
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, dir));
        }
    }
    match best {
        Some((_, dir)) => actor.wish_dir = dir,
        None => trace!(tile = %current, "No forward direction available, staying course"),
    }
    true
}

/// Random movement that never reverses: re-rolled on tile entry or whenever
/// the current direction runs into a wall.
pub fn random_move(actor: &mut Actor, maze: &Maze, rng: &mut SmallRng, forced: bool, can_enter: &dyn Fn(Tile) -> bool) {
    let current = actor.tile();
    let blocked = !can_enter(maze.neighbor(current, actor.move_dir));
    if !(actor.entered_new_tile || forced || blocked) {
        return;
    }
    let opposite = actor.move_dir.opposite();
    let mut options: SmallVec<[Direction; 3]> = SmallVec::new();
    for dir in Direction::DIRECTIONS {
        if dir != opposite && can_enter(maze.neighbor(current, dir)) {
            options.push(dir);
        }
    }
    match options.choose(rng) {
        Some(dir) => actor.wish_dir = *dir,
        None => {
            // Dead end: the one case where reversing is allowed.
            trace!(tile = %current, "Dead end, reversing");
            actor.wish_dir = opposite;
        }
    }
}

/// Follows a cached path to a target tile, recomputing it whenever it no
/// longer starts at the actor or ends at the target.
///
/// Returns the tile the path currently leads to, for snapshot reporting.
pub fn follow_path(actor: &mut Actor, maze: &Maze, path: &mut Vec<Tile>, target: Tile) -> Option<Tile> {
    let current = actor.tile();
    if let Some(index) = path.iter().position(|tile| *tile == current) {
        path.drain(..index);
    }
    let invalid = path.first() != Some(&current) || path.last() != Some(&target);
    if invalid {
        *path = maze.find_path(current, target).unwrap_or_default();
    }
    steer_along(actor, maze, path);
    path.last().copied()
}

/// Flees to the safest corner: the cape maximizing the chaser's minimum
/// Manhattan distance to any tile on the escape path. A new corner is chosen
/// once the current one is reached.
pub fn flee_to_safe_corner(actor: &mut Actor, maze: &Maze, chaser: Tile, path: &mut Vec<Tile>) -> Option<Tile> {
    let current = actor.tile();
    if let Some(index) = path.iter().position(|tile| *tile == current) {
        path.drain(..index);
    }
    let arrived = path.len() < 2 || path.first() != Some(&current);
    if arrived {
        let mut best: Option<(i32, Vec<Tile>)> = None;
        for corner in maze.capes {
            if corner == current {
                continue;
            }
            let Some(escape) = maze.find_path(current, corner) else {
                continue;
            };
            let safety = escape.iter().map(|tile| tile.manhattan(chaser)).min().unwrap_or(i32::MAX);
            if best.as_ref().is_none_or(|(d, _)| safety > *d) {
                best = Some((safety, escape));
            }
        }
        if let Some((_, escape)) = best {
            *path = escape;
        }
    }
    steer_along(actor, maze, path);
    path.last().copied()
}

fn steer_along(actor: &mut Actor, maze: &Maze, path: &[Tile]) {
    if path.len() < 2 {
        return;
    }
    let dir = path[0]
        .dir_to(path[1])
        .or_else(|| Direction::DIRECTIONS.into_iter().find(|d| maze.neighbor(path[0], *d) == path[1]));
    if let Some(dir) = dir {
        actor.wish_dir = dir;
    }
}

/// Vertical oscillation on the bed while locked in the house.
pub fn bounce_on_bed(actor: &mut Actor, bed: &Bed, speed: f32) {
    const AMPLITUDE: f32 = 3.0;

    if !matches!(actor.move_dir, Direction::Up | Direction::Down) {
        actor.move_dir = Direction::Up;
    }
    let rest = bed.position().y;
    let delta = if actor.move_dir == Direction::Down { speed } else { -speed };
    let mut y = actor.position.y + delta;
    if y <= rest - AMPLITUDE {
        y = rest - AMPLITUDE;
        actor.move_dir = Direction::Down;
    } else if y >= rest + AMPLITUDE {
        y = rest + AMPLITUDE;
        actor.move_dir = Direction::Up;
    }
    actor.position.y = y;
    actor.wish_dir = actor.move_dir;
}

/// Scripted exit: slide onto the house center seam, then rise through the
/// door to the entry seat. Returns true once the actor stands on the seat.
pub fn leave_house(actor: &mut Actor, maze: &Maze, speed: f32) -> bool {
    let house = &maze.house;
    let seam_x = house.center_x - TILE_SIZE as f32 / 2.0;
    let exit_y = house.entry.position().y;

    if (actor.position.x - seam_x).abs() > f32::EPSILON {
        step_towards(actor, Vec2::new(seam_x, actor.position.y), speed);
        return false;
    }
    if actor.position.y > exit_y {
        actor.position.x = seam_x;
        step_towards(actor, Vec2::new(seam_x, exit_y), speed);
        return actor.position.y <= exit_y;
    }
    true
}

/// Scripted entry: descend from the entry seat through the door, then slide
/// sideways to the assigned bed. Returns true on arrival.
pub fn enter_house(actor: &mut Actor, maze: &Maze, bed: &Bed, speed: f32) -> bool {
    let seam_x = maze.house.center_x - TILE_SIZE as f32 / 2.0;
    let bed_position = bed.position();

    if actor.position.y < bed_position.y {
        if (actor.position.x - seam_x).abs() > f32::EPSILON {
            step_towards(actor, Vec2::new(seam_x, actor.position.y), speed);
        } else {
            step_towards(actor, Vec2::new(seam_x, bed_position.y), speed);
        }
        return false;
    }
    if (actor.position.x - bed_position.x).abs() > f32::EPSILON {
        step_towards(actor, bed_position, speed);
        return false;
    }
    true
}

/// Moves the actor straight towards a pixel target, clamping the final step,
/// and points it along the travel axis.
fn step_towards(actor: &mut Actor, target: Vec2, speed: f32) {
    let delta = target - actor.position;
    if delta.x.abs() > f32::EPSILON {
        let step = delta.x.abs().min(speed) * delta.x.signum();
        actor.position.x += step;
        actor.move_dir = if step < 0.0 { Direction::Left } else { Direction::Right };
    } else if delta.y.abs() > f32::EPSILON {
        let step = delta.y.abs().min(speed) * delta.y.signum();
        actor.position.y += step;
        actor.move_dir = if step < 0.0 { Direction::Up } else { Direction::Down };
    }
    actor.wish_dir = actor.move_dir;
}
