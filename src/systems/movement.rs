//! Shared actor kinematics.
//!
//! Pac-Man and the ghosts move under the same contract: a steering supplies a
//! wish direction, the mover turns when the corridor permits (snapping to the
//! tile grid on 90-degree turns), speed is capped so actors halt flush
//! against walls, and the tunnel row teleports across the board edges.

use bevy_ecs::component::Component;
use glam::Vec2;

use crate::constants::TILE_SIZE;
use crate::map::builder::{Bed, Maze};
use crate::map::direction::Direction;
use crate::map::tile::Tile;

/// Movement regime of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    #[default]
    Normal,
    /// Crossing the gap outside the tunnel row.
    Teleporting,
}

/// Kinematic state shared by every maze mover. The collision box is exactly
/// one tile; sprites may be larger, but that is a view concern.
#[derive(Component, Debug, Clone)]
pub struct Actor {
    /// Top-left corner of the collision box, in pixels.
    pub position: Vec2,
    pub move_dir: Direction,
    pub wish_dir: Direction,
    pub move_state: MoveState,
    pub visible: bool,
    pub enabled: bool,
    /// Set on each tick whose movement crossed into a new center tile.
    pub entered_new_tile: bool,
}

impl Actor {
    pub fn new() -> Actor {
        Actor {
            position: Vec2::ZERO,
            move_dir: Direction::Left,
            wish_dir: Direction::Left,
            move_state: MoveState::Normal,
            visible: true,
            enabled: true,
            entered_new_tile: true,
        }
    }

    /// The tile containing the actor's center point.
    pub fn tile(&self) -> Tile {
        let half = TILE_SIZE as f32 / 2.0;
        Tile::new(
            ((self.position.x + half) / TILE_SIZE as f32).floor() as i32,
            ((self.position.y + half) / TILE_SIZE as f32).floor() as i32,
        )
    }

    /// Pixel offset of the collision box within its current tile.
    pub fn tile_offset(&self) -> Vec2 {
        self.position - self.tile().position()
    }

    /// Places the actor at a tile with a pixel offset, facing `dir`.
    pub fn place_at(&mut self, tile: Tile, offset: Vec2, dir: Direction) {
        self.position = tile.position() + offset;
        self.move_dir = dir;
        self.wish_dir = dir;
        self.move_state = MoveState::Normal;
        self.entered_new_tile = true;
    }

    /// Parks the actor on a bed: half a tile right of the bed tile, facing
    /// the bed's exit direction.
    pub fn park_on(&mut self, bed: &Bed) {
        self.position = bed.position();
        self.move_dir = bed.exit_dir;
        self.wish_dir = bed.exit_dir;
        self.move_state = MoveState::Normal;
        self.entered_new_tile = true;
    }

    /// Snaps the actor exactly onto its current tile.
    pub fn align_to_tile(&mut self) {
        self.position = self.tile().position();
    }

    /// Whether the actor sits exactly on its tile grid position.
    pub fn is_aligned(&self) -> bool {
        self.tile_offset() == Vec2::ZERO
    }
}

impl Default for Actor {
    fn default() -> Self {
        Actor::new()
    }
}

/// How many pixels the actor may move towards `dir` this tick.
///
/// Full speed when the neighbor tile is enterable; otherwise the remaining
/// distance inside the current tile, so the actor stops flush against the
/// obstacle. In teleport space only horizontal motion exists.
pub fn max_speed(actor: &Actor, maze: &Maze, dir: Direction, speed: f32, can_enter: &dyn Fn(Tile) -> bool) -> f32 {
    let current = actor.tile();
    if maze.in_teleport_space(current) {
        return if dir.is_horizontal() { speed } else { 0.0 };
    }
    let neighbor = maze.neighbor(current, dir);
    if can_enter(neighbor) {
        return speed;
    }
    let tile_px = TILE_SIZE as f32;
    let capped = match dir {
        Direction::Right => current.col as f32 * tile_px - actor.position.x,
        Direction::Left => actor.position.x - current.col as f32 * tile_px,
        Direction::Up => actor.position.y - current.row as f32 * tile_px,
        Direction::Down => current.row as f32 * tile_px - actor.position.y,
    };
    capped.clamp(0.0, speed)
}

/// Advances an actor by one tick.
///
/// The wish direction is adopted if the corridor allows any movement that
/// way (with a grid snap on 90-degree turns); otherwise the actor continues
/// along its current direction as far as the maze permits.
pub fn move_actor(actor: &mut Actor, maze: &Maze, speed: f32, can_enter: &dyn Fn(Tile) -> bool) {
    let old_tile = actor.tile();

    let mut step = max_speed(actor, maze, actor.wish_dir, speed, can_enter);
    if step > 0.0 {
        if actor.move_dir.turns_90(actor.wish_dir) {
            actor.align_to_tile();
        }
        actor.move_dir = actor.wish_dir;
    } else {
        step = max_speed(actor, maze, actor.move_dir, speed, can_enter);
    }

    if step > 0.0 {
        actor.position += actor.move_dir.as_ivec2().as_vec2() * step;

        // Wrap once the collision box has fully left the board.
        let world_px = (maze.width() * TILE_SIZE) as f32;
        if actor.position.x + (TILE_SIZE as f32) < 0.0 {
            actor.position.x = world_px;
        } else if actor.position.x > world_px {
            actor.position.x = -(TILE_SIZE as f32);
        }
    }

    // Off-grid is a programming error; debug builds trip, release builds
    // snap the actor back to its last valid tile and keep running.
    let tile = actor.tile();
    if !maze.contains(tile) && !maze.in_teleport_space(tile) {
        debug_assert!(false, "actor off grid at {tile}");
        tracing::error!(%tile, last = %old_tile, "Actor off grid, snapping back");
        actor.position = old_tile.position();
    }

    actor.move_state = if maze.in_teleport_space(actor.tile()) {
        MoveState::Teleporting
    } else {
        MoveState::Normal
    };
    actor.entered_new_tile = actor.tile() != old_tile;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_tile_invariant() {
        let mut actor = Actor::new();
        actor.position = Vec2::new(108.0, 208.0);
        // floor((108 + 4) / 8) = 14, floor((208 + 4) / 8) = 26
        assert_eq!(actor.tile(), Tile::new(14, 26));

        actor.position = Vec2::new(107.9, 208.0);
        assert_eq!(actor.tile(), Tile::new(13, 26));
    }

    #[test]
    fn test_alignment() {
        let mut actor = Actor::new();
        actor.place_at(Tile::new(5, 5), Vec2::ZERO, Direction::Left);
        assert!(actor.is_aligned());
        actor.position.x += 3.0;
        assert!(!actor.is_aligned());
        actor.align_to_tile();
        assert!(actor.is_aligned());
    }
}
