use std::fmt;

use glam::{IVec2, Vec2};

use crate::constants::TILE_SIZE;
use crate::map::direction::Direction;

/// A maze coordinate: one 8-pixel square cell, addressed by column and row.
///
/// Tiles compare by coordinate equality and may lie outside the board; ghost
/// target arithmetic (Pinky's look-ahead, Inky's mirror) produces such tiles
/// routinely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub col: i32,
    pub row: i32,
}

impl Tile {
    /// The size of a tile edge, in pixels.
    pub const SIZE: i32 = TILE_SIZE;

    pub const fn new(col: i32, row: i32) -> Tile {
        Tile { col, row }
    }

    /// The tile `n` steps towards `dir` from this tile. No wrapping; the
    /// result may be outside the board.
    pub fn towards(self, dir: Direction, n: i32) -> Tile {
        let v = self.as_ivec2() + dir.as_ivec2() * n;
        Tile::new(v.x, v.y)
    }

    /// Manhattan (L1) distance to `other`. Valid for tiles outside the board.
    pub fn manhattan(self, other: Tile) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }

    /// Squared Euclidean distance in tile units.
    pub fn distance_squared(self, other: Tile) -> i32 {
        let dx = self.col - other.col;
        let dy = self.row - other.row;
        dx * dx + dy * dy
    }

    /// The direction from this tile to an adjacent tile, if they are neighbors.
    pub fn dir_to(self, other: Tile) -> Option<Direction> {
        Direction::DIRECTIONS
            .into_iter()
            .find(|dir| self.towards(*dir, 1) == other)
    }

    /// Pixel position of this tile's top-left corner.
    pub fn position(self) -> Vec2 {
        Vec2::new((self.col * Self::SIZE) as f32, (self.row * Self::SIZE) as f32)
    }

    /// Pixel position of this tile's center.
    pub fn center(self) -> Vec2 {
        self.position() + Vec2::splat(Self::SIZE as f32 / 2.0)
    }

    pub const fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.col, self.row)
    }
}

impl From<IVec2> for Tile {
    fn from(v: IVec2) -> Self {
        Tile::new(v.x, v.y)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}
